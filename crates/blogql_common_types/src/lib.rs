//! Types shared between the blogql GraphQL API and the data store.

pub mod inputs;

use async_graphql::ErrorExtensions;

/// Database-assigned entity ids are plain integers.
pub type IntId = i32;

/// Every failure the API surfaces to clients falls into one of these
/// categories. Resolvers never swallow errors; they convert them into
/// structured GraphQL errors via [`ErrorExtensions`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An operation referenced an id with no matching record.
    #[error("no {entity} with id {id}")]
    NotFound { entity: &'static str, id: IntId },
    /// The request was well-formed GraphQL but invalid for the operation.
    #[error("{0}")]
    Validation(String),
    /// The data store failed. The underlying error is passed through
    /// untouched.
    #[error(transparent)]
    DataAccess(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: IntId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Machine-readable error code, exposed as the `code` GraphQL error
    /// extension.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::DataAccess(_) => "DATA_ACCESS",
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DataAccess(err.into())
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let ApiError::NotFound { id, .. } = self {
                e.set("id", *id);
            }
        })
    }
}
