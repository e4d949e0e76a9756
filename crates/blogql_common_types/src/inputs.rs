//! Filters that the GraphQL API accepts on its list queries.

use crate::IntId;

/// A filter for authors.
#[derive(Debug, Default)]
pub struct AuthorsQuery {
    /// Upper limit on the number of shown results.
    pub limit: Option<u16>,
}

/// A filter for posts.
#[derive(Debug, Default)]
pub struct PostsQuery {
    /// Restricts the query to posts written by the given author.
    pub author_id: Option<IntId>,
    /// Upper limit on the number of shown results.
    pub limit: Option<u16>,
}
