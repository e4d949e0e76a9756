use async_graphql::{Context, ErrorExtensions, Object, Result};
use blogql_common_types::inputs;
use blogql_store::models::{IntId, NewAuthor, UpdateAuthor};

use super::{api_types, ctx_data};

/// Author queries, merged into the root `Query` type.
#[derive(Default)]
pub struct AuthorQuery;

#[Object]
impl AuthorQuery {
    /// Fetches all authors known to this blogql instance.
    async fn authors(
        &self,
        ctx: &Context<'_>,
        limit: Option<u16>,
    ) -> Result<Vec<api_types::Author>> {
        let filter = inputs::AuthorsQuery { limit };

        let ctx_data = ctx_data(ctx);
        Ok(ctx_data
            .store
            .authors(filter)
            .await
            .map_err(|e| e.extend())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Fetches a single author by id, if it exists.
    async fn author(&self, ctx: &Context<'_>, id: IntId) -> Result<Option<api_types::Author>> {
        let ctx_data = ctx_data(ctx);

        Ok(ctx_data
            .store
            .author_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .map(Into::into))
    }
}

/// Author mutations, merged into the root `Mutation` type.
#[derive(Default)]
pub struct AuthorMutation;

#[Object]
impl AuthorMutation {
    /// Creates a new author. The store assigns the id.
    async fn create_author(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
    ) -> Result<api_types::Author> {
        let store = &ctx_data(ctx).store;

        let author = store
            .create_author(&NewAuthor {
                first_name,
                last_name,
            })
            .await
            .map_err(|e| e.extend())?;

        Ok(author.into())
    }

    /// Updates an author's name. Omitted fields are left untouched.
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        author_id: IntId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<api_types::Author> {
        let store = &ctx_data(ctx).store;

        let author = store
            .update_author(
                author_id,
                &UpdateAuthor {
                    first_name,
                    last_name,
                },
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(author.into())
    }

    /// Deletes an author, reporting whether anything was removed. The
    /// author's posts are kept and left without an author.
    async fn delete_author(&self, ctx: &Context<'_>, author_id: IntId) -> Result<bool> {
        let store = &ctx_data(ctx).store;

        Ok(store
            .delete_author(author_id)
            .await
            .map_err(|e| e.extend())?)
    }
}
