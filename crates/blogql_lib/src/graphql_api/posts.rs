use async_graphql::{Context, ErrorExtensions, Object, Result};
use blogql_common_types::inputs;
use blogql_store::models::{IntId, NewPost, UpdatePost};

use super::{api_types, ctx_data};

/// Post queries, merged into the root `Query` type.
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Fetches all posts and filters them according to some filtering
    /// rules.
    async fn posts(
        &self,
        ctx: &Context<'_>,
        author_id: Option<IntId>,
        limit: Option<u16>,
    ) -> Result<Vec<api_types::Post>> {
        let filter = inputs::PostsQuery { author_id, limit };

        let ctx_data = ctx_data(ctx);
        Ok(ctx_data
            .store
            .posts(filter)
            .await
            .map_err(|e| e.extend())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Fetches a single post by id, if it exists.
    async fn post(&self, ctx: &Context<'_>, id: IntId) -> Result<Option<api_types::Post>> {
        let ctx_data = ctx_data(ctx);

        Ok(ctx_data
            .store
            .post_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .map(Into::into))
    }
}

/// Post mutations, merged into the root `Mutation` type.
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Publishes a new post with zero votes. The referenced author must
    /// exist.
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        author_id: IntId,
    ) -> Result<api_types::Post> {
        let store = &ctx_data(ctx).store;

        let post = store
            .create_post(&NewPost { title, author_id })
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    /// Updates a post's title and/or moves it to another author. Omitted
    /// fields are left untouched.
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        post_id: IntId,
        title: Option<String>,
        author_id: Option<IntId>,
    ) -> Result<api_types::Post> {
        let store = &ctx_data(ctx).store;

        let post = store
            .update_post(post_id, &UpdatePost { title, author_id })
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    /// Deletes a post. Requesting an id with no matching post is an error.
    async fn delete_post(&self, ctx: &Context<'_>, post_id: IntId) -> Result<bool> {
        let store = &ctx_data(ctx).store;

        store.delete_post(post_id).await.map_err(|e| e.extend())?;

        Ok(true)
    }

    /// Increments a post's vote count by one and returns the updated post.
    async fn upvote_post(&self, ctx: &Context<'_>, post_id: IntId) -> Result<api_types::Post> {
        let store = &ctx_data(ctx).store;

        let post = store.upvote_post(post_id).await.map_err(|e| e.extend())?;

        Ok(post.into())
    }
}
