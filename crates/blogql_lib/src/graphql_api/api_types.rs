use async_graphql::{Context, Object};
use blogql_store::models::{self, IntId};
use blogql_store::ByAuthor;

use super::{ctx_data, ApiSchemaContext};

/// An author known to this blogql instance.
#[derive(Clone, derive_more::From)]
pub struct Author {
    model: models::Author,
}

impl Author {
    pub fn id(&self) -> IntId {
        self.model.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.model.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.model.last_name.as_deref()
    }

    pub async fn posts(&self, ctx: &ApiSchemaContext) -> Result<Vec<Post>, String> {
        let loader = &ctx.loader_author_posts;

        Ok(loader
            .load_one(ByAuthor(self.model.id))
            .await?
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

#[Object]
impl Author {
    #[graphql(name = "id")]
    async fn graphql_id(&self) -> IntId {
        self.model.id
    }

    /// The author's first name, if known.
    #[graphql(name = "firstName")]
    async fn graphql_first_name(&self) -> Option<String> {
        self.model.first_name.clone()
    }

    /// The author's last name, if known.
    #[graphql(name = "lastName")]
    async fn graphql_last_name(&self) -> Option<String> {
        self.model.last_name.clone()
    }

    /// All posts written by this author, oldest first. Empty if the author
    /// has not published anything.
    #[graphql(name = "posts")]
    async fn graphql_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>, String> {
        self.posts(ctx_data(ctx)).await
    }
}

/// A post published on the blog.
#[derive(Clone, derive_more::From)]
pub struct Post {
    model: models::Post,
}

impl Post {
    pub fn id(&self) -> IntId {
        self.model.id
    }

    pub fn title(&self) -> Option<&str> {
        self.model.title.as_deref()
    }

    pub fn votes(&self) -> i32 {
        self.model.votes
    }

    pub async fn author(&self, ctx: &ApiSchemaContext) -> Result<Option<Author>, String> {
        let loader = &ctx.loader_author;

        match self.model.author_id {
            Some(author_id) => loader
                .load_one(author_id)
                .await
                .map(|opt| opt.map(Into::into))
                .map_err(Into::into),
            // The post was orphaned by its author's deletion.
            None => Ok(None),
        }
    }
}

#[Object]
impl Post {
    #[graphql(name = "id")]
    async fn graphql_id(&self) -> IntId {
        self.model.id
    }

    /// The post's title, if it has one.
    #[graphql(name = "title")]
    async fn graphql_title(&self) -> Option<String> {
        self.model.title.clone()
    }

    /// How many upvotes the post has received.
    #[graphql(name = "votes")]
    async fn graphql_votes(&self) -> i32 {
        self.model.votes
    }

    /// The author of this post, or null if the author was deleted.
    #[graphql(name = "author")]
    async fn graphql_author(&self, ctx: &Context<'_>) -> Result<Option<Author>, String> {
        self.author(ctx_data(ctx)).await
    }
}
