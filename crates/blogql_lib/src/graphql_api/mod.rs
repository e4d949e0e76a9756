//! The GraphQL API: per-entity query/mutation namespaces composed into a
//! single schema over the store.

pub mod api_types;
mod authors;
mod posts;

use std::time::Duration;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, EmptySubscription, MergedObject, Schema, SchemaBuilder};
use blogql_store::{models, Store, StoreLoader};

pub use self::authors::{AuthorMutation, AuthorQuery};
pub use self::posts::{PostMutation, PostQuery};

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The root `Query` type, merged from the per-entity query namespaces.
/// Merging happens once, when the schema is built; a field claimed by more
/// than one namespace fails schema construction.
#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthorQuery, PostQuery);

/// The root `Mutation` type, merged from the per-entity mutation
/// namespaces.
#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthorMutation, PostMutation);

pub struct ApiSchemaContext {
    pub store: Store,
    pub loader_author: DataLoader<StoreLoader<models::Author>>,
    pub loader_author_posts: DataLoader<StoreLoader<models::Post>>,
}

impl ApiSchemaContext {
    pub fn new(store: Store) -> Self {
        // The default delay is 1ms, but we're happy to wait a bit longer to
        // reduce load on the database.
        let delay = Duration::from_millis(3);

        let loader_author =
            DataLoader::new(StoreLoader::new(store.clone()), tokio::task::spawn).delay(delay);
        let loader_author_posts =
            DataLoader::new(StoreLoader::new(store.clone()), tokio::task::spawn).delay(delay);

        Self {
            store,
            loader_author,
            loader_author_posts,
        }
    }
}

pub fn api_schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
}

pub fn api_schema(ctx: ApiSchemaContext) -> ApiSchema {
    api_schema_builder().data(ctx).finish()
}

pub fn ctx_data<'a>(ctx: &'a Context) -> &'a ApiSchemaContext {
    ctx.data::<ApiSchemaContext>()
        .expect("Failed to get API context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_exposes_every_root_operation() {
        let sdl = api_schema_builder().finish().sdl();

        for query in ["author(", "authors(", "post(", "posts("] {
            assert!(sdl.contains(query), "missing query: {query}");
        }
        for mutation in [
            "createAuthor(",
            "updateAuthor(",
            "deleteAuthor(",
            "createPost(",
            "updatePost(",
            "deletePost(",
            "upvotePost(",
        ] {
            assert!(sdl.contains(mutation), "missing mutation: {mutation}");
        }
    }
}
