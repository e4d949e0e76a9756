use std::collections::HashMap;
use std::marker::PhantomData;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::models::{self, IntId};
use crate::{schema, Store};

/// A batching dataloader over one of the store's models.
pub struct StoreLoader<T> {
    store: Store,
    phantom: PhantomData<T>,
}

impl<T> StoreLoader<T> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            phantom: PhantomData,
        }
    }
}

impl async_graphql::dataloader::Loader<IntId> for StoreLoader<models::Author> {
    type Value = models::Author;
    type Error = String;

    async fn load(&self, keys: &[IntId]) -> Result<HashMap<IntId, Self::Value>, Self::Error> {
        use schema::authors;

        Ok(authors::table
            .filter(authors::id.eq_any(keys))
            .load::<models::Author>(&mut self.store.conn_err_string().await?)
            .await
            .map_err(|e| e.to_string())?
            .into_iter()
            .map(|author| (author.id, author))
            .collect())
    }
}

/// Keys "all posts by one author" lookups, so they cannot be confused with
/// post-by-id lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByAuthor(pub IntId);

impl async_graphql::dataloader::Loader<ByAuthor> for StoreLoader<models::Post> {
    type Value = Vec<models::Post>;
    type Error = String;

    async fn load(&self, keys: &[ByAuthor]) -> Result<HashMap<ByAuthor, Self::Value>, Self::Error> {
        use schema::posts;

        let author_ids: Vec<IntId> = keys.iter().map(|key| key.0).collect();

        let mut posts_by_author: HashMap<ByAuthor, Self::Value> = HashMap::new();
        for post in posts::table
            .filter(posts::author_id.eq_any(&author_ids))
            .order_by(posts::id.asc())
            .load::<models::Post>(&mut self.store.conn_err_string().await?)
            .await
            .map_err(|e| e.to_string())?
        {
            if let Some(author_id) = post.author_id {
                posts_by_author
                    .entry(ByAuthor(author_id))
                    .or_default()
                    .push(post);
            }
        }

        Ok(posts_by_author)
    }
}
