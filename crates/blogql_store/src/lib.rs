//! Database access (read and write) abstractions for the blogql backend.

mod loader;
pub mod models;
mod schema;

use blogql_common_types::inputs::{AuthorsQuery, PostsQuery};
use blogql_common_types::{ApiError, IntId};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_async_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::info;

pub use self::loader::{ByAuthor, StoreLoader};
use self::models::{Author, NewAuthor, NewPost, Post, UpdateAuthor, UpdatePost};

/// An abstraction over all database operations. It uses [`Arc`] internally,
/// so it's cheaply cloneable.
#[derive(Clone)]
pub struct Store {
    pool: Pool<AsyncPgConnection>,
}

impl Store {
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    /// Connects to the database and runs all pending migrations.
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        info!("Initializing database connection pool");

        let manager = AsyncDieselConnectionManager::new(db_url);
        let pool = Pool::builder(manager).build()?;
        let store = Self { pool };

        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> anyhow::Result<()> {
        let mut conn = self.pool.get().await?;

        info!("Run database migrations");

        Self::MIGRATIONS
            .run_pending_migrations(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(())
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, ApiError> {
        self.pool
            .get()
            .await
            .map_err(|e| ApiError::DataAccess(e.into()))
    }

    pub async fn conn_err_string(&self) -> Result<Object<AsyncPgConnection>, String> {
        self.pool.get().await.map_err(|e| e.to_string())
    }
}

/// Author operations.
impl Store {
    /// Returns all authors, in the order the store assigned their ids.
    pub async fn authors(&self, filter: AuthorsQuery) -> Result<Vec<Author>, ApiError> {
        use schema::authors;

        let mut query = authors::table.order_by(authors::id.asc()).into_boxed();

        if let Some(limit) = filter.limit {
            query = query.limit(limit.into());
        }

        Ok(query.load::<Author>(&mut self.conn().await?).await?)
    }

    pub async fn author_by_id(&self, id: IntId) -> Result<Option<Author>, ApiError> {
        use schema::authors;

        Ok(authors::table
            .find(id)
            .get_result::<Author>(&mut self.conn().await?)
            .await
            .optional()?)
    }

    pub async fn create_author(&self, new_author: &NewAuthor) -> Result<Author, ApiError> {
        use schema::authors;

        Ok(diesel::insert_into(authors::table)
            .values(new_author)
            .get_result::<Author>(&mut self.conn().await?)
            .await?)
    }

    pub async fn update_author(
        &self,
        id: IntId,
        changes: &UpdateAuthor,
    ) -> Result<Author, ApiError> {
        use schema::authors;

        if changes.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_string()));
        }

        diesel::update(authors::table.find(id))
            .set(changes)
            .get_result::<Author>(&mut self.conn().await?)
            .await
            .optional()?
            .ok_or(ApiError::not_found("author", id))
    }

    /// Deletes the author with the given id, reporting whether a row was
    /// actually removed. Posts referencing the author are kept; the foreign
    /// key nulls their `author_id`.
    pub async fn delete_author(&self, id: IntId) -> Result<bool, ApiError> {
        use schema::authors;

        let deleted = diesel::delete(authors::table.find(id))
            .execute(&mut self.conn().await?)
            .await?;

        Ok(deleted > 0)
    }
}

/// Post operations.
impl Store {
    /// Returns posts matching the filtering criteria, in the order the store
    /// assigned their ids.
    pub async fn posts(&self, filter: PostsQuery) -> Result<Vec<Post>, ApiError> {
        use schema::posts;

        let mut query = posts::table.order_by(posts::id.asc()).into_boxed();

        if let Some(author_id) = filter.author_id {
            query = query.filter(posts::author_id.eq(author_id));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit.into());
        }

        Ok(query.load::<Post>(&mut self.conn().await?).await?)
    }

    pub async fn post_by_id(&self, id: IntId) -> Result<Option<Post>, ApiError> {
        use schema::posts;

        Ok(posts::table
            .find(id)
            .get_result::<Post>(&mut self.conn().await?)
            .await
            .optional()?)
    }

    /// Creates a post with zero votes. The referenced author must exist; the
    /// foreign key rejects dangling records.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        use schema::posts;

        diesel::insert_into(posts::table)
            .values(new_post)
            .get_result::<Post>(&mut self.conn().await?)
            .await
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    ApiError::not_found("author", new_post.author_id)
                }
                e => e.into(),
            })
    }

    pub async fn update_post(&self, id: IntId, changes: &UpdatePost) -> Result<Post, ApiError> {
        use schema::posts;

        if changes.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_string()));
        }

        diesel::update(posts::table.find(id))
            .set(changes)
            .get_result::<Post>(&mut self.conn().await?)
            .await
            .optional()
            .map_err(|e| match (e, changes.author_id) {
                (DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _), Some(author_id)) => {
                    ApiError::not_found("author", author_id)
                }
                (e, _) => e.into(),
            })?
            .ok_or(ApiError::not_found("post", id))
    }

    /// Deletes the post with the given id. Requesting a missing id is an
    /// error, not a no-op.
    pub async fn delete_post(&self, id: IntId) -> Result<(), ApiError> {
        use schema::posts;

        let deleted = diesel::delete(posts::table.find(id))
            .execute(&mut self.conn().await?)
            .await?;

        if deleted == 0 {
            return Err(ApiError::not_found("post", id));
        }

        Ok(())
    }

    /// Increments the post's vote count by one and returns the updated row.
    /// The increment happens in a single SQL statement, so concurrent
    /// upvotes on the same post cannot lose updates.
    pub async fn upvote_post(&self, id: IntId) -> Result<Post, ApiError> {
        use schema::posts;

        diesel::update(posts::table.find(id))
            .set(posts::votes.eq(posts::votes + 1))
            .get_result::<Post>(&mut self.conn().await?)
            .await
            .optional()?
            .ok_or(ApiError::not_found("post", id))
    }
}
