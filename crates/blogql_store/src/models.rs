use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::Serialize;

use super::schema::*;

pub use blogql_common_types::IntId;

/// A row in the `authors` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = authors)]
pub struct Author {
    pub id: IntId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(skip)]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = authors)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Changes to apply to an author. `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = authors)]
pub struct UpdateAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateAuthor {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// A row in the `posts` table. `author_id` is null for posts whose author
/// was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: IntId,
    pub title: Option<String>,
    pub author_id: Option<IntId>,
    pub votes: i32,
    #[serde(skip)]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub title: String,
    pub author_id: IntId,
}

/// Changes to apply to a post. `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = posts)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub author_id: Option<IntId>,
}

impl UpdatePost {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author_id.is_none()
    }
}
