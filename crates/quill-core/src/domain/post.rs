use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog article owned by a single author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub category_id: i64,
    pub title: String,
    pub body: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

/// A post that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub category_id: i64,
    pub title: String,
    pub body: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Create a post published at the moment it is created.
    pub fn published(author_id: Uuid, category_id: i64, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            author_id,
            category_id,
            title,
            body,
            created_date: now,
            published_date: Some(now),
        }
    }
}
