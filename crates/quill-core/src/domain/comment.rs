use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a reply attached to a post, hidden until approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved: bool,
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved: bool,
}

impl NewComment {
    /// Create a pending (unapproved) comment on a post.
    pub fn pending(post_id: i64, author: String, text: String) -> Self {
        Self {
            post_id,
            author,
            text,
            created_date: Utc::now(),
            approved: false,
        }
    }
}
