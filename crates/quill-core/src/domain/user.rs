use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents a registered blog user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration data for a user that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user with generated ID and timestamp.
    ///
    /// The username doubles as the email address.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            first_name: String::new(),
            last_name: String::new(),
            mobile_no: String::new(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn with_profile(mut self, first_name: String, last_name: String, mobile_no: String) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self.mobile_no = mobile_no;
        self
    }

    /// Materialize the stored user.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.username.clone(),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            mobile_no: self.mobile_no,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
