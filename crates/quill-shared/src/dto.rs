//! Data Transfer Objects - request/response types for the API.
//!
//! Request types carry the form rules of the blog: `validate` returns every
//! violated rule, one human-readable message per field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const USERNAME_MAX_LEN: usize = 30;
pub const LOGIN_USERNAME_MAX_LEN: usize = 254;
pub const PROFILE_FIELD_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const TITLE_MAX_LEN: usize = 200;
pub const COMMENT_AUTHOR_MAX_LEN: usize = 200;

/// Collects field errors in declaration order.
#[derive(Debug, Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required."));
            return false;
        }
        true
    }

    /// Measured on the trimmed value, which is what gets stored.
    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        let len = value.trim().chars().count();
        if len > max {
            self.0.push(format!(
                "{field} must have at most {max} characters (it has {len})."
            ));
        }
    }

    fn finish(self) -> Result<(), Vec<String>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Sign-up form. The username is an email address and doubles as the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mobile_no: String,
}

impl RegisterUserRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::default();

        if errors.required("Username", &self.username) {
            errors.max_len("Username", &self.username, USERNAME_MAX_LEN);
            if !looks_like_email(&self.username) {
                errors.0.push("Enter a valid email address.".to_string());
            }
        }
        if errors.required("Password", &self.password)
            && self.password.chars().count() < PASSWORD_MIN_LEN
        {
            errors.0.push(format!(
                "Password must contain at least {PASSWORD_MIN_LEN} characters."
            ));
        }
        errors.max_len("First name", &self.first_name, PROFILE_FIELD_MAX_LEN);
        errors.max_len("Last name", &self.last_name, PROFILE_FIELD_MAX_LEN);
        errors.max_len("Mobile no", &self.mobile_no, PROFILE_FIELD_MAX_LEN);

        errors.finish()
    }
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::default();
        if errors.required("Username", &self.username) {
            errors.max_len("Username", &self.username, LOGIN_USERNAME_MAX_LEN);
        }
        errors.required("Password", &self.password);
        errors.finish()
    }
}

/// Post create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub body: String,
    pub category_id: i64,
}

impl PostRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::default();
        if errors.required("Title", &self.title) {
            errors.max_len("Title", &self.title, TITLE_MAX_LEN);
        }
        errors.required("Body", &self.body);
        errors.finish()
    }
}

/// Comment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub author: String,
    pub text: String,
}

impl CommentRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::default();
        if errors.required("Author", &self.author) {
            errors.max_len("Author", &self.author, COMMENT_AUTHOR_MAX_LEN);
        }
        errors.required("Text", &self.text);
        errors.finish()
    }
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: Uuid,
    pub category_id: i64,
    pub title: String,
    pub body: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved: bool,
}

/// Post detail page: the post, whether the viewer may edit it, and the
/// comments visible to the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub can_edit: bool,
    pub comments: Vec<CommentResponse>,
}

/// Data backing the create/edit form. `post` is empty on the create form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
    pub categories: Vec<CategoryResponse>,
}
