use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, Comment, NewCategory, NewComment, NewPost, NewUser, Post, User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `D` is the draft type inserted before the store has assigned an id.
#[async_trait]
pub trait BaseRepository<T, D, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, draft: D) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Every listing is ordered by id, oldest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i64> {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, NewComment, i64> {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, NewCategory, i64> {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError>;
}
