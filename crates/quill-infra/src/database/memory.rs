//! In-memory store - used when no database is configured, and in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{
    Category, Comment, NewCategory, NewComment, NewPost, NewUser, Post, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

use super::mask_username;

/// Categories available out of the box.
pub const DEFAULT_CATEGORIES: &[&str] = &["General", "Technology", "Life"];

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    categories: BTreeMap<i64, Category>,
    last_post_id: i64,
    last_comment_id: i64,
    last_category_id: i64,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

/// Shared in-memory tables. Each repository handle sees the same data.
///
/// Foreign keys and unique usernames are checked the way the database
/// schema would check them. Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the given category names, ids starting at 1.
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables = Tables::default();
        for name in names {
            let id = next_id(&mut tables.last_category_id);
            tables.categories.insert(
                id,
                Category {
                    id,
                    name: name.into(),
                },
            );
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub fn with_default_categories() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES.iter().copied())
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository(self.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository(self.clone())
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository(self.clone())
    }
}

pub struct InMemoryUserRepository(InMemoryStore);
pub struct InMemoryPostRepository(InMemoryStore);
pub struct InMemoryCommentRepository(InMemoryStore);
pub struct InMemoryCategoryRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<User, NewUser, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.0.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, draft: NewUser) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.users.values().any(|u| u.username == draft.username) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let user = draft.into_user();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut entity: User) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        let slot = tables.users.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        entity.updated_at = chrono::Utc::now();
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        tables.users.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %mask_username(username), "Finding user by username");

        let tables = self.0.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, NewPost, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.categories.contains_key(&draft.category_id) {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                draft.category_id
            )));
        }

        let id = next_id(&mut tables.last_post_id);
        let post = Post {
            id,
            author_id: draft.author_id,
            category_id: draft.category_id,
            title: draft.title,
            body: draft.body,
            created_date: draft.created_date,
            published_date: draft.published_date,
        };
        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.categories.contains_key(&entity.category_id) {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                entity.category_id
            )));
        }

        let slot = tables.posts.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        // ON DELETE CASCADE
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.values().cloned().collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Comment, NewComment, i64> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.0.tables.read().await.comments.get(&id).cloned())
    }

    async fn insert(&self, draft: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.posts.contains_key(&draft.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                draft.post_id
            )));
        }

        let id = next_id(&mut tables.last_comment_id);
        let comment = Comment {
            id,
            post_id: draft.post_id,
            author: draft.author,
            text: draft.text,
            created_date: draft.created_date,
            approved: draft.approved,
        };
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;
        let slot = tables
            .comments
            .get_mut(&entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.0.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_date, c.id));
        Ok(comments)
    }
}

#[async_trait]
impl BaseRepository<Category, NewCategory, i64> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.0.tables.read().await.categories.get(&id).cloned())
    }

    async fn insert(&self, draft: NewCategory) -> Result<Category, RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.categories.values().any(|c| c.name == draft.name) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let id = next_id(&mut tables.last_category_id);
        let category = Category {
            id,
            name: draft.name,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, entity: Category) -> Result<Category, RepoError> {
        let mut tables = self.0.tables.write().await;
        let slot = tables
            .categories
            .get_mut(&entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.posts.values().any(|p| p.category_id == id) {
            return Err(RepoError::Constraint(format!("category {id} is in use")));
        }
        tables
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self
            .0
            .tables
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect())
    }
}
