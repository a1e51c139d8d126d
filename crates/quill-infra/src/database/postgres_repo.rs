//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_username;
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %mask_username(username), "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%author_id, "Finding posts by author");

        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedDate)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
