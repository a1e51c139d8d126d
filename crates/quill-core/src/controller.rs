//! Post/comment access controller.
//!
//! Every operation receives the [`Requester`] explicitly and resolves the
//! referenced rows through the repository ports. The controller holds no
//! mutable state and can be shared across request handlers.

use std::sync::Arc;

use chrono::Utc;

use crate::access::OwnershipPolicy;
use crate::domain::{Category, Comment, NewComment, NewPost, Post, Requester};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, CommentRepository, PostRepository};

/// Editable post fields, as submitted by the post form.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub body: String,
    pub category_id: i64,
}

/// Comment fields, as submitted by the comment form.
#[derive(Debug, Clone)]
pub struct CommentInput {
    pub author: String,
    pub text: String,
}

/// A post as seen by a particular requester.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    /// True when the requester is the post's author.
    pub can_edit: bool,
    /// All comments for the author, approved ones for everybody else.
    pub comments: Vec<Comment>,
}

#[derive(Clone)]
pub struct BlogController {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    categories: Arc<dyn CategoryRepository>,
    policy: OwnershipPolicy,
}

impl BlogController {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        categories: Arc<dyn CategoryRepository>,
        policy: OwnershipPolicy,
    ) -> Self {
        Self {
            posts,
            comments,
            categories,
            policy,
        }
    }

    /// All posts. Requires an authenticated requester.
    pub async fn list_posts(&self, requester: &Requester) -> Result<Vec<Post>, DomainError> {
        requester.require_authenticated()?;
        Ok(self.posts.list_all().await?)
    }

    /// Posts authored by the requester.
    pub async fn list_my_posts(&self, requester: &Requester) -> Result<Vec<Post>, DomainError> {
        let user_id = requester.require_authenticated()?;
        Ok(self.posts.find_by_author(user_id).await?)
    }

    pub async fn list_by_category(
        &self,
        _requester: &Requester,
        category_id: i64,
    ) -> Result<Vec<Post>, DomainError> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;
        Ok(self.posts.find_by_category(category_id).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list_all().await?)
    }

    /// Resolve a post by id, or fail with `NotFound`.
    pub async fn get_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.load_post(post_id).await
    }

    /// Open to anonymous requesters; `can_edit` is never true for them.
    pub async fn get_post_detail(
        &self,
        requester: &Requester,
        post_id: i64,
    ) -> Result<PostDetail, DomainError> {
        let post = self.load_post(post_id).await?;
        let can_edit = requester.is(post.author_id);

        let mut comments = self.comments.find_by_post(post.id).await?;
        if !can_edit {
            comments.retain(|c| c.approved);
        }

        Ok(PostDetail {
            post,
            can_edit,
            comments,
        })
    }

    pub async fn create_post(
        &self,
        requester: &Requester,
        input: PostInput,
    ) -> Result<Post, DomainError> {
        let author_id = requester.require_authenticated()?;
        self.ensure_category(input.category_id).await?;

        let post = self
            .posts
            .insert(NewPost::published(
                author_id,
                input.category_id,
                input.title,
                input.body,
            ))
            .await?;

        tracing::info!(post_id = post.id, %author_id, "Post created");
        Ok(post)
    }

    /// Load a post for the edit form, applying the same checks as `edit_post`.
    pub async fn edit_form(&self, requester: &Requester, post_id: i64) -> Result<Post, DomainError> {
        requester.require_authenticated()?;
        let post = self.load_post(post_id).await?;
        self.policy.authorize(requester, post.author_id)?;
        Ok(post)
    }

    /// Overwrite a post's fields. The editor becomes the author and the post
    /// is republished.
    pub async fn edit_post(
        &self,
        requester: &Requester,
        post_id: i64,
        input: PostInput,
    ) -> Result<Post, DomainError> {
        let editor = requester.require_authenticated()?;
        let mut post = self.load_post(post_id).await?;
        self.policy.authorize(requester, post.author_id)?;
        self.ensure_category(input.category_id).await?;

        if post.author_id != editor {
            tracing::warn!(
                post_id,
                previous_author = %post.author_id,
                new_author = %editor,
                "Post authorship reassigned by edit"
            );
        }

        post.title = input.title;
        post.body = input.body;
        post.category_id = input.category_id;
        post.author_id = editor;
        post.published_date = Some(Utc::now());

        let post = self.posts.update(post).await?;
        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    /// Attach a pending comment to an existing post.
    pub async fn add_comment(
        &self,
        requester: &Requester,
        post_id: i64,
        input: CommentInput,
    ) -> Result<Comment, DomainError> {
        let post = self.load_post(post_id).await?;
        let comment = self
            .comments
            .insert(NewComment::pending(post.id, input.author, input.text))
            .await?;

        tracing::info!(
            comment_id = comment.id,
            post_id,
            authenticated = requester.is_authenticated(),
            "Comment added"
        );
        Ok(comment)
    }

    /// Mark a comment approved. Approving twice is a no-op.
    pub async fn approve_comment(
        &self,
        requester: &Requester,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.load_comment(comment_id).await?;
        self.authorize_comment(requester, &comment).await?;

        if comment.approved {
            return Ok(comment);
        }

        comment.approved = true;
        let comment = self.comments.update(comment).await?;
        tracing::info!(comment_id, "Comment approved");
        Ok(comment)
    }

    /// Permanently delete a comment and return it.
    pub async fn remove_comment(
        &self,
        requester: &Requester,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let comment = self.load_comment(comment_id).await?;
        self.authorize_comment(requester, &comment).await?;

        self.comments.delete(comment.id).await?;
        tracing::info!(comment_id, post_id = comment.post_id, "Comment removed");
        Ok(comment)
    }

    async fn authorize_comment(
        &self,
        requester: &Requester,
        comment: &Comment,
    ) -> Result<(), DomainError> {
        if !self.policy.is_enforced() {
            return Ok(());
        }
        // Comments are moderated by the author of the post they belong to.
        let post = self.load_post(comment.post_id).await?;
        self.policy.authorize(requester, post.author_id)
    }

    async fn load_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }

    async fn load_comment(&self, comment_id: i64) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))
    }

    async fn ensure_category(&self, category_id: i64) -> Result<(), DomainError> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "category {category_id} does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::NewCategory;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Store whose every call fails, to observe error propagation.
    struct BrokenStore;

    #[async_trait]
    impl BaseRepository<Post, NewPost, i64> for BrokenStore {
        async fn find_by_id(&self, _id: i64) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
        async fn insert(&self, _draft: NewPost) -> Result<Post, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
        async fn update(&self, _entity: Post) -> Result<Post, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
        async fn delete(&self, _id: i64) -> Result<(), RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl PostRepository for BrokenStore {
        async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Query("relation \"posts\" does not exist".to_string()))
        }
        async fn find_by_author(&self, _author_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Query("relation \"posts\" does not exist".to_string()))
        }
        async fn find_by_category(&self, _category_id: i64) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Query("relation \"posts\" does not exist".to_string()))
        }
    }

    #[async_trait]
    impl BaseRepository<Comment, NewComment, i64> for BrokenStore {
        async fn find_by_id(&self, _id: i64) -> Result<Option<Comment>, RepoError> {
            Ok(None)
        }
        async fn insert(&self, _draft: NewComment) -> Result<Comment, RepoError> {
            Err(RepoError::Constraint("comments_post_id_fkey".to_string()))
        }
        async fn update(&self, _entity: Comment) -> Result<Comment, RepoError> {
            Err(RepoError::NotFound)
        }
        async fn delete(&self, _id: i64) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl CommentRepository for BrokenStore {
        async fn find_by_post(&self, _post_id: i64) -> Result<Vec<Comment>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl BaseRepository<Category, NewCategory, i64> for BrokenStore {
        async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
            Ok(Some(Category {
                id,
                name: "General".to_string(),
            }))
        }
        async fn insert(&self, draft: NewCategory) -> Result<Category, RepoError> {
            Ok(Category { id: 1, name: draft.name })
        }
        async fn update(&self, entity: Category) -> Result<Category, RepoError> {
            Ok(entity)
        }
        async fn delete(&self, _id: i64) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl CategoryRepository for BrokenStore {
        async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn controller() -> BlogController {
        let store = Arc::new(BrokenStore);
        BlogController::new(
            store.clone(),
            store.clone(),
            store,
            OwnershipPolicy::Enforced,
        )
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let controller = controller();
        let requester = Requester::User(Uuid::new_v4());

        let err = controller.list_posts(&requester).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Query(_))));

        let err = controller
            .get_post_detail(&requester, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Connection(_))));
    }

    #[tokio::test]
    async fn test_authentication_checked_before_store() {
        let controller = controller();

        let err = controller.list_posts(&Requester::Anonymous).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));

        let input = PostInput {
            title: "Title".to_string(),
            body: "Body".to_string(),
            category_id: 1,
        };
        let err = controller
            .create_post(&Requester::Anonymous, input)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn test_missing_comment_is_not_found() {
        let controller = controller();

        let err = controller
            .approve_comment(&Requester::User(Uuid::new_v4()), 42)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity_type: "Comment", ref id } if id == "42"
        ));
    }
}
