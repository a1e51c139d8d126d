#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post};
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use quill_core::domain::{Comment, Post};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, CommentRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(id: i64, author_id: uuid::Uuid, category_id: i64) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id,
            category_id,
            title: format!("Post {id}"),
            body: "Body".to_owned(),
            created_date: now.into(),
            published_date: Some(now.into()),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, author_id, 1)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.title, "Post 7");
        assert!(post.published_date.is_some());
    }

    #[tokio::test]
    async fn test_find_missing_post_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(404).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_posts_by_author() {
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                post_model(1, author_id, 1),
                post_model(3, author_id, 2),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.find_by_author(author_id).await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(posts.iter().all(|p| p.author_id == author_id));
    }

    #[tokio::test]
    async fn test_find_comments_by_post() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![comment::Model {
                id: 5,
                post_id: 7,
                author: "bob".to_owned(),
                text: "Nice post".to_owned(),
                created_date: now.into(),
                approved: false,
            }]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments: Vec<Comment> = repo.find_by_post(7).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 7);
        assert!(!comments[0].approved);
    }

    fn comment_model(id: i64, post_id: i64, approved: bool) -> comment::Model {
        comment::Model {
            id,
            post_id,
            author: "bob".to_owned(),
            text: "Nice post".to_owned(),
            created_date: chrono::Utc::now().into(),
            approved,
        }
    }

    #[tokio::test]
    async fn test_update_comment_overwrites_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![comment_model(5, 7, true)]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let mut comment: Comment = comment_model(5, 7, false).into();
        comment.approved = true;

        let updated = repo.update(comment).await.unwrap();
        assert_eq!(updated.id, 5);
        assert!(updated.approved);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let author_id = uuid::Uuid::new_v4();

        // UPDATE ... RETURNING yields no row when the id is gone.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.update(post_model(9, author_id, 1).into()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let result = repo.delete(5).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
