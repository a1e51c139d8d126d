//! Access controller behavior against the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{Post, Requester};
use quill_core::error::DomainError;
use quill_core::ports::BaseRepository;
use quill_core::{BlogController, CommentInput, OwnershipPolicy, PostInput};

use crate::database::InMemoryStore;

fn setup(policy: OwnershipPolicy) -> (InMemoryStore, BlogController) {
    let store = InMemoryStore::with_default_categories();
    let controller = BlogController::new(
        Arc::new(store.posts()),
        Arc::new(store.comments()),
        Arc::new(store.categories()),
        policy,
    );
    (store, controller)
}

fn input(title: &str, category_id: i64) -> PostInput {
    PostInput {
        title: title.to_string(),
        body: format!("{title} body"),
        category_id,
    }
}

fn comment(text: &str) -> CommentInput {
    CommentInput {
        author: "visitor".to_string(),
        text: text.to_string(),
    }
}

async fn create(controller: &BlogController, author: Uuid, title: &str) -> Post {
    controller
        .create_post(&Requester::User(author), input(title, 1))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_post_sets_author_and_published_date() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let author = Uuid::new_v4();

    let post = create(&controller, author, "Hello").await;

    assert_eq!(post.author_id, author);
    let published = post.published_date.expect("published_date set on create");
    assert!(published >= post.created_date);
}

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);

    let err = controller
        .create_post(&Requester::Anonymous, input("Nope", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_create_post_with_unknown_category_is_invalid() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);

    let err = controller
        .create_post(&Requester::User(Uuid::new_v4()), input("Lost", 99))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_permissive_edit_reassigns_author() {
    // Legacy behavior: any authenticated user can take over a post by editing it.
    let (_, controller) = setup(OwnershipPolicy::Permissive);
    let (owner, intruder) = (Uuid::new_v4(), Uuid::new_v4());
    let post = create(&controller, owner, "Original").await;

    let edited = controller
        .edit_post(&Requester::User(intruder), post.id, input("Taken", 2))
        .await
        .unwrap();

    assert_eq!(edited.author_id, intruder);
    assert_eq!(edited.title, "Taken");
    assert_eq!(edited.category_id, 2);
    assert_eq!(edited.created_date, post.created_date);
    assert!(edited.published_date >= post.published_date);
}

#[tokio::test]
async fn test_enforced_edit_rejects_non_owner() {
    let (store, controller) = setup(OwnershipPolicy::Enforced);
    let (owner, intruder) = (Uuid::new_v4(), Uuid::new_v4());
    let post = create(&controller, owner, "Original").await;

    let err = controller
        .edit_post(&Requester::User(intruder), post.id, input("Taken", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    let stored = store.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.author_id, owner);
    assert_eq!(stored.title, "Original");
}

#[tokio::test]
async fn test_enforced_edit_by_owner_republishes() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Uuid::new_v4();
    let post = create(&controller, owner, "Draft").await;

    let edited = controller
        .edit_post(&Requester::User(owner), post.id, input("Final", 1))
        .await
        .unwrap();

    assert_eq!(edited.author_id, owner);
    assert_eq!(edited.title, "Final");
    assert!(edited.published_date >= post.published_date);
}

#[tokio::test]
async fn test_edit_requires_authentication_under_both_policies() {
    for policy in [OwnershipPolicy::Enforced, OwnershipPolicy::Permissive] {
        let (_, controller) = setup(policy);
        let post = create(&controller, Uuid::new_v4(), "Post").await;

        let err = controller
            .edit_post(&Requester::Anonymous, post.id, input("Anon", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized), "policy {policy}");
    }
}

#[tokio::test]
async fn test_edit_missing_post_is_not_found() {
    let (_, controller) = setup(OwnershipPolicy::Permissive);

    let err = controller
        .edit_post(&Requester::User(Uuid::new_v4()), 404, input("Ghost", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn test_edit_form_follows_policy() {
    let (_, enforced) = setup(OwnershipPolicy::Enforced);
    let owner = Uuid::new_v4();
    let post = create(&enforced, owner, "Mine").await;

    assert!(enforced.edit_form(&Requester::User(owner), post.id).await.is_ok());
    assert!(matches!(
        enforced
            .edit_form(&Requester::User(Uuid::new_v4()), post.id)
            .await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        enforced.edit_form(&Requester::Anonymous, post.id).await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_list_my_posts_is_ordered_subset_of_list_posts() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    create(&controller, alice, "a1").await;
    create(&controller, bob, "b1").await;
    create(&controller, alice, "a2").await;
    create(&controller, bob, "b2").await;
    create(&controller, alice, "a3").await;

    let all = controller.list_posts(&Requester::User(alice)).await.unwrap();
    let mine = controller
        .list_my_posts(&Requester::User(alice))
        .await
        .unwrap();

    let expected: Vec<Post> = all.into_iter().filter(|p| p.author_id == alice).collect();
    assert_eq!(mine, expected);
    let titles: Vec<&str> = mine.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a1", "a2", "a3"]);
}

#[tokio::test]
async fn test_list_my_posts_requires_authentication() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);

    let err = controller
        .list_my_posts(&Requester::Anonymous)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_list_posts_requires_authentication() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let author = Uuid::new_v4();
    create(&controller, author, "Visible").await;

    let err = controller.list_posts(&Requester::Anonymous).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    // Every authenticated user sees every post.
    let posts = controller
        .list_posts(&Requester::User(Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_list_by_category_filters_posts() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let author = Requester::User(Uuid::new_v4());

    controller.create_post(&author, input("general", 1)).await.unwrap();
    controller.create_post(&author, input("tech", 2)).await.unwrap();
    controller.create_post(&author, input("tech too", 2)).await.unwrap();

    let tech = controller
        .list_by_category(&Requester::Anonymous, 2)
        .await
        .unwrap();
    assert_eq!(tech.len(), 2);
    assert!(tech.iter().all(|p| p.category_id == 2));

    let empty = controller
        .list_by_category(&Requester::Anonymous, 3)
        .await
        .unwrap();
    assert!(empty.is_empty());

    let err = controller
        .list_by_category(&Requester::Anonymous, 42)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Category", .. }));
}

#[tokio::test]
async fn test_anonymous_detail_cannot_edit() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Uuid::new_v4();
    let post = create(&controller, owner, "Public").await;

    let detail = controller
        .get_post_detail(&Requester::Anonymous, post.id)
        .await
        .unwrap();
    assert_eq!(detail.post.id, post.id);
    assert!(!detail.can_edit);

    let detail = controller
        .get_post_detail(&Requester::User(owner), post.id)
        .await
        .unwrap();
    assert!(detail.can_edit);
}

#[tokio::test]
async fn test_detail_hides_pending_comments_from_non_owners() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Uuid::new_v4();
    let post = create(&controller, owner, "Discuss").await;

    let approved = controller
        .add_comment(&Requester::Anonymous, post.id, comment("first"))
        .await
        .unwrap();
    controller
        .add_comment(&Requester::Anonymous, post.id, comment("second"))
        .await
        .unwrap();
    controller
        .approve_comment(&Requester::User(owner), approved.id)
        .await
        .unwrap();

    let public = controller
        .get_post_detail(&Requester::Anonymous, post.id)
        .await
        .unwrap();
    assert_eq!(public.comments.len(), 1);
    assert_eq!(public.comments[0].text, "first");

    let owned = controller
        .get_post_detail(&Requester::User(owner), post.id)
        .await
        .unwrap();
    assert_eq!(owned.comments.len(), 2);
}

#[tokio::test]
async fn test_detail_of_missing_post_is_not_found() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);

    let err = controller
        .get_post_detail(&Requester::Anonymous, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_add_comment_to_missing_post_is_not_found() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);

    let err = controller
        .add_comment(&Requester::Anonymous, 9, comment("hello?"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn test_new_comment_is_pending() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let post = create(&controller, Uuid::new_v4(), "Post").await;

    let c = controller
        .add_comment(&Requester::Anonymous, post.id, comment("pending"))
        .await
        .unwrap();
    assert!(!c.approved);
    assert_eq!(c.post_id, post.id);
}

#[tokio::test]
async fn test_approve_comment_is_idempotent() {
    let (store, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Requester::User(Uuid::new_v4());
    let post = controller.create_post(&owner, input("Post", 1)).await.unwrap();
    let c = controller
        .add_comment(&Requester::Anonymous, post.id, comment("ok"))
        .await
        .unwrap();

    let once = controller.approve_comment(&owner, c.id).await.unwrap();
    let twice = controller.approve_comment(&owner, c.id).await.unwrap();

    assert!(once.approved);
    assert!(twice.approved);
    let stored = store.comments().find_by_id(c.id).await.unwrap().unwrap();
    assert!(stored.approved);
}

#[tokio::test]
async fn test_remove_comment_then_lookup_is_not_found() {
    let (_, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Requester::User(Uuid::new_v4());
    let post = controller.create_post(&owner, input("Post", 1)).await.unwrap();
    let c = controller
        .add_comment(&Requester::Anonymous, post.id, comment("spam"))
        .await
        .unwrap();

    let removed = controller.remove_comment(&owner, c.id).await.unwrap();
    assert_eq!(removed.post_id, post.id);

    let err = controller.approve_comment(&owner, c.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Comment", .. }));
    let err = controller.remove_comment(&owner, c.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Comment", .. }));
}

#[tokio::test]
async fn test_enforced_moderation_requires_post_owner() {
    let (store, controller) = setup(OwnershipPolicy::Enforced);
    let owner = Uuid::new_v4();
    let post = create(&controller, owner, "Post").await;
    let c = controller
        .add_comment(&Requester::Anonymous, post.id, comment("hi"))
        .await
        .unwrap();

    let stranger = Requester::User(Uuid::new_v4());
    assert!(matches!(
        controller.approve_comment(&stranger, c.id).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        controller.remove_comment(&stranger, c.id).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        controller.approve_comment(&Requester::Anonymous, c.id).await,
        Err(DomainError::Unauthorized)
    ));

    let stored = store.comments().find_by_id(c.id).await.unwrap().unwrap();
    assert!(!stored.approved);
}

#[tokio::test]
async fn test_permissive_moderation_open_to_anyone() {
    let (store, controller) = setup(OwnershipPolicy::Permissive);
    let post = create(&controller, Uuid::new_v4(), "Post").await;
    let c = controller
        .add_comment(&Requester::Anonymous, post.id, comment("hi"))
        .await
        .unwrap();

    let approved = controller
        .approve_comment(&Requester::Anonymous, c.id)
        .await
        .unwrap();
    assert!(approved.approved);

    controller
        .remove_comment(&Requester::User(Uuid::new_v4()), c.id)
        .await
        .unwrap();
    assert!(store.comments().find_by_id(c.id).await.unwrap().is_none());
}
