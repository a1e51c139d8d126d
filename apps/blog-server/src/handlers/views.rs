//! Domain to DTO conversions.

use quill_core::PostDetail;
use quill_core::domain::{Category, Comment, Post, User};
use quill_shared::dto::{
    CategoryResponse, CommentResponse, PostDetailResponse, PostResponse, UserResponse,
};

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        category_id: post.category_id,
        title: post.title,
        body: post.body,
        created_date: post.created_date,
        published_date: post.published_date,
    }
}

pub fn posts(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post).collect()
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: comment.author,
        text: comment.text,
        created_date: comment.created_date,
        approved: comment.approved,
    }
}

pub fn categories(categories: Vec<Category>) -> Vec<CategoryResponse> {
    categories
        .into_iter()
        .map(|c| CategoryResponse {
            id: c.id,
            name: c.name,
        })
        .collect()
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post(detail.post),
        can_edit: detail.can_edit,
        comments: detail.comments.into_iter().map(comment).collect(),
    }
}

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        mobile_no: user.mobile_no,
        created_at: user.created_at,
    }
}

/// Location of a post's detail page, the redirect target after writes.
pub fn post_location(post_id: i64) -> String {
    format!("/post/{post_id}/")
}
