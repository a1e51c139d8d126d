//! Comment handlers: add, approve and remove.

use actix_web::{HttpResponse, http::header, web};

use quill_core::CommentInput;
use quill_shared::ApiResponse;
use quill_shared::dto::CommentRequest;

use super::views;
use crate::middleware::auth::CurrentRequester;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /post/{id}/comment/
pub async fn add_comment_to_post(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.blog.get_post(post_id).await?;

    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let input = CommentInput {
        author: req.author.trim().to_string(),
        text: req.text,
    };
    let comment = state
        .blog
        .add_comment(&requester, post_id, input)
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, views::post_location(comment.post_id)))
        .json(views::comment(comment)))
}

/// GET|POST /comment/{id}/approve/
pub async fn comment_approve(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .approve_comment(&requester, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::LOCATION, views::post_location(comment.post_id)))
        .json(views::comment(comment)))
}

/// GET|POST /comment/{id}/remove/
pub async fn comment_remove(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .remove_comment(&requester, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::LOCATION, views::post_location(comment.post_id)))
        .json(ApiResponse::ok_with_message(
            views::comment(comment),
            "Comment removed",
        )))
}
