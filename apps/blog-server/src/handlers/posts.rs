//! Post handlers: listings, detail page and the create/edit forms.

use actix_web::{HttpResponse, http::header, web};

use quill_core::PostInput;
use quill_shared::ApiResponse;
use quill_shared::dto::{PostFormResponse, PostRequest};

use super::views;
use crate::middleware::auth::CurrentRequester;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_input(body: web::Json<PostRequest>) -> AppResult<PostInput> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    Ok(PostInput {
        title: req.title.trim().to_string(),
        body: req.body,
        category_id: req.category_id,
    })
}

/// GET /
pub async fn post_list(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts(&requester).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}

/// GET /mypost/
pub async fn my_posts(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
) -> AppResult<HttpResponse> {
    let posts = state.blog.list_my_posts(&requester).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}

/// GET /category/{id}/
pub async fn list_category(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let posts = state
        .blog
        .list_by_category(&requester, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}

/// GET /post/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let detail = state
        .blog
        .get_post_detail(&requester, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(views::post_detail(detail)))
}

/// GET /post/new/
pub async fn new_post_form(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
) -> AppResult<HttpResponse> {
    if !requester.is_authenticated() {
        return Err(AppError::Unauthorized);
    }

    let categories = state.blog.list_categories().await?;
    Ok(HttpResponse::Ok().json(PostFormResponse {
        post: None,
        categories: views::categories(categories),
    }))
}

/// POST /post/new/
pub async fn post_new(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    // Anonymous submissions are rejected before the form is looked at.
    if !requester.is_authenticated() {
        return Err(AppError::Unauthorized);
    }
    let input = post_input(body)?;

    let post = state.blog.create_post(&requester, input).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, views::post_location(post.id)))
        .json(views::post(post)))
}

/// GET /post/{id}/edit/
pub async fn edit_post_form(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.blog.edit_form(&requester, path.into_inner()).await?;
    let categories = state.blog.list_categories().await?;

    Ok(HttpResponse::Ok().json(PostFormResponse {
        post: Some(views::post(post)),
        categories: views::categories(categories),
    }))
}

/// POST /post/{id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    CurrentRequester(requester): CurrentRequester,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    // The post must resolve, and be editable, before the form is looked at.
    state.blog.edit_form(&requester, post_id).await?;
    let input = post_input(body)?;

    let post = state.blog.edit_post(&requester, post_id, input).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::LOCATION, views::post_location(post.id)))
        .json(views::post(post)))
}
