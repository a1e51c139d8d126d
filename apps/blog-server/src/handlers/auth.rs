//! Account handlers: registration, login and the current user.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::NewUser;
use quill_core::ports::{AuthError, TokenService};
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn bearer(
    tokens: &dyn TokenService,
    user_id: uuid::Uuid,
    username: &str,
) -> AppResult<AuthResponse> {
    let access_token = tokens
        .generate_token(user_id, username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /accounts/register/
pub async fn register(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let username = req.username.trim().to_string();
    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict(
            "A user with that username already exists.".to_string(),
        ));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .insert(NewUser::new(username, password_hash).with_profile(
            req.first_name,
            req.last_name,
            req.mobile_no,
        ))
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let auth = bearer(tokens.get_ref().as_ref(), user.id, &user.username)?;
    Ok(HttpResponse::Created().json(auth))
}

/// POST /accounts/login/
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(AuthError::InvalidCredentials.into());
    }

    let auth = bearer(tokens.get_ref().as_ref(), user.id, &user.username)?;
    Ok(HttpResponse::Ok().json(auth))
}

/// GET /accounts/me/
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", identity.username)))?;

    Ok(HttpResponse::Ok().json(views::user(user)))
}
