//! User REST handlers: list (with posts), create, update, delete.

use crate::error::AppError;
use crate::model::{NewUser, User, UserUpdate, UserWithPosts};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// GET /users — all users, each including their posts.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserWithPosts>>, AppError> {
    let users = UserService::list_with_posts(&state.pool).await?;
    Ok(Json(users))
}

/// POST /users — create from `{ email, name }`; no post nesting here.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create(&state.pool, &body.email, body.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/:id — partial update, whitelisted fields only.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id_str)))?;
    Ok(Json(user))
}

/// DELETE /users/:id — returns the deleted user.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id_str)))?;
    Ok(Json(user))
}
