//! User profile and subscription handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::auth::Caller;
use crate::domain::{User, UserId};
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

/// Look up a user by nickname.
pub async fn get_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.service.user_by_nickname(&nickname).await?;
    Ok(Json(user))
}

/// Subscribe the caller to `nickname`.
pub async fn subscribe(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(nickname): Path<String>,
) -> AppResult<StatusCode> {
    state.service.subscribe(caller, &nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unsubscribe the caller from `nickname`.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(nickname): Path<String>,
) -> AppResult<StatusCode> {
    state.service.unsubscribe(caller, &nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Everyone the caller follows.
pub async fn subscriptions(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.service.subscriptions(caller).await?;
    Ok(Json(users))
}

/// Everyone following the caller.
pub async fn subscribers(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.service.subscribers(caller).await?;
    Ok(Json(users))
}

/// Update the caller's display name.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<StatusCode> {
    let user = User {
        id: UserId::default(),
        nickname: String::new(),
        display_name: payload.display_name,
    };
    state.service.modify_user(caller, user).await?;

    Ok(StatusCode::NO_CONTENT)
}
