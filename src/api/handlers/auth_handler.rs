//! Account and session handlers: registration, login, logout.

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::auth::Caller;
use crate::config::{LOGIN_COOKIE_DAYS, SESSION_COOKIE};
use crate::domain::{UserId, UserWithPassword};
use crate::errors::AppResult;

#[derive(Debug, Serialize)]
pub struct UserCreateResponse {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Register a new user. The caller must be logged out.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<UserWithPassword>,
) -> AppResult<(StatusCode, Json<UserCreateResponse>)> {
    let user_id = state.service.create_user(caller, payload).await?;

    Ok((StatusCode::CREATED, Json(UserCreateResponse { user_id })))
}

/// Verify credentials and open a session. On success the token travels
/// both in the body and in the session cookie; the cookie's absolute
/// lifetime is independent from the store's sliding inactivity TTL.
pub async fn login(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    state
        .service
        .check_password(caller, &payload.nickname, &payload.password)
        .await?;

    let user = state.service.user_by_nickname(&payload.nickname).await?;
    let token = state.sessions.save_id(user.id).await?;

    let expires_at = Utc::now() + Duration::days(LOGIN_COOKIE_DAYS);
    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::days(LOGIN_COOKIE_DAYS))
        .build();

    Ok((jar.add(cookie), Json(LoginResponse { token, expires_at })))
}

/// Close the current session and clear its cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.delete(cookie.value()).await?;
    }

    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}
