//! Session authentication middleware.
//!
//! Resolves the session cookie into a [`Caller`] exactly once per
//! request; everything downstream reads the identity from the request
//! extensions. A missing or expired session leaves the caller anonymous
//! here; rejecting is the job of [`require_auth`] and the service's own
//! identity gates.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::auth::Caller;
use crate::config::SESSION_COOKIE;
use crate::errors::{AppError, ErrorKind};

/// Resolve the session cookie and inject the caller identity.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = match jar.get(SESSION_COOKIE) {
        Some(cookie) => match state.sessions.id_for_session(cookie.value()).await {
            Ok(user) => Caller::user(user),
            Err(e) if e.kind() == ErrorKind::NotFound => Caller::anonymous(),
            Err(e) => {
                tracing::warn!("session lookup failed: {}", e);
                Caller::anonymous()
            }
        },
        None => Caller::anonymous(),
    };

    request.extensions_mut().insert(caller);

    next.run(request).await
}

/// Block access to a route if the caller is not logged in.
pub async fn require_auth(
    Extension(caller): Extension<Caller>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    caller.user_id()?;
    Ok(next.run(request).await)
}
