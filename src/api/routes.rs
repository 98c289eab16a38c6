//! Application route configuration.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{auth_handler, tweet_handler, user_handler};
use super::middleware::{require_auth, session_middleware};
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Anonymous-reachable routes; the service still applies its own
    // logged-out gates where required.
    let public = Router::new()
        .route("/users", post(auth_handler::create_user))
        .route("/auth", post(auth_handler::login))
        .route("/users/:nickname", get(user_handler::get_user))
        .route(
            "/users/:nickname/tweets",
            get(tweet_handler::profile_tweets),
        );

    // Routes that require a resolved session.
    let protected = Router::new()
        .route("/auth/logout", post(auth_handler::logout))
        .route(
            "/tweets",
            post(tweet_handler::post_tweet).get(tweet_handler::feed_page),
        )
        .route("/users/:nickname/subscribe", post(user_handler::subscribe))
        .route(
            "/users/:nickname/unsubscribe",
            post(user_handler::unsubscribe),
        )
        .route("/subscriptions", get(user_handler::subscriptions))
        .route("/subscribers", get(user_handler::subscribers))
        .route("/profile", put(user_handler::update_profile))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public)
        .merge(protected)
        // Session resolution runs before everything above.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint (healthcheck)
async fn root() -> StatusCode {
    StatusCode::OK
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                error: Some(e.to_string()),
            }),
        ),
    }
}
