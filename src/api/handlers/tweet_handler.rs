//! Tweet and feed handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::auth::Caller;
use crate::domain::{TweetId, TweetWithAuthor};
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct TweetRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub tweet_id: TweetId,
}

/// Feed cursor: the last-seen tweet id, exclusive. Defaults to 0 (start).
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: TweetId,
}

/// Post a new tweet.
pub async fn post_tweet(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<TweetRequest>,
) -> AppResult<(StatusCode, Json<TweetResponse>)> {
    let tweet_id = state.service.tweet(caller, payload.text).await?;

    Ok((StatusCode::CREATED, Json(TweetResponse { tweet_id })))
}

/// A page of the caller's feed.
pub async fn feed_page(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<TweetWithAuthor>>> {
    let tweets = state.service.tweet_page(caller, page.from).await?;
    Ok(Json(tweets))
}

/// A page of one user's tweets.
pub async fn profile_tweets(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<TweetWithAuthor>>> {
    let tweets = state.service.profile_tweets(&nickname, page.from).await?;
    Ok(Json(tweets))
}
