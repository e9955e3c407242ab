use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    swimmers::{get_leaderboard, get_swimmer_detail, post_swimmer},
    votes::{get_comparisons, get_pair, post_vote},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/pair", get(get_pair))
        .route("/api/vote", post(post_vote))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/swimmers", post(post_swimmer))
        .route("/api/swimmers/:id", get(get_swimmer_detail))
        .route("/api/comparisons", get(get_comparisons))
        .with_state(state)
}
