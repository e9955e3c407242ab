use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState, HistoryParams};
use crate::api::models::{ComparisonItem, PairResponse, VoteRequest};

const DEFAULT_HISTORY_LIMIT: u32 = 20;
const MAX_HISTORY_LIMIT: u32 = 200;

pub async fn get_pair(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.ranking.next_pair(&mut rand::thread_rng()) {
        Ok(pair) => Json(PairResponse::from(pair)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_vote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoteRequest>,
) -> impl IntoResponse {
    match state.ranking.record_vote(&request.winner_id, &request.loser_id) {
        Ok(outcome) => Json(ComparisonItem {
            id: None,
            winner_id: outcome.winner_id,
            loser_id: outcome.loser_id,
            winner_old_rating: outcome.winner_old_rating,
            winner_new_rating: outcome.winner_new_rating,
            loser_old_rating: outcome.loser_old_rating,
            loser_new_rating: outcome.loser_new_rating,
            delta: outcome.delta,
            created_at: None,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_comparisons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);

    match state.ranking.recent_comparisons(limit) {
        Ok(rows) => Json(rows.into_iter().map(ComparisonItem::from).collect::<Vec<_>>()).into_response(),
        Err(e) => error_response(e),
    }
}
