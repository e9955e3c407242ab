use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState, LeaderboardParams};
use crate::api::models::{
    AddSwimmerRequest, LeaderboardItem, PaginatedResponse, SwimmerDetailResponse, SwimmerSummary,
};

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(50).clamp(1, 500);
    let offset = (page - 1) * page_size;

    let entries = match state.ranking.leaderboard(params.search.as_deref()) {
        Ok(entries) => entries,
        Err(e) => return error_response(e),
    };

    let total = entries.len();
    let items: Vec<LeaderboardItem> = entries
        .into_iter()
        .skip(offset)
        .take(page_size)
        .map(LeaderboardItem::from)
        .collect();

    Json(PaginatedResponse {
        items,
        total,
        page,
        page_size,
    })
    .into_response()
}

pub async fn get_swimmer_detail(
    State(state): State<Arc<AppState>>,
    Path(swimmer_id): Path<String>,
) -> impl IntoResponse {
    match state.ranking.profile(&swimmer_id) {
        Ok(detail) => Json(SwimmerDetailResponse::from(detail)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_swimmer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddSwimmerRequest>,
) -> impl IntoResponse {
    match state.ingestion.add_swimmer(&request.swimmer_id).await {
        Ok(swimmer) => (StatusCode::CREATED, Json(SwimmerSummary::from(swimmer))).into_response(),
        Err(e) => {
            log::warn!("Failed to add swimmer {}: {:#}", request.swimmer_id, e);
            error_response(e)
        }
    }
}
