use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::errors::{IngestionError, RankingError};
use crate::services::ingestion::IngestionService;
use crate::services::ranking::RankingService;

pub mod swimmers;
pub mod votes;

pub struct AppState {
    pub ranking: RankingService,
    pub ingestion: IngestionService,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

/// Map a service error to a status code and a JSON `{"error": ...}` body
pub fn error_response(err: anyhow::Error) -> Response {
    let (status, message) = classify(&err);

    if status.is_server_error() {
        log::error!("Request failed: {:#}", err);
    }

    (status, Json(ErrorResponse { error: message })).into_response()
}

fn classify(err: &anyhow::Error) -> (StatusCode, String) {
    if let Some(e) = err.downcast_ref::<RankingError>() {
        let status = match e {
            RankingError::NotEnoughEntities { .. } => return (StatusCode::CONFLICT, "not enough data".to_string()),
            RankingError::InvalidComparison { .. } => StatusCode::BAD_REQUEST,
            RankingError::SwimmerNotFound { .. } => StatusCode::NOT_FOUND,
        };
        return (status, e.to_string());
    }

    if let Some(e) = err.downcast_ref::<IngestionError>() {
        let status = match e {
            IngestionError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            IngestionError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        };
        return (status, e.to_string());
    }

    (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
}
