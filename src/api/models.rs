use serde::{Deserialize, Serialize};

use crate::database::DbComparison;
use crate::domain::{initials, BestTimes, LeaderboardEntry, Swimmer};
use crate::scoring::ScoredEvent;
use crate::services::ranking::{SwimmerDetail, SwimmerPair};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimmerSummary {
    pub id: String,
    pub name: String,
    pub team: String,
    pub initials: String,
    pub rating: f64,
    pub vote_count: u32,
    pub profile_image: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

impl From<Swimmer> for SwimmerSummary {
    fn from(swimmer: Swimmer) -> Self {
        Self {
            initials: initials(&swimmer.name),
            id: swimmer.id,
            name: swimmer.name,
            team: swimmer.team,
            rating: swimmer.rating,
            vote_count: swimmer.vote_count,
            profile_image: swimmer.profile_image,
            twitter: swimmer.twitter,
            instagram: swimmer.instagram,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PairResponse {
    pub left: SwimmerSummary,
    pub right: SwimmerSummary,
}

impl From<SwimmerPair> for PairResponse {
    fn from(pair: SwimmerPair) -> Self {
        Self {
            left: pair.left.into(),
            right: pair.right.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub winner_id: String,
    pub loser_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSwimmerRequest {
    pub swimmer_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub id: Option<i64>,
    pub winner_id: String,
    pub loser_id: String,
    pub winner_old_rating: f64,
    pub winner_new_rating: f64,
    pub loser_old_rating: f64,
    pub loser_new_rating: f64,
    pub delta: f64,
    pub created_at: Option<String>,
}

impl From<DbComparison> for ComparisonItem {
    fn from(row: DbComparison) -> Self {
        let outcome = row.outcome;
        Self {
            id: Some(row.id),
            winner_id: outcome.winner_id,
            loser_id: outcome.loser_id,
            winner_old_rating: outcome.winner_old_rating,
            winner_new_rating: outcome.winner_new_rating,
            loser_old_rating: outcome.loser_old_rating,
            loser_new_rating: outcome.loser_new_rating,
            delta: outcome.delta,
            created_at: row.created_at.map(|ts| ts.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardItem {
    pub rank: usize,
    #[serde(flatten)]
    pub swimmer: SwimmerSummary,
}

impl From<LeaderboardEntry> for LeaderboardItem {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            swimmer: entry.swimmer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimmerDetailResponse {
    #[serde(flatten)]
    pub swimmer: SwimmerSummary,
    pub best_times: BestTimes,
    pub scored_events: Vec<ScoredEvent>,
    pub unscored_events: Vec<ScoredEvent>,
    pub overall_score: u32,
    pub confidence_level: String,
}

impl From<SwimmerDetail> for SwimmerDetailResponse {
    fn from(detail: SwimmerDetail) -> Self {
        let confidence_level = detail.confidence.as_str().to_string();
        let best_times = detail.swimmer.best_times.clone();
        Self {
            swimmer: detail.swimmer.into(),
            best_times,
            scored_events: detail.scores.scored_events,
            unscored_events: detail.scores.unscored_events,
            overall_score: detail.scores.overall_score,
            confidence_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
