use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rating::types::{Rated, RatingValue};

pub type SwimmerId = String;

/// Best times keyed by event label, e.g. "100 Y FREE"
pub type BestTimes = BTreeMap<String, RecordedTime>;

/// A single achieved time as shown on the profile plus its value in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTime {
    pub time: String,
    #[serde(default)]
    pub seconds: Option<f64>,
}

impl RecordedTime {
    pub fn new(time: impl Into<String>, seconds: f64) -> Self {
        Self {
            time: time.into(),
            seconds: Some(seconds),
        }
    }
}

/// Rankable swimmer as stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swimmer {
    pub id: SwimmerId,
    pub name: String,
    pub team: String,
    pub rating: RatingValue,
    pub vote_count: u32,
    #[serde(default)]
    pub best_times: BestTimes,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

impl Rated for Swimmer {
    fn id(&self) -> &str {
        &self.id
    }

    fn rating(&self) -> RatingValue {
        self.rating
    }

    fn vote_count(&self) -> u32 {
        self.vote_count
    }
}

/// Candidate swimmer produced by ingestion, before it has a rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimmerProfile {
    #[serde(default)]
    pub id: SwimmerId,
    pub name: String,
    #[serde(default = "unknown_team")]
    pub team: String,
    #[serde(default)]
    pub best_times: BestTimes,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

fn unknown_team() -> String {
    "Unknown".to_string()
}

/// Result of one decided comparison, as recorded in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub winner_id: SwimmerId,
    pub loser_id: SwimmerId,
    pub winner_old_rating: RatingValue,
    pub winner_new_rating: RatingValue,
    pub loser_old_rating: RatingValue,
    pub loser_new_rating: RatingValue,
    pub delta: RatingValue,
}
