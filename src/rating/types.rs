use serde::{Deserialize, Serialize};

pub type RatingValue = f64;

/// Anything the pair selector and rating updater can work with
pub trait Rated {
    fn id(&self) -> &str;
    fn rating(&self) -> RatingValue;
    fn vote_count(&self) -> u32;
}

/// New ratings after one decided comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingUpdate {
    pub winner_new_rating: RatingValue,
    pub loser_new_rating: RatingValue,
    /// Points moved from loser to winner, never negative
    pub delta: RatingValue,
}

#[derive(Debug)]
pub struct Pair<'a, T> {
    pub left: &'a T,
    pub right: &'a T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Provisional, // still on the high K-factor
    Established,
}

impl ConfidenceLevel {
    pub fn from_vote_count(votes: u32, threshold: u32) -> Self {
        if votes < threshold {
            ConfidenceLevel::Provisional
        } else {
            ConfidenceLevel::Established
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConfidenceLevel::Provisional => "provisional",
            ConfidenceLevel::Established => "established",
        }
    }
}
