use super::types::{Rated, RatingUpdate, RatingValue};
use crate::config::RatingSettings;
use crate::errors::RankingError;

/// Computes both new ratings after `winner` beat `loser`.
///
/// The K-factor is the mean of both swimmers' K-factors, and the change is
/// damped when the rating gap is larger than `base_diff`. The caller persists
/// the result and increments both vote counts.
pub fn calculate_new_ratings<T: Rated>(
    winner: &T,
    loser: &T,
    settings: &RatingSettings,
) -> Result<RatingUpdate, RankingError> {
    if winner.id() == loser.id() {
        return Err(RankingError::InvalidComparison {
            id: winner.id().to_string(),
        });
    }

    let k = combined_k_factor(winner.vote_count(), loser.vote_count(), settings);
    let expected = expected_score(winner.rating(), loser.rating());
    let rating_diff = (winner.rating() - loser.rating()).abs();
    let volatility = volatility_factor(rating_diff, settings);

    let delta = k * (1.0 - expected) * volatility;

    Ok(RatingUpdate {
        winner_new_rating: winner.rating() + delta,
        loser_new_rating: loser.rating() - delta,
        delta,
    })
}

/// Logistic probability that a swimmer rated `rating` beats `opponent`
pub fn expected_score(rating: RatingValue, opponent: RatingValue) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// K-factor for a single swimmer: `max_k` below the confidence threshold,
/// `min_k` from the threshold on.
pub fn k_factor(vote_count: u32, settings: &RatingSettings) -> f64 {
    if vote_count < settings.confidence_threshold {
        return settings.max_k;
    }

    let threshold = settings.confidence_threshold as f64;
    let factor = ((threshold - vote_count as f64) / threshold).max(0.0);
    settings.min_k + (settings.max_k - settings.min_k) * factor
}

pub fn combined_k_factor(winner_votes: u32, loser_votes: u32, settings: &RatingSettings) -> f64 {
    (k_factor(winner_votes, settings) + k_factor(loser_votes, settings)) / 2.0
}

/// Damping for mismatched pairs, floored at `volatility_floor`
pub fn volatility_factor(rating_diff: f64, settings: &RatingSettings) -> f64 {
    if rating_diff <= settings.base_diff {
        return 1.0;
    }
    let damped = 1.0 - (rating_diff - settings.base_diff) / settings.volatility_span;
    damped.max(settings.volatility_floor)
}
