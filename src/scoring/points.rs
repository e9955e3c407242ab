use log::debug;
use serde::Serialize;

use super::benchmarks::BenchmarkTable;
use super::events::parse_event_label;
use crate::config::ScoringSettings;
use crate::domain::models::BestTimes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvent {
    pub event: String,
    pub time: String,
    pub seconds: Option<f64>,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    /// Events worth points, best first
    pub scored_events: Vec<ScoredEvent>,
    /// Events without a benchmark or a usable time, fastest first
    pub unscored_events: Vec<ScoredEvent>,
    pub overall_score: u32,
}

/// Points for one event: `1000 * (benchmark / achieved)^3`, rounded.
/// Anything that cannot be matched against a benchmark is worth 0.
pub fn event_points(label: &str, seconds: Option<f64>, benchmarks: &BenchmarkTable) -> u32 {
    let Some(achieved) = seconds.filter(|s| s.is_finite() && *s > 0.0) else {
        return 0;
    };

    let key = match parse_event_label(label) {
        Ok(key) => key,
        Err(e) => {
            debug!("Event {:?} left unscored: {}", label, e);
            return 0;
        }
    };

    let Some(benchmark) = benchmarks.lookup(key.course, key.stroke, key.distance) else {
        debug!("No benchmark for {}", key);
        return 0;
    };

    let points = 1000.0 * (benchmark / achieved).powi(3);
    points.round() as u32
}

/// Scores every recorded time and aggregates the overall score
pub fn score_events(
    best_times: &BestTimes,
    benchmarks: &BenchmarkTable,
    settings: &ScoringSettings,
) -> ScoreSummary {
    let (mut scored_events, mut unscored_events): (Vec<_>, Vec<_>) = best_times
        .iter()
        .map(|(event, recorded)| ScoredEvent {
            event: event.clone(),
            time: recorded.time.clone(),
            seconds: recorded.seconds,
            points: event_points(event, recorded.seconds, benchmarks),
        })
        .partition(|e| e.points > 0);

    scored_events.sort_by(|a, b| b.points.cmp(&a.points));
    unscored_events.sort_by(|a, b| {
        a.seconds
            .unwrap_or(0.0)
            .total_cmp(&b.seconds.unwrap_or(0.0))
    });

    let overall_score = overall_score(&scored_events, &settings.top_event_weights);

    ScoreSummary {
        scored_events,
        unscored_events,
        overall_score,
    }
}

/// Weighted average of the best events. `scored` must be sorted best first;
/// the average is taken over the weights actually used, so fewer events are
/// not penalised.
pub fn overall_score(scored: &[ScoredEvent], weights: &[f64]) -> u32 {
    let (total, weight_sum) = scored
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(total, weight_sum), (event, &weight)| {
            (total + event.points as f64 * weight, weight_sum + weight)
        });

    if weight_sum <= 0.0 {
        return 0;
    }
    (total / weight_sum).round() as u32
}
