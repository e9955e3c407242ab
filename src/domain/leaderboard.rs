use serde::Serialize;

use super::eligibility::is_eligible;
use super::models::Swimmer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub swimmer: Swimmer,
}

/// Rank eligible swimmers by rating, highest first. Equal ratings share a
/// rank and the next distinct rating skips ahead (1, 1, 3).
pub fn rank_swimmers(swimmers: Vec<Swimmer>) -> Vec<LeaderboardEntry> {
    let mut eligible: Vec<Swimmer> = swimmers
        .into_iter()
        .filter(|s| is_eligible(s.best_times.keys()))
        .collect();

    eligible.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));

    let mut entries = Vec::with_capacity(eligible.len());
    let mut previous_rating: Option<f64> = None;
    let mut rank = 0;

    for (position, swimmer) in eligible.into_iter().enumerate() {
        if previous_rating != Some(swimmer.rating) {
            rank = position + 1;
            previous_rating = Some(swimmer.rating);
        }
        entries.push(LeaderboardEntry { rank, swimmer });
    }

    entries
}

/// Keep entries whose name or team contains `term` (case-insensitive); ranks are preserved
pub fn search(entries: Vec<LeaderboardEntry>, term: &str) -> Vec<LeaderboardEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| {
            entry.swimmer.name.to_lowercase().contains(&needle)
                || entry.swimmer.team.to_lowercase().contains(&needle)
        })
        .collect()
}
