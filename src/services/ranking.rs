use anyhow::Result;
use log::{debug, info};
use serde::Serialize;

use crate::config::AppConfig;
use crate::database::{self, DbComparison, DbPool};
use crate::domain::leaderboard;
use crate::domain::{is_eligible, rank_swimmers, ComparisonOutcome, LeaderboardEntry, Swimmer};
use crate::errors::RankingError;
use crate::rating::{calculate_new_ratings, select_pair, ConfidenceLevel, PairRng};
use crate::scoring::{score_events, BenchmarkTable, ScoreSummary};

/// Two swimmers to show side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwimmerPair {
    pub left: Swimmer,
    pub right: Swimmer,
}

/// Swimmer with scored events and rating confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwimmerDetail {
    pub swimmer: Swimmer,
    pub scores: ScoreSummary,
    pub confidence: ConfidenceLevel,
}

/// Voting, leaderboard and profile operations over the swimmer database
pub struct RankingService {
    pool: DbPool,
    config: AppConfig,
    benchmarks: BenchmarkTable,
}

impl RankingService {
    /// Uses the benchmark file from the config when set, world records otherwise
    pub fn new(pool: DbPool, config: AppConfig) -> Result<Self> {
        let benchmarks = match &config.benchmarks_path {
            Some(path) => {
                info!("Loading benchmarks from {}", path.display());
                BenchmarkTable::load(path)?
            }
            None => BenchmarkTable::world_records().clone(),
        };

        Ok(Self::with_benchmarks(pool, config, benchmarks))
    }

    pub fn with_benchmarks(pool: DbPool, config: AppConfig, benchmarks: BenchmarkTable) -> Self {
        Self {
            pool,
            config,
            benchmarks,
        }
    }

    pub fn next_pair<R: PairRng + ?Sized>(&self, rng: &mut R) -> Result<SwimmerPair> {
        let eligible: Vec<Swimmer> = self
            .load_swimmers()?
            .into_iter()
            .filter(|s| is_eligible(s.best_times.keys()))
            .collect();

        let pair = select_pair(&eligible, &self.config.pairing, rng)?;
        Ok(SwimmerPair {
            left: pair.left.clone(),
            right: pair.right.clone(),
        })
    }

    /// Apply one vote and return the recorded outcome
    pub fn record_vote(&self, winner_id: &str, loser_id: &str) -> Result<ComparisonOutcome> {
        if winner_id == loser_id {
            return Err(RankingError::InvalidComparison {
                id: winner_id.to_string(),
            }
            .into());
        }

        let settings = &self.config.rating;
        let mut conn = database::get_connection(&self.pool)?;
        let outcome = database::swimmers::record_vote(&mut conn, winner_id, loser_id, |winner, loser| {
            calculate_new_ratings(winner, loser, settings)
        })?;

        debug!(
            "Vote {} > {}: +{:.2} ({:.1} / {:.1})",
            outcome.winner_id, outcome.loser_id, outcome.delta, outcome.winner_new_rating, outcome.loser_new_rating
        );

        Ok(outcome)
    }

    /// Ranked eligible swimmers, optionally narrowed by name or team
    pub fn leaderboard(&self, search: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
        let entries = rank_swimmers(self.load_swimmers()?);

        Ok(match search {
            Some(term) => leaderboard::search(entries, term),
            None => entries,
        })
    }

    pub fn profile(&self, id: &str) -> Result<SwimmerDetail> {
        let mut conn = database::get_connection(&self.pool)?;
        let swimmer = Self::require_swimmer(&mut conn, id)?;

        let scores = score_events(&swimmer.best_times, &self.benchmarks, &self.config.scoring);
        let confidence =
            ConfidenceLevel::from_vote_count(swimmer.vote_count, self.config.rating.confidence_threshold);

        Ok(SwimmerDetail {
            swimmer,
            scores,
            confidence,
        })
    }

    pub fn recent_comparisons(&self, limit: u32) -> Result<Vec<DbComparison>> {
        let mut conn = database::get_connection(&self.pool)?;
        database::history::list_recent(&mut conn, limit)
    }

    fn load_swimmers(&self) -> Result<Vec<Swimmer>> {
        let mut conn = database::get_connection(&self.pool)?;
        database::swimmers::list_all(&mut conn)
    }

    fn require_swimmer(conn: &mut database::DbConn, id: &str) -> Result<Swimmer> {
        database::swimmers::find_by_id(conn, id)?
            .ok_or_else(|| RankingError::SwimmerNotFound { id: id.to_string() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup::ensure_schema};
    use crate::domain::{BestTimes, RecordedTime, SwimmerProfile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(id: &str, name: &str, events: &[(&str, f64)]) -> SwimmerProfile {
        let mut best_times = BestTimes::new();
        for (event, seconds) in events {
            best_times.insert(event.to_string(), RecordedTime::new(format!("{:.2}", seconds), *seconds));
        }
        SwimmerProfile {
            id: id.to_string(),
            name: name.to_string(),
            team: "Texas".to_string(),
            best_times,
            profile_image: None,
            twitter: None,
            instagram: None,
        }
    }

    fn service(profiles: &[SwimmerProfile]) -> RankingService {
        let pool = create_memory_pool().unwrap();
        {
            let mut conn = get_connection(&pool).unwrap();
            ensure_schema(&mut conn).unwrap();
            for p in profiles {
                database::swimmers::insert_new_swimmer(&mut conn, p, 1500.0).unwrap();
            }
        }
        RankingService::new(pool, AppConfig::default()).unwrap()
    }

    fn ranking_error(err: &anyhow::Error) -> Option<&RankingError> {
        err.downcast_ref::<RankingError>()
    }

    #[test]
    fn vote_moves_ratings_and_is_recorded() {
        let service = service(&[
            profile("1", "Alice", &[("100 Y FREE", 45.0)]),
            profile("2", "Bea", &[("100 Y FREE", 46.0)]),
        ]);

        let outcome = service.record_vote("1", "2").unwrap();
        assert_eq!(outcome.winner_new_rating, 1524.0);
        assert_eq!(outcome.loser_new_rating, 1476.0);
        assert_eq!(outcome.delta, 24.0);

        let history = service.recent_comparisons(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].outcome, outcome);
    }

    #[test]
    fn self_vote_and_unknown_ids_are_rejected() {
        let service = service(&[profile("1", "Alice", &[("100 Y FREE", 45.0)])]);

        let err = service.record_vote("1", "1").unwrap_err();
        assert_eq!(ranking_error(&err), Some(&RankingError::InvalidComparison { id: "1".into() }));

        let err = service.record_vote("1", "404").unwrap_err();
        assert_eq!(ranking_error(&err), Some(&RankingError::SwimmerNotFound { id: "404".into() }));
    }

    #[test]
    fn pair_skips_divers() {
        let service = service(&[
            profile("1", "Alice", &[("100 Y FREE", 45.0)]),
            profile("2", "Bea", &[("100 Y BACK", 50.0)]),
            profile("3", "Cleo", &[("1 M DIVING", 300.0)]),
        ]);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let pair = service.next_pair(&mut rng).unwrap();
            assert_ne!(pair.left.id, pair.right.id);
            assert!(pair.left.id != "3" && pair.right.id != "3");
        }
    }

    #[test]
    fn pair_needs_two_eligible_swimmers() {
        let service = service(&[
            profile("1", "Alice", &[("100 Y FREE", 45.0)]),
            profile("2", "Dana", &[]),
        ]);

        let err = service.next_pair(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(ranking_error(&err), Some(&RankingError::NotEnoughEntities { eligible: 1 }));
    }

    #[test]
    fn leaderboard_ranks_and_searches() {
        let service = service(&[
            profile("1", "Alice", &[("100 Y FREE", 45.0)]),
            profile("2", "Bea", &[("100 Y FREE", 46.0)]),
            profile("3", "Cleo", &[("100 Y FREE", 47.0)]),
        ]);
        service.record_vote("3", "1").unwrap();

        let board = service.leaderboard(None).unwrap();
        let order: Vec<(usize, &str)> = board.iter().map(|e| (e.rank, e.swimmer.id.as_str())).collect();
        assert_eq!(order, vec![(1, "3"), (2, "2"), (3, "1")]);

        let found = service.leaderboard(Some("ALI")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rank, 3);
    }

    #[test]
    fn profile_scores_events() {
        let service = service(&[profile("1", "Alice", &[("100 Y FREE", 45.0), ("freestyle", 50.0)])]);

        let detail = service.profile("1").unwrap();
        assert_eq!(detail.confidence, ConfidenceLevel::Provisional);
        assert_eq!(detail.scores.scored_events.len(), 1);
        assert_eq!(detail.scores.scored_events[0].points, 697);
        assert_eq!(detail.scores.unscored_events[0].event, "freestyle");
        assert_eq!(detail.scores.overall_score, 697);

        let err = service.profile("missing").unwrap_err();
        assert!(matches!(ranking_error(&err), Some(RankingError::SwimmerNotFound { .. })));
    }
}
