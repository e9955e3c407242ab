use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::connection::DbConn;
use super::history;
use crate::domain::{merge_best_times, BestTimes, ComparisonOutcome, Swimmer, SwimmerProfile};
use crate::errors::RankingError;
use crate::rating::RatingUpdate;

const SWIMMER_COLUMNS: &str =
    "id, name, team, rating, vote_count, best_times, profile_image, twitter, instagram";

/// Insert a newly ingested swimmer with the starting rating and no votes.
///
/// When the id is already known, rating and vote count stay untouched; best
/// times are merged keeping the faster time per event and the descriptive
/// fields are refreshed.
pub fn insert_new_swimmer(
    conn: &mut DbConn,
    profile: &SwimmerProfile,
    default_rating: f64,
) -> Result<Swimmer> {
    let tx = conn.transaction().context("Failed to start transaction")?;

    let swimmer = match find_in(&tx, &profile.id)? {
        Some(mut existing) => {
            let changed = merge_best_times(&mut existing.best_times, profile.best_times.clone());
            log::debug!("Swimmer {} already known, {} times improved", existing.id, changed);
            refresh_existing(&tx, existing, profile)?
        }
        None => insert_row(&tx, profile, default_rating)?,
    };

    tx.commit().context("Failed to commit swimmer insert")?;
    Ok(swimmer)
}

fn insert_row(conn: &Connection, profile: &SwimmerProfile, default_rating: f64) -> Result<Swimmer> {
    let sql = format!(
        "INSERT INTO swimmers ({SWIMMER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7, ?8) RETURNING {SWIMMER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            profile.id,
            profile.name,
            profile.team,
            default_rating,
            encode_best_times(&profile.best_times)?,
            profile.profile_image,
            profile.twitter,
            profile.instagram,
        ],
        parse_swimmer_row,
    )
    .with_context(|| format!("Failed to insert swimmer {}", profile.id))
}

fn refresh_existing(conn: &Connection, existing: Swimmer, profile: &SwimmerProfile) -> Result<Swimmer> {
    let sql = format!(
        "UPDATE swimmers SET name = ?2, team = ?3, best_times = ?4, \
         profile_image = COALESCE(?5, profile_image), twitter = COALESCE(?6, twitter), \
         instagram = COALESCE(?7, instagram), updated_at = CURRENT_TIMESTAMP \
         WHERE id = ?1 RETURNING {SWIMMER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            existing.id,
            profile.name,
            profile.team,
            encode_best_times(&existing.best_times)?,
            profile.profile_image,
            profile.twitter,
            profile.instagram,
        ],
        parse_swimmer_row,
    )
    .with_context(|| format!("Failed to update swimmer {}", existing.id))
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Swimmer>> {
    find_in(conn, id)
}

fn find_in(conn: &Connection, id: &str) -> Result<Option<Swimmer>> {
    let sql = format!("SELECT {SWIMMER_COLUMNS} FROM swimmers WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_swimmer_row)
        .optional()
        .context("Failed to query swimmer by id")
}

/// Every swimmer, highest rated first
pub fn list_all(conn: &mut DbConn) -> Result<Vec<Swimmer>> {
    let sql = format!("SELECT {SWIMMER_COLUMNS} FROM swimmers ORDER BY rating DESC, name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_swimmer_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM swimmers", [], |row| row.get(0))
        .context("Failed to count swimmers")
}

/// Decide and persist one vote in a single write transaction.
///
/// Both swimmers are read after the write lock is taken, so concurrent votes
/// always compute from the latest committed ratings.
pub fn record_vote<F>(conn: &mut DbConn, winner_id: &str, loser_id: &str, compute: F) -> Result<ComparisonOutcome>
where
    F: FnOnce(&Swimmer, &Swimmer) -> Result<RatingUpdate, RankingError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start vote transaction")?;

    let winner = require_in(&tx, winner_id)?;
    let loser = require_in(&tx, loser_id)?;
    let update = compute(&winner, &loser)?;

    let outcome = ComparisonOutcome {
        winner_id: winner.id,
        loser_id: loser.id,
        winner_old_rating: winner.rating,
        winner_new_rating: update.winner_new_rating,
        loser_old_rating: loser.rating,
        loser_new_rating: update.loser_new_rating,
        delta: update.delta,
    };
    write_comparison(&tx, &outcome)?;

    tx.commit().context("Failed to commit vote")?;
    Ok(outcome)
}

/// Persist an already decided comparison atomically: both new ratings, one
/// more vote for each swimmer and a history row.
pub fn apply_comparison(conn: &mut DbConn, outcome: &ComparisonOutcome) -> Result<()> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start transaction")?;

    write_comparison(&tx, outcome)?;

    tx.commit().context("Failed to commit comparison")
}

fn write_comparison(conn: &Connection, outcome: &ComparisonOutcome) -> Result<()> {
    update_rating(conn, &outcome.winner_id, outcome.winner_new_rating)?;
    update_rating(conn, &outcome.loser_id, outcome.loser_new_rating)?;
    history::insert_comparison(conn, outcome)?;
    Ok(())
}

fn require_in(conn: &Connection, id: &str) -> Result<Swimmer> {
    find_in(conn, id)?.ok_or_else(|| RankingError::SwimmerNotFound { id: id.to_string() }.into())
}

fn update_rating(conn: &Connection, id: &str, rating: f64) -> Result<()> {
    let sql = "UPDATE swimmers SET rating = ?1, vote_count = vote_count + 1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2";

    let updated = conn
        .execute(sql, params![rating, id])
        .with_context(|| format!("Failed to update rating for swimmer {}", id))?;

    if updated != 1 {
        anyhow::bail!("Swimmer {} not found", id);
    }
    Ok(())
}

fn encode_best_times(best_times: &BestTimes) -> Result<String> {
    serde_json::to_string(best_times).context("Failed to serialize best times")
}

fn parse_swimmer_row(row: &rusqlite::Row) -> rusqlite::Result<Swimmer> {
    let best_times_json: String = row.get(5)?;
    let best_times: BestTimes = serde_json::from_str(&best_times_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Swimmer {
        id: row.get(0)?,
        name: row.get(1)?,
        team: row.get(2)?,
        rating: row.get(3)?,
        vote_count: row.get(4)?,
        best_times,
        profile_image: row.get(6)?,
        twitter: row.get(7)?,
        instagram: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::setup::ensure_schema;
    use crate::domain::RecordedTime;

    fn connection() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        ensure_schema(&mut conn).unwrap();
        conn
    }

    fn profile(id: &str, event: &str, seconds: f64) -> SwimmerProfile {
        let mut best_times = BestTimes::new();
        best_times.insert(event.to_string(), RecordedTime::new(format!("{:.2}", seconds), seconds));
        SwimmerProfile {
            id: id.to_string(),
            name: format!("Swimmer {}", id),
            team: "Stanford".to_string(),
            best_times,
            profile_image: None,
            twitter: None,
            instagram: None,
        }
    }

    fn outcome(winner: &str, loser: &str, winner_new: f64, loser_new: f64) -> ComparisonOutcome {
        ComparisonOutcome {
            winner_id: winner.to_string(),
            loser_id: loser.to_string(),
            winner_old_rating: 1500.0,
            winner_new_rating: winner_new,
            loser_old_rating: 1500.0,
            loser_new_rating: loser_new,
            delta: winner_new - 1500.0,
        }
    }

    #[test]
    fn new_swimmers_start_at_default_rating() {
        let mut conn = connection();
        let swimmer = insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();

        assert_eq!(swimmer.rating, 1500.0);
        assert_eq!(swimmer.vote_count, 0);
        assert_eq!(swimmer.best_times["100 Y FREE"].seconds, Some(45.0));

        let loaded = find_by_id(&mut conn, "1").unwrap().unwrap();
        assert_eq!(loaded, swimmer);
        assert_eq!(count(&mut conn).unwrap(), 1);
    }

    #[test]
    fn reingesting_keeps_rating_and_faster_times() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();
        insert_new_swimmer(&mut conn, &profile("2", "100 Y FREE", 46.0), 1500.0).unwrap();
        apply_comparison(&mut conn, &outcome("1", "2", 1524.0, 1476.0)).unwrap();

        let mut slower = profile("1", "100 Y FREE", 47.0);
        slower.best_times.insert("50 Y FREE".into(), RecordedTime::new("20.00", 20.0));
        slower.profile_image = Some("https://img/1.png".into());
        let swimmer = insert_new_swimmer(&mut conn, &slower, 1500.0).unwrap();

        assert_eq!(swimmer.rating, 1524.0);
        assert_eq!(swimmer.vote_count, 1);
        assert_eq!(swimmer.best_times["100 Y FREE"].seconds, Some(45.0));
        assert_eq!(swimmer.best_times["50 Y FREE"].seconds, Some(20.0));
        assert_eq!(swimmer.profile_image.as_deref(), Some("https://img/1.png"));
    }

    #[test]
    fn comparison_updates_both_swimmers_and_history() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();
        insert_new_swimmer(&mut conn, &profile("2", "100 Y FREE", 46.0), 1500.0).unwrap();

        apply_comparison(&mut conn, &outcome("2", "1", 1524.0, 1476.0)).unwrap();

        let all = list_all(&mut conn).unwrap();
        assert_eq!(all[0].id, "2");
        assert_eq!(all[0].rating, 1524.0);
        assert_eq!(all[1].rating, 1476.0);
        assert!(all.iter().all(|s| s.vote_count == 1));
        assert_eq!(history::count(&mut conn).unwrap(), 1);
    }

    #[test]
    fn comparison_with_unknown_swimmer_is_rolled_back() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();

        assert!(apply_comparison(&mut conn, &outcome("1", "missing", 1524.0, 1476.0)).is_err());

        let swimmer = find_by_id(&mut conn, "1").unwrap().unwrap();
        assert_eq!(swimmer.rating, 1500.0);
        assert_eq!(swimmer.vote_count, 0);
        assert_eq!(history::count(&mut conn).unwrap(), 0);
    }

    #[test]
    fn vote_computes_from_stored_ratings() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();
        insert_new_swimmer(&mut conn, &profile("2", "100 Y FREE", 46.0), 1500.0).unwrap();
        apply_comparison(&mut conn, &outcome("2", "1", 1524.0, 1476.0)).unwrap();

        let recorded = record_vote(&mut conn, "1", "2", |winner, loser| {
            assert_eq!(winner.rating, 1476.0);
            assert_eq!(loser.rating, 1524.0);
            Ok(RatingUpdate {
                winner_new_rating: winner.rating + 30.0,
                loser_new_rating: loser.rating - 30.0,
                delta: 30.0,
            })
        })
        .unwrap();

        assert_eq!(recorded.winner_old_rating, 1476.0);
        assert_eq!(recorded.winner_new_rating, 1506.0);
        assert_eq!(find_by_id(&mut conn, "2").unwrap().unwrap().rating, 1494.0);
        assert_eq!(history::count(&mut conn).unwrap(), 2);
    }

    #[test]
    fn vote_for_unknown_swimmer_changes_nothing() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();

        let err = record_vote(&mut conn, "1", "missing", |_, _| unreachable!()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RankingError>(),
            Some(&RankingError::SwimmerNotFound { id: "missing".into() })
        );
        assert_eq!(history::count(&mut conn).unwrap(), 0);
    }

    #[test]
    fn rejected_computation_rolls_back() {
        let mut conn = connection();
        insert_new_swimmer(&mut conn, &profile("1", "100 Y FREE", 45.0), 1500.0).unwrap();

        let err = record_vote(&mut conn, "1", "1", |w, _| {
            Err(RankingError::InvalidComparison { id: w.id.clone() })
        })
        .unwrap_err();

        assert!(matches!(err.downcast_ref::<RankingError>(), Some(RankingError::InvalidComparison { .. })));
        assert_eq!(find_by_id(&mut conn, "1").unwrap().unwrap().vote_count, 0);
    }
}
