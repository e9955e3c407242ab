use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::connection::DbConn;
use super::models::DbComparison;
use crate::domain::ComparisonOutcome;

pub fn insert_comparison(conn: &Connection, outcome: &ComparisonOutcome) -> Result<i64> {
    conn.execute(
        "INSERT INTO comparisons (winner_id, loser_id, winner_old_rating, loser_old_rating, winner_new_rating, loser_new_rating, delta)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            outcome.winner_id,
            outcome.loser_id,
            outcome.winner_old_rating,
            outcome.loser_old_rating,
            outcome.winner_new_rating,
            outcome.loser_new_rating,
            outcome.delta,
        ],
    )
    .context("Failed to insert comparison")?;

    Ok(conn.last_insert_rowid())
}

/// Most recent comparisons first
pub fn list_recent(conn: &mut DbConn, limit: u32) -> Result<Vec<DbComparison>> {
    let mut stmt = conn.prepare(
        "SELECT id, winner_id, loser_id, winner_old_rating, loser_old_rating, winner_new_rating, loser_new_rating, delta, created_at
         FROM comparisons
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(DbComparison {
                id: row.get(0)?,
                outcome: ComparisonOutcome {
                    winner_id: row.get(1)?,
                    loser_id: row.get(2)?,
                    winner_old_rating: row.get(3)?,
                    loser_old_rating: row.get(4)?,
                    winner_new_rating: row.get(5)?,
                    loser_new_rating: row.get(6)?,
                    delta: row.get(7)?,
                },
                created_at: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM comparisons", [], |row| row.get(0))
        .context("Failed to count comparisons")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::setup::ensure_schema;
    use crate::database::swimmers::insert_new_swimmer;
    use crate::domain::SwimmerProfile;

    fn outcome(winner: &str, loser: &str, delta: f64) -> ComparisonOutcome {
        ComparisonOutcome {
            winner_id: winner.to_string(),
            loser_id: loser.to_string(),
            winner_old_rating: 1500.0,
            winner_new_rating: 1500.0 + delta,
            loser_old_rating: 1500.0,
            loser_new_rating: 1500.0 - delta,
            delta,
        }
    }

    fn connection_with_swimmers(ids: &[&str]) -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        ensure_schema(&mut conn).unwrap();
        for id in ids {
            let profile = SwimmerProfile {
                id: id.to_string(),
                name: format!("Swimmer {}", id),
                team: "Unknown".to_string(),
                best_times: Default::default(),
                profile_image: None,
                twitter: None,
                instagram: None,
            };
            insert_new_swimmer(&mut conn, &profile, 1500.0).unwrap();
        }
        conn
    }

    #[test]
    fn lists_newest_first_up_to_limit() {
        let mut conn = connection_with_swimmers(&["a", "b", "c"]);

        insert_comparison(&conn, &outcome("a", "b", 24.0)).unwrap();
        insert_comparison(&conn, &outcome("b", "c", 20.0)).unwrap();
        insert_comparison(&conn, &outcome("c", "a", 16.0)).unwrap();

        let recent = list_recent(&mut conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].outcome.winner_id, "c");
        assert_eq!(recent[1].outcome.delta, 20.0);
        assert!(recent[0].created_at.is_some());
        assert_eq!(count(&mut conn).unwrap(), 3);
    }

    #[test]
    fn rejects_self_comparison_rows() {
        let mut conn = connection_with_swimmers(&["a"]);

        let err = insert_comparison(&conn, &outcome("a", "a", 24.0)).unwrap_err();
        assert!(format!("{:#}", err).contains("CHECK constraint failed"), "{:#}", err);
        assert_eq!(count(&mut conn).unwrap(), 0);
    }

    #[test]
    fn rejects_rows_for_unknown_swimmers() {
        let conn = connection_with_swimmers(&["a"]);

        let err = insert_comparison(&conn, &outcome("a", "ghost", 24.0)).unwrap_err();
        assert!(format!("{:#}", err).contains("FOREIGN KEY constraint failed"), "{:#}", err);
    }
}
