use chrono::NaiveDateTime;

use crate::domain::ComparisonOutcome;

/// Row of the `comparisons` history table
#[derive(Debug, Clone)]
pub struct DbComparison {
    pub id: i64,
    pub outcome: ComparisonOutcome,
    pub created_at: Option<NaiveDateTime>,
}
