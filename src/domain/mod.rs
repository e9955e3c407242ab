pub mod eligibility;
pub mod leaderboard;
pub mod models;
pub mod records;
pub mod times;

pub use eligibility::{is_diver, is_eligible};
pub use leaderboard::{rank_swimmers, LeaderboardEntry};
pub use models::*;
pub use records::{format_event_label, initials, merge_best_time, merge_best_times};
pub use times::parse_swim_time;
