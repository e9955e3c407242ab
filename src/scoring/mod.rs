pub mod benchmarks;
pub mod events;
pub mod points;

pub use benchmarks::BenchmarkTable;
pub use events::{parse_event_label, Course, EventKey, EventLabelError, Stroke};
pub use points::{event_points, overall_score, score_events, ScoreSummary, ScoredEvent};
