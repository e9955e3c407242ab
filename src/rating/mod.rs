pub mod elo;
pub mod pairing;
pub mod types;

pub use elo::calculate_new_ratings;
pub use pairing::{select_pair, PairRng};
pub use types::{ConfidenceLevel, Pair, Rated, RatingUpdate, RatingValue};
