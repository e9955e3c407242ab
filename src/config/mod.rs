pub mod settings;

pub use settings::{AppConfig, PairingSettings, RatingSettings, ScoringSettings, ScraperSettings};
