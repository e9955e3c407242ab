use std::path::PathBuf;

/// Constants of the ELO-style rating update
#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub default_rating: f64,
    pub min_k: f64,
    pub max_k: f64,
    /// Votes after which a swimmer is no longer treated as volatile
    pub confidence_threshold: u32,
    /// Rating gap up to which updates are applied at full strength
    pub base_diff: f64,
    pub volatility_span: f64,
    pub volatility_floor: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            min_k: 16.0,
            max_k: 48.0,
            confidence_threshold: 30,
            base_diff: 400.0,
            volatility_span: 800.0,
            volatility_floor: 0.5,
        }
    }
}

/// Similarity window used when picking the next pair
#[derive(Debug, Clone)]
pub struct PairingSettings {
    pub initial_window: f64,
    pub window_step: f64,
    pub max_window: f64,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            initial_window: 50.0,
            window_step: 50.0,
            max_window: 500.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Positional weights applied to the best events, highest first
    pub top_event_weights: Vec<f64>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            top_event_weights: vec![0.40, 0.40, 0.15, 0.05],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 50, // 20 req/sec
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            timeout_secs: 30,
            base_url: "https://www.swimcloud.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub pairing: PairingSettings,
    pub scoring: ScoringSettings,
    pub scraper: ScraperSettings,
    pub database_path: String,
    pub benchmarks_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rating: RatingSettings::default(),
            pairing: PairingSettings::default(),
            scoring: ScoringSettings::default(),
            scraper: ScraperSettings::default(),
            database_path: "swimmer_ratings.db".to_string(),
            benchmarks_path: None,
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `DATABASE_PATH`, `BENCHMARKS_PATH` and `SCRAPER_BASE_URL`
    pub fn new() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = path;
        }
        config.benchmarks_path = std::env::var_os("BENCHMARKS_PATH").map(PathBuf::from);
        if let Ok(url) = std::env::var("SCRAPER_BASE_URL") {
            config.scraper.base_url = url.trim_end_matches('/').to_string();
        }

        config
    }
}
