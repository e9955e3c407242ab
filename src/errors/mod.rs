use anyhow::Context as _;
use thiserror::Error;

/// Caller errors raised by the rating core and the ranking service
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankingError {
    #[error("Not enough eligible swimmers to form a pair (found {eligible})")]
    NotEnoughEntities { eligible: usize },

    #[error("Swimmer {id} cannot be compared against itself")]
    InvalidComparison { id: String },

    #[error("Swimmer {id} not found")]
    SwimmerNotFound { id: String },
}

/// Failures while bringing a swimmer in from a profile page
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestionError {
    #[error("Not a swimmer id or profile URL: {reference}")]
    InvalidReference { reference: String },

    #[error("Failed to load swimmer profile from {url}: {reason}")]
    Upstream { url: String, reason: String },
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, url: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(url))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
