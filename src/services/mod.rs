pub mod ingestion;
pub mod ranking;
pub mod server;
