use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::database::{self, DbPool};
use crate::domain::{is_eligible, parse_swim_time, Swimmer, SwimmerProfile};
use crate::errors::with_parse_context;
use crate::fetchers::ProfileScraper;

/// Brings new swimmers into the database, from profile pages or roster files
pub struct IngestionService {
    pool: DbPool,
    config: AppConfig,
}

impl IngestionService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    /// Scrape one swimmer profile and store it
    pub async fn add_swimmer(&self, reference: &str) -> Result<Swimmer> {
        info!("=== Adding Swimmer {} ===", reference);

        let mut scraper = ProfileScraper::new(&self.config.scraper)?;
        let profile = scraper.fetch_profile(reference).await?;

        let swimmer = self.store(&profile)?;
        info!("=== Stored {} ({:.0}) ===", swimmer.name, swimmer.rating);
        Ok(swimmer)
    }

    /// Insert every swimmer from a JSON roster keyed by swimmer id.
    /// Returns how many were stored.
    pub fn import_roster<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        info!("=== Importing Roster {} ===", path.display());

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        let profiles = parse_roster(&json)?;
        info!("  → {} swimmers in roster", profiles.len());

        let mut stored = 0;
        for profile in &profiles {
            if !is_eligible(profile.best_times.keys()) {
                warn!("  → {} has no pool events, stored but not rankable", profile.name);
            }
            self.store(profile)?;
            stored += 1;
        }

        info!("=== Import Complete: {} swimmers ===", stored);
        Ok(stored)
    }

    fn store(&self, profile: &SwimmerProfile) -> Result<Swimmer> {
        let mut conn = database::get_connection(&self.pool)?;
        database::swimmers::insert_new_swimmer(&mut conn, profile, self.config.rating.default_rating)
    }
}

/// Parse `{"<id>": {name, team, best_times, ...}}`. Ids come from the keys and
/// times recorded without seconds are parsed from their display string.
pub fn parse_roster(json: &str) -> Result<Vec<SwimmerProfile>> {
    let roster: BTreeMap<String, SwimmerProfile> =
        with_parse_context(serde_json::from_str(json), "swimmer roster")?;

    Ok(roster
        .into_iter()
        .map(|(id, mut profile)| {
            profile.id = id;
            profile.best_times.retain(|_, recorded| {
                if recorded.seconds.is_none() {
                    recorded.seconds = parse_swim_time(&recorded.time);
                }
                recorded.seconds.is_some()
            });
            profile
        })
        .collect())
}
