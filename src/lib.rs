pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod output;
pub mod rate_limiter;
pub mod rating;
pub mod scoring;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::Path;

use crate::api::models::{ComparisonItem, LeaderboardItem, SwimmerSummary};
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::database::DbPool;
use crate::services::ingestion::IngestionService;
use crate::services::ranking::RankingService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_database(config: &AppConfig) -> Result<DbPool> {
    let pool = database::create_pool(&config.database_path)?;
    database::setup::ensure_schema(&mut database::get_connection(&pool)?)?;
    Ok(pool)
}

fn ranking_service() -> Result<RankingService> {
    let config = AppConfig::new();
    let pool = open_database(&config)?;
    RankingService::new(pool, config)
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_add(swimmer: &str) -> Result<()> {
    let config = AppConfig::new();
    let pool = open_database(&config)?;
    let service = IngestionService::new(pool, config);

    let runtime = tokio::runtime::Runtime::new()?;
    let swimmer = runtime.block_on(service.add_swimmer(swimmer))?;

    output::success(&format!("Added {} ({}) [{}]", swimmer.name, swimmer.team, swimmer.id));
    Ok(())
}

pub fn handle_import(path: &Path) -> Result<()> {
    let config = AppConfig::new();
    let pool = open_database(&config)?;
    let service = IngestionService::new(pool, config);

    let stored = service.import_roster(path)?;
    output::success(&format!("Imported {} swimmers", stored));
    Ok(())
}

pub fn handle_pair() -> Result<()> {
    let service = ranking_service()?;
    let pair = service.next_pair(&mut rand::thread_rng())?;

    output::section("Next Pair");
    output::swimmer_line("A:", &SwimmerSummary::from(pair.left));
    output::swimmer_line("B:", &SwimmerSummary::from(pair.right));
    Ok(())
}

pub fn handle_vote(winner: &str, loser: &str) -> Result<()> {
    let service = ranking_service()?;
    let outcome = service.record_vote(winner, loser)?;

    output::section("Vote Recorded");
    output::kv(&outcome.winner_id, output::rating_change(outcome.winner_old_rating, outcome.winner_new_rating));
    output::kv(&outcome.loser_id, output::rating_change(outcome.loser_old_rating, outcome.loser_new_rating));
    Ok(())
}

pub fn handle_leaderboard(search: Option<&str>, limit: usize) -> Result<()> {
    let service = ranking_service()?;
    let entries = service.leaderboard(search)?;

    output::section(&format!("Leaderboard ({} swimmers)", entries.len()));
    for entry in entries.into_iter().take(limit).map(LeaderboardItem::from) {
        output::swimmer_line(&format!("{:>4}.", entry.rank), &entry.swimmer);
    }
    Ok(())
}

pub fn handle_profile(id: &str) -> Result<()> {
    let service = ranking_service()?;
    let detail = service.profile(id)?;

    output::section(&detail.swimmer.name);
    output::kv("Team", &detail.swimmer.team);
    output::kv("Rating", format!("{:.1}", detail.swimmer.rating));
    output::kv("Votes", format!("{} ({})", detail.swimmer.vote_count, detail.confidence.as_str()));
    output::kv("Overall", detail.scores.overall_score);

    for event in &detail.scores.scored_events {
        output::kv(&event.event, format!("{} ({} pts)", event.time, event.points));
    }
    for event in &detail.scores.unscored_events {
        output::kv(&event.event, format!("{} (unscored)", event.time));
    }
    Ok(())
}

pub fn handle_history(limit: u32) -> Result<()> {
    let service = ranking_service()?;
    let rows = service.recent_comparisons(limit)?;

    output::section("Recent Comparisons");
    for item in rows.into_iter().map(ComparisonItem::from) {
        output::kv(
            &item.created_at.unwrap_or_default(),
            format!("{} beat {} (+{:.1})", item.winner_id, item.loser_id, item.delta),
        );
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
