use anyhow::Result;

use swimmer_ranking::cli::Command;
use swimmer_ranking::{
    handle_add, handle_completions, handle_history, handle_import, handle_leaderboard, handle_pair,
    handle_profile, handle_serve, handle_vote, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Add { swimmer } => handle_add(swimmer),
        Command::Import { path } => handle_import(path),
        Command::Pair => handle_pair(),
        Command::Vote { winner, loser } => handle_vote(winner, loser),
        Command::Leaderboard { search, limit } => handle_leaderboard(search.as_deref(), *limit),
        Command::Profile { id } => handle_profile(id),
        Command::History { limit } => handle_history(*limit),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
