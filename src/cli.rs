use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Head-to-head swimmer rating service")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Scrape a swimmer profile and add it to the database
    Add {
        /// Swimmer id or profile URL
        swimmer: String,
    },
    /// Import swimmers from a JSON roster keyed by swimmer id
    Import {
        /// Path to the roster file
        path: PathBuf,
    },
    /// Show the next pair to compare
    Pair,
    /// Record a head-to-head vote
    Vote {
        /// Id of the preferred swimmer
        winner: String,
        /// Id of the other swimmer
        loser: String,
    },
    /// Print the leaderboard
    Leaderboard {
        /// Only show swimmers whose name or team matches
        #[arg(short, long)]
        search: Option<String>,
        /// Number of rows to print
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },
    /// Show a swimmer with scored events
    Profile {
        /// Swimmer id
        id: String,
    },
    /// Show recent comparisons
    History {
        /// Number of comparisons to print
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
