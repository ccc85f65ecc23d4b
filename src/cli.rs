use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::ledger::Placement;

#[derive(Parser, Debug)]
#[command(author, version, about = "getrankd multiplayer Elo rating ledger")]
pub struct Cli {
    /// SQLite database file (defaults to $DATABASE_PATH or getrankd.db)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the JSON API server
    Serve {
        /// Port number (optional, defaults to 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
    /// Register a new game
    AddGame { name: String },
    /// Register a new player at the starting rating
    AddPlayer { name: String },
    /// Record a finished match, e.g. `add-match --game 1 3:1 5:2 4:2`
    AddMatch {
        /// Game id
        #[arg(short, long)]
        game: i64,
        /// When the match was played, "YYYY-MM-DD HH:MM:SS" (defaults to now, UTC)
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
        /// Standings as PLAYER_ID:POSITION, lower position is better, ties allowed
        #[arg(required = true, num_args = 1.., value_parser = parse_placement)]
        standings: Vec<Placement>,
    },
    /// List players by rating
    Players,
    /// List registered games
    Games,
    /// List the most recent matches
    Matches {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show every player's rating history
    History,
    /// Import matches from a CSV export
    Import { path: PathBuf },
    /// Check that every rating equals the starting rating plus its recorded deltas
    Audit,
    /// Print shell completions
    Completions { shell: Shell },
}

fn parse_placement(value: &str) -> Result<Placement, String> {
    let (player, position) = value
        .split_once(':')
        .ok_or_else(|| format!("expected PLAYER_ID:POSITION, got '{}'", value))?;
    let player_id = player
        .trim()
        .parse()
        .map_err(|_| format!("invalid player id '{}'", player))?;
    let position = position
        .trim()
        .parse()
        .map_err(|_| format!("invalid position '{}'", position))?;
    Ok(Placement::new(player_id, position))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("invalid timestamp '{}': {}", value, e))
}
