pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod ledger;
pub mod output;
pub mod rating;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use clap::{CommandFactory, Parser};
use cli::Cli;

use crate::config::settings::AppConfig;
use crate::database::GameId;
use crate::ledger::{MatchLedger, Placement};
use crate::services::import::ImportService;
use crate::services::server::ServerService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn open_ledger(config: &AppConfig) -> Result<MatchLedger> {
    let pool = database::create_pool(&config.database)?;
    MatchLedger::open(pool, config.rating)
        .with_context(|| format!("Failed to open ledger at {}", config.database.path))
}

pub fn handle_serve(port: u16, config: AppConfig) -> Result<()> {
    let ledger = open_ledger(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config, ledger);
        service.run().await
    })
}

pub fn handle_add_game(config: &AppConfig, name: &str) -> Result<()> {
    let id = open_ledger(config)?.register_game(name)?;
    println!("Registered game #{}", id);
    Ok(())
}

pub fn handle_add_player(config: &AppConfig, name: &str) -> Result<()> {
    let id = open_ledger(config)?.register_player(name)?;
    println!("Registered player #{}", id);
    Ok(())
}

pub fn handle_add_match(
    config: &AppConfig,
    game_id: GameId,
    at: Option<NaiveDateTime>,
    standings: &[Placement],
) -> Result<()> {
    let ledger = open_ledger(config)?;
    let timestamp = at.unwrap_or_else(|| Utc::now().naive_utc());
    let match_id = ledger.record_match(game_id, timestamp, standings)?;
    output::print_participants(match_id, &ledger.match_participants(match_id)?);
    Ok(())
}

pub fn handle_players(config: &AppConfig) -> Result<()> {
    output::print_players(&open_ledger(config)?.list_players()?);
    Ok(())
}

pub fn handle_games(config: &AppConfig) -> Result<()> {
    output::print_games(&open_ledger(config)?.list_games()?);
    Ok(())
}

pub fn handle_matches(config: &AppConfig, limit: usize) -> Result<()> {
    output::print_matches(&open_ledger(config)?.list_recent_matches(limit)?);
    Ok(())
}

pub fn handle_history(config: &AppConfig) -> Result<()> {
    output::print_history(&open_ledger(config)?.get_rating_history()?);
    Ok(())
}

pub fn handle_import(config: &AppConfig, path: &Path) -> Result<()> {
    let ledger = open_ledger(config)?;
    let summary = ImportService::new(ledger).run(path)?;
    output::print_import_summary(&summary);
    Ok(())
}

pub fn handle_audit(config: &AppConfig) -> Result<()> {
    let drifts = open_ledger(config)?.audit()?;
    output::print_audit(&drifts);
    if !drifts.is_empty() {
        anyhow::bail!("{} player ratings disagree with their history", drifts.len());
    }
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}
