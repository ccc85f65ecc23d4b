use anyhow::Result;

use getrankd::cli::{Cli, Command};
use getrankd::config::settings::AppConfig;
use getrankd::{
    handle_add_game, handle_add_match, handle_add_player, handle_audit, handle_completions,
    handle_games, handle_history, handle_import, handle_matches, handle_players, handle_serve,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let config = AppConfig::new().with_database_path(cli.database);
    match cli.command {
        Command::Serve { port } => handle_serve(port, config),
        Command::AddGame { name } => handle_add_game(&config, &name),
        Command::AddPlayer { name } => handle_add_player(&config, &name),
        Command::AddMatch { game, at, standings } => handle_add_match(&config, game, at, &standings),
        Command::Players => handle_players(&config),
        Command::Games => handle_games(&config),
        Command::Matches { limit } => handle_matches(&config, limit),
        Command::History => handle_history(&config),
        Command::Import { path } => handle_import(&config, &path),
        Command::Audit => handle_audit(&config),
        Command::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    }
}
