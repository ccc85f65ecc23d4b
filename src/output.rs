use colored::Colorize;

use crate::database::{Game, ParticipantRow, Player, PlayerHistory, RatingDrift, RecentMatch};
use crate::services::import::ImportSummary;

pub fn print_players(players: &[Player]) {
    println!("{}", format!("{:>4}  {:>6}  {:<24} {:>9}", "#", "id", "name", "rating").bold());
    for (idx, player) in players.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:<24} {:>9.2}",
            idx + 1,
            player.id,
            player.name,
            player.rating
        );
    }
}

pub fn print_games(games: &[Game]) {
    println!("{}", format!("{:>6}  {}", "id", "name").bold());
    for game in games {
        println!("{:>6}  {}", game.id, game.name);
    }
}

pub fn print_matches(matches: &[RecentMatch]) {
    println!("{}", format!("{:>6}  {:<20} {}", "id", "played", "game").bold());
    for recent in matches {
        println!(
            "{:>6}  {:<20} {}",
            recent.match_id,
            recent.timestamp.format("%Y-%m-%d %H:%M:%S"),
            recent.game_name
        );
    }
}

pub fn print_participants(match_id: i64, participants: &[ParticipantRow]) {
    println!("{}", format!("Match #{}", match_id).bold());
    for row in participants {
        println!(
            "{:>4}  {:<24} {}  → {:.2}",
            row.position,
            row.player_name,
            signed_delta(row.rating_delta),
            row.rating_after
        );
    }
}

pub fn print_history(histories: &[PlayerHistory]) {
    for history in histories {
        println!("{}", format!("{} (#{})", history.name, history.player_id).bold());
        for entry in &history.ratings {
            println!(
                "  {}  match {:>6}  {}  → {:.2}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.match_id,
                signed_delta(entry.rating_delta),
                entry.rating
            );
        }
    }
}

pub fn print_audit(drifts: &[RatingDrift]) {
    if drifts.is_empty() {
        println!("{}", "All ratings match their history".green());
        return;
    }
    for drift in drifts {
        println!(
            "{} player {}: stored {:.6}, history says {:.6}",
            "DRIFT".red().bold(),
            drift.player_id,
            drift.stored_rating,
            drift.replayed_rating
        );
    }
}

pub fn print_import_summary(summary: &ImportSummary) {
    println!(
        "Imported {} matches ({} new games, {} new players)",
        summary.matches_recorded, summary.games_created, summary.players_created
    );
}

fn signed_delta(delta: f64) -> String {
    let text = format!("{:+8.2}", delta);
    if delta > 0.0 {
        text.green().to_string()
    } else if delta < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}
