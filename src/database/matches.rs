use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::models::{GameId, Match, MatchId, RecentMatch};

pub fn insert_match(conn: &Connection, game_id: GameId, timestamp: NaiveDateTime) -> Result<Match> {
    let sql = "INSERT INTO \"match\" (game_id, timestamp) VALUES (?1, ?2) RETURNING id, game_id, timestamp";

    conn.query_row(sql, params![game_id, timestamp], parse_match_row)
        .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        game_id: row.get(1)?,
        timestamp: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<Match>> {
    let sql = "SELECT id, game_id, timestamp FROM \"match\" WHERE id = ?1";

    conn.query_row(sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

/// Newest matches first, joined with the game they were played in.
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<RecentMatch>> {
    let sql = "
        SELECT m.id, g.name, m.timestamp
        FROM \"match\" m
        JOIN game g ON g.id = m.game_id
        ORDER BY m.timestamp DESC, m.id DESC
        LIMIT ?1
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(RecentMatch {
                match_id: row.get(0)?,
                game_name: row.get(1)?,
                timestamp: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_all(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM \"match\"", [], |row| row.get(0))
        .context("Failed to count matches")
}
