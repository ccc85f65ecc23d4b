use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::{Game, GameId};

pub fn insert_game(conn: &Connection, name: &str) -> Result<Game> {
    let sql = "INSERT INTO game (name) VALUES (?1) RETURNING id, name";

    conn.query_row(sql, params![name], parse_game_row)
        .context("Failed to insert game")
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn find_by_id(conn: &Connection, id: GameId) -> Result<Option<Game>> {
    let sql = "SELECT id, name FROM game WHERE id = ?1";

    conn.query_row(sql, params![id], parse_game_row)
        .optional()
        .context("Failed to query game by id")
}

/// First game registered under `name`, if any.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Game>> {
    let sql = "SELECT id, name FROM game WHERE name = ?1 ORDER BY id LIMIT 1";

    conn.query_row(sql, params![name], parse_game_row)
        .optional()
        .context("Failed to query game by name")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Game>> {
    let sql = "SELECT id, name FROM game ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
