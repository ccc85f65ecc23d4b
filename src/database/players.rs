use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::Player;
use crate::rating::{PlayerId, RatingValue};

pub fn insert_player(conn: &Connection, name: &str, rating: RatingValue) -> Result<Player> {
    let sql = "INSERT INTO player (name, rating) VALUES (?1, ?2) RETURNING id, name, rating";

    conn.query_row(sql, params![name, rating], parse_player_row)
        .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = "SELECT id, name, rating FROM player WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// First player registered under `name`, if any.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Player>> {
    let sql = "SELECT id, name, rating FROM player WHERE name = ?1 ORDER BY id LIMIT 1";

    conn.query_row(sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

/// Highest rating first; equal ratings keep registration order.
pub fn list_by_rating(conn: &Connection) -> Result<Vec<Player>> {
    let sql = "SELECT id, name, rating FROM player ORDER BY rating DESC, id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Adds `delta` to the stored rating and returns the rating it ends at.
pub fn apply_delta(conn: &Connection, id: PlayerId, delta: RatingValue) -> Result<RatingValue> {
    let sql = "UPDATE player SET rating = rating + ?1 WHERE id = ?2 RETURNING rating";

    conn.query_row(sql, params![delta, id], |row| row.get(0))
        .with_context(|| format!("Failed to update rating of player {}", id))
}
