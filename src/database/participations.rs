use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::models::{MatchId, MatchParticipation, ParticipantRow};
use crate::rating::{PlayerId, RatingValue};

pub fn insert_participation(conn: &Connection, row: &MatchParticipation) -> Result<()> {
    let sql = "INSERT INTO match_participation (match_id, player_id, position, rating_delta, rating_after) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(
        sql,
        params![
            row.match_id,
            row.player_id,
            row.position,
            row.rating_delta,
            row.rating_after
        ],
    )
    .with_context(|| {
        format!(
            "Failed to insert participation of player {} in match {}",
            row.player_id, row.match_id
        )
    })
    .map(|_| ())
}

/// Participants of one match, best finish first.
pub fn list_by_match(conn: &Connection, match_id: MatchId) -> Result<Vec<ParticipantRow>> {
    let sql = "
        SELECT mp.player_id, p.name, mp.position, mp.rating_delta, mp.rating_after
        FROM match_participation mp
        JOIN player p ON p.id = mp.player_id
        WHERE mp.match_id = ?1
        ORDER BY mp.position ASC, mp.player_id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![match_id], |row| {
            Ok(ParticipantRow {
                player_id: row.get(0)?,
                player_name: row.get(1)?,
                position: row.get(2)?,
                rating_delta: row.get(3)?,
                rating_after: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Timestamp of the most recent match the player took part in.
pub fn latest_timestamp_for(conn: &Connection, player_id: PlayerId) -> Result<Option<NaiveDateTime>> {
    let sql = "
        SELECT m.timestamp
        FROM match_participation mp
        JOIN \"match\" m ON m.id = mp.match_id
        WHERE mp.player_id = ?1
        ORDER BY m.timestamp DESC, m.id DESC
        LIMIT 1
    ";

    conn.query_row(sql, params![player_id], |row| row.get(0))
        .optional()
        .with_context(|| format!("Failed to query latest match of player {}", player_id))
}

#[derive(Debug, Clone)]
pub struct TimelineRow {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub timestamp: NaiveDateTime,
    pub rating_delta: RatingValue,
    pub rating_after: RatingValue,
}

/// Every participation row in chronological match order.
pub fn list_timeline(conn: &Connection) -> Result<Vec<TimelineRow>> {
    let sql = "
        SELECT mp.player_id, m.id, m.timestamp, mp.rating_delta, mp.rating_after
        FROM match_participation mp
        JOIN \"match\" m ON m.id = mp.match_id
        ORDER BY m.timestamp ASC, m.id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TimelineRow {
                player_id: row.get(0)?,
                match_id: row.get(1)?,
                timestamp: row.get(2)?,
                rating_delta: row.get(3)?,
                rating_after: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Sum of recorded deltas per player, players without history included as zero.
pub fn delta_totals(conn: &Connection) -> Result<Vec<(PlayerId, RatingValue, RatingValue)>> {
    let sql = "
        SELECT p.id, p.rating, COALESCE(SUM(mp.rating_delta), 0.0)
        FROM player p
        LEFT JOIN match_participation mp ON mp.player_id = p.id
        GROUP BY p.id, p.rating
        ORDER BY p.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, PlayerId>(0)?,
                row.get::<_, RatingValue>(1)?,
                row.get::<_, RatingValue>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_all(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM match_participation", [], |row| row.get(0))
        .context("Failed to count match participations")
}
