use chrono::NaiveDateTime;
use serde::Serialize;

use crate::rating::{PlayerId, Position, RatingValue};

pub type GameId = i64;
pub type MatchId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub game_id: GameId,
    pub timestamp: NaiveDateTime,
}

/// Audit row: how one match moved one player's rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipation {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub position: Position,
    pub rating_delta: RatingValue,
    pub rating_after: RatingValue,
}

// DTOs for joined queries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMatch {
    pub match_id: MatchId,
    pub game_name: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub rating_delta: RatingValue,
    pub rating_after: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub match_id: MatchId,
    pub timestamp: NaiveDateTime,
    pub rating_delta: RatingValue,
    pub rating: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistory {
    pub player_id: PlayerId,
    pub name: String,
    pub ratings: Vec<HistoryEntry>,
}

/// A player whose stored rating disagrees with their history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDrift {
    pub player_id: PlayerId,
    pub stored_rating: RatingValue,
    pub replayed_rating: RatingValue,
}
