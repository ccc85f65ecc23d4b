use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::database::Player;
use crate::ledger::Placement;

#[derive(Deserialize)]
pub struct NewNameRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchRequest {
    pub game_id: i64,
    /// Defaults to the time the request is handled.
    pub timestamp: Option<NaiveDateTime>,
    pub standings: Vec<PlacementItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementItem {
    pub player_id: i64,
    pub position: i32,
}

impl From<PlacementItem> for Placement {
    fn from(item: PlacementItem) -> Self {
        Placement::new(item.player_id, item.position)
    }
}

#[derive(Deserialize)]
pub struct RecentMatchesParams {
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub rank: usize,
    pub player_id: i64,
    pub name: String,
    pub rating: f64,
}

impl PlayerListItem {
    pub fn ranked(players: Vec<Player>) -> Vec<Self> {
        players
            .into_iter()
            .enumerate()
            .map(|(idx, player)| PlayerListItem {
                rank: idx + 1,
                player_id: player.id,
                name: player.name,
                rating: player.rating,
            })
            .collect()
    }
}
