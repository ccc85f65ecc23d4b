use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    games::{add_game, get_games},
    matches::{add_match, get_match_detail, get_recent_matches},
    players::{add_player, get_audit, get_players, get_rank_history},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/games", get(get_games))
        .route("/api/v1/players", get(get_players))
        .route("/api/v1/matches", get(get_recent_matches))
        .route("/api/v1/matches/:id", get(get_match_detail))
        .route("/api/v1/get-rank-chart-data", get(get_rank_history))
        .route("/api/v1/audit", get(get_audit))
        .route("/api/v1/addgame", post(add_game))
        .route("/api/v1/addplayer", post(add_player))
        .route("/api/v1/addmatch", post(add_match))
        .with_state(state)
}
