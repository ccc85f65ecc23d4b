use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::{with_ledger, ApiError, AppState};
use crate::api::models::{CreatedResponse, NewNameRequest};
use crate::database::Game;

pub async fn get_games(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = with_ledger(&state.ledger, |ledger| ledger.list_games()).await?;
    Ok(Json(games))
}

pub async fn add_game(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewNameRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = with_ledger(&state.ledger, move |ledger| ledger.register_game(&request.name)).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
