use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::{with_ledger, ApiError, AppState};
use crate::api::models::{CreatedResponse, NewMatchRequest, RecentMatchesParams};
use crate::database::{ParticipantRow, RecentMatch};
use crate::ledger::Placement;

pub async fn get_recent_matches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentMatchesParams>,
) -> Result<Json<Vec<RecentMatch>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(state.config.server.recent_matches_limit)
        .clamp(1, 1000);
    let recent = with_ledger(&state.ledger, move |ledger| ledger.list_recent_matches(limit)).await?;
    Ok(Json(recent))
}

pub async fn get_match_detail(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
) -> Result<Json<Vec<ParticipantRow>>, ApiError> {
    let participants =
        with_ledger(&state.ledger, move |ledger| ledger.match_participants(match_id)).await?;
    Ok(Json(participants))
}

pub async fn add_match(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewMatchRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let timestamp = request.timestamp.unwrap_or_else(|| Utc::now().naive_utc());
    let placements: Vec<Placement> = request.standings.into_iter().map(Placement::from).collect();
    let game_id = request.game_id;

    let id = with_ledger(&state.ledger, move |ledger| {
        ledger.record_match(game_id, timestamp, &placements)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
