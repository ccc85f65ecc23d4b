use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::{with_ledger, ApiError, AppState};
use crate::api::models::{CreatedResponse, NewNameRequest, PlayerListItem};
use crate::database::{PlayerHistory, RatingDrift};

pub async fn get_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerListItem>>, ApiError> {
    let players = with_ledger(&state.ledger, |ledger| ledger.list_players()).await?;
    Ok(Json(PlayerListItem::ranked(players)))
}

pub async fn add_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewNameRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = with_ledger(&state.ledger, move |ledger| ledger.register_player(&request.name)).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn get_rank_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerHistory>>, ApiError> {
    let history = with_ledger(&state.ledger, |ledger| ledger.get_rating_history()).await?;
    Ok(Json(history))
}

pub async fn get_audit(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RatingDrift>>, ApiError> {
    let drifts = with_ledger(&state.ledger, |ledger| ledger.audit()).await?;
    Ok(Json(drifts))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get_json, post_json, test_app};
    use crate::api::models::{CreatedResponse, PlayerListItem};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_new_player_listed_at_starting_rating() {
        let (app, _) = test_app();

        let (status, created): (_, CreatedResponse) =
            post_json(&app, "/api/v1/addplayer", json!({ "name": "Ann" })).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, players): (_, Vec<PlayerListItem>) = get_json(&app, "/api/v1/players").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].rank, 1);
        assert_eq!(players[0].player_id, created.id);
        assert_eq!(players[0].rating, 1500.0);
    }

    #[tokio::test]
    async fn test_history_and_audit_start_empty() {
        let (app, ledger) = test_app();
        ledger.register_player("Ann").unwrap();

        let (_, history): (_, Value) = get_json(&app, "/api/v1/get-rank-chart-data").await;
        assert_eq!(history, json!([]));

        let (status, drifts): (_, Value) = get_json(&app, "/api/v1/audit").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(drifts, json!([]));
    }
}
