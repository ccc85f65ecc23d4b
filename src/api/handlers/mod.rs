use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use tokio::task::JoinError;

use crate::api::models::ErrorResponse;
use crate::config::settings::AppConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::MatchLedger;

pub mod games;
pub mod matches;
pub mod players;

pub struct AppState {
    pub ledger: MatchLedger,
    pub config: AppConfig,
}

pub enum ApiError {
    Ledger(LedgerError),
    Task(JoinError),
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        ApiError::Ledger(e)
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Task(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Ledger(e) if e.is_validation() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Ledger(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Ledger(e) => {
                error!("Ledger failure: {:#}", anyhow::Error::from(e));
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            ApiError::Task(e) => {
                error!("Ledger task failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Runs a ledger call on the blocking pool; SQLite calls must stay off the runtime threads.
pub async fn with_ledger<T, F>(ledger: &MatchLedger, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&MatchLedger) -> LedgerResult<T> + Send + 'static,
    T: Send + 'static,
{
    let ledger = ledger.clone();
    Ok(tokio::task::spawn_blocking(move || f(&ledger)).await??)
}
