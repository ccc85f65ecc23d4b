use chrono::NaiveDateTime;

use crate::rating::types::PlayerId;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by the rating engine and the match ledger.
///
/// Everything except `Persistence` is detected before any write is attempted.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("a match needs at least 2 participants, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("player {player_id} appears more than once in the standings")]
    DuplicateParticipant { player_id: PlayerId },

    #[error("name must not be empty")]
    EmptyName,

    #[error("player {player_id} already has a match at {latest}, later than {timestamp}")]
    OutOfOrderMatch {
        player_id: PlayerId,
        latest: NaiveDateTime,
        timestamp: NaiveDateTime,
    },

    #[error("unknown player: {player_id}")]
    UnknownPlayer { player_id: PlayerId },

    #[error("unknown game: {game_id}")]
    UnknownGame { game_id: i64 },

    #[error("unknown match: {match_id}")]
    UnknownMatch { match_id: i64 },

    /// The store failed; the whole operation was rolled back.
    #[error("persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for failures caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InsufficientParticipants { .. }
                | LedgerError::DuplicateParticipant { .. }
                | LedgerError::EmptyName
                | LedgerError::OutOfOrderMatch { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::UnknownPlayer { .. }
                | LedgerError::UnknownGame { .. }
                | LedgerError::UnknownMatch { .. }
        )
    }
}
