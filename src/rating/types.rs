use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type RatingValue = f64;
pub type RatingMap = HashMap<PlayerId, RatingValue>;

/// Finishing position within a match. Lower is better, equal values are draws.
pub type Position = i32;

/// One participant as seen by the calculator: who, how strong going in, where they finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub rating: RatingValue,
    pub position: Position,
}

impl Standing {
    pub fn new(player_id: PlayerId, rating: RatingValue, position: Position) -> Self {
        Self { player_id, rating, position }
    }
}

/// Pairwise outcome between two participants, scored from the first one's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Win,
    Draw,
    Loss,
}

impl PairOutcome {
    pub fn from_positions(own: Position, other: Position) -> Self {
        match own.cmp(&other) {
            std::cmp::Ordering::Less => PairOutcome::Win,
            std::cmp::Ordering::Equal => PairOutcome::Draw,
            std::cmp::Ordering::Greater => PairOutcome::Loss,
        }
    }

    pub fn score(self) -> f64 {
        match self {
            PairOutcome::Win => 1.0,
            PairOutcome::Draw => 0.5,
            PairOutcome::Loss => 0.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            PairOutcome::Win => PairOutcome::Loss,
            PairOutcome::Draw => PairOutcome::Draw,
            PairOutcome::Loss => PairOutcome::Win,
        }
    }
}
