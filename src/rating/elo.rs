use std::collections::HashSet;

use super::types::{PairOutcome, RatingMap, RatingValue, Standing};
use crate::config::settings::RatingSettings;
use crate::errors::{LedgerError, LedgerResult};

/// Pairwise Elo extended to any number of participants.
///
/// Every unordered pair in the standings is scored as a head-to-head game
/// (lower position wins, equal positions draw) and the per-pair K-factor is
/// divided by the number of opponents, so a full match moves a rating about as
/// much as one classic two-player game would.
#[derive(Debug, Clone, Copy)]
pub struct EloCalculator {
    k_factor: f64,
    rating_scale: f64,
}

impl EloCalculator {
    pub fn new(settings: &RatingSettings) -> Self {
        Self {
            k_factor: settings.k_factor,
            rating_scale: settings.rating_scale,
        }
    }

    /// Computes the rating delta for every participant, keyed by player id.
    ///
    /// Pairs are visited in standings order so identical inputs always round
    /// identically.
    pub fn compute_deltas(&self, standings: &[Standing]) -> LedgerResult<RatingMap> {
        validate_standings(standings)?;

        let k = self.effective_k(standings.len());
        let mut deltas: RatingMap = standings.iter().map(|s| (s.player_id, 0.0)).collect();

        for (i, first) in standings.iter().enumerate() {
            for second in &standings[i + 1..] {
                let outcome = PairOutcome::from_positions(first.position, second.position);
                let first_expected = self.expected_score(first.rating, second.rating);
                let second_expected = self.expected_score(second.rating, first.rating);

                *deltas.entry(first.player_id).or_insert(0.0) +=
                    k * (outcome.score() - first_expected);
                *deltas.entry(second.player_id).or_insert(0.0) +=
                    k * (outcome.reversed().score() - second_expected);
            }
        }

        Ok(deltas)
    }

    /// Expected score of `rating` against `opponent` on the logistic curve.
    pub fn expected_score(&self, rating: RatingValue, opponent: RatingValue) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / self.rating_scale))
    }

    fn effective_k(&self, participants: usize) -> f64 {
        self.k_factor / (participants - 1) as f64
    }
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self::new(&RatingSettings::default())
    }
}

fn validate_standings(standings: &[Standing]) -> LedgerResult<()> {
    if standings.len() < 2 {
        return Err(LedgerError::InsufficientParticipants {
            count: standings.len(),
        });
    }

    let mut seen = HashSet::with_capacity(standings.len());
    for standing in standings {
        if !seen.insert(standing.player_id) {
            return Err(LedgerError::DuplicateParticipant {
                player_id: standing.player_id,
            });
        }
    }
    Ok(())
}
