pub mod elo;
pub mod types;

pub use elo::EloCalculator;
pub use types::{PairOutcome, PlayerId, Position, RatingMap, RatingValue, Standing};
