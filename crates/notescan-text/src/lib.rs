//! notescan-text
//!
//! Negation-aware term matching and per-condition scoring over free-text
//! notes. See `negation` for the affirmed-mention check and `scorer` for how
//! term categories combine into a score.
pub mod negation;
pub mod scorer;

pub use negation::NegationChecker;
pub use scorer::{CategoryHit, ConditionScorer, ScoreBreakdown};
