//! Password strength analysis.
//!
//! This module checks passwords against a policy and estimates how
//! large their brute-force search space is. The estimates are coarse
//! heuristics, not measurements of real-world guessability.

mod entropy;
mod rules;

pub use entropy::{alphabet_size, estimate, EntropyEstimate, GUESSES_PER_SECOND};
pub use rules::{analyze, issues, score, suggest, AnalysisResult, BONUS_LENGTH, MAX_SCORE};
