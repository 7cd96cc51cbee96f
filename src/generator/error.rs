use crate::random::RandomError;
use thiserror::Error;

/// Errors that can occur during password generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Zero-length passwords are never produced.
    #[error("invalid argument: password length must be at least 1")]
    InvalidLength,

    /// The distinct-variation loop stopped making progress.
    #[error("only {found} distinct variations after {attempts} attempts (wanted {wanted})")]
    VariationsExhausted {
        /// Distinct variations collected.
        found: usize,
        /// Distinct variations requested.
        wanted: usize,
        /// Attempts made before giving up.
        attempts: usize,
    },

    /// Drawing randomness failed.
    #[error(transparent)]
    Random(#[from] RandomError),
}
