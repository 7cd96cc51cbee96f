//! Password generators.
//!
//! All generators take a [`RandomSource`](crate::random::RandomSource)
//! by mutable reference and draw fresh randomness on every call.

mod error;
mod pronounceable;
mod random;
mod variation;

pub use error::GeneratorError;
pub use pronounceable::{generate_pronounceable, DEFAULT_PRONOUNCEABLE_LENGTH};
pub use random::{generate_random, shuffle};
pub use variation::{variations, DEFAULT_VARIATION_COUNT};
