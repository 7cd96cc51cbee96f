//! Cryptographically secure randomness.
//!
//! This module provides the uniform selection capability every
//! generator draws from, and a ChaCha20 CSPRNG seeded from the OS.

mod source;

pub use source::{RandomError, RandomSource, SecureRandom};
