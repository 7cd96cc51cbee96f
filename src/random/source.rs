//! ChaCha-based secure randomness for password generation.
//!
//! Every generator in the crate draws through the [`RandomSource`]
//! capability. It is implemented for any RNG that is both [`RngCore`]
//! and [`CryptoRng`], so statistically weak or predictable generators
//! cannot be passed in by accident.
//!
//! # Sampling Model
//!
//! - `index_below(n)` is uniform over `[0, n)` (rejection sampling, no
//!   modulo bias)
//! - `choose_one(items)` selects one element with equal probability
//! - Both reject empty inputs instead of panicking

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use thiserror::Error;

/// Errors that can occur when drawing randomness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// A choice was requested from an empty sequence or range.
    #[error("invalid argument: cannot choose from an empty sequence")]
    EmptySequence,
}

/// Uniform selection capability used by all generators.
pub trait RandomSource {
    /// Returns a uniformly distributed integer in `[0, n)`.
    fn index_below(&mut self, n: usize) -> Result<usize, RandomError>;

    /// Returns one element of `items`, each with equal probability.
    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomError>
    where
        Self: Sized,
    {
        let index = self.index_below(items.len())?;
        Ok(&items[index])
    }
}

impl<R: RngCore + CryptoRng> RandomSource for R {
    fn index_below(&mut self, n: usize) -> Result<usize, RandomError> {
        if n == 0 {
            return Err(RandomError::EmptySequence);
        }
        Ok(self.gen_range(0..n))
    }
}

/// A CSPRNG backed by ChaCha20 and seeded from the OS.
///
/// Callers create one per request; nothing is cached between
/// generations, so every password is drawn from fresh OS entropy.
pub struct SecureRandom {
    inner: ChaCha20Rng,
}

impl SecureRandom {
    /// Creates a new CSPRNG seeded from the OS entropy source.
    pub fn from_os_entropy() -> Self {
        let mut seed = [0u8; 32];
        rand_core::OsRng.fill_bytes(&mut seed);

        Self {
            inner: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Creates a CSPRNG from a known seed (for testing only).
    #[cfg(test)]
    pub(crate) fn from_seed_for_testing(seed: [u8; 32]) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Returns `len` random bytes rendered as lowercase hex.
    ///
    /// Used for opaque identifiers such as session ids.
    pub fn token_hex(&mut self, len: usize) -> String {
        let mut buf = vec![0u8; len];
        self.fill_bytes(&mut buf);
        buf.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl RngCore for SecureRandom {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRandom {}
