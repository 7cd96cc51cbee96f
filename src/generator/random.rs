//! Uniform random generation and the shuffle transform.

use super::GeneratorError;
use crate::policy::{ClassFlags, Policy};
use crate::random::RandomSource;

/// Generates `length` characters drawn uniformly from the policy's
/// effective alphabet.
///
/// `flags` override the policy's classes for this call only. Each draw is
/// independent, so an enabled class is not guaranteed to appear.
pub fn generate_random<R: RandomSource>(
    length: usize,
    flags: &ClassFlags,
    policy: &Policy,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    if length == 0 {
        return Err(GeneratorError::InvalidLength);
    }

    let alphabet = policy.with_overrides(flags).effective_alphabet();
    let password = (0..length)
        .map(|_| rng.choose_one(&alphabet).copied())
        .collect::<Result<String, _>>()?;

    tracing::debug!(
        length,
        alphabet_size = alphabet.len(),
        "Generated random password"
    );
    Ok(password)
}

/// Rebuilds `password` from repeated uniform picks of its own characters.
///
/// This samples with replacement: the result has the same length, but
/// characters may repeat or go missing. It is not a permutation.
pub fn shuffle<R: RandomSource>(password: &str, rng: &mut R) -> Result<String, GeneratorError> {
    let chars: Vec<char> = password.chars().collect();
    let shuffled = (0..chars.len())
        .map(|_| rng.choose_one(&chars).copied())
        .collect::<Result<String, _>>()?;
    Ok(shuffled)
}
