//! Near-miss variations of an existing password.
//!
//! Each variation inserts one random character at a random position and
//! then re-cases every alphabetic character independently. Sampling
//! continues until the requested number of distinct variations exists.

use super::GeneratorError;
use crate::policy::charset::{DIGITS, LOWERCASE, SPECIAL, UPPERCASE};
use crate::random::RandomSource;
use std::collections::HashSet;

/// Default number of variations per request.
pub const DEFAULT_VARIATION_COUNT: usize = 3;

/// Attempts allowed per requested variation before giving up.
const MAX_ATTEMPTS_PER_VARIATION: usize = 1_000;

/// Produces exactly `count` distinct variations of `password`, each one
/// character longer than the input.
///
/// Collisions are discarded and resampled. Results are returned in the
/// order they were first produced.
pub fn variations<R: RandomSource>(
    password: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, GeneratorError> {
    let insertable: Vec<char> = UPPERCASE
        .chars()
        .chain(LOWERCASE.chars())
        .chain(DIGITS.chars())
        .chain(SPECIAL.chars())
        .collect();
    let chars: Vec<char> = password.chars().collect();

    let max_attempts = count.saturating_mul(MAX_ATTEMPTS_PER_VARIATION);
    let mut seen = HashSet::with_capacity(count);
    let mut results = Vec::with_capacity(count);
    let mut attempts = 0;

    while results.len() < count {
        if attempts >= max_attempts {
            tracing::warn!(
                found = results.len(),
                wanted = count,
                attempts,
                "Variation space exhausted"
            );
            return Err(GeneratorError::VariationsExhausted {
                found: results.len(),
                wanted: count,
                attempts,
            });
        }
        attempts += 1;

        let position = rng.index_below(chars.len() + 1)?;
        let inserted = *rng.choose_one(&insertable)?;

        let mut candidate = String::with_capacity(password.len() + 1);
        for (i, &c) in chars.iter().enumerate() {
            if i == position {
                candidate.push(recase(inserted, rng)?);
            }
            candidate.push(recase(c, rng)?);
        }
        if position == chars.len() {
            candidate.push(recase(inserted, rng)?);
        }

        if seen.insert(candidate.clone()) {
            results.push(candidate);
        }
    }

    tracing::debug!(count, attempts, "Generated variations");
    Ok(results)
}

/// Upper- or lowercases an alphabetic character with equal probability.
///
/// Characters whose case mapping is not a single character are kept as
/// is so every variation stays exactly one character longer.
fn recase<R: RandomSource>(c: char, rng: &mut R) -> Result<char, GeneratorError> {
    if !c.is_alphabetic() {
        return Ok(c);
    }
    let upper = rng.index_below(2)? == 1;
    let mut mapped = if upper {
        c.to_uppercase().collect::<Vec<_>>()
    } else {
        c.to_lowercase().collect::<Vec<_>>()
    };
    Ok(match mapped.len() {
        1 => mapped.remove(0),
        _ => c,
    })
}
