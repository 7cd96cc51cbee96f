//! Alphabet-based entropy and brute-force crack time.
//!
//! Estimates depend only on the password length and the policy, never
//! on the actual characters. This is a coarse search-space estimate,
//! not an empirical entropy measurement.

use crate::policy::{charset, Policy};
use serde::{Deserialize, Serialize};

/// Assumed offline guessing rate (guesses per second).
pub const GUESSES_PER_SECOND: f64 = 1e10;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;
const CENTURY: f64 = 100.0 * YEAR;

/// Entropy estimate for a password under a policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyEstimate {
    /// Alphabet size the estimate was computed from.
    pub alphabet_size: usize,
    /// `length * log2(alphabet_size)`, rounded to two decimals.
    pub bits: f64,
    /// Seconds to exhaust `alphabet_size ^ length` guesses.
    pub crack_time_seconds: f64,
}

impl EntropyEstimate {
    /// Renders the crack time in the largest unit that fits.
    pub fn crack_time_display(&self) -> String {
        let seconds = self.crack_time_seconds;
        if !seconds.is_finite() || seconds >= f64::MAX {
            return "effectively forever".to_string();
        }
        if seconds < 1.0 {
            return "instant".to_string();
        }

        let (value, unit) = if seconds < MINUTE {
            (seconds, "seconds")
        } else if seconds < HOUR {
            (seconds / MINUTE, "minutes")
        } else if seconds < DAY {
            (seconds / HOUR, "hours")
        } else if seconds < YEAR {
            (seconds / DAY, "days")
        } else if seconds < CENTURY {
            (seconds / YEAR, "years")
        } else {
            (seconds / CENTURY, "centuries")
        };

        if value >= 1e6 {
            format!("{:.2e} {}", value, unit)
        } else {
            format!("{:.1} {}", value, unit)
        }
    }
}

/// Size of the alphabet a policy allows, floored at 1.
///
/// With `exclude_similar`, each of `l`, `I`, `1`, `O`, `0` that belongs
/// to an enabled class is subtracted.
pub fn alphabet_size(policy: &Policy) -> usize {
    let size: usize = policy
        .enabled_classes()
        .map(|class| {
            let total = class.chars().count();
            if policy.exclude_similar {
                total - charset::similar_in(class)
            } else {
                total
            }
        })
        .sum();

    size.max(1)
}

/// Estimates entropy bits and offline crack time for `password`.
pub fn estimate(password: &str, policy: &Policy) -> EntropyEstimate {
    let size = alphabet_size(policy);
    let length = password.chars().count();

    let bits = round2(length as f64 * (size as f64).log2());
    let exponent = i32::try_from(length).unwrap_or(i32::MAX);
    let search_space = (size as f64).powi(exponent);
    let crack_time_seconds = if search_space.is_finite() {
        search_space / GUESSES_PER_SECOND
    } else {
        f64::MAX
    };

    tracing::trace!(alphabet_size = size, length, bits, "Entropy estimated");
    EntropyEstimate {
        alphabet_size: size,
        bits,
        crack_time_seconds,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
