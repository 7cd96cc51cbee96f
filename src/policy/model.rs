//! The active character-class and length policy.
//!
//! A policy is created with defaults, mutated by explicit updates and
//! held by the caller for the lifetime of a session. The core never
//! keeps a policy of its own.

use super::charset::{self, DIGITS, LOWERCASE, SPECIAL, UPPERCASE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length required by the default policy.
pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Policy validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The minimum length must be a positive integer.
    #[error("invalid minimum length {0} (must be at least 1)")]
    InvalidMinLength(usize),
}

/// Character-class and length policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Minimum length for validation.
    pub min_length: usize,
    /// Uppercase letters enabled.
    pub upper: bool,
    /// Lowercase letters enabled.
    pub lower: bool,
    /// Digits enabled.
    pub digits: bool,
    /// Special characters enabled.
    pub special: bool,
    /// Strip `l`, `I`, `1`, `O`, `0` from alphabets.
    pub exclude_similar: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            upper: true,
            lower: true,
            digits: true,
            special: true,
            exclude_similar: false,
        }
    }
}

/// Partial policy update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyUpdate {
    /// New minimum length; must be at least 1.
    pub min_length: Option<usize>,
    /// Enable or disable uppercase letters.
    pub upper: Option<bool>,
    /// Enable or disable lowercase letters.
    pub lower: Option<bool>,
    /// Enable or disable digits.
    pub digits: Option<bool>,
    /// Enable or disable special characters.
    pub special: Option<bool>,
    /// Strip `l`, `I`, `1`, `O` and `0`.
    pub exclude_similar: Option<bool>,
}

/// Per-call class overrides for generation.
///
/// `None` falls back to the policy's setting for that class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassFlags {
    /// Uppercase override.
    pub upper: Option<bool>,
    /// Lowercase override.
    pub lower: Option<bool>,
    /// Digit override.
    pub digits: Option<bool>,
    /// Special character override.
    pub special: Option<bool>,
}

impl ClassFlags {
    /// Flags that explicitly set every class.
    pub fn explicit(upper: bool, lower: bool, digits: bool, special: bool) -> Self {
        Self {
            upper: Some(upper),
            lower: Some(lower),
            digits: Some(digits),
            special: Some(special),
        }
    }
}

impl Policy {
    /// Validates the policy parameters.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_length == 0 {
            return Err(PolicyError::InvalidMinLength(self.min_length));
        }
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// The update is validated as a whole; on error the policy is left
    /// untouched.
    pub fn apply(&mut self, update: &PolicyUpdate) -> Result<&Policy, PolicyError> {
        let mut next = self.clone();
        if let Some(min_length) = update.min_length {
            next.min_length = min_length;
        }
        if let Some(upper) = update.upper {
            next.upper = upper;
        }
        if let Some(lower) = update.lower {
            next.lower = lower;
        }
        if let Some(digits) = update.digits {
            next.digits = digits;
        }
        if let Some(special) = update.special {
            next.special = special;
        }
        if let Some(exclude_similar) = update.exclude_similar {
            next.exclude_similar = exclude_similar;
        }
        next.validate()?;

        *self = next;
        tracing::debug!(
            min_length = self.min_length,
            upper = self.upper,
            lower = self.lower,
            digits = self.digits,
            special = self.special,
            exclude_similar = self.exclude_similar,
            "Policy updated"
        );
        Ok(self)
    }

    /// Returns a copy with per-call class overrides applied.
    pub fn with_overrides(&self, flags: &ClassFlags) -> Policy {
        Policy {
            upper: flags.upper.unwrap_or(self.upper),
            lower: flags.lower.unwrap_or(self.lower),
            digits: flags.digits.unwrap_or(self.digits),
            special: flags.special.unwrap_or(self.special),
            ..self.clone()
        }
    }

    /// Enabled classes in canonical order (upper, lower, digits, special).
    pub fn enabled_classes(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.upper, UPPERCASE),
            (self.lower, LOWERCASE),
            (self.digits, DIGITS),
            (self.special, SPECIAL),
        ]
        .into_iter()
        .filter_map(|(enabled, class)| enabled.then_some(class))
    }

    /// The characters a generator may draw from under this policy.
    ///
    /// Never empty: when every class is disabled (or exclusion strips
    /// everything) the result falls back to upper- and lowercase letters.
    pub fn effective_alphabet(&self) -> Vec<char> {
        let alphabet: Vec<char> = self
            .enabled_classes()
            .flat_map(str::chars)
            .filter(|&c| !(self.exclude_similar && charset::is_similar(c)))
            .collect();

        if alphabet.is_empty() {
            tracing::debug!("No character class enabled, using letter fallback");
            return fallback_alphabet();
        }
        alphabet
    }
}

/// Default alphabet used when a policy yields no characters.
pub fn fallback_alphabet() -> Vec<char> {
    UPPERCASE.chars().chain(LOWERCASE.chars()).collect()
}
