//! Generate, inspect and pronounceable flows.
//!
//! Each flow chains the core components for one user action and
//! returns plain data for the caller to render.
//!
//! ```text
//! generate:      Generator → (shuffle) → Analyzer → EntropyEstimator
//! inspect:       Analyzer → VariationGenerator → EntropyEstimator
//! pronounceable: Generator
//! ```

use super::Session;
use crate::analysis::{self, AnalysisResult, EntropyEstimate};
use crate::config::{ConfigError, GeneratorConfig};
use crate::generator::{self, GeneratorError};
use crate::policy::ClassFlags;
use crate::random::RandomSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running an action.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    /// A requested length fell outside the configured bounds.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Generation itself failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// Parameters for a random generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    /// Requested length; the configured default when absent.
    pub length: Option<usize>,
    /// Per-call class overrides.
    #[serde(flatten)]
    pub flags: ClassFlags,
    /// Apply the shuffle transform after generation.
    pub shuffle: bool,
}

/// Outcome of a random generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// The generated password.
    pub password: String,
    /// Issues, suggestions and score under the session policy.
    pub analysis: AnalysisResult,
    /// Entropy and crack time under the session policy.
    pub entropy: EntropyEstimate,
}

/// Outcome of inspecting a user-supplied password.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// The password as supplied.
    pub password: String,
    /// Issues, suggestions and score under the session policy.
    pub analysis: AnalysisResult,
    /// Entropy and crack time under the session policy.
    pub entropy: EntropyEstimate,
    /// Distinct stronger variants; empty for an empty password.
    pub variations: Vec<String>,
}

impl Session {
    /// Generates a password under the session policy and records it.
    pub fn generate<R: RandomSource>(
        &mut self,
        request: &GenerateRequest,
        config: &GeneratorConfig,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<GenerationReport, ActionError> {
        let length = config.check_length(
            "length",
            request.length.unwrap_or(config.default_length),
        )?;

        let mut password =
            generator::generate_random(length, &request.flags, self.policy(), rng)?;
        if request.shuffle {
            password = generator::shuffle(&password, rng)?;
        }

        let analysis = analysis::analyze(&password, self.policy());
        let entropy = analysis::estimate(&password, self.policy());
        self.record_generated(&password, today);

        tracing::info!(
            length,
            shuffled = request.shuffle,
            score = analysis.score,
            bits = entropy.bits,
            history = self.history().len(),
            "Password generated"
        );

        Ok(GenerationReport {
            password,
            analysis,
            entropy,
        })
    }

    /// Analyzes a caller-supplied password and proposes variations.
    ///
    /// Variations are only produced for non-empty passwords.
    pub fn inspect<R: RandomSource>(
        &self,
        password: &str,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<InspectionReport, ActionError> {
        let analysis = analysis::analyze(password, self.policy());
        let variations = if password.is_empty() {
            Vec::new()
        } else {
            generator::variations(password, config.variation_count, rng)?
        };
        let entropy = analysis::estimate(password, self.policy());

        tracing::info!(
            length = password.chars().count(),
            score = analysis.score,
            issues = analysis.issues.len(),
            variations = variations.len(),
            "Password inspected"
        );

        Ok(InspectionReport {
            password: password.to_string(),
            analysis,
            entropy,
            variations,
        })
    }

    /// Generates a pronounceable password. Not recorded in history.
    pub fn pronounceable<R: RandomSource>(
        &self,
        length: Option<usize>,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<String, ActionError> {
        let length = config.check_length(
            "pronounceable_length",
            length.unwrap_or(config.pronounceable_length),
        )?;
        let password = generator::generate_pronounceable(length, rng)?;

        tracing::info!(letters = length, "Pronounceable password generated");
        Ok(password)
    }
}
