//! Per-session state owned by the caller.
//!
//! A session holds the active policy, the generation history, the date
//! of the last generation and the theme preference. Sessions are fully
//! independent of one another; nothing here is shared.

use super::History;
use crate::config::FileConfig;
use crate::policy::{Policy, PolicyError, PolicyUpdate};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Caller-owned session context.
#[derive(Debug, Clone)]
pub struct Session {
    policy: Policy,
    history: History,
    last_generated: Option<NaiveDate>,
    dark_mode: bool,
}

/// Serializable view of a session's history and reminders.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary<'a> {
    /// Recently generated passwords, oldest first.
    pub history: &'a History,
    /// Date of the last random generation.
    pub last_generated: Option<NaiveDate>,
    /// Date the last generated password should be rotated.
    pub next_rotation: Option<NaiveDate>,
    /// Rotation period used for `next_rotation`.
    pub rotation_days: u32,
    /// Theme preference.
    pub dark_mode: bool,
}

impl Session {
    /// Creates a session with the given policy and history size.
    pub fn new(policy: Policy, history_limit: usize) -> Self {
        Self {
            policy,
            history: History::new(history_limit),
            last_generated: None,
            dark_mode: false,
        }
    }

    /// Creates a session from the configured defaults.
    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(config.policy.clone(), config.session.history_limit)
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Applies a partial policy update and returns the new policy.
    pub fn set_policy(&mut self, update: &PolicyUpdate) -> Result<&Policy, PolicyError> {
        self.policy.apply(update)
    }

    /// Returns the generation history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Appends a generated password and stamps the generation date.
    pub fn record_generated(&mut self, password: &str, today: NaiveDate) {
        self.history.push(password);
        self.last_generated = Some(today);
    }

    /// Returns the date of the last random generation.
    pub fn last_generated(&self) -> Option<NaiveDate> {
        self.last_generated
    }

    /// Date the last generated password is due for rotation.
    pub fn next_rotation(&self, rotation_days: u32) -> Option<NaiveDate> {
        self.last_generated?
            .checked_add_days(Days::new(u64::from(rotation_days)))
    }

    /// Returns true if the dark theme is selected.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flips the theme preference and returns the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Snapshot of history and rotation reminders for display.
    pub fn summary(&self, rotation_days: u32) -> SessionSummary<'_> {
        SessionSummary {
            history: &self.history,
            last_generated: self.last_generated,
            next_rotation: self.next_rotation(rotation_days),
            rotation_days,
            dark_mode: self.dark_mode,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&FileConfig::default())
    }
}
