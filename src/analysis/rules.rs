//! Composition rules: issues, suggestions and the strength score.
//!
//! The checks always run in the same order: minimum length, uppercase,
//! lowercase, digit, special character. Class checks are only applied
//! for classes the policy enables.

use crate::policy::{charset, Policy};
use serde::{Deserialize, Serialize};

/// Length that earns the bonus score point.
pub const BONUS_LENGTH: usize = 20;

/// Highest possible strength score.
pub const MAX_SCORE: u8 = 5;

/// Result of checking a password against a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Rule violations, in check order.
    pub issues: Vec<String>,
    /// Improvement hints, in check order.
    pub suggestions: Vec<String>,
    /// Strength score in `0..=5`.
    pub score: u8,
}

impl AnalysisResult {
    /// Returns true if the password satisfies every rule.
    pub fn passes(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Which composition rules a password meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Composition {
    long_enough: bool,
    has_upper: bool,
    has_lower: bool,
    has_digit: bool,
    has_special: bool,
}

impl Composition {
    fn of(password: &str, min_length: usize) -> Self {
        Self {
            long_enough: password.chars().count() >= min_length,
            has_upper: password.chars().any(char::is_uppercase),
            has_lower: password.chars().any(char::is_lowercase),
            has_digit: password.chars().any(char::is_numeric),
            has_special: password.chars().any(charset::is_special),
        }
    }

    /// Failed checks paired with their messages, in check order.
    fn failures<'a>(
        &self,
        policy: &Policy,
        messages: &'a [String; 5],
    ) -> impl Iterator<Item = &'a String> {
        let failed = [
            !self.long_enough,
            policy.upper && !self.has_upper,
            policy.lower && !self.has_lower,
            policy.digits && !self.has_digit,
            policy.special && !self.has_special,
        ];
        messages
            .iter()
            .zip(failed)
            .filter_map(|(message, failed)| failed.then_some(message))
    }
}

fn issue_messages(min_length: usize) -> [String; 5] {
    [
        format!("Password should be at least {} characters long.", min_length),
        "Password should include at least one uppercase letter.".to_string(),
        "Password should include at least one lowercase letter.".to_string(),
        "Password should include at least one digit.".to_string(),
        "Password should include at least one special character.".to_string(),
    ]
}

fn suggestion_messages(min_length: usize) -> [String; 5] {
    [
        format!("Increase length to at least {} characters", min_length),
        "Add uppercase letters (A-Z)".to_string(),
        "Add lowercase letters (a-z)".to_string(),
        "Add digits (0-9)".to_string(),
        "Add special characters (e.g., !@#$%)".to_string(),
    ]
}

/// Lists the policy rules `password` violates.
pub fn issues(password: &str, policy: &Policy) -> Vec<String> {
    let messages = issue_messages(policy.min_length);
    Composition::of(password, policy.min_length)
        .failures(policy, &messages)
        .cloned()
        .collect()
}

/// Lists additions that would make `password` satisfy the policy.
pub fn suggest(password: &str, policy: &Policy) -> Vec<String> {
    let messages = suggestion_messages(policy.min_length);
    Composition::of(password, policy.min_length)
        .failures(policy, &messages)
        .cloned()
        .collect()
}

/// Scores `password` from 0 to 5.
///
/// One point each for the minimum length, an uppercase letter, a
/// lowercase letter, a digit and a special character, plus a bonus for
/// 20 or more characters. The total is capped at 5, so the bonus only
/// compensates for a missing rule.
pub fn score(password: &str, policy: &Policy) -> u8 {
    let composition = Composition::of(password, policy.min_length);
    let points = [
        composition.long_enough,
        composition.has_upper,
        composition.has_lower,
        composition.has_digit,
        composition.has_special,
        password.chars().count() >= BONUS_LENGTH,
    ]
    .iter()
    .filter(|&&met| met)
    .count() as u8;

    points.min(MAX_SCORE)
}

/// Runs every check and returns issues, suggestions and score together.
pub fn analyze(password: &str, policy: &Policy) -> AnalysisResult {
    let result = AnalysisResult {
        issues: issues(password, policy),
        suggestions: suggest(password, policy),
        score: score(password, policy),
    };

    tracing::trace!(
        length = password.chars().count(),
        issues = result.issues.len(),
        score = result.score,
        "Password analyzed"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_lowercase_issues() {
        let result = analyze("abc", &Policy::default());

        assert_eq!(
            result.issues,
            vec![
                "Password should be at least 12 characters long.",
                "Password should include at least one uppercase letter.",
                "Password should include at least one digit.",
                "Password should include at least one special character.",
            ]
        );
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_suggestions_follow_check_order() {
        let suggestions = suggest("abc", &Policy::default());
        assert_eq!(
            suggestions,
            vec![
                "Increase length to at least 12 characters",
                "Add uppercase letters (A-Z)",
                "Add digits (0-9)",
                "Add special characters (e.g., !@#$%)",
            ]
        );
    }

    #[test]
    fn test_empty_password_reports_length() {
        let result = analyze("", &Policy::default());
        assert_eq!(result.issues.len(), 5);
        assert!(result.issues[0].contains("at least 12 characters"));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_strong_password_scores_five() {
        let policy = Policy::default();
        assert_eq!(score("Abcdefghijkl1!", &policy), 5);
        assert!(analyze("Abcdefghijkl1!", &policy).passes());
    }

    #[test]
    fn test_bonus_point_is_clamped() {
        let password = "Abcdefghijklmnopqrs1!";
        assert!(password.len() >= BONUS_LENGTH);
        assert_eq!(score(password, &Policy::default()), 5);
    }

    #[test]
    fn test_bonus_compensates_missing_class() {
        // Long, but no special character: 4 rule points + bonus
        let password = "Abcdefghijklmnopqrstu1";
        assert_eq!(score(password, &Policy::default()), 5);
    }

    #[test]
    fn test_disabled_classes_not_reported() {
        let policy = Policy {
            special: false,
            digits: false,
            ..Policy::default()
        };
        assert!(issues("Abcdefghijklmn", &policy).is_empty());
        assert!(suggest("Abcdefghijklmn", &policy).is_empty());
    }

    #[test]
    fn test_custom_min_length_in_message() {
        let policy = Policy {
            min_length: 20,
            ..Policy::default()
        };
        let found = issues("Abcdefghijkl1!", &policy);
        assert_eq!(found, vec!["Password should be at least 20 characters long."]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy = Policy {
            min_length: 4,
            ..Policy::default()
        };
        // Four characters, more than four bytes
        assert!(issues("Ää1!", &policy).is_empty());
        assert!(!issues("Ä1!", &policy).is_empty());
    }

    #[test]
    fn test_non_ascii_digit_counts_as_digit() {
        // U+0663 ARABIC-INDIC DIGIT THREE
        let password = "Abcdefghijkl\u{0663}!";
        let policy = Policy::default();
        assert_eq!(score(password, &policy), 5);
        assert!(issues(password, &policy).is_empty());
    }

    proptest! {
        #[test]
        fn prop_score_bounded(password in ".{0,40}") {
            let s = score(&password, &Policy::default());
            prop_assert!(s <= MAX_SCORE);
        }

        #[test]
        fn prop_issues_empty_iff_rules_met(
            password in "[ -~]{0,24}",
            min_length in 1usize..20,
            upper in any::<bool>(),
            lower in any::<bool>(),
            digits in any::<bool>(),
            special in any::<bool>()
        ) {
            let policy = Policy {
                min_length,
                upper,
                lower,
                digits,
                special,
                exclude_similar: false,
            };
            let satisfied = password.chars().count() >= min_length
                && (!upper || password.chars().any(|c| c.is_ascii_uppercase()))
                && (!lower || password.chars().any(|c| c.is_ascii_lowercase()))
                && (!digits || password.chars().any(|c| c.is_ascii_digit()))
                && (!special || password.chars().any(|c| c.is_ascii_punctuation()));

            prop_assert_eq!(issues(&password, &policy).is_empty(), satisfied);
        }
    }
}
