//! Pronounceable password generation.
//!
//! Strict consonant/vowel alternation starting with a consonant, with
//! no digraph or linguistic modelling. Each letter is then capitalized
//! with probability 1/3, and one digit and one special character are
//! appended, so the output is `length + 2` characters long.

use super::GeneratorError;
use crate::policy::charset::{CONSONANTS, DIGITS, SPECIAL, VOWELS};
use crate::random::RandomSource;

/// Default number of letters in a pronounceable password.
pub const DEFAULT_PRONOUNCEABLE_LENGTH: usize = 12;

/// One in this many letters is capitalized.
const CAPITALIZE_ONE_IN: usize = 3;

/// Generates a pronounceable password with `length` letters followed by
/// a digit and a special character.
pub fn generate_pronounceable<R: RandomSource>(
    length: usize,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    if length == 0 {
        return Err(GeneratorError::InvalidLength);
    }

    let consonants: Vec<char> = CONSONANTS.chars().collect();
    let vowels: Vec<char> = VOWELS.chars().collect();
    let digits: Vec<char> = DIGITS.chars().collect();
    let specials: Vec<char> = SPECIAL.chars().collect();

    let mut password = String::with_capacity(length + 2);
    for i in 0..length {
        let class = if i % 2 == 0 { &consonants } else { &vowels };
        password.push(*rng.choose_one(class)?);
    }

    let mut capitalized = String::with_capacity(length + 2);
    for c in password.chars() {
        if rng.index_below(CAPITALIZE_ONE_IN)? == 0 {
            capitalized.push(c.to_ascii_uppercase());
        } else {
            capitalized.push(c);
        }
    }

    capitalized.push(*rng.choose_one(&digits)?);
    capitalized.push(*rng.choose_one(&specials)?);

    tracing::debug!(letters = length, "Generated pronounceable password");
    Ok(capitalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::charset;
    use crate::random::SecureRandom;

    #[test]
    fn test_length_plus_suffix() {
        let mut rng = SecureRandom::from_seed_for_testing([0x01; 32]);
        let password = generate_pronounceable(DEFAULT_PRONOUNCEABLE_LENGTH, &mut rng).unwrap();
        assert_eq!(password.chars().count(), DEFAULT_PRONOUNCEABLE_LENGTH + 2);
    }

    #[test]
    fn test_alternates_consonant_vowel() {
        let mut rng = SecureRandom::from_seed_for_testing([0x02; 32]);

        for _ in 0..50 {
            let password = generate_pronounceable(9, &mut rng).unwrap();
            let letters: Vec<char> = password.chars().take(9).collect();

            for (i, c) in letters.iter().enumerate() {
                let lower = c.to_ascii_lowercase();
                if i % 2 == 0 {
                    assert!(CONSONANTS.contains(lower), "expected consonant at {}", i);
                } else {
                    assert!(VOWELS.contains(lower), "expected vowel at {}", i);
                }
            }
        }
    }

    #[test]
    fn test_suffix_is_digit_then_special() {
        let mut rng = SecureRandom::from_seed_for_testing([0x03; 32]);

        for _ in 0..50 {
            let password: Vec<char> = generate_pronounceable(4, &mut rng).unwrap().chars().collect();
            assert!(password[4].is_ascii_digit());
            assert!(charset::is_special(password[5]));
        }
    }

    #[test]
    fn test_capitalization_rate_near_one_third() {
        let mut rng = SecureRandom::from_seed_for_testing([0x04; 32]);
        let mut upper = 0usize;
        let mut total = 0usize;

        for _ in 0..500 {
            let password = generate_pronounceable(12, &mut rng).unwrap();
            for c in password.chars().take(12) {
                total += 1;
                if c.is_ascii_uppercase() {
                    upper += 1;
                }
            }
        }

        let rate = upper as f64 / total as f64;
        assert!((rate - 1.0 / 3.0).abs() < 0.03, "rate was {}", rate);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = SecureRandom::from_os_entropy();
        assert_eq!(
            generate_pronounceable(0, &mut rng),
            Err(GeneratorError::InvalidLength)
        );
    }
}
