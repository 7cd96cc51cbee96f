//! Character classes used by policies, generators and the analyzer.

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// ASCII punctuation, the fixed special-character set (32 characters).
pub const SPECIAL: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Characters that are easily confused with one another when read.
pub const SIMILAR: &str = "lI1O0";

/// Vowels for pronounceable generation.
pub const VOWELS: &str = "aeiou";

/// Lowercase consonants for pronounceable generation.
pub const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// Returns true if `c` belongs to the special-character set.
pub fn is_special(c: char) -> bool {
    SPECIAL.contains(c)
}

/// Returns true if `c` is one of the visually similar characters.
pub fn is_similar(c: char) -> bool {
    SIMILAR.contains(c)
}

/// Number of similar characters that are members of `class`.
pub fn similar_in(class: &str) -> usize {
    class.chars().filter(|&c| is_similar(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_sizes() {
        assert_eq!(UPPERCASE.len(), 26);
        assert_eq!(LOWERCASE.len(), 26);
        assert_eq!(DIGITS.len(), 10);
        assert_eq!(SPECIAL.chars().count(), 32);
    }

    #[test]
    fn test_consonants_and_vowels_partition_alphabet() {
        assert_eq!(CONSONANTS.len() + VOWELS.len(), 26);
        assert!(CONSONANTS.chars().all(|c| !VOWELS.contains(c)));
    }

    #[test]
    fn test_similar_membership_per_class() {
        assert_eq!(similar_in(UPPERCASE), 2); // I, O
        assert_eq!(similar_in(LOWERCASE), 1); // l
        assert_eq!(similar_in(DIGITS), 2); // 1, 0
        assert_eq!(similar_in(SPECIAL), 0);
    }

    #[test]
    fn test_special_detection() {
        assert!(is_special('!'));
        assert!(is_special('~'));
        assert!(is_special('\\'));
        assert!(!is_special('a'));
        assert!(!is_special(' '));
    }
}
