//! Exception set for the fold tokenizer.
//!
//! The `tokenchars=` and `separators=` options flip the default
//! classification of individual codepoints. Both options feed a single
//! sorted set: a codepoint is only recorded when the requested class differs
//! from its default class, so membership alone means "invert the default".
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::tokenizer::exception::ExceptionSet;
//!
//! let mut exceptions = ExceptionSet::new();
//! exceptions.add(true, "-_".as_bytes());
//! exceptions.add(false, "x".as_bytes());
//!
//! assert!(exceptions.is_token_char('-'));
//! assert!(!exceptions.is_token_char('x'));
//! assert!(exceptions.is_token_char('a'));
//! ```

use crate::analysis::unicode::{self, Codepoints};

/// Sorted, duplicate-free set of codepoints whose classification is inverted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionSet {
    codepoints: Vec<char>,
}

impl ExceptionSet {
    /// Create an empty exception set.
    pub fn new() -> Self {
        ExceptionSet {
            codepoints: Vec::new(),
        }
    }

    /// Record every codepoint of `text` that should be classified as
    /// `token_chars` but is not by default.
    ///
    /// Diacritics are skipped: their handling is fixed.
    pub fn add(&mut self, token_chars: bool, text: &[u8]) {
        for (_, c) in Codepoints::new(text, 0) {
            if unicode::is_token_char(c) == token_chars || unicode::is_diacritic(c) {
                continue;
            }
            if let Err(index) = self.codepoints.binary_search(&c) {
                self.codepoints.insert(index, c);
            }
        }
    }

    /// Whether `c` is in the set.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.codepoints.binary_search(&c).is_ok()
    }

    /// Effective classification: the default class, inverted for members.
    #[inline]
    pub fn is_token_char(&self, c: char) -> bool {
        unicode::is_token_char(c) ^ self.contains(c)
    }

    /// Number of codepoints in the set.
    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    /// The recorded codepoints in ascending order.
    pub fn codepoints(&self) -> &[char] {
        &self.codepoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_deduplicated() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, "_-.-_".as_bytes());
        exceptions.add(true, "-".as_bytes());

        assert_eq!(exceptions.codepoints(), &['-', '.', '_']);
    }

    #[test]
    fn test_default_class_is_noop() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, "abc123".as_bytes());
        exceptions.add(false, " ,;".as_bytes());

        assert!(exceptions.is_empty());
        assert!(exceptions.is_token_char('a'));
        assert!(!exceptions.is_token_char(','));
    }

    #[test]
    fn test_separators_invert_token_chars() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(false, "e".as_bytes());

        assert!(exceptions.contains('e'));
        assert!(!exceptions.is_token_char('e'));
        assert!(exceptions.is_token_char('f'));
    }

    #[test]
    fn test_diacritics_are_ignored() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, "\u{0301}\u{0308}".as_bytes());

        assert!(exceptions.is_empty());
    }

    #[test]
    fn test_membership_matches_binary_search() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, "#@!$%&*+".as_bytes());

        for c in ['#', '@', '!', '$', '%', '&', '*', '+'] {
            assert!(exceptions.contains(c));
            assert!(exceptions.is_token_char(c));
        }
        for c in ['a', ' ', '?'] {
            assert!(!exceptions.contains(c));
        }
        assert!(exceptions.codepoints().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_malformed_text_adds_replacement_character() {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, b"\xFF");

        assert!(exceptions.contains(unicode::REPLACEMENT_CHARACTER));
    }
}
