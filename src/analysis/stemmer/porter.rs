//! Porter stemming algorithm implementation.
//!
//! This module provides the original Porter (1980) algorithm for English,
//! registered under the name `porter`. It is distinct from the Snowball
//! `english` stemmer (sometimes called "Porter2").
//!
//! # Algorithm
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! The stemmer works on bytes in its own buffer. Only ASCII suffixes are
//! ever removed or rewritten, so UTF-8 input stays valid.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::stemmer::StemmingEngine;
//! use lexifold::analysis::stemmer::porter::PorterStemmer;
//!
//! let mut stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), Some("run"));
//! assert_eq!(stemmer.stem("flies"), Some("fli"));
//! assert_eq!(stemmer.stem("traditional"), Some("tradit"));
//! ```

use crate::analysis::stemmer::{StemmerFactory, StemmingEngine};

/// Porter stemming engine.
///
/// `b` holds the word being stemmed; `j` is the end (exclusive) of the stem
/// matched by the last successful [`ends`](Self::ends) call.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer {
    b: Vec<u8>,
    j: usize,
}

/// Creates [`PorterStemmer`] engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterFactory;

impl StemmerFactory for PorterFactory {
    fn create(&self) -> Box<dyn StemmingEngine> {
        Box::new(PorterStemmer::new())
    }
}

impl PorterStemmer {
    /// Registry name of this stemmer.
    pub const NAME: &'static str = "porter";

    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer {
            b: Vec::with_capacity(32),
            j: 0,
        }
    }

    fn k(&self) -> usize {
        self.b.len()
    }

    /// Check if the byte at `i` is a consonant.
    fn cons(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Measure of the stem `b[..j]`: the number of VC sequences.
    fn measure(&self) -> usize {
        let j = self.j;
        let mut n = 0;
        let mut i = 0;

        // Skip initial consonants
        while i < j && self.cons(i) {
            i += 1;
        }

        loop {
            // Skip vowels
            while i < j && !self.cons(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
            // Skip consonants
            while i < j && self.cons(i) {
                i += 1;
            }
            n += 1;
        }
    }

    /// Check if the stem `b[..j]` contains a vowel.
    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.cons(i))
    }

    /// Check if `b[i-1..=i]` is a double consonant.
    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.cons(i)
    }

    /// Check if `b[i-2..=i]` is consonant-vowel-consonant, the last not w, x or y.
    fn cvc(&self, i: usize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    /// Check if the word ends with `suffix`, setting `j` to the stem end.
    fn ends(&mut self, suffix: &str) -> bool {
        let suffix = suffix.as_bytes();
        if !self.b.ends_with(suffix) {
            return false;
        }
        self.j = self.k() - suffix.len();
        true
    }

    /// Replace `b[j..]` with `replacement`.
    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// Replace `b[j..]` with `replacement` if the stem measure is positive.
    fn replace(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Step 1a/1b: plurals and -ed/-ing.
    fn step1ab(&mut self) {
        if self.b.last() == Some(&b's') {
            if self.ends("sses") {
                self.b.truncate(self.k() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.k() - 2] != b's' {
                self.b.pop();
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k() - 1) {
                if !matches!(self.b[self.k() - 2], b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else {
                self.j = self.k();
                if self.measure() == 1 && self.cvc(self.k() - 1) {
                    self.set_to("e");
                }
            }
        }
    }

    /// Step 1c: terminal y → i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.k() - 1;
            self.b[last] = b'i';
        }
    }

    /// Apply the first matching `(suffix, replacement)` rule, if its stem
    /// has a positive measure.
    fn apply_rules(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace(replacement);
                return;
            }
        }
    }

    /// Step 2 of Porter algorithm.
    fn step2(&mut self) {
        const RULES: [(&str, &str); 21] = [
            ("ational", "ate"),
            ("tional", "tion"),
            ("enci", "ence"),
            ("anci", "ance"),
            ("izer", "ize"),
            ("bli", "ble"),
            ("alli", "al"),
            ("entli", "ent"),
            ("eli", "e"),
            ("ousli", "ous"),
            ("ization", "ize"),
            ("ation", "ate"),
            ("ator", "ate"),
            ("alism", "al"),
            ("iveness", "ive"),
            ("fulness", "ful"),
            ("ousness", "ous"),
            ("aliti", "al"),
            ("iviti", "ive"),
            ("biliti", "ble"),
            ("logi", "log"),
        ];
        self.apply_rules(&RULES);
    }

    /// Step 3 of Porter algorithm.
    fn step3(&mut self) {
        const RULES: [(&str, &str); 7] = [
            ("icate", "ic"),
            ("ative", ""),
            ("alize", "al"),
            ("iciti", "ic"),
            ("ical", "ic"),
            ("ful", ""),
            ("ness", ""),
        ];
        self.apply_rules(&RULES);
    }

    /// Step 4 of Porter algorithm.
    fn step4(&mut self) {
        const SUFFIXES: [&str; 19] = [
            "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent",
            "ion", "ou", "ism", "ate", "iti", "ous", "ive", "ize",
        ];

        for suffix in SUFFIXES {
            if !self.ends(suffix) {
                continue;
            }
            if suffix == "ion" && !(self.j > 0 && matches!(self.b[self.j - 1], b's' | b't')) {
                continue;
            }
            if self.measure() > 1 {
                self.b.truncate(self.j);
            }
            return;
        }
    }

    /// Step 5 of Porter algorithm.
    fn step5(&mut self) {
        self.j = self.k();
        if self.b.last() == Some(&b'e') {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.k() - 2)) {
                self.b.pop();
            }
        }
        if self.b.last() == Some(&b'l') && self.double_consonant(self.k() - 1) && self.measure() > 1 {
            self.b.pop();
        }
    }
}

impl StemmingEngine for PorterStemmer {
    fn stem(&mut self, token: &str) -> Option<&str> {
        self.b.clear();
        self.b.extend_from_slice(token.as_bytes());
        self.j = 0;

        if self.k() > 2 {
            self.step1ab();
            if self.k() > 1 {
                self.step1c();
                self.step2();
                self.step3();
                self.step4();
                self.step5();
            }
        }

        std::str::from_utf8(&self.b).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer::new().stem(word).unwrap().to_string()
    }

    #[test]
    fn test_porter_stemmer() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("flies"), "fli");
        assert_eq!(stem("died"), "di");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("disabled"), "disabl");
        assert_eq!(stem("measuring"), "measur");
        assert_eq!(stem("itemization"), "item");
        assert_eq!(stem("sensational"), "sensat");
        assert_eq!(stem("traditional"), "tradit");
    }

    #[test]
    fn test_porter_step1() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("hoping"), "hope");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("happy"), "happi");
    }

    #[test]
    fn test_porter_short_words_unchanged() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("a"), "a");
        assert_eq!(stem(""), "");
    }

    #[test]
    fn test_porter_measure() {
        let mut stemmer = PorterStemmer::new();
        for (word, expected) in [("tree", 0), ("trees", 1), ("trouble", 1), ("troubles", 2)] {
            stemmer.b = word.as_bytes().to_vec();
            stemmer.j = word.len();
            assert_eq!(stemmer.measure(), expected, "{word}");
        }
    }

    #[test]
    fn test_porter_vowel_detection() {
        let mut stemmer = PorterStemmer::new();
        stemmer.b = b"trouble".to_vec();

        assert!(stemmer.cons(0)); // t
        assert!(stemmer.cons(1)); // r
        assert!(!stemmer.cons(2)); // o
        assert!(!stemmer.cons(3)); // u
        assert!(stemmer.cons(4)); // b
        assert!(stemmer.cons(5)); // l
        assert!(!stemmer.cons(6)); // e
    }

    #[test]
    fn test_porter_keeps_utf8_valid() {
        assert_eq!(stem("cafés"), "café");
        assert_eq!(stem("naïve"), "naïv");
    }

    #[test]
    fn test_porter_buffer_reused() {
        let mut stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("generalization"), Some("gener"));
        assert_eq!(stemmer.stem("cats"), Some("cat"));
    }
}
