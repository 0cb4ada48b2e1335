//! Word-boundary segmentation.
//!
//! A [`WordSegmenter`] splits normalized text into contiguous segments and
//! reports a [`BoundaryKind`] for each. Segments of kind
//! [`BoundaryKind::None`] (whitespace, punctuation, symbols) and
//! [`BoundaryKind::Number`] are not indexed.
//!
//! Segmenters take `&self` and keep no state between calls, so one instance
//! can serve any number of cursors at once.
//!
//! [`UnicodeWordSegmenter`] applies the UAX #29 rules only. It has no
//! dictionary, so scripts written without spaces are not split into words:
//! Thai, Lao, Khmer and CJK runs come out one codepoint per segment. A
//! dictionary-backed segmenter can be plugged in through [`WordSegmenter`].
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::segment::{BoundaryKind, UnicodeWordSegmenter, WordSegmenter};
//!
//! let segments = UnicodeWordSegmenter::new().segment("hi, 42").unwrap();
//! let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![BoundaryKind::Word, BoundaryKind::None, BoundaryKind::None, BoundaryKind::Number]
//! );
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::TokenType;
use crate::error::Result;

/// Rule status of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Not a word: whitespace, punctuation, symbols
    None,
    Word,
    Number,
    Ideographic,
    Kana,
}

impl BoundaryKind {
    /// Classify a segment by its characters.
    pub fn of(segment: &str) -> Self {
        if segment.chars().any(is_kana) {
            BoundaryKind::Kana
        } else if segment.chars().any(is_ideographic) {
            BoundaryKind::Ideographic
        } else if segment.chars().any(char::is_alphabetic) {
            BoundaryKind::Word
        } else if segment.chars().any(char::is_numeric) {
            BoundaryKind::Number
        } else {
            BoundaryKind::None
        }
    }

    /// Whether segments of this kind become tokens.
    pub fn is_word_like(self) -> bool {
        !matches!(self, BoundaryKind::None | BoundaryKind::Number)
    }

    /// Token type for word-like kinds.
    pub fn token_type(self) -> Option<TokenType> {
        match self {
            BoundaryKind::None => None,
            BoundaryKind::Word => Some(TokenType::Word),
            BoundaryKind::Number => Some(TokenType::Number),
            BoundaryKind::Ideographic => Some(TokenType::Ideographic),
            BoundaryKind::Kana => Some(TokenType::Kana),
        }
    }
}

fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' |  // Hiragana
        '\u{30A0}'..='\u{30FF}' |  // Katakana
        '\u{31F0}'..='\u{31FF}' |  // Katakana Phonetic Extensions
        '\u{FF66}'..='\u{FF9F}'    // Halfwidth Katakana
    )
}

fn is_ideographic(c: char) -> bool {
    matches!(c,
        '\u{3005}'..='\u{3007}' |
        '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{F900}'..='\u{FAFF}' |  // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2FA1F}' | // CJK Extensions B-F, Compatibility Supplement
        '\u{30000}'..='\u{323AF}'   // CJK Extensions G-H
    )
}

/// A half-open byte range of segmented text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub kind: BoundaryKind,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Word-boundary service.
pub trait WordSegmenter: Send + Sync {
    /// Split `text` into contiguous segments covering all of it.
    fn segment(&self, text: &str) -> Result<Vec<Segment>>;

    /// Get the name of this segmenter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// UAX #29 word segmentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordSegmenter;

impl UnicodeWordSegmenter {
    pub fn new() -> Self {
        UnicodeWordSegmenter
    }
}

impl WordSegmenter for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        for (start, word) in text.split_word_bound_indices() {
            segments.try_reserve(1)?;
            segments.push(Segment {
                start,
                end: start + word.len(),
                kind: BoundaryKind::of(word),
            });
        }
        Ok(segments)
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
