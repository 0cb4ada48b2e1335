//! Token types produced by the tokenizers.
//!
//! A [`Token`] is the minimal indexable unit: folded (and possibly stemmed)
//! text plus the byte range it came from in the *original* input. Offsets
//! never refer to a normalized or folded copy of the input, so the host
//! engine can always slice the raw column text with them.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::token::Token;
//!
//! let token = Token::with_offsets("cafe", 0, 0, 5);
//! assert_eq!(token.text, "cafe");
//! assert_eq!(token.byte_span(), 0..5);
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A single token emitted by a tokenizer cursor.
///
/// # Fields
///
/// - `text` - The folded/normalized token text
/// - `position` - Sequential index of the token in its cursor (0-based)
/// - `start_offset` / `end_offset` - Byte offsets in the original input
/// - `token_type` - Segment classification, when the tokenizer provides one
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original input
    pub start_offset: usize,

    /// The byte offset where this token ends in the original input
    pub end_offset: usize,

    /// Classification of the segment this token came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
}

/// Classification of word-break segments.
///
/// Only word-like segments become tokens; whitespace and punctuation spans
/// are classified as `None` by the segmenter and never reach a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Letters, possibly mixed with digits
    Word,
    /// Digits only
    Number,
    /// CJK ideographs
    Ideographic,
    /// Hiragana or Katakana
    Kana,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            token_type: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            token_type: None,
        }
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte range of this token in the original input.
    pub fn byte_span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Word => "word",
            TokenType::Number => "number",
            TokenType::Ideographic => "ideographic",
            TokenType::Kana => "kana",
        };
        f.write_str(name)
    }
}
