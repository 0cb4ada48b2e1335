//! Normalizing word-break tokenizer.
//!
//! Opening a cursor normalizes the whole input (NFKC_Casefold, default
//! ignorables removed) and splits the normalized text on word boundaries.
//! Tokens are the word-like segments, so numbers are skipped; their offsets are mapped back to the
//! raw input through the [`OffsetMap`]. No stemming is applied.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::tokenizer::{Tokenizer, WordBreakTokenizer};
//!
//! let tokenizer = WordBreakTokenizer::new();
//! let tokens = tokenizer.tokenize("ＨＥＬＬＯ, World".as_bytes()).unwrap();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 15));
//! assert_eq!(tokens[1].text, "world");
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::normalize::{self, Normalized};
use crate::analysis::segment::{Segment, UnicodeWordSegmenter, WordSegmenter};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{TokenCursor, Tokenizer};
use crate::error::{LexifoldError, Result};

pub use crate::analysis::normalize::OffsetMap;

/// Word-break tokenizer.
#[derive(Clone)]
pub struct WordBreakTokenizer {
    segmenter: Arc<dyn WordSegmenter>,
}

impl Default for WordBreakTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WordBreakTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordBreakTokenizer")
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}

impl WordBreakTokenizer {
    /// Name the tokenizer is registered under.
    pub const NAME: &'static str = "word_break";

    /// Create a tokenizer using UAX #29 word boundaries.
    pub fn new() -> Self {
        Self::with_segmenter(Arc::new(UnicodeWordSegmenter::new()))
    }

    /// Create a tokenizer using a custom word-boundary service.
    pub fn with_segmenter(segmenter: Arc<dyn WordSegmenter>) -> Self {
        WordBreakTokenizer { segmenter }
    }

    /// Build a tokenizer from configuration arguments. None are accepted.
    pub fn from_args(args: &[&str]) -> Result<Self> {
        if let Some(arg) = args.first() {
            debug!("word_break tokenizer takes no arguments, got {arg:?}");
            return Err(LexifoldError::invalid_argument(*arg));
        }
        Ok(Self::new())
    }

    /// Open a concretely-typed cursor over `input`.
    pub fn cursor(&self, input: &[u8]) -> Result<WordBreakCursor> {
        let normalized = normalize::normalize(input)?;
        let segments = self.segmenter.segment(&normalized.text).inspect_err(|e| {
            debug!("{} segmenter failed: {e}", self.segmenter.name());
        })?;
        Ok(WordBreakCursor {
            normalized,
            segments,
            next_segment: 0,
            position: 0,
        })
    }
}

impl Tokenizer for WordBreakTokenizer {
    fn open<'a>(&'a self, input: &'a [u8]) -> Result<Box<dyn TokenCursor + 'a>> {
        Ok(Box::new(self.cursor(input)?))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Cursor state for one [`WordBreakTokenizer`] run.
#[derive(Debug)]
pub struct WordBreakCursor {
    normalized: Normalized,
    segments: Vec<Segment>,
    next_segment: usize,
    position: usize,
}

impl WordBreakCursor {
    /// The normalized text being tokenized.
    pub fn normalized_text(&self) -> &str {
        &self.normalized.text
    }

    /// The normalized-to-original offset map.
    pub fn offset_map(&self) -> &OffsetMap {
        &self.normalized.offsets
    }
}

impl TokenCursor for WordBreakCursor {
    fn next_token(&mut self) -> Result<Option<Token>> {
        while let Some(segment) = self.segments.get(self.next_segment).copied() {
            self.next_segment += 1;
            if segment.is_empty() || !segment.kind.is_word_like() {
                continue;
            }

            let text = self
                .normalized
                .text
                .get(segment.start..segment.end)
                .ok_or_else(|| {
                    LexifoldError::iteration_service(format!(
                        "segment {}..{} is not on a character boundary",
                        segment.start, segment.end
                    ))
                })?;
            let offsets = &self.normalized.offsets;
            let mut token = Token::with_offsets(
                text,
                self.position,
                offsets.original(segment.start),
                offsets.original(segment.end),
            );
            token.token_type = segment.kind.token_type();
            self.position += 1;
            return Ok(Some(token));
        }
        Ok(None)
    }
}
