//! Tokenizer implementations for full-text indexing.
//!
//! A [`Tokenizer`] is built once from its configuration arguments and is
//! immutable afterwards. Tokenizing a text opens a [`TokenCursor`] over the
//! raw input bytes; the cursor borrows both the tokenizer and the input and
//! yields tokens one at a time. Dropping the cursor releases everything it
//! holds, whether or not it reached the end of the input.
//!
//! Two tokenizers are provided:
//!
//! - [`FoldTokenizer`] (`unicode_fold`): splits on non-alphanumeric
//!   codepoints, folds case and diacritics, optionally stems.
//! - [`WordBreakTokenizer`] (`word_break`): normalizes the whole input, then
//!   splits it on UAX #29 word boundaries.

use crate::analysis::token::Token;
use crate::error::Result;

pub mod exception;
pub mod fold;
pub mod word_break;

pub use exception::ExceptionSet;
pub use fold::{FoldCursor, FoldTokenizer, FoldTokenizerConfig};
pub use word_break::{WordBreakCursor, WordBreakTokenizer};

/// A streaming token producer over one input.
pub trait TokenCursor {
    /// Produce the next token, or `None` once the input is exhausted.
    fn next_token(&mut self) -> Result<Option<Token>>;
}

/// Trait for tokenizers that convert raw text into token cursors.
pub trait Tokenizer: Send + Sync {
    /// Open a cursor over `input`.
    ///
    /// Malformed UTF-8 is never an error: it decodes to U+FFFD.
    fn open<'a>(&'a self, input: &'a [u8]) -> Result<Box<dyn TokenCursor + 'a>>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Drain a cursor over `input` into a vector.
    fn tokenize(&self, input: &[u8]) -> Result<Vec<Token>> {
        let mut cursor = self.open(input)?;
        let mut tokens = Vec::new();
        while let Some(token) = cursor.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Split a `key=value` configuration argument.
pub(crate) fn split_arg(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=')
}
