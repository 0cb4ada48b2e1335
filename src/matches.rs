//! Match extraction.
//!
//! The host engine reports each phrase match as a [`MatchInstance`]: the
//! rank of the query phrase that matched, the column it was found in and the
//! index of the matching token within that column's token stream. Only the
//! column and token index are used for extraction. [`MatchExtractor`] turns those records back into
//! the matched substrings by re-tokenizing the column text and slicing the
//! original bytes with the token offsets.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::tokenizer::FoldTokenizer;
//! use lexifold::matches::{MatchExtractor, StaticMatchContext};
//!
//! let mut context = StaticMatchContext::new(Box::new(FoldTokenizer::new()));
//! let column = context.add_column("The quick brown fox jumps over");
//! context.add_instance(column, 2);
//! context.add_instance(column, 5);
//!
//! let snippet = MatchExtractor::new().extract(&context, &[]).unwrap();
//! assert_eq!(snippet.as_deref(), Some("brown,over"));
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{LexifoldError, Result};

/// Separator between matched substrings.
pub const MATCH_SEPARATOR: char = ',';

/// One match reported by the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInstance {
    /// Index of the query phrase that matched
    #[serde(default)]
    pub phrase_rank: usize,

    /// Column the match was found in
    pub column: usize,

    /// Index of the matched token in the column's token stream
    pub token_index: usize,
}

impl MatchInstance {
    pub fn new(column: usize, token_index: usize) -> Self {
        MatchInstance {
            phrase_rank: 0,
            column,
            token_index,
        }
    }

    pub fn with_phrase_rank(mut self, phrase_rank: usize) -> Self {
        self.phrase_rank = phrase_rank;
        self
    }
}

/// Host-side view of the current result row.
pub trait MatchContext {
    /// Number of match instances for the row.
    fn instance_count(&self) -> Result<usize>;

    /// The `index`-th match instance.
    fn instance(&self, index: usize) -> Result<MatchInstance>;

    /// Raw text of `column` for the row.
    fn column_text(&self, column: usize) -> Result<&[u8]>;

    /// Tokenize `text` with the tokenizer the index was built with.
    fn tokenize(&self, text: &[u8]) -> Result<Vec<Token>>;
}

/// Tokens of the most recently used column.
struct ColumnCache<'c> {
    column: usize,
    text: &'c [u8],
    tokens: Vec<Token>,
}

impl<'c> ColumnCache<'c> {
    fn load(context: &'c dyn MatchContext, column: usize) -> Result<Self> {
        let text = context.column_text(column)?;
        let tokens = context.tokenize(text)?;
        Ok(ColumnCache {
            column,
            text,
            tokens,
        })
    }

    fn matched(&self, token_index: usize) -> Result<&'c [u8]> {
        let token = self.tokens.get(token_index).ok_or_else(|| {
            LexifoldError::extraction(format!(
                "token {token_index} not found in column {} ({} tokens)",
                self.column,
                self.tokens.len()
            ))
        })?;
        self.text.get(token.byte_span()).ok_or_else(|| {
            LexifoldError::extraction(format!(
                "token span {}..{} outside column {}",
                token.start_offset, token.end_offset, self.column
            ))
        })
    }
}

/// The `matches` auxiliary function.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchExtractor;

impl MatchExtractor {
    /// Name the function is registered under.
    pub const NAME: &'static str = "matches";

    pub fn new() -> Self {
        MatchExtractor
    }

    /// Build the comma-separated list of matched substrings for the row.
    ///
    /// Returns `Ok(None)` when the row has no match instances. Any failure
    /// aborts the whole extraction; no partial result is returned.
    pub fn extract(&self, context: &dyn MatchContext, args: &[String]) -> Result<Option<String>> {
        if !args.is_empty() {
            return Err(LexifoldError::InvalidArgumentCount {
                expected: 0,
                actual: args.len(),
            });
        }

        let count = context.instance_count()?;
        if count == 0 {
            return Ok(None);
        }

        let mut output = String::new();
        let mut cache: Option<ColumnCache<'_>> = None;
        for index in 0..count {
            let instance = context.instance(index)?;
            let current = match cache.take() {
                Some(cached) if cached.column == instance.column => cached,
                _ => ColumnCache::load(context, instance.column)?,
            };

            let matched = current.matched(instance.token_index).inspect_err(|e| {
                debug!("match instance {index}: {e}");
            })?;
            if index > 0 {
                output.push(MATCH_SEPARATOR);
            }
            output.push_str(&String::from_utf8_lossy(matched));
            cache = Some(current);
        }

        Ok(Some(output))
    }
}

/// In-memory [`MatchContext`] over owned column texts.
pub struct StaticMatchContext {
    tokenizer: Box<dyn Tokenizer>,
    columns: Vec<Vec<u8>>,
    instances: Vec<MatchInstance>,
}

impl StaticMatchContext {
    /// Create an empty context tokenizing with `tokenizer`.
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        StaticMatchContext {
            tokenizer,
            columns: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Append a column and return its index.
    pub fn add_column<T: AsRef<[u8]>>(&mut self, text: T) -> usize {
        self.columns.push(text.as_ref().to_vec());
        self.columns.len() - 1
    }

    /// Append a match instance for phrase 0.
    pub fn add_instance(&mut self, column: usize, token_index: usize) {
        self.push_instance(MatchInstance::new(column, token_index));
    }

    /// Append a full match instance record.
    pub fn push_instance(&mut self, instance: MatchInstance) {
        self.instances.push(instance);
    }

    /// The recorded match instances.
    pub fn instances(&self) -> &[MatchInstance] {
        &self.instances
    }
}

impl MatchContext for StaticMatchContext {
    fn instance_count(&self) -> Result<usize> {
        Ok(self.instances.len())
    }

    fn instance(&self, index: usize) -> Result<MatchInstance> {
        self.instances
            .get(index)
            .copied()
            .ok_or_else(|| LexifoldError::not_found(format!("match instance {index}")))
    }

    fn column_text(&self, column: usize) -> Result<&[u8]> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| LexifoldError::not_found(format!("column {column}")))
    }

    fn tokenize(&self, text: &[u8]) -> Result<Vec<Token>> {
        self.tokenizer.tokenize(text)
    }
}
