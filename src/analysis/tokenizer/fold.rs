//! Case/diacritic folding tokenizer with optional stemming.
//!
//! Tokens are maximal runs of token characters. Combining diacritics that
//! follow a token character stay part of the token. Every codepoint of a
//! token is folded (lowercased, and stripped of diacritics unless disabled);
//! the folded text is then passed through the configured stemmer.
//!
//! # Configuration
//!
//! | Argument | Meaning |
//! |----------|---------|
//! | `remove_diacritics=1` / `=0` | strip diacritics while folding (default `1`) |
//! | `tokenchars=<chars>` | treat these codepoints as token characters |
//! | `separators=<chars>` | treat these codepoints as separators |
//! | `stemmer=<language>` | stem tokens with the named stemmer |
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::tokenizer::{FoldTokenizer, Tokenizer};
//!
//! let tokenizer = FoldTokenizer::from_args(&["stemmer=english"]).unwrap();
//! let tokens = tokenizer.tokenize("Running runs".as_bytes()).unwrap();
//!
//! assert_eq!(tokens[0].text, "run");
//! assert_eq!(tokens[1].text, "run");
//! assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (8, 12));
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::stemmer::{self, StemmerBinding, StemmerRegistry, StemmingEngine};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::exception::ExceptionSet;
use crate::analysis::tokenizer::{TokenCursor, Tokenizer, split_arg};
use crate::analysis::unicode::{self, Codepoints};
use crate::error::{LexifoldError, Result};

/// Scratch buffer growth step, in bytes.
const SCRATCH_GROWTH: usize = 64;

/// Configuration for [`FoldTokenizer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldTokenizerConfig {
    /// Strip diacritics while folding
    pub remove_diacritics: bool,

    /// Extra token characters
    pub token_chars: String,

    /// Extra separators
    pub separators: String,

    /// Stemmer language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stemmer: Option<String>,
}

impl Default for FoldTokenizerConfig {
    fn default() -> Self {
        FoldTokenizerConfig {
            remove_diacritics: true,
            token_chars: String::new(),
            separators: String::new(),
            stemmer: None,
        }
    }
}

impl FoldTokenizerConfig {
    /// Parse `key=value` configuration arguments.
    ///
    /// `tokenchars` and `separators` may be repeated; their values
    /// accumulate. Any unrecognized argument is an error.
    pub fn from_args(args: &[&str]) -> Result<Self> {
        let mut config = FoldTokenizerConfig::default();
        for arg in args {
            match split_arg(arg) {
                Some(("remove_diacritics", "1")) => config.remove_diacritics = true,
                Some(("remove_diacritics", "0")) => config.remove_diacritics = false,
                Some(("tokenchars", value)) => config.token_chars.push_str(value),
                Some(("separators", value)) => config.separators.push_str(value),
                Some(("stemmer", value)) => config.stemmer = Some(value.to_string()),
                _ => return Err(LexifoldError::invalid_argument(*arg)),
            }
        }
        Ok(config)
    }

    /// Render this configuration back to argument form.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![format!(
            "remove_diacritics={}",
            u8::from(self.remove_diacritics)
        )];
        if !self.token_chars.is_empty() {
            args.push(format!("tokenchars={}", self.token_chars));
        }
        if !self.separators.is_empty() {
            args.push(format!("separators={}", self.separators));
        }
        if let Some(language) = &self.stemmer {
            args.push(format!("stemmer={language}"));
        }
        args
    }
}

/// Folding tokenizer.
#[derive(Clone, Debug)]
pub struct FoldTokenizer {
    config: FoldTokenizerConfig,
    exceptions: ExceptionSet,
    stemmer: Option<StemmerBinding>,
}

impl Default for FoldTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FoldTokenizer {
    /// Name the tokenizer is registered under.
    pub const NAME: &'static str = "unicode_fold";

    /// Create a tokenizer with the default configuration.
    pub fn new() -> Self {
        FoldTokenizer {
            config: FoldTokenizerConfig::default(),
            exceptions: ExceptionSet::new(),
            stemmer: None,
        }
    }

    /// Build a tokenizer from `key=value` arguments.
    pub fn from_args(args: &[&str]) -> Result<Self> {
        Self::from_config(FoldTokenizerConfig::from_args(args)?)
    }

    /// Build a tokenizer, resolving the stemmer against the built-in stemmers.
    pub fn from_config(config: FoldTokenizerConfig) -> Result<Self> {
        Self::with_registry(config, stemmer::builtin())
    }

    /// Build a tokenizer, resolving the stemmer against `registry`.
    pub fn with_registry(config: FoldTokenizerConfig, registry: &StemmerRegistry) -> Result<Self> {
        let mut exceptions = ExceptionSet::new();
        exceptions.add(true, config.token_chars.as_bytes());
        exceptions.add(false, config.separators.as_bytes());

        let stemmer = match &config.stemmer {
            Some(language) => Some(registry.resolve(language).inspect_err(|e| {
                debug!("fold tokenizer: {e}");
            })?),
            None => None,
        };

        Ok(FoldTokenizer {
            config,
            exceptions,
            stemmer,
        })
    }

    /// The configuration this tokenizer was built from.
    pub fn config(&self) -> &FoldTokenizerConfig {
        &self.config
    }

    /// The exception set built from `tokenchars` and `separators`.
    pub fn exceptions(&self) -> &ExceptionSet {
        &self.exceptions
    }

    /// The resolved stemmer, if any.
    pub fn stemmer(&self) -> Option<&StemmerBinding> {
        self.stemmer.as_ref()
    }

    /// Whether `c` is a token character for this tokenizer.
    #[inline]
    pub fn is_token_char(&self, c: char) -> bool {
        self.exceptions.is_token_char(c)
    }

    /// Open a concretely-typed cursor over `input`.
    pub fn cursor<'a>(&'a self, input: &'a [u8]) -> FoldCursor<'a> {
        FoldCursor {
            tokenizer: self,
            input,
            offset: 0,
            position: 0,
            scratch: String::new(),
            stemmer: self.stemmer.as_ref().map(StemmerBinding::instantiate),
        }
    }
}

impl Tokenizer for FoldTokenizer {
    fn open<'a>(&'a self, input: &'a [u8]) -> Result<Box<dyn TokenCursor + 'a>> {
        Ok(Box::new(self.cursor(input)))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Cursor state for one [`FoldTokenizer`] run.
pub struct FoldCursor<'a> {
    tokenizer: &'a FoldTokenizer,
    input: &'a [u8],
    offset: usize,
    position: usize,
    scratch: String,
    stemmer: Option<Box<dyn StemmingEngine>>,
}

impl FoldCursor<'_> {
    /// Byte offset the next scan starts from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn push_folded(&mut self, c: char) -> Result<()> {
        if self.scratch.capacity() - self.scratch.len() < c.len_utf8() {
            self.scratch.try_reserve_exact(SCRATCH_GROWTH)?;
        }
        self.scratch.push(c);
        Ok(())
    }

    fn stemmed_text(&mut self) -> String {
        let Some(engine) = self.stemmer.as_mut() else {
            return self.scratch.clone();
        };
        match engine.stem(&self.scratch) {
            Some(stemmed) => stemmed.to_string(),
            None => {
                debug!("stemmer failed on {:?}, keeping folded text", self.scratch);
                self.scratch.clone()
            }
        }
    }
}

impl TokenCursor for FoldCursor<'_> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let tokenizer = self.tokenizer;
        let remove_diacritics = tokenizer.config.remove_diacritics;
        let mut codepoints = Codepoints::new(self.input, self.offset);

        // Skip separators
        let (start, mut c) = loop {
            match codepoints.next() {
                Some((offset, c)) if tokenizer.is_token_char(c) => break (offset, c),
                Some(_) => {}
                None => {
                    self.offset = codepoints.offset();
                    return Ok(None);
                }
            }
        };

        self.scratch.clear();
        let mut end;
        loop {
            end = codepoints.offset();
            if let Some(folded) = unicode::fold(c, remove_diacritics) {
                self.push_folded(folded)?;
            }
            match codepoints.next() {
                Some((_, next)) if tokenizer.is_token_char(next) || unicode::is_diacritic(next) => {
                    c = next;
                }
                _ => break,
            }
        }
        self.offset = codepoints.offset();

        let text = self.stemmed_text();
        let token = Token::with_offsets(text, self.position, start, end);
        self.position += 1;
        Ok(Some(token))
    }
}
