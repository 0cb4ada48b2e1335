//! # Lexifold
//!
//! Full-text-search tokenizers for message text.
//!
//! ## Features
//!
//! - Case and diacritic folding with configurable token characters
//! - Snowball and Porter stemming, one engine per cursor
//! - NFKC normalization with UAX #29 word segmentation and an offset map
//!   back to the raw input
//! - Match snippet extraction from host match instances
//! - Registration shims for a host search engine
//!
//! Offsets in every [`Token`](analysis::token::Token) refer to the original
//! input bytes, and malformed UTF-8 never fails tokenization.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod host;
pub mod matches;

pub mod prelude {
    pub use crate::analysis::stemmer::{StemmerBinding, StemmerRegistry, StemmingEngine};
    pub use crate::analysis::token::{Token, TokenType};
    pub use crate::analysis::tokenizer::{
        FoldTokenizer, FoldTokenizerConfig, TokenCursor, Tokenizer, WordBreakTokenizer,
    };
    pub use crate::error::{LexifoldError, Result};
    pub use crate::host::{ExtensionRegistry, InMemoryRegistry, StatusCode, extension_init};
    pub use crate::matches::{MatchContext, MatchExtractor, MatchInstance, StaticMatchContext};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
