//! Text analysis module for Lexifold.
//!
//! This module provides tokenization of raw message text: codepoint
//! classification and folding, per-language stemming, Unicode normalization
//! and word-boundary segmentation, and the tokenizers built from them.

pub mod normalize;
pub mod segment;
pub mod stemmer;
pub mod token;
pub mod tokenizer;
pub mod unicode;

// Re-export commonly used types
pub use token::*;
pub use tokenizer::*;
