//! Codepoint classification, folding and lossy UTF-8 decoding.
//!
//! This is the adapter between the tokenizers and the Unicode property data.
//! Every function here is pure and safe to call from any thread.
//!
//! Classification follows the usual full-text-search convention: letters,
//! numbers and private-use codepoints are token characters, everything else
//! separates tokens. Diacritics are the combining marks from the
//! "Combining Diacritical Marks" family of blocks; they attach to the
//! preceding token and can be stripped by [`fold`].

use unicode_normalization::char::decompose_canonical;

/// The codepoint malformed UTF-8 sequences decode to.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Default classification of a codepoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Separates tokens
    Separator,
    /// Part of a token
    TokenChar,
}

/// Classify a codepoint with the default (exception-free) rules.
pub fn classify(c: char) -> CharClass {
    if c.is_alphanumeric() || is_private_use(c) {
        CharClass::TokenChar
    } else {
        CharClass::Separator
    }
}

/// Whether `c` is a token character under the default rules.
#[inline]
pub fn is_token_char(c: char) -> bool {
    classify(c) == CharClass::TokenChar
}

/// Whether `c` is a combining diacritical mark.
pub fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

fn is_private_use(c: char) -> bool {
    matches!(c,
        '\u{E000}'..='\u{F8FF}' |
        '\u{F0000}'..='\u{FFFFD}' |
        '\u{100000}'..='\u{10FFFD}'
    )
}

/// Fold a codepoint for indexing.
///
/// Lowercases `c` and, when `remove_diacritics` is set, replaces a
/// precomposed letter by its base letter. Returns `None` when the codepoint
/// folds away entirely (a standalone diacritic with `remove_diacritics`).
///
/// ```
/// use lexifold::analysis::unicode::fold;
///
/// assert_eq!(fold('É', true), Some('e'));
/// assert_eq!(fold('É', false), Some('é'));
/// assert_eq!(fold('\u{0301}', true), None);
/// ```
pub fn fold(c: char, remove_diacritics: bool) -> Option<char> {
    if c.is_ascii() {
        return Some(c.to_ascii_lowercase());
    }
    if remove_diacritics {
        if is_diacritic(c) {
            return None;
        }
        return Some(lowercase(strip_diacritics(c)));
    }
    Some(lowercase(c))
}

// Only decompositions of the form base + diacritics are stripped, so Hangul
// syllables and kana with voicing marks keep their identity.
fn strip_diacritics(c: char) -> char {
    let mut base = None;
    let mut marks_only = true;
    decompose_canonical(c, |d| {
        if base.is_none() {
            base = Some(d);
        } else if !is_diacritic(d) {
            marks_only = false;
        }
    });
    match base {
        Some(b) if marks_only => b,
        _ => c,
    }
}

fn lowercase(c: char) -> char {
    // Multi-codepoint lowercase mappings (e.g. U+0130) keep their first codepoint.
    c.to_lowercase().next().unwrap_or(c)
}

/// Decode the codepoint starting at byte `pos`.
///
/// Returns the codepoint and the number of bytes it occupies. Malformed or
/// truncated sequences decode to [`REPLACEMENT_CHARACTER`]; the returned
/// width is always at least one byte so scanning loops terminate.
///
/// # Panics
///
/// Panics if `pos >= input.len()`.
pub fn decode_at(input: &[u8], pos: usize) -> (char, usize) {
    let end = (pos + 4).min(input.len());
    let window = &input[pos..end];
    match std::str::from_utf8(window) {
        Ok(s) => first_char(s),
        Err(e) if e.valid_up_to() > 0 => {
            // The prefix was validated by from_utf8 above.
            let valid = &window[..e.valid_up_to()];
            match std::str::from_utf8(valid) {
                Ok(s) => first_char(s),
                Err(_) => (REPLACEMENT_CHARACTER, 1),
            }
        }
        Err(e) => (REPLACEMENT_CHARACTER, e.error_len().unwrap_or(window.len()).max(1)),
    }
}

fn first_char(s: &str) -> (char, usize) {
    match s.chars().next() {
        Some(c) => (c, c.len_utf8()),
        None => (REPLACEMENT_CHARACTER, 1),
    }
}

/// Iterator over `(byte_offset, codepoint)` pairs of possibly malformed UTF-8.
#[derive(Clone, Debug)]
pub struct Codepoints<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Codepoints<'a> {
    /// Start decoding `input` at byte offset `pos`.
    pub fn new(input: &'a [u8], pos: usize) -> Self {
        Codepoints { input, pos }
    }

    /// Byte offset of the next codepoint to be decoded.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        let (c, width) = decode_at(self.input, start);
        self.pos += width;
        Some((start, c))
    }
}
