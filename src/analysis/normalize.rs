//! Per-codepoint normalization with an offset map back to the raw input.
//!
//! Each decoded codepoint is normalized on its own: NFKC, full case folding
//! (NFKC again over the folded result), and removal of default-ignorable
//! codepoints. Because nothing is composed
//! across codepoint boundaries, every byte of the output can be traced back
//! to exactly one input codepoint. The [`OffsetMap`] records, for each output
//! byte, the byte offset of the input codepoint that produced it.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::normalize::normalize;
//!
//! let normalized = normalize("Ａb\u{200B}C".as_bytes()).unwrap();
//! assert_eq!(normalized.text, "abc");
//! assert_eq!(normalized.offsets.original(0), 0);
//! assert_eq!(normalized.offsets.original(1), 3);
//! assert_eq!(normalized.offsets.original(2), 7);
//! assert_eq!(normalized.offsets.original(3), 8);
//! ```

use unicode_casefold::UnicodeCaseFold;
use unicode_normalization::UnicodeNormalization;

use crate::analysis::unicode::Codepoints;
use crate::error::Result;

/// Normalized-byte to original-byte offset table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetMap {
    offsets: Vec<usize>,
    input_len: usize,
}

impl OffsetMap {
    /// Original byte offset for the normalized byte at `normalized`.
    ///
    /// Offsets past the end of the normalized text map to the end of the
    /// original input.
    #[inline]
    pub fn original(&self, normalized: usize) -> usize {
        self.offsets
            .get(normalized)
            .copied()
            .unwrap_or(self.input_len)
    }

    /// Number of entries (normalized bytes).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Length of the original input.
    pub fn input_len(&self) -> usize {
        self.input_len
    }
}

/// Normalized text plus its offset map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub offsets: OffsetMap,
}

/// Whether `c` has the Default_Ignorable_Code_Point property.
pub fn is_default_ignorable(c: char) -> bool {
    matches!(c,
        '\u{00AD}' |
        '\u{034F}' |
        '\u{061C}' |
        '\u{115F}'..='\u{1160}' |
        '\u{17B4}'..='\u{17B5}' |
        '\u{180B}'..='\u{180F}' |
        '\u{200B}'..='\u{200F}' |
        '\u{202A}'..='\u{202E}' |
        '\u{2060}'..='\u{206F}' |
        '\u{3164}' |
        '\u{FE00}'..='\u{FE0F}' |
        '\u{FEFF}' |
        '\u{FFA0}' |
        '\u{FFF0}'..='\u{FFF8}' |
        '\u{1BCA0}'..='\u{1BCA3}' |
        '\u{1D173}'..='\u{1D17A}' |
        '\u{E0000}'..='\u{E0FFF}'
    )
}

/// Normalize `input`, decoding malformed UTF-8 to U+FFFD.
pub fn normalize(input: &[u8]) -> Result<Normalized> {
    let mut text = String::new();
    let mut offsets = Vec::new();
    text.try_reserve(input.len())?;
    offsets.try_reserve(input.len())?;

    let mut utf8 = [0u8; 4];
    for (offset, c) in Codepoints::new(input, 0) {
        for folded in std::iter::once(c).nfkc().case_fold().nfkc() {
            if is_default_ignorable(folded) {
                continue;
            }
            let encoded = folded.encode_utf8(&mut utf8);
            text.try_reserve(encoded.len())?;
            offsets.try_reserve(encoded.len())?;
            text.push_str(encoded);
            offsets.extend(std::iter::repeat_n(offset, encoded.len()));
        }
    }

    Ok(Normalized {
        text,
        offsets: OffsetMap {
            offsets,
            input_len: input.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_compatibility() {
        let normalized = normalize("ＨＥＬＬＯ ﬁle".as_bytes()).unwrap();
        assert_eq!(normalized.text, "hello file");
    }

    #[test]
    fn test_full_case_folding() {
        let normalized = normalize("Straße STRASSE ΛΌΓΟΣ λόγος".as_bytes()).unwrap();
        assert_eq!(normalized.text, "strasse strasse λόγοσ λόγοσ");

        // "ß" folds to two bytes, both mapping back to it.
        assert_eq!(normalized.offsets.original(4), 4);
        assert_eq!(normalized.offsets.original(5), 4);
        assert_eq!(normalized.offsets.original(6), 6);
    }

    #[test]
    fn test_one_entry_per_normalized_byte() {
        let input = "Café ﬁ";
        let normalized = normalize(input.as_bytes()).unwrap();
        assert_eq!(normalized.offsets.len(), normalized.text.len());

        // "é" is two bytes in both texts; both map to its original offset.
        assert_eq!(normalized.offsets.original(3), 3);
        assert_eq!(normalized.offsets.original(4), 3);
        // The "fi" ligature expands to two bytes mapping to the ligature.
        let lig = input.find('ﬁ').unwrap();
        assert_eq!(normalized.offsets.original(6), lig);
        assert_eq!(normalized.offsets.original(7), lig);
        assert_eq!(normalized.offsets.original(8), input.len());
    }

    #[test]
    fn test_ignorables_removed() {
        let normalized = normalize("a\u{00AD}b\u{FEFF}c\u{200D}".as_bytes()).unwrap();
        assert_eq!(normalized.text, "abc");
        assert_eq!(normalized.offsets.original(1), 3);
    }

    #[test]
    fn test_offsets_monotonic() {
        let input = "Ünïcödé ＡＢＣ 東京 \u{FB01}";
        let normalized = normalize(input.as_bytes()).unwrap();
        let mapped: Vec<_> = (0..normalized.offsets.len())
            .map(|i| normalized.offsets.original(i))
            .collect();
        assert!(mapped.windows(2).all(|w| w[0] <= w[1]));
        assert!(mapped.iter().all(|&o| o < input.len()));
    }

    #[test]
    fn test_malformed_input() {
        let normalized = normalize(b"a\xFFb").unwrap();
        assert_eq!(normalized.text, "a\u{FFFD}b");
        assert_eq!(normalized.offsets.original(4), 2);
    }

    #[test]
    fn test_empty_input() {
        let normalized = normalize(b"").unwrap();
        assert!(normalized.text.is_empty());
        assert!(normalized.offsets.is_empty());
        assert_eq!(normalized.offsets.original(0), 0);
    }
}
