// ============================================================
// Layer 4 - Rhyme Extractor
// ============================================================
// The rhyme key is the tail of the cleaned second half-verse.
// With the default suffix length of 1 it is the rhyme letter
// (rawi), which is the conditioning tag used by Abboushi &
// Azzeh (2023). Longer suffixes approximate the full qafiya.
//
// Only letters count. Spaces, digits and punctuation noise
// (".", "!", the Arabic comma and question mark) are skipped,
// so a verse ending in "غدا ." still rhymes on "ا". A second
// half with no letter at all yields an empty key.

/// Default suffix length: one letter.
pub const DEFAULT_RHYME_SUFFIX_LEN: usize = 1;

pub struct RhymeExtractor {
    suffix_len: usize,
}

impl RhymeExtractor {
    /// `suffix_len` must be at least 1; the use case validates this.
    pub fn new(suffix_len: usize) -> Self {
        Self { suffix_len: suffix_len.max(1) }
    }

    /// Last `suffix_len` letters of `h2`, or all of them when the
    /// half-verse is shorter. Never pads, never fails.
    pub fn extract(&self, h2: &str) -> String {
        let letters: Vec<char> = h2.chars().filter(|c| c.is_alphabetic()).collect();
        let start = letters.len().saturating_sub(self.suffix_len);
        letters[start..].iter().collect()
    }
}

impl Default for RhymeExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_RHYME_SUFFIX_LEN)
    }
}
