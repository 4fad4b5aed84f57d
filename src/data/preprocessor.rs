// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Cleans raw half-verse text before pairing and formatting.
//
// Poetry sources are often fully vocalised. The marks carry
// pronunciation, not identity, and would multiply the token
// vocabulary, so they are removed:
//
//   U+0610..=U+061A   Quranic annotation signs
//   U+064B..=U+065F   tanwin, fatha, damma, kasra, shadda, sukun, ...
//   U+0670            superscript alef
//
// Cleaning steps for a half-verse (applied in order):
//   1. Strip tashkeel (strip_tashkeel, nothing else touched)
//   2. Remove tatweel U+0640 (decorative stretching)
//   3. Optionally drop everything outside the Arabic block
//   4. Collapse whitespace runs into one space
//   5. Trim leading/trailing whitespace
//
// A half made only of diacritics cleans down to "". That is a
// valid result; the caller treats it as an empty half.

const TATWEEL: char = '\u{0640}';

/// True for every Arabic diacritical mark removed by `strip_tashkeel`.
pub fn is_tashkeel(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Remove all tashkeel, keeping every other character in order.
/// Pure and total: digits, Latin letters and punctuation pass through.
pub fn strip_tashkeel(text: &str) -> String {
    text.chars().filter(|&c| !is_tashkeel(c)).collect()
}

fn is_arabic_block(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Collapse every whitespace run into one ASCII space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out        = String::with_capacity(text.len());
    let mut last_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }

    out.trim().to_string()
}

pub struct Preprocessor {
    /// Drop characters outside U+0600..=U+06FF (whitespace kept)
    arabic_only: bool,
}

impl Preprocessor {
    /// Create a Preprocessor that keeps non-Arabic characters.
    pub fn new() -> Self {
        Self { arabic_only: false }
    }

    /// Create a Preprocessor that also strips non-Arabic characters.
    pub fn arabic_only() -> Self {
        Self { arabic_only: true }
    }

    /// Clean one half-verse for training.
    pub fn clean(&self, text: &str) -> String {
        let stripped: String = text
            .chars()
            .filter(|&c| !is_tashkeel(c) && c != TATWEEL)
            .filter(|&c| !self.arabic_only || c.is_whitespace() || is_arabic_block(c))
            .collect();

        collapse_whitespace(&stripped)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_vocalised_verse() {
        assert_eq!(strip_tashkeel("خَليلَيَّ لا تَستَعجِلا"), "خليلي لا تستعجلا");
    }

    #[test]
    fn test_all_diacritics_reduce_to_empty() {
        let marks: String = ('\u{064B}'..='\u{065F}')
            .chain('\u{0610}'..='\u{061A}')
            .chain(std::iter::once('\u{0670}'))
            .collect();
        assert_eq!(strip_tashkeel(&marks), "");
        assert_eq!(Preprocessor::new().clean(&marks), "");
    }

    #[test]
    fn test_text_without_diacritics_unchanged() {
        for s in ["", "بيت اول", "abc 123, !?", "قفا نبك - 1"] {
            assert_eq!(strip_tashkeel(s), s);
        }
    }

    #[test]
    fn test_stripper_keeps_tatweel_and_spacing() {
        // The stripper only removes marks; layout is the cleaner's job.
        assert_eq!(strip_tashkeel("  جميـــلٌ  "), "  جميـــل  ");
    }

    #[test]
    fn test_clean_removes_tatweel_and_collapses() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  جميـــل \t  جداً  "), "جميل جدا");
    }

    #[test]
    fn test_clean_keeps_latin_by_default() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("بيت (1) اول"), "بيت (1) اول");
    }

    #[test]
    fn test_arabic_only_drops_foreign_characters() {
        let p = Preprocessor::arabic_only();
        assert_eq!(p.clean("بيت (1) abc اول"), "بيت اول");
        assert_eq!(p.clean("abc"), "");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(strip_tashkeel(""), "");
        assert_eq!(Preprocessor::new().clean(""), "");
    }
}
