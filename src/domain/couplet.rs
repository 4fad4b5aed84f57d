// ============================================================
// Layer 3 - Couplet and FormattedLine
// ============================================================
// A couplet (bayt) is the atomic training example: two cleaned
// half-verses sharing one meter and one rhyme key.
//
// The formatted line puts the conditioning tags in front of the
// half they govern, in right-to-left logical order:
//
//   [rhyme] h2 [meter] h1
//
// Downstream fine-tuning relies on this exact field order.
//
// Reference: Abboushi & Azzeh (2023), special-token scheme

use serde::{Deserialize, Serialize};

use crate::domain::meter::{CanonicalMeter, MeterLabel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couplet {
    /// First (right) half-verse, cleaned
    pub h1: String,

    /// Second (left) half-verse, cleaned
    pub h2: String,

    pub meter: CanonicalMeter,

    /// Rhyme key derived from the end of h2 (or the rhyme column)
    pub rhyme: String,

    /// Poem identity the couplet came from ("" when ungrouped)
    pub group: String,
}

impl Couplet {
    /// A couplet may only be emitted when both halves survived cleaning
    /// and h2 yielded a rhyme key (it carries at least one letter).
    pub fn is_complete(&self) -> bool {
        !self.h1.is_empty() && !self.h2.is_empty() && !self.rhyme.is_empty()
    }

    /// Render this couplet as one training line.
    pub fn format(&self, style: MeterLabel) -> FormattedLine {
        let meter = self.meter.label(style);
        FormattedLine {
            text:  format_line(&self.rhyme, &self.h2, meter, &self.h1),
            meter: meter.to_string(),
            rhyme: self.rhyme.clone(),
            group: self.group.clone(),
        }
    }
}

/// Build the `[rhyme] h2 [meter] h1` string.
pub fn format_line(rhyme: &str, h2: &str, meter: &str, h1: &str) -> String {
    format!("[{rhyme}] {h2} [{meter}] {h1}")
}

/// One emitted training example.
/// `text` is what the plain-text output writes; the other fields
/// are carried along for the JSONL output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedLine {
    pub text:  String,
    pub meter: String,
    pub rhyme: String,
    pub group: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn couplet(h1: &str, h2: &str) -> Couplet {
        Couplet {
            h1:    h1.to_string(),
            h2:    h2.to_string(),
            meter: CanonicalMeter::Taweel,
            rhyme: "ab".to_string(),
            group: String::new(),
        }
    }

    #[test]
    fn test_field_order_contract() {
        let line = format_line("ab", "بيت ثاني", "taweel", "بيت اول");
        assert_eq!(line, "[ab] بيت ثاني [taweel] بيت اول");
    }

    #[test]
    fn test_format_uses_label_style() {
        let c = couplet("بيت اول", "بيت ثاني");
        assert_eq!(c.format(MeterLabel::Latin).text,  "[ab] بيت ثاني [taweel] بيت اول");
        assert_eq!(c.format(MeterLabel::Arabic).text, "[ab] بيت ثاني [الطويل] بيت اول");
        assert_eq!(c.format(MeterLabel::Arabic).meter, "الطويل");
    }

    #[test]
    fn test_empty_half_is_incomplete() {
        assert!(couplet("a", "b").is_complete());
        assert!(!couplet("", "b").is_complete());
        assert!(!couplet("a", "").is_complete());

        let no_rhyme = Couplet { rhyme: String::new(), ..couplet("a", "!!") };
        assert!(!no_rhyme.is_complete());
    }
}
