// ============================================================
// Layer 3 - CanonicalMeter
// ============================================================
// The sixteen classical Arabic meters (buhur) recognised by the
// formatter. This set is closed: a record whose label does not
// resolve to one of these variants is dropped.
//
// Each meter has two spellings:
//   - the Arabic name with the article, e.g. الطويل
//   - a Latin identifier, e.g. taweel
//
// Which one ends up inside the `[meter]` tag is chosen by
// MeterLabel. Alias resolution lives in data::meter_table.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalMeter {
    Taweel,
    Madeed,
    Baseet,
    Wafer,
    Kamel,
    Hazaj,
    Rajaz,
    Ramal,
    Saree,
    Munsareh,
    Khafeef,
    Mudare,
    Muqtadab,
    Mujtath,
    Mutaqareb,
    Mutadarak,
}

impl CanonicalMeter {
    /// Every meter, in the traditional circle order.
    pub const ALL: [CanonicalMeter; 16] = [
        CanonicalMeter::Taweel,
        CanonicalMeter::Madeed,
        CanonicalMeter::Baseet,
        CanonicalMeter::Wafer,
        CanonicalMeter::Kamel,
        CanonicalMeter::Hazaj,
        CanonicalMeter::Rajaz,
        CanonicalMeter::Ramal,
        CanonicalMeter::Saree,
        CanonicalMeter::Munsareh,
        CanonicalMeter::Khafeef,
        CanonicalMeter::Mudare,
        CanonicalMeter::Muqtadab,
        CanonicalMeter::Mujtath,
        CanonicalMeter::Mutaqareb,
        CanonicalMeter::Mutadarak,
    ];

    /// Arabic name with the definite article, as used in the APCD corpus.
    pub fn arabic_name(self) -> &'static str {
        match self {
            CanonicalMeter::Taweel    => "الطويل",
            CanonicalMeter::Madeed    => "المديد",
            CanonicalMeter::Baseet    => "البسيط",
            CanonicalMeter::Wafer     => "الوافر",
            CanonicalMeter::Kamel     => "الكامل",
            CanonicalMeter::Hazaj     => "الهزج",
            CanonicalMeter::Rajaz     => "الرجز",
            CanonicalMeter::Ramal     => "الرمل",
            CanonicalMeter::Saree     => "السريع",
            CanonicalMeter::Munsareh  => "المنسرح",
            CanonicalMeter::Khafeef   => "الخفيف",
            CanonicalMeter::Mudare    => "المضارع",
            CanonicalMeter::Muqtadab  => "المقتضب",
            CanonicalMeter::Mujtath   => "المجتث",
            CanonicalMeter::Mutaqareb => "المتقارب",
            CanonicalMeter::Mutadarak => "المتدارك",
        }
    }

    /// Lowercase ASCII identifier.
    pub fn latin_name(self) -> &'static str {
        match self {
            CanonicalMeter::Taweel    => "taweel",
            CanonicalMeter::Madeed    => "madeed",
            CanonicalMeter::Baseet    => "baseet",
            CanonicalMeter::Wafer     => "wafer",
            CanonicalMeter::Kamel     => "kamel",
            CanonicalMeter::Hazaj     => "hazaj",
            CanonicalMeter::Rajaz     => "rajaz",
            CanonicalMeter::Ramal     => "ramal",
            CanonicalMeter::Saree     => "saree",
            CanonicalMeter::Munsareh  => "munsareh",
            CanonicalMeter::Khafeef   => "khafeef",
            CanonicalMeter::Mudare    => "mudare",
            CanonicalMeter::Muqtadab  => "muqtadab",
            CanonicalMeter::Mujtath   => "mujtath",
            CanonicalMeter::Mutaqareb => "mutaqareb",
            CanonicalMeter::Mutadarak => "mutadarak",
        }
    }

    /// The spelling to place inside the `[meter]` tag.
    pub fn label(self, style: MeterLabel) -> &'static str {
        match style {
            MeterLabel::Arabic => self.arabic_name(),
            MeterLabel::Latin  => self.latin_name(),
        }
    }
}

impl fmt::Display for CanonicalMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.latin_name())
    }
}

/// Spelling used for the meter tag in emitted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterLabel {
    #[default]
    Arabic,
    Latin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exactly_sixteen_distinct_meters() {
        let arabic: HashSet<_> = CanonicalMeter::ALL.iter().map(|m| m.arabic_name()).collect();
        let latin:  HashSet<_> = CanonicalMeter::ALL.iter().map(|m| m.latin_name()).collect();
        assert_eq!(arabic.len(), 16);
        assert_eq!(latin.len(),  16);
    }

    #[test]
    fn test_label_style() {
        assert_eq!(CanonicalMeter::Taweel.label(MeterLabel::Arabic), "الطويل");
        assert_eq!(CanonicalMeter::Taweel.label(MeterLabel::Latin),  "taweel");
    }

    #[test]
    fn test_serde_uses_latin_identifier() {
        let json = serde_json::to_string(&CanonicalMeter::Mutaqareb).unwrap();
        assert_eq!(json, "\"mutaqareb\"");
    }
}
