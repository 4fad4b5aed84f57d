// ============================================================
// Layer 4 - Meter Normaliser
// ============================================================
// Resolves a free-form meter label to one of the sixteen
// canonical meters through a fixed alias table.
//
// The table is built once per process (once_cell::Lazy) and is
// read-only afterwards. Both the table keys and the incoming
// label go through the same key normalisation:
//
//   1. strip tashkeel        "الطَّوِيل"    → "الطويل"
//   2. remove tatweel        "الطويـــل"   → "الطويل"
//   3. collapse whitespace   "  بحر  الطويل " → "بحر الطويل"
//   4. lowercase ASCII       "Taweel"      → "taweel"
//
// After that the lookup is exact. No fuzzy or prefix matching:
// a label either hits the table or the record is dropped.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::data::preprocessor::{collapse_whitespace, strip_tashkeel};
use crate::domain::meter::CanonicalMeter;

/// Latin transliterations accepted for each meter, besides its
/// canonical Latin identifier. Arabic forms are derived from the
/// canonical Arabic name in `aliases_of`.
fn latin_variants(meter: CanonicalMeter) -> &'static [&'static str] {
    match meter {
        CanonicalMeter::Taweel    => &["tawil", "taweel"],
        CanonicalMeter::Madeed    => &["madid", "madeed"],
        CanonicalMeter::Baseet    => &["basit", "baseet"],
        CanonicalMeter::Wafer     => &["wafir", "wafer", "waafir"],
        CanonicalMeter::Kamel     => &["kamil", "kamel"],
        CanonicalMeter::Hazaj     => &["hazaj"],
        CanonicalMeter::Rajaz     => &["rajaz"],
        CanonicalMeter::Ramal     => &["ramal"],
        CanonicalMeter::Saree     => &["sari", "saree", "sarii"],
        CanonicalMeter::Munsareh  => &["munsarih", "munsareh"],
        CanonicalMeter::Khafeef   => &["khafif", "khafeef"],
        CanonicalMeter::Mudare    => &["mudari", "mudare", "mudaari"],
        CanonicalMeter::Muqtadab  => &["muqtadab", "moqtadab"],
        CanonicalMeter::Mujtath   => &["mujtath", "mujtathth"],
        CanonicalMeter::Mutaqareb => &["mutaqarib", "mutaqareb"],
        CanonicalMeter::Mutadarak => &["mutadarik", "mutadarak", "khabab"],
    }
}

/// Extra Arabic names that are not spelling variants of the canonical one.
fn arabic_extras(meter: CanonicalMeter) -> &'static [&'static str] {
    match meter {
        // al-Khabab is the common name of the mutadarak's fast variant
        CanonicalMeter::Mutadarak => &["الخبب"],
        _ => &[],
    }
}

/// Every documented alias of a meter, un-normalised, canonical names first.
pub fn aliases_of(meter: CanonicalMeter) -> Vec<String> {
    let mut aliases = vec![meter.arabic_name().to_string(), meter.latin_name().to_string()];
    aliases.extend(alternate_aliases(meter));
    aliases
}

/// The aliases of a meter other than its canonical Arabic and Latin names.
pub fn alternate_aliases(meter: CanonicalMeter) -> Vec<String> {
    let arabic = meter.arabic_name();
    let mut aliases = Vec::new();

    let mut arabic_forms = vec![arabic.to_string()];
    arabic_forms.extend(arabic_extras(meter).iter().map(|s| s.to_string()));
    for form in &arabic_forms {
        if form != arabic {
            aliases.push(form.clone());
        }
        // Bare form without the article, e.g. طويل
        if let Some(bare) = form.strip_prefix("ال") {
            aliases.push(bare.to_string());
        }
        aliases.push(format!("بحر {form}"));
    }

    for latin in latin_variants(meter) {
        if *latin != meter.latin_name() {
            aliases.push(latin.to_string());
        }
        aliases.push(format!("al-{latin}"));
    }

    aliases
}

/// Key normalisation shared by the table and the lookup.
pub fn normalize_key(label: &str) -> String {
    let stripped: String = strip_tashkeel(label)
        .chars()
        .filter(|&c| c != '\u{0640}')
        .collect();
    collapse_whitespace(&stripped).to_ascii_lowercase()
}

static METER_TABLE: Lazy<HashMap<String, CanonicalMeter>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for meter in CanonicalMeter::ALL {
        for alias in aliases_of(meter) {
            table.insert(normalize_key(&alias), meter);
        }
    }
    tracing::debug!("Meter alias table built with {} keys", table.len());
    table
});

/// Resolve a raw meter label. `None` means the label is missing or
/// not in the table, and the owning record must be dropped.
pub fn normalize_meter(label: &str) -> Option<CanonicalMeter> {
    let key = normalize_key(label);
    if key.is_empty() {
        return None;
    }
    METER_TABLE.get(&key).copied()
}
