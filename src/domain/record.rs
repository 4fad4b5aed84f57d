// ============================================================
// Layer 3 - RawRecord Domain Type
// ============================================================
// One row of the input corpus after column selection.
// Nothing here is cleaned or validated yet: the meter label is
// exactly what the author wrote and the text may still carry
// tashkeel, tatweel and punctuation noise.
//
// Two input layouts produce the same struct:
//   - line layout:      `text` holds one half-verse, `second` is None
//   - hemistich layout: `text` holds h1, `second` holds h2

use serde::{Deserialize, Serialize};

/// A raw verse row read from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based data row number (header excluded), for diagnostics
    pub row: u64,

    /// Half-verse text (line layout) or the first half (hemistich layout)
    pub text: String,

    /// Second half-verse, only present in hemistich layout
    pub second: Option<String>,

    /// Free-form meter label as found in the corpus
    pub meter: String,

    /// Author-supplied rhyme label, when a rhyme column is configured
    pub rhyme: Option<String>,

    /// Poem identity built from the grouping columns ("" when none)
    pub group: String,
}

impl RawRecord {
    /// Create a line-layout record carrying a single half-verse.
    pub fn half(row: u64, text: impl Into<String>, meter: impl Into<String>) -> Self {
        Self {
            row,
            text: text.into(),
            second: None,
            meter: meter.into(),
            rhyme: None,
            group: String::new(),
        }
    }

    /// Create a hemistich-layout record carrying both halves.
    pub fn pair(
        row: u64,
        h1: impl Into<String>,
        h2: impl Into<String>,
        meter: impl Into<String>,
    ) -> Self {
        Self {
            row,
            text: h1.into(),
            second: Some(h2.into()),
            meter: meter.into(),
            rhyme: None,
            group: String::new(),
        }
    }

    /// Attach a poem identity.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Attach an author-supplied rhyme label.
    pub fn with_rhyme(mut self, rhyme: impl Into<String>) -> Self {
        self.rhyme = Some(rhyme.into());
        self
    }

    pub fn is_pair(&self) -> bool {
        self.second.is_some()
    }
}

/// What a record source hands back for one physical row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRead {
    /// A well-formed row
    Record(RawRecord),

    /// A row that could not be decoded or has the wrong field count.
    /// Skipped and counted, never fatal.
    Malformed { row: u64, reason: String },
}
