// ============================================================
// Layer 3 - Run Statistics
// ============================================================
// Per-record problems never abort a run. They are counted here
// and reported once at the end, so the user can judge the yield
// of a preprocessing run before spending compute on training.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a record or couplet was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Meter label missing or not in the alias table
    UnknownMeter,
    /// A half-verse was empty after cleaning
    EmptyHalf,
    /// Wrong field count or undecodable row
    MalformedRow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    pub unknown_meter: usize,
    pub empty_half:    usize,
    pub malformed_row: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.unknown_meter + self.empty_half + self.malformed_row
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Physical data rows read, malformed ones included
    pub records_read: usize,

    pub couplets_emitted: usize,

    pub dropped: DropCounts,

    /// Trailing half-verses with no partner (expected, not an error)
    pub unpaired_halves: usize,

    pub train_lines: usize,
    pub val_lines:   usize,

    /// Distinct unrecognised meter labels and how often each appeared
    pub unknown_meter_labels: BTreeMap<String, usize>,
}

impl RunStats {
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::UnknownMeter => self.dropped.unknown_meter += 1,
            DropReason::EmptyHalf    => self.dropped.empty_half    += 1,
            DropReason::MalformedRow => self.dropped.malformed_row += 1,
        }
    }

    /// Count an unknown meter drop and remember its label.
    pub fn record_unknown_meter(&mut self, label: &str) {
        self.record_drop(DropReason::UnknownMeter);
        let key = if label.trim().is_empty() { "<missing>" } else { label.trim() };
        *self.unknown_meter_labels.entry(key.to_string()).or_insert(0) += 1;
    }

    /// The `n` most frequent unknown labels, most frequent first.
    /// Ties keep label order so the result is stable across runs.
    pub fn top_unknown_meters(&self, n: usize) -> Vec<(&str, usize)> {
        let mut labels: Vec<(&str, usize)> = self
            .unknown_meter_labels
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1));
        labels.truncate(n);
        labels
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records read      : {}", self.records_read)?;
        writeln!(f, "Couplets emitted  : {}", self.couplets_emitted)?;
        writeln!(f, "Dropped           : {}", self.dropped.total())?;
        writeln!(f, "  unknown meter   : {}", self.dropped.unknown_meter)?;
        writeln!(f, "  empty half      : {}", self.dropped.empty_half)?;
        writeln!(f, "  malformed row   : {}", self.dropped.malformed_row)?;
        writeln!(f, "Unpaired halves   : {}", self.unpaired_halves)?;
        write!(f,   "Train / Val       : {} / {}", self.train_lines, self.val_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_counters() {
        let mut s = RunStats::default();
        s.record_drop(DropReason::EmptyHalf);
        s.record_drop(DropReason::MalformedRow);
        s.record_unknown_meter("النثر");
        assert_eq!(s.dropped.empty_half, 1);
        assert_eq!(s.dropped.malformed_row, 1);
        assert_eq!(s.dropped.unknown_meter, 1);
        assert_eq!(s.dropped.total(), 3);
    }

    #[test]
    fn test_top_unknown_meters_ordering() {
        let mut s = RunStats::default();
        for label in ["b", "a", "b", "", "c", "b", "a"] {
            s.record_unknown_meter(label);
        }
        let top = s.top_unknown_meters(2);
        assert_eq!(top, vec![("b", 3), ("a", 2)]);
        assert_eq!(s.unknown_meter_labels.get("<missing>"), Some(&1));
    }

    #[test]
    fn test_display_mentions_every_counter() {
        let s = RunStats { records_read: 5, couplets_emitted: 1, ..Default::default() };
        let text = s.to_string();
        assert!(text.contains("Records read      : 5"));
        assert!(text.contains("Couplets emitted  : 1"));
        assert!(text.contains("Train / Val"));
    }
}
