// ============================================================
// Layer 4 - Couplet Assembler
// ============================================================
// Turns the row stream into couplets, one row at a time.
//
// For every row, in this order:
//   1. Malformed rows are counted and skipped
//   2. The meter label must resolve through the alias table
//   3. The text is cleaned by the Preprocessor
//   4. Halves are paired (line layout) or taken as-is
//      (hemistich layout)
//   5. The rhyme key is derived from h2
//   6. Couplets with an empty half are dropped
//
// Pairing in line layout is keyed by (group, meter): the first
// half of a key waits in `pending` until the next half of the
// same key arrives. Halves from different poems or meters never
// pair, even when interleaved. Whatever is still pending at the
// end is an odd trailing half and is discarded.
//
// Line layout cleans each half as it arrives and drops an empty
// one before pairing, so a stray all-diacritics line does not
// shift the pairing of the rest of the poem.

use std::collections::HashMap;

use crate::data::meter_table::normalize_meter;
use crate::data::preprocessor::Preprocessor;
use crate::data::rhyme::RhymeExtractor;
use crate::domain::couplet::Couplet;
use crate::domain::meter::CanonicalMeter;
use crate::domain::record::{RawRecord, RowRead};
use crate::domain::stats::{DropReason, RunStats};

/// A first half waiting for its partner.
struct PendingHalf {
    text: String,
    row:  u64,
}

pub struct CoupletAssembler {
    preprocessor: Preprocessor,
    rhyme:        RhymeExtractor,
    pending:      HashMap<(String, CanonicalMeter), PendingHalf>,
}

impl CoupletAssembler {
    pub fn new(preprocessor: Preprocessor, rhyme: RhymeExtractor) -> Self {
        Self {
            preprocessor,
            rhyme,
            pending: HashMap::new(),
        }
    }

    /// Feed one row. Returns a couplet when this row completed one.
    pub fn accept(&mut self, row: RowRead, stats: &mut RunStats) -> Option<Couplet> {
        stats.records_read += 1;

        let record = match row {
            RowRead::Record(record) => record,
            RowRead::Malformed { row, reason } => {
                tracing::debug!("Row {row}: malformed ({reason})");
                stats.record_drop(DropReason::MalformedRow);
                return None;
            }
        };

        let Some(meter) = normalize_meter(&record.meter) else {
            tracing::debug!("Row {}: unknown meter '{}'", record.row, record.meter);
            stats.record_unknown_meter(&record.meter);
            return None;
        };

        if record.is_pair() {
            self.accept_pair(record, meter, stats)
        } else {
            self.accept_half(record, meter, stats)
        }
    }

    /// Close the run: every still-pending half is an unpaired leftover.
    pub fn finish(self, stats: &mut RunStats) {
        for ((group, meter), half) in &self.pending {
            tracing::debug!(
                "Row {}: unpaired trailing half discarded (group '{}', {})",
                half.row,
                group,
                meter
            );
        }
        stats.unpaired_halves += self.pending.len();
    }

    fn accept_pair(
        &mut self,
        record: RawRecord,
        meter:  CanonicalMeter,
        stats:  &mut RunStats,
    ) -> Option<Couplet> {
        let h1 = self.preprocessor.clean(&record.text);
        let h2 = self.preprocessor.clean(record.second.as_deref().unwrap_or_default());

        // An author-supplied rhyme wins when it survives cleaning
        let rhyme = record
            .rhyme
            .as_deref()
            .map(|r| self.preprocessor.clean(r))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.rhyme.extract(&h2));

        let couplet = Couplet { h1, h2, meter, rhyme, group: record.group };
        Self::emit(couplet, record.row, stats)
    }

    fn accept_half(
        &mut self,
        record: RawRecord,
        meter:  CanonicalMeter,
        stats:  &mut RunStats,
    ) -> Option<Couplet> {
        let text = self.preprocessor.clean(&record.text);
        if text.is_empty() {
            tracing::debug!("Row {}: half-verse empty after cleaning", record.row);
            stats.record_drop(DropReason::EmptyHalf);
            return None;
        }

        let key = (record.group, meter);
        match self.pending.remove(&key) {
            Some(first) => {
                let rhyme = self.rhyme.extract(&text);
                let couplet = Couplet {
                    h1: first.text,
                    h2: text,
                    meter,
                    rhyme,
                    group: key.0,
                };
                Self::emit(couplet, record.row, stats)
            }
            None => {
                self.pending.insert(key, PendingHalf { text, row: record.row });
                None
            }
        }
    }

    fn emit(couplet: Couplet, row: u64, stats: &mut RunStats) -> Option<Couplet> {
        if !couplet.is_complete() {
            tracing::debug!("Row {row}: couplet has an empty half after cleaning");
            stats.record_drop(DropReason::EmptyHalf);
            return None;
        }
        stats.couplets_emitted += 1;
        Some(couplet)
    }
}
