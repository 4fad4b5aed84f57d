// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer drives a run through these two traits
// and never sees csv readers or file handles directly:
//
//   - CsvLoader    implements RecordSource
//   - OutputStream implements LineSink
//
// Tests swap in in-memory implementations of both.

use anyhow::Result;

use crate::domain::couplet::FormattedLine;
use crate::domain::record::RowRead;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that yields corpus rows one at a time, in file order.
pub trait RecordSource {
    /// Pull the next row. `Ok(None)` means the input is exhausted.
    /// An `Err` is fatal (e.g. the underlying read failed).
    fn next_row(&mut self) -> Result<Option<RowRead>>;
}

/// A plain vector of rows is a source too. Handy in tests.
impl RecordSource for std::vec::IntoIter<RowRead> {
    fn next_row(&mut self) -> Result<Option<RowRead>> {
        Ok(self.next())
    }
}

// ─── LineSink ─────────────────────────────────────────────────────────────────
/// A destination for one split's formatted lines.
pub trait LineSink {
    fn write_line(&mut self, line: &FormattedLine) -> Result<()>;

    /// Flush everything written so far. Called once at the end of a run.
    fn finish(&mut self) -> Result<()>;
}

impl LineSink for Vec<FormattedLine> {
    fn write_line(&mut self, line: &FormattedLine) -> Result<()> {
        self.push(line.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
