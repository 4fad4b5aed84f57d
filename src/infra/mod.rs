// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Everything that touches the output side of the filesystem:
//
//   writer.rs  - Output streams
//                One buffered file per split, plain text or
//                JSONL, implementing the LineSink trait.
//
//   report.rs  - Run report
//                Effective configuration plus run statistics,
//                saved as JSON for traceability.
//
// Input reading lives in data::loader because it is part of the
// record pipeline; these modules only consume finished results.

/// Train/validation output files
pub mod writer;

/// JSON run report
pub mod report;
