// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// This layer turns the raw corpus into split training lines.
//
// The pipeline flows in this order:
//
//   corpus .csv
//       │
//       ▼
//   CsvLoader         → reads rows, resolves columns
//       │
//       ▼
//   meter_table       → label → one of 16 canonical meters
//       │
//       ▼
//   Preprocessor      → strips tashkeel, tatweel, extra spaces
//       │
//       ▼
//   CoupletAssembler  → pairs half-verses, checks invariants
//       │
//       ▼
//   RhymeExtractor    → rhyme key from the end of h2
//       │
//       ▼
//   Couplet::format   → "[rhyme] h2 [meter] h1"
//       │
//       ▼
//   split_train_val   → seeded, reproducible train/val split
//
// Each module is responsible for exactly one step.

/// Reads corpus rows from delimited text files
pub mod loader;

/// Tashkeel stripping and half-verse cleaning
pub mod preprocessor;

/// Closed alias table for the sixteen meters
pub mod meter_table;

/// Rhyme key derivation
pub mod rhyme;

/// Half-verse pairing and per-record filtering
pub mod assembler;

/// Seeded train/validation split
pub mod splitter;
