// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what the
// corpus formatter works with: raw rows, half-verses, couplets,
// the sixteen classical meters and the run counters.
//
// Rules for this layer:
//   - NO csv or filesystem access
//   - NO clap types
//   - Only plain data, enums and traits
//
// Everything here can be unit tested without touching disk.

// One row of the input corpus
pub mod record;

// Couplets and the formatted training line
pub mod couplet;

// The closed set of sixteen prosodic meters
pub mod meter;

// Per-run counters and drop reasons
pub mod stats;

// Fatal error taxonomy
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
