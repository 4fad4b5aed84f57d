// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// This layer orchestrates the other layers for one goal:
// turning a raw corpus into train/validation files.
//
// Rules for this layer:
//   - No text-cleaning or pairing logic here (that's Layer 4)
//   - No printing to stdout (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The corpus formatting workflow
pub mod prepare_use_case;
