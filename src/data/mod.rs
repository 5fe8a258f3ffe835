// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw bytes and the plain domain types.
//
// Training side:
//
//   bundled Iris / train.csv
//       │
//       ▼
//   loader      → LabeledDataset (feature names, class names, samples)
//       │
//       ▼
//   splitter    → seeded shuffle, 80/20 train/test
//
// Inference side:
//
//   request body + Content-Type
//       │
//       ▼
//   payload     → Table (positional or named columns)
//
// Each module is responsible for exactly one step, so each is
// testable on its own without a fitted model.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads the bundled Iris dataset or a CSV from the training channel
pub mod loader;

/// Seeded shuffle and split into train/test sets
pub mod splitter;

/// Decodes JSON / CSV request bodies into a Table
pub mod payload;
