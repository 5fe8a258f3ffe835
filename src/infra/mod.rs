// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   artifact_store.rs — Model artifact persistence
//                       Writes the fitted forest to
//                       {model_dir}/model.pkl (bincode) and
//                       loads it back for inference.
//
//   metrics.rs        — Training metrics document
//                       {model_dir}/metrics.json plus the
//                       classification report written to the
//                       output-data directory.
//
//   http_client.rs    — Shared ureq agent with timeouts and
//                       a bounded response reader, used by the
//                       endpoint smoke test.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod artifact_store;

/// metrics.json and classification report writers
pub mod metrics;

/// HTTP agent and bounded response helpers
pub mod http_client;
