// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//   - DatasetSource     → where training data comes from
//   - InferenceHandler  → the four hooks a hosting runtime calls
//
// The application layer only talks to these traits, so a new
// data source or a different model family plugs in without
// touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::prediction::PredictionResponse;
use crate::domain::sample::LabeledDataset;
use crate::domain::table::Table;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce a labelled training dataset.
///
/// Implementations:
///   - BundledIris     → the Iris dataset shipped with linfa-datasets
///   - CsvChannel      → a headerless train.csv in the training channel
pub trait DatasetSource {
    fn load(&self) -> Result<LabeledDataset>;
}

// ─── InferenceHandler ─────────────────────────────────────────────────────────
/// The hooks an external hosting runtime drives, in this order:
///
///   load_model        once per process, result cached by the host
///   parse_input       once per request
///   predict           once per request
///   serialize_output  once per request
///
/// Implementations hold no per-request state; the only thing that
/// survives between calls is the model handle the host keeps.
pub trait InferenceHandler {
    type Model;

    /// Locate and deserialize the model artifact inside `model_dir`.
    fn load_model(&self, model_dir: &Path) -> Result<Self::Model>;

    /// Turn a raw request body into a table according to its content type.
    fn parse_input(&self, body: &[u8], content_type: &str) -> Result<Table>;

    /// Run the model over every row of `input`.
    fn predict(&self, input: &Table, model: &Self::Model) -> Result<PredictionResponse>;

    /// Encode the prediction. Returns the body and the content type it is in.
    fn serialize_output(
        &self,
        prediction: &PredictionResponse,
        accept:     &str,
    ) -> Result<(String, String)>;
}
