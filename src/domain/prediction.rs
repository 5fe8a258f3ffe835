// ============================================================
// Layer 3 — Prediction Response
// ============================================================
// What the adapter returns for one request: a hard class label
// and a probability vector per input row.
//
// Wire shape (application/json):
//   {"predictions": [0, 1, 2], "probabilities": [[...], ...]}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions:   Vec<usize>,
    pub probabilities: Vec<Vec<f64>>,
}

impl PredictionResponse {
    pub fn new(predictions: Vec<usize>, probabilities: Vec<Vec<f64>>) -> Self {
        Self { predictions, probabilities }
    }

    /// True when both sequences have exactly `rows` entries.
    pub fn matches_rows(&self, rows: usize) -> bool {
        self.predictions.len() == rows && self.probabilities.len() == rows
    }
}
