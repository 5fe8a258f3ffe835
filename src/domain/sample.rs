// ============================================================
// Layer 3 — Sample / Dataset Domain Types
// ============================================================
// A labelled dataset is a list of feature vectors, each paired
// with an integer class label, plus the names needed to make
// sense of them (column names and class names).
//
// The feature names are carried all the way into the saved
// model so that inference can check the request columns
// against what the model was trained on.

use serde::{Deserialize, Serialize};

/// One labelled row: the measurements and the class index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label:    usize,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: usize) -> Self {
        Self { features, label }
    }
}

/// A full labelled dataset with its schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledDataset {
    /// Ordered column names: position i names features[i] of every sample
    pub feature_names: Vec<String>,

    /// Human readable class names — position i names label i
    pub class_names: Vec<String>,

    pub samples: Vec<Sample>,
}

impl LabeledDataset {
    pub fn new(
        feature_names: Vec<String>,
        class_names:   Vec<String>,
        samples:       Vec<Sample>,
    ) -> Self {
        Self { feature_names, class_names, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }
}
