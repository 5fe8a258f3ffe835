// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Two sources implement DatasetSource:
//
//   BundledIris  — the classic 150-row Iris dataset embedded in
//                  linfa-datasets (4 features, 3 classes).
//   CsvChannel   — {train_dir}/train.csv, headerless numeric
//                  rows with the class label in the last column.
//
// `source_for_channel` picks the CSV when the training channel
// actually contains one and falls back to the bundled dataset
// otherwise, so a fresh checkout trains without any setup.
//
// Reference: linfa-datasets documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::sample::{LabeledDataset, Sample};
use crate::domain::traits::DatasetSource;

/// Column names used by the reference scikit-learn loader, kept so
/// feature-map requests use the same keys.
pub const IRIS_FEATURES: [&str; 4] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

pub const IRIS_CLASSES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// File looked up inside the training channel directory
pub const CHANNEL_FILE: &str = "train.csv";

// ─── BundledIris ──────────────────────────────────────────────────────────────
pub struct BundledIris;

impl DatasetSource for BundledIris {
    fn load(&self) -> Result<LabeledDataset> {
        let iris = linfa_datasets::iris();

        let samples: Vec<Sample> = iris
            .records
            .outer_iter()
            .zip(iris.targets.iter())
            .map(|(row, &label)| Sample::new(row.to_vec(), label))
            .collect();

        tracing::debug!("Loaded {} bundled Iris samples", samples.len());

        Ok(LabeledDataset::new(
            IRIS_FEATURES.iter().map(|s| s.to_string()).collect(),
            IRIS_CLASSES.iter().map(|s| s.to_string()).collect(),
            samples,
        ))
    }
}

// ─── CsvChannel ───────────────────────────────────────────────────────────────
pub struct CsvChannel {
    path: PathBuf,
}

impl CsvChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvChannel {
    fn load(&self) -> Result<LabeledDataset> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;

        let mut samples = Vec::new();
        let mut width   = None;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() < 2 {
                bail!("{}:{}: need at least one feature and a label", self.path.display(), lineno + 1);
            }

            let Some((label_cell, feature_cells)) = cells.split_last() else {
                continue;
            };
            let features = feature_cells
                .iter()
                .map(|c| c.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| format!("{}:{}: non-numeric feature", self.path.display(), lineno + 1))?;
            let label = parse_label(label_cell)
                .with_context(|| format!("{}:{}: bad label '{label_cell}'", self.path.display(), lineno + 1))?;

            match width {
                None => width = Some(features.len()),
                Some(w) if w != features.len() => {
                    bail!("{}:{}: expected {} features, found {}", self.path.display(), lineno + 1, w, features.len());
                }
                Some(_) => {}
            }

            samples.push(Sample::new(features, label));
        }

        let Some(width) = width else {
            bail!("'{}' contains no rows", self.path.display());
        };
        let n_classes = samples.iter().map(|s| s.label).max().unwrap_or(0) + 1;

        tracing::info!(
            "Loaded {} samples ({} features, {} classes) from '{}'",
            samples.len(),
            width,
            n_classes,
            self.path.display()
        );

        Ok(LabeledDataset::new(
            (0..width).map(|i| format!("feature_{i}")).collect(),
            (0..n_classes).map(|i| format!("class_{i}")).collect(),
            samples,
        ))
    }
}

/// Labels may be written as integers ("2") or integral floats ("2.0").
fn parse_label(cell: &str) -> Result<usize> {
    if let Ok(label) = cell.parse::<usize>() {
        return Ok(label);
    }
    let value: f64 = cell.parse()?;
    if value < 0.0 || value.fract() != 0.0 {
        bail!("label must be a non-negative integer");
    }
    Ok(value as usize)
}

/// Pick the data source for a training channel directory.
pub fn source_for_channel(train_dir: &Path) -> Box<dyn DatasetSource> {
    let csv = train_dir.join(CHANNEL_FILE);
    if csv.is_file() {
        tracing::info!("Using training channel file '{}'", csv.display());
        Box::new(CsvChannel::new(csv))
    } else {
        tracing::info!(
            "No '{}' in '{}', using bundled Iris dataset",
            CHANNEL_FILE,
            train_dir.display()
        );
        Box::new(BundledIris)
    }
}
