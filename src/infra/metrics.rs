// ============================================================
// Layer 6 — Metrics Documents
// ============================================================
// Two side artifacts are written per training run:
//
//   {model_dir}/metrics.json
//     {"train_accuracy": 0.98, "test_accuracy": 1.0,
//      "n_estimators": 100, "max_depth": 5}
//
//   {output_data_dir}/classification_report.json
//     per-class precision / recall / F1 / support on the test split
//
// Both are write-once: a new run overwrites the previous files.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::ml::evaluation::ClassificationReport;

pub const METRICS_FILE: &str = "metrics.json";
pub const REPORT_FILE:  &str = "classification_report.json";

/// The flat metrics document stored next to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub train_accuracy: f64,
    pub test_accuracy:  f64,
    pub n_estimators:   usize,
    pub max_depth:      usize,
}

/// Write `metrics` as pretty JSON into `dir`, creating it if needed.
pub fn write_metrics(dir: &Path, metrics: &TrainingMetrics) -> Result<PathBuf> {
    write_json(dir, METRICS_FILE, metrics)
}

pub fn write_report(dir: &Path, report: &ClassificationReport) -> Result<PathBuf> {
    write_json(dir, REPORT_FILE, report)
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;

    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    tracing::debug!("Wrote '{}'", path.display());
    Ok(path)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Read back the metrics document written by `write_metrics`.
    pub(crate) fn read_metrics(dir: &Path) -> Result<TrainingMetrics> {
        let path = dir.join(METRICS_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read metrics from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    #[test]
    fn test_metrics_has_exactly_documented_keys() {
        let m = TrainingMetrics { train_accuracy: 0.975, test_accuracy: 1.0, n_estimators: 100, max_depth: 5 };
        let value = serde_json::to_value(&m).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["max_depth", "n_estimators", "test_accuracy", "train_accuracy"]);
        assert!(value["n_estimators"].is_u64());
    }

    #[test]
    fn test_accuracy_fractions_read_back_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let m   = TrainingMetrics {
            train_accuracy: 119.0 / 120.0,
            test_accuracy:  29.0 / 30.0,
            n_estimators:   100,
            max_depth:      5,
        };

        write_metrics(dir.path(), &m).unwrap();
        let back = read_metrics(dir.path()).unwrap();
        assert_eq!(back.train_accuracy.to_bits(), m.train_accuracy.to_bits());
        assert_eq!(back, m);
    }

    #[test]
    fn test_write_then_read_creates_directory() {
        let dir    = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let m      = TrainingMetrics { train_accuracy: 0.9, test_accuracy: 0.85, n_estimators: 3, max_depth: 2 };

        let path = write_metrics(&nested, &m).unwrap();
        assert_eq!(path, nested.join(METRICS_FILE));
        assert_eq!(read_metrics(&nested).unwrap(), m);
    }
}
