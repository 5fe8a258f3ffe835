// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the dataset              (Layer 4 - data)
//   Step 2: Seeded 80/20 train/test split (Layer 4 - data)
//   Step 3: Fit + score the forest        (Layer 5 - ml)
//   Step 4: Save model.pkl                (Layer 6 - infra)
//   Step 5: Save metrics.json + report    (Layer 6 - infra)
//   Step 6: Quality gate
//
// The gate runs after the artifacts are written, so a failed
// run still leaves them on disk for inspection; what it blocks
// is the run being reported as successful.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{loader::source_for_channel, splitter::split_train_test};
use crate::domain::error::PipelineError;
use crate::infra::{
    artifact_store::ArtifactStore,
    metrics::{write_metrics, write_report, TrainingMetrics},
};
use crate::ml::{forest::ForestParams, trainer::run_training};

/// Seed shared by the split and the bootstrap sampling
pub const RANDOM_SEED: u64 = 42;

pub const TEST_FRACTION: f64 = 0.2;

/// Minimum test accuracy for a run to count as successful
pub const QUALITY_THRESHOLD: f64 = 0.85;

/// Environment variables set by the training host, dumped at debug level
const CHANNEL_ENV_VARS: [&str; 3] = ["SM_MODEL_DIR", "SM_CHANNEL_TRAIN", "SM_OUTPUT_DATA_DIR"];

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub n_estimators:      usize,
    pub max_depth:         usize,
    pub model_dir:         PathBuf,
    pub train_dir:         PathBuf,
    pub output_data_dir:   PathBuf,
    pub seed:              u64,
    pub test_fraction:     f64,
    pub min_test_accuracy: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_estimators:      100,
            max_depth:         5,
            model_dir:         PathBuf::from("./model"),
            train_dir:         PathBuf::from("./data"),
            output_data_dir:   PathBuf::from("./output"),
            seed:              RANDOM_SEED,
            test_fraction:     TEST_FRACTION,
            min_test_accuracy: QUALITY_THRESHOLD,
        }
    }
}

impl TrainConfig {
    fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            bail!("--n-estimators must be at least 1");
        }
        if self.max_depth == 0 {
            bail!("--max-depth must be at least 1");
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            bail!("test fraction must be in [0, 1), got {}", self.test_fraction);
        }
        Ok(())
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub metrics:      TrainingMetrics,
    pub model_path:   PathBuf,
    pub metrics_path: PathBuf,
    pub report_path:  PathBuf,
}

/// Fail unless `test_accuracy` reaches `threshold`.
pub fn check_quality_gate(test_accuracy: f64, threshold: f64) -> Result<(), PipelineError> {
    if test_accuracy < threshold {
        return Err(PipelineError::QualityGate { accuracy: test_accuracy, threshold });
    }
    Ok(())
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainSummary> {
        let cfg = &self.config;
        cfg.validate()?;

        tracing::info!("Starting model training...");
        for key in CHANNEL_ENV_VARS {
            tracing::debug!("{} = {:?}", key, std::env::var(key).ok());
        }
        tracing::debug!("Training config: {:?}", cfg);

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        let dataset = source_for_channel(&cfg.train_dir).load()?;
        tracing::info!(
            "Loaded {} samples, {} features, {} classes",
            dataset.len(),
            dataset.n_features(),
            dataset.n_classes()
        );

        // ── Step 2: Train / test split ────────────────────────────────────────
        let (train, test) = split_train_test(dataset.samples.clone(), cfg.test_fraction, cfg.seed);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 3: Fit and evaluate ──────────────────────────────────────────
        let params = ForestParams {
            n_estimators: cfg.n_estimators,
            max_depth:    cfg.max_depth,
            seed:         cfg.seed,
        };
        let outcome = run_training(params, &dataset, &train, &test).inspect_err(|e| {
            tracing::error!("Training failed: {e:?}");
        })?;

        tracing::info!("Training Accuracy: {:.4}", outcome.train_accuracy);
        tracing::info!("Test Accuracy: {:.4}", outcome.test_accuracy);
        tracing::info!("Classification Report:\n{}", outcome.report);

        // ── Step 4: Save model ────────────────────────────────────────────────
        let store      = ArtifactStore::new(&cfg.model_dir);
        let model_path = store.save_model(&outcome.model)?;
        tracing::info!("Model saved to {}", model_path.display());

        // ── Step 5: Save metrics and report ───────────────────────────────────
        let metrics = TrainingMetrics {
            train_accuracy: outcome.train_accuracy,
            test_accuracy:  outcome.test_accuracy,
            n_estimators:   cfg.n_estimators,
            max_depth:      cfg.max_depth,
        };
        let metrics_path = write_metrics(&cfg.model_dir, &metrics)?;
        tracing::info!("Metrics saved to {}", metrics_path.display());

        let report_path = write_report(&cfg.output_data_dir, &outcome.report)?;
        tracing::info!("Classification report saved to {}", report_path.display());

        // ── Step 6: Quality gate ──────────────────────────────────────────────
        if let Err(gate) = check_quality_gate(metrics.test_accuracy, cfg.min_test_accuracy) {
            tracing::error!("{gate}");
            return Err(gate.into());
        }

        tracing::info!("Training completed successfully!");
        Ok(TrainSummary { metrics, model_path, metrics_path, report_path })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::metrics::tests::read_metrics;

    fn config_in(root: &std::path::Path, n_estimators: usize) -> TrainConfig {
        TrainConfig {
            n_estimators,
            model_dir:       root.join("model"),
            train_dir:       root.join("data"),
            output_data_dir: root.join("output"),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_quality_gate_boundary() {
        assert!(check_quality_gate(0.85, 0.85).is_ok());
        assert_eq!(
            check_quality_gate(0.8499, 0.85),
            Err(PipelineError::QualityGate { accuracy: 0.8499, threshold: 0.85 })
        );
    }

    #[test]
    fn test_successful_run_writes_artifacts() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = config_in(dir.path(), 100);
        let summary = TrainUseCase::new(cfg.clone()).execute().unwrap();

        assert!(summary.model_path.is_file());
        assert!(summary.metrics_path.is_file());
        assert!(summary.report_path.is_file());
        assert!(summary.metrics.test_accuracy >= QUALITY_THRESHOLD);
        assert_eq!(read_metrics(&cfg.model_dir).unwrap(), summary.metrics);
    }

    #[test]
    fn test_repeated_runs_report_identical_accuracy() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let m1 = TrainUseCase::new(config_in(a.path(), 25)).execute().unwrap().metrics;
        let m2 = TrainUseCase::new(config_in(b.path(), 25)).execute().unwrap().metrics;
        assert_eq!(m1, m2);
    }

    #[test]
    fn test_gate_failure_is_an_error_but_keeps_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { min_test_accuracy: 1.01, ..config_in(dir.path(), 10) };

        let err = TrainUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::QualityGate { threshold, .. }) if *threshold == 1.01
        ));
        assert!(cfg.model_dir.join("model.pkl").is_file());
        assert!(cfg.model_dir.join("metrics.json").is_file());
    }

    #[test]
    fn test_invalid_hyperparameters_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { max_depth: 0, ..config_in(dir.path(), 10) };
        assert!(TrainUseCase::new(cfg.clone()).execute().is_err());
        assert!(!cfg.model_dir.exists());
    }
}
