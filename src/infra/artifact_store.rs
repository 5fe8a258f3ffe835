// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the fitted forest.
//
// Layout:
//   {model_dir}/
//     model.pkl       ← bincode-encoded RandomForest
//     metrics.json    ← written by infra::metrics
//
// The artifact is opaque to everything except this file: the
// forest derives serde, bincode turns it into bytes, and the
// feature names travel inside it so inference can check the
// request schema.
//
// Reference: bincode documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::ml::forest::RandomForest;

pub const MODEL_FILE: &str = "model.pkl";

pub struct ArtifactStore {
    /// Directory holding model.pkl and metrics.json
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Write the model, creating the directory if it doesn't exist yet.
    pub fn save_model(&self, model: &RandomForest) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create model directory '{}'", self.dir.display()))?;

        let path  = self.model_path();
        let bytes = bincode::serialize(model).context("Failed to encode model")?;
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved {} trees to '{}'", model.n_trees(), path.display());
        Ok(path)
    }

    pub fn load_model(&self) -> Result<RandomForest> {
        let path  = self.model_path();
        let bytes = fs::read(&path).with_context(|| {
            format!("Cannot read model '{}'. Have you run 'train' first?", path.display())
        })?;

        bincode::deserialize(&bytes)
            .with_context(|| format!("'{}' is not a valid model artifact", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::forest::ForestParams;
    use ndarray::array;

    #[test]
    fn test_saved_model_predicts_the_same() {
        let x = array![[0.0], [0.2], [3.0], [3.1]];
        let y = array![0, 0, 1, 1];
        let model = RandomForest::fit(
            ForestParams { n_estimators: 5, max_depth: 2, seed: 42 },
            &x,
            &y,
            vec!["v".into()],
            vec!["lo".into(), "hi".into()],
        )
        .unwrap();

        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("model"));
        let path  = store.save_model(&model).unwrap();
        assert!(path.ends_with(MODEL_FILE));

        let loaded = store.load_model().unwrap();
        assert_eq!(loaded.feature_names(), model.feature_names());
        assert_eq!(loaded.predict_proba(&x).unwrap(), model.predict_proba(&x).unwrap());
    }

    #[test]
    fn test_missing_model_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactStore::new(dir.path()).load_model().err().unwrap();
        assert!(format!("{err:#}").contains(MODEL_FILE));
    }

    #[test]
    fn test_garbage_artifact_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), b"not a model").unwrap();
        assert!(ArtifactStore::new(dir.path()).load_model().is_err());
    }
}
