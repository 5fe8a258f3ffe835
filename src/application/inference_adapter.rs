// ============================================================
// Layer 2 — Inference Adapter
// ============================================================
// The four hooks a hosting runtime calls, implemented for the
// Random Forest artifact produced by `train`:
//
//   load_model        model_dir → RandomForest    (infra::artifact_store)
//   parse_input       body + Content-Type → Table (data::payload)
//   predict           Table + model → response    (ml::inferencer)
//   serialize_output  response + Accept → JSON
//
// A pure protocol translation layer: no state of its own, the
// host keeps the model handle between requests.

use anyhow::Result;
use std::path::Path;

use crate::data::payload::{mime_essence, parse_request, APPLICATION_JSON};
use crate::domain::error::PipelineError;
use crate::domain::prediction::PredictionResponse;
use crate::domain::table::{Columns, Table};
use crate::domain::traits::InferenceHandler;
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::{forest::RandomForest, inferencer::predict_table};

#[derive(Debug, Default, Clone, Copy)]
pub struct IrisHandler;

impl InferenceHandler for IrisHandler {
    type Model = RandomForest;

    fn load_model(&self, model_dir: &Path) -> Result<RandomForest> {
        tracing::info!("Loading model from {}", model_dir.display());
        let model = ArtifactStore::new(model_dir).load_model()?;
        tracing::info!(
            "Model loaded successfully ({} trees, {} classes {:?}, features: {:?})",
            model.n_trees(),
            model.n_classes(),
            model.class_names(),
            model.feature_names()
        );
        Ok(model)
    }

    fn parse_input(&self, body: &[u8], content_type: &str) -> Result<Table> {
        tracing::info!("Received content type: {}", content_type);
        let table = parse_request(body, content_type)?;
        tracing::info!("Input shape: {:?}", table.shape());
        if let Columns::Named(names) = table.columns() {
            tracing::debug!("Named columns: {:?}", names);
        }
        tracing::debug!("First row: {:?}", table.rows().first());
        Ok(table)
    }

    fn predict(&self, input: &Table, model: &RandomForest) -> Result<PredictionResponse> {
        tracing::info!("Making predictions for {} samples", input.n_rows());
        predict_table(model, input)
    }

    fn serialize_output(
        &self,
        prediction: &PredictionResponse,
        accept:     &str,
    ) -> Result<(String, String)> {
        if mime_essence(accept) != APPLICATION_JSON {
            return Err(PipelineError::UnsupportedAcceptType(accept.to_string()).into());
        }
        Ok((serde_json::to_string(prediction)?, APPLICATION_JSON.to_string()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};
    use crate::data::loader::{BundledIris, IRIS_FEATURES};
    use crate::data::payload::TEXT_CSV;
    use crate::data::splitter::split_train_test;
    use crate::domain::traits::DatasetSource;
    use crate::ml::forest::ForestParams;
    use crate::ml::trainer::run_training;

    /// Train with the default hyperparameters into a temp dir.
    fn trained_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            model_dir:       dir.path().join("model"),
            train_dir:       dir.path().join("data"),
            output_data_dir: dir.path().join("output"),
            ..TrainConfig::default()
        };
        TrainUseCase::new(cfg).execute().unwrap();
        dir
    }

    #[test]
    fn test_end_to_end_setosa() {
        let dir     = trained_dir();
        let handler = IrisHandler;
        let model   = handler.load_model(&dir.path().join("model")).unwrap();

        let table = handler
            .parse_input(br#"{"instances": [[5.1,3.5,1.4,0.2]]}"#, APPLICATION_JSON)
            .unwrap();
        let resp = handler.predict(&table, &model).unwrap();

        // Reference fit: same data, same split, same seed, same hyperparameters
        let ds            = BundledIris.load().unwrap();
        let (train, test) = split_train_test(ds.samples.clone(), 0.2, 42);
        let params        = ForestParams { n_estimators: 100, max_depth: 5, seed: 42 };
        let reference     = run_training(params, &ds, &train, &test).unwrap().model;
        let expected      = reference.predict(&ndarray::array![[5.1, 3.5, 1.4, 0.2]]).unwrap();

        assert_eq!(resp.predictions, expected.to_vec());
        assert_eq!(resp.predictions, vec![0]);
    }

    #[test]
    fn test_three_rows_three_answers() {
        let dir     = trained_dir();
        let handler = IrisHandler;
        let model   = handler.load_model(&dir.path().join("model")).unwrap();

        let body  = b"5.1,3.5,1.4,0.2\n6.2,2.9,4.3,1.3\n7.3,2.9,6.3,1.8\n";
        let table = handler.parse_input(body, TEXT_CSV).unwrap();
        let resp  = handler.predict(&table, &model).unwrap();

        assert_eq!(resp.predictions.len(), 3);
        assert_eq!(resp.probabilities.len(), 3);
        for probs in &resp.probabilities {
            assert_eq!(probs.len(), 3);
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_feature_map_uses_training_names() {
        let dir     = trained_dir();
        let handler = IrisHandler;
        let model   = handler.load_model(&dir.path().join("model")).unwrap();

        let values = [5.1, 3.5, 1.4, 0.2];
        let map: serde_json::Map<String, serde_json::Value> = IRIS_FEATURES
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
            .collect();
        let body = serde_json::to_vec(&map).unwrap();

        let table = handler.parse_input(&body, APPLICATION_JSON).unwrap();
        let resp  = handler.predict(&table, &model).unwrap();
        assert_eq!(resp.predictions, vec![0]);
    }

    #[test]
    fn test_unknown_feature_names_rejected() {
        let dir     = trained_dir();
        let handler = IrisHandler;
        let model   = handler.load_model(&dir.path().join("model")).unwrap();

        let table = handler.parse_input(br#"{"feature1": 1.0}"#, APPLICATION_JSON).unwrap();
        let err   = handler.predict(&table, &model).unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::SchemaMismatch(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_content_type() {
        let err = IrisHandler.parse_input(b"hello", "text/plain").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::UnsupportedContentType("text/plain".into()))
        );
    }

    #[test]
    fn test_serialize_json() {
        let resp         = PredictionResponse::new(vec![2], vec![vec![0.0, 0.1, 0.9]]);
        let (body, ct)   = IrisHandler.serialize_output(&resp, APPLICATION_JSON).unwrap();
        assert_eq!(ct, APPLICATION_JSON);
        let back: PredictionResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(back, resp);
    }

    #[test]
    fn test_serialize_rejects_text_plain() {
        let resp = PredictionResponse::new(vec![0], vec![vec![1.0, 0.0, 0.0]]);
        let err  = IrisHandler.serialize_output(&resp, "text/plain").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::UnsupportedAcceptType("text/plain".into()))
        );
    }

    #[test]
    fn test_load_missing_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(IrisHandler.load_model(dir.path()).is_err());
    }
}
