// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use ndarray::Array2;

use crate::domain::prediction::PredictionResponse;
use crate::domain::table::Table;
use crate::ml::forest::RandomForest;

/// Run `model` over every row of `input`.
///
/// The table is first aligned to the feature names stored in the
/// model; a column count or name mismatch fails with
/// `PipelineError::SchemaMismatch` before the trees are touched.
pub fn predict_table(model: &RandomForest, input: &Table) -> Result<PredictionResponse> {
    let rows = input.align_to(model.feature_names())?;

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let records = Array2::from_shape_vec((rows.len(), model.n_features()), flat)?;

    let proba  = model.predict_proba(&records)?;
    let labels = crate::ml::forest::argmax_rows(&proba);

    tracing::debug!("Predicted {} rows", labels.len());

    Ok(PredictionResponse::new(
        labels.to_vec(),
        proba.outer_iter().map(|row| row.to_vec()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::ml::forest::ForestParams;
    use ndarray::array;

    fn model() -> RandomForest {
        let x = array![[0.0, 0.0], [0.1, 0.2], [4.0, 4.0], [4.2, 3.9], [8.0, 0.0], [8.1, 0.3]];
        let y = array![0, 0, 1, 1, 2, 2];
        RandomForest::fit(
            ForestParams { n_estimators: 9, max_depth: 4, seed: 42 },
            &x,
            &y,
            vec!["x".into(), "y".into()],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_one_entry_per_row() {
        let table = Table::from_rows(vec![vec![0.0, 0.1], vec![4.1, 4.0], vec![8.0, 0.1]]).unwrap();
        let resp  = predict_table(&model(), &table).unwrap();
        assert!(resp.matches_rows(3));
        for probs in &resp.probabilities {
            assert_eq!(probs.len(), 3);
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_named_columns_follow_training_order() {
        let named = Table::with_names(vec!["y".into(), "x".into()], vec![vec![0.1, 8.0]]).unwrap();
        let plain = Table::from_rows(vec![vec![8.0, 0.1]]).unwrap();
        let m     = model();
        assert_eq!(predict_table(&m, &named).unwrap(), predict_table(&m, &plain).unwrap());
    }

    #[test]
    fn test_schema_mismatch_surfaces_typed_error() {
        let table = Table::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let err   = predict_table(&model(), &table).unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::SchemaMismatch(_))));
    }
}
