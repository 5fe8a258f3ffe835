// ============================================================
// Layer 5 — Training
// ============================================================
// Fit the forest on the training split, then score it on both
// splits. Returns everything the application layer needs to
// persist artifacts and apply the quality gate; nothing here
// touches the filesystem.
//
// Reference: linfa documentation (Fit / Predict)

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};

use crate::domain::sample::{LabeledDataset, Sample};
use crate::ml::evaluation::{accuracy, ClassificationReport};
use crate::ml::forest::{ForestParams, RandomForest};

pub struct TrainingOutcome {
    pub model:          RandomForest,
    pub train_accuracy: f64,
    pub test_accuracy:  f64,
    /// Scores on the test split
    pub report:         ClassificationReport,
}

pub fn run_training(
    params:  ForestParams,
    schema:  &LabeledDataset,
    train:   &[Sample],
    test:    &[Sample],
) -> Result<TrainingOutcome> {
    let (x_train, y_train) = to_arrays(train, schema.n_features())?;
    let (x_test,  y_test)  = to_arrays(test,  schema.n_features())?;

    tracing::info!(
        "Training Random Forest: n_estimators={}, max_depth={}, {} samples",
        params.n_estimators,
        params.max_depth,
        train.len()
    );

    let model = RandomForest::fit(
        params,
        &x_train,
        &y_train,
        schema.feature_names.clone(),
        schema.class_names.clone(),
    )
    .context("Random Forest fitting failed")?;

    let train_pred = model.predict(&x_train)?.to_vec();
    let test_pred  = predict_or_empty(&model, &x_test)?;

    let y_train = y_train.to_vec();
    let y_test  = y_test.to_vec();

    let train_accuracy = accuracy(&y_train, &train_pred);
    let test_accuracy  = accuracy(&y_test,  &test_pred);
    let report         = ClassificationReport::compute(&y_test, &test_pred, &schema.class_names);

    Ok(TrainingOutcome { model, train_accuracy, test_accuracy, report })
}

fn predict_or_empty(model: &RandomForest, records: &Array2<f64>) -> Result<Vec<usize>> {
    if records.nrows() == 0 {
        return Ok(Vec::new());
    }
    Ok(model.predict(records)?.to_vec())
}

/// Stack samples into a (rows, n_features) matrix and a label vector.
pub fn to_arrays(samples: &[Sample], n_features: usize) -> Result<(Array2<f64>, Array1<usize>)> {
    let flat: Vec<f64> = samples
        .iter()
        .flat_map(|s| s.features.iter().copied())
        .collect();
    let records = Array2::from_shape_vec((samples.len(), n_features), flat)
        .context("samples do not all have the same number of features")?;
    let targets = samples.iter().map(|s| s.label).collect();
    Ok((records, targets))
}
