// ============================================================
// Layer 5 — Random Forest
// ============================================================
// Bootstrap-aggregated decision trees.
//
//   fit:
//     for each of n_estimators trees
//       draw n row indices with replacement (seeded StdRng)
//       fit a Gini CART tree of depth ≤ max_depth on that sample
//
//   predict_proba:
//     fraction of trees voting for each class, per row
//
//   predict:
//     argmax of predict_proba (lowest class index wins ties)
//
// The tree fitting itself is linfa-trees; this file only does
// the bagging and the vote counting. The whole struct derives
// serde so it can be written to disk as one artifact, together
// with the feature names it was trained on.

use anyhow::{anyhow, bail, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Hyperparameters for one fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth:    usize,
    pub seed:         u64,
}

#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    trees:         Vec<DecisionTree<f64, usize>>,
    n_classes:     usize,
    feature_names: Vec<String>,
    class_names:   Vec<String>,
}

impl RandomForest {
    /// Fit `params.n_estimators` trees on bootstrap samples of (records, targets).
    pub fn fit(
        params:        ForestParams,
        records:       &Array2<f64>,
        targets:       &Array1<usize>,
        feature_names: Vec<String>,
        class_names:   Vec<String>,
    ) -> Result<Self> {
        let n = records.nrows();
        if n == 0 {
            bail!("cannot fit a forest on an empty training set");
        }
        if n != targets.len() {
            bail!("{} records but {} targets", n, targets.len());
        }
        if records.ncols() != feature_names.len() {
            bail!(
                "{} feature columns but {} feature names",
                records.ncols(),
                feature_names.len()
            );
        }
        if params.n_estimators == 0 {
            bail!("n_estimators must be at least 1");
        }

        let n_classes = targets.iter().max().map_or(0, |&m| m + 1).max(class_names.len());
        let mut rng   = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for i in 0..params.n_estimators {
            let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let sample = Dataset::new(
                records.select(Axis(0), &rows),
                targets.select(Axis(0), &rows),
            );

            let tree = DecisionTree::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(Some(params.max_depth))
                .fit(&sample)
                .map_err(|e| anyhow!("tree {} of {} failed to fit: {e}", i + 1, params.n_estimators))?;
            trees.push(tree);
        }

        tracing::debug!(
            "Fitted {} trees (max_depth={}, {} classes)",
            trees.len(),
            params.max_depth,
            n_classes
        );

        Ok(Self { trees, n_classes, feature_names, class_names })
    }

    /// Per-class vote fractions, shape (rows, n_classes). Every row sums to 1.
    pub fn predict_proba(&self, records: &Array2<f64>) -> Result<Array2<f64>> {
        if records.ncols() != self.n_features() {
            bail!(
                "input has {} columns, model expects {}",
                records.ncols(),
                self.n_features()
            );
        }

        let mut votes = Array2::<f64>::zeros((records.nrows(), self.n_classes));
        for tree in &self.trees {
            let labels: Array1<usize> = tree.predict(records);
            for (row, &label) in labels.iter().enumerate() {
                votes[[row, label]] += 1.0;
            }
        }

        votes.mapv_inplace(|v| v / self.trees.len() as f64);
        Ok(votes)
    }

    /// Hard class labels: the most voted class of every row.
    pub fn predict(&self, records: &Array2<f64>) -> Result<Array1<usize>> {
        let proba = self.predict_proba(records)?;
        Ok(argmax_rows(&proba))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
}

/// Index of the largest value in each row; the first one wins a tie.
pub fn argmax_rows(matrix: &Array2<f64>) -> Array1<usize> {
    matrix
        .outer_iter()
        .map(|row| {
            let mut best = 0;
            for (i, &v) in row.iter().enumerate() {
                if v > row[best] {
                    best = i;
                }
            }
            best
        })
        .collect()
}
