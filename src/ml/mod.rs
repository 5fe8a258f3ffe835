// ============================================================
// Layer 5 — ML / Model Layer (linfa)
// ============================================================
// Everything that fits or runs a model lives here. The
// domain types are converted to ndarray matrices on the way in.
//
// What's in this layer:
//
//   forest.rs     — The classifier
//                   A bagged ensemble of Gini CART trees from
//                   linfa-trees. Each tree is fitted on a
//                   bootstrap sample drawn from a seeded RNG;
//                   probabilities are the fraction of trees
//                   voting for each class.
//
//   evaluation.rs — Accuracy and a per-class classification
//                   report (precision / recall / F1 / support)
//
//   trainer.rs    — Fits the forest on the training split and
//                   scores it on both splits
//
//   inferencer.rs — Aligns a request Table to the model's
//                   feature schema and produces predictions
//
// Reference: linfa / linfa-trees documentation
//            Breiman (2001) Random Forests

/// Bagged decision-tree classifier
pub mod forest;

/// Accuracy and classification report
pub mod evaluation;

/// Fit + score on the train/test split
pub mod trainer;

/// Table → PredictionResponse
pub mod inferencer;
