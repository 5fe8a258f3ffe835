// ============================================================
// Layer 5 — Evaluation
// ============================================================
// Accuracy plus a per-class classification report in the usual
// precision / recall / F1 / support layout.
//
//   precision = TP / (TP + FP)   (of everything predicted as c, how much was c)
//   recall    = TP / (TP + FN)   (of everything that was c, how much we found)
//   f1        = 2·P·R / (P + R)
//
// A class with no predictions (or no true samples) gets 0.0
// for the undefined ratio rather than NaN, so the report always
// serialises to valid JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of positions where `truth` and `predicted` agree.
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / truth.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub class:     String,
    pub precision: f64,
    pub recall:    f64,
    pub f1_score:  f64,
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes:      Vec<ClassScores>,
    pub accuracy:     f64,
    pub macro_avg:    ClassScores,
    pub weighted_avg: ClassScores,
}

impl ClassificationReport {
    pub fn compute(truth: &[usize], predicted: &[usize], class_names: &[String]) -> Self {
        let n_classes = class_names
            .len()
            .max(truth.iter().chain(predicted).max().map_or(0, |&m| m + 1));

        let mut tp = vec![0usize; n_classes];
        let mut fp = vec![0usize; n_classes];
        let mut fn_ = vec![0usize; n_classes];

        for (&t, &p) in truth.iter().zip(predicted) {
            if t == p {
                tp[t] += 1;
            } else {
                fp[p]  += 1;
                fn_[t] += 1;
            }
        }

        let classes: Vec<ClassScores> = (0..n_classes)
            .map(|c| {
                let precision = ratio(tp[c], tp[c] + fp[c]);
                let recall    = ratio(tp[c], tp[c] + fn_[c]);
                ClassScores {
                    class:    class_names.get(c).cloned().unwrap_or_else(|| c.to_string()),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support:  tp[c] + fn_[c],
                }
            })
            .collect();

        let total = truth.len();
        let macro_avg = average("macro avg", &classes, |_| 1.0);
        let weighted_avg = average("weighted avg", &classes, |s| s.support as f64);

        Self {
            classes,
            accuracy: accuracy(truth, predicted),
            macro_avg: ClassScores { support: total, ..macro_avg },
            weighted_avg: ClassScores { support: total, ..weighted_avg },
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn average(label: &str, classes: &[ClassScores], weight: impl Fn(&ClassScores) -> f64) -> ClassScores {
    let total_weight: f64 = classes.iter().map(&weight).sum();
    let mean = |field: fn(&ClassScores) -> f64| {
        if total_weight == 0.0 {
            0.0
        } else {
            classes.iter().map(|c| field(c) * weight(c)).sum::<f64>() / total_weight
        }
    };
    ClassScores {
        class:     label.to_string(),
        precision: mean(|c| c.precision),
        recall:    mean(|c| c.recall),
        f1_score:  mean(|c| c.f1_score),
        support:   0,
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.class.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(12);

        writeln!(f, "{:>width$} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.class, c.precision, c.recall, c.f1_score, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for c in [&self.macro_avg, &self.weighted_avg] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.class, c.precision, c.recall, c.f1_score, c.support
            )?;
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0, 1, 2, 1], &[0, 1, 1, 1]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_perfect_report() {
        let r = ClassificationReport::compute(&[0, 1, 2], &[0, 1, 2], &names());
        assert_eq!(r.accuracy, 1.0);
        assert!(r.classes.iter().all(|c| c.precision == 1.0 && c.recall == 1.0));
        assert_eq!(r.macro_avg.support, 3);
    }

    #[test]
    fn test_per_class_scores() {
        // class 1: predicted 3 times, right twice → precision 2/3
        //          present 2 times, found twice   → recall 1
        let r = ClassificationReport::compute(&[0, 1, 1, 2], &[0, 1, 1, 1], &names());
        let b = &r.classes[1];
        assert!((b.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(b.recall, 1.0);
        assert_eq!(b.support, 2);

        // class 2 never predicted → zeros, not NaN
        let c = &r.classes[2];
        assert_eq!((c.precision, c.recall, c.f1_score), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_weighted_average_uses_support() {
        let r = ClassificationReport::compute(&[0, 0, 0, 1], &[0, 0, 0, 0], &names()[..2].to_vec());
        // recall: class a = 1.0 (support 3), class b = 0.0 (support 1)
        assert!((r.weighted_avg.recall - 0.75).abs() < 1e-12);
        assert!((r.macro_avg.recall - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_display_has_one_line_per_class() {
        let r    = ClassificationReport::compute(&[0, 1, 2], &[0, 1, 2], &names());
        let text = r.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("weighted avg"));
        let class_lines = text
            .lines()
            .filter(|l| matches!(l.split_whitespace().next(), Some("a" | "b" | "c")))
            .count();
        assert_eq!(class_lines, 3);
    }
}
