// ============================================================
// Layer 3 — Tabular Input
// ============================================================
// The uniform input handed to the model: rows of f64 values
// with either positional columns (a bare matrix) or named
// columns (a feature map such as {"petal length (cm)": 1.4}).
//
// Invariants enforced at construction:
//   - at least one row and at least one column
//   - every row has the same width
//   - named tables have exactly one name per column, no duplicates
//
// `align_to` is the feature-schema check: it reorders named
// columns into the training order and rejects anything the
// model was not trained on.

use crate::domain::error::PipelineError;

/// How the columns of a table are identified.
#[derive(Debug, Clone, PartialEq)]
pub enum Columns {
    /// Columns are identified by position only.
    Positional(usize),
    /// Columns carry feature names, in the order they appeared in the request.
    Named(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Columns,
    rows:    Vec<Vec<f64>>,
}

impl Table {
    /// Build a positional table from a row matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        let width = check_rectangular(&rows)?;
        Ok(Self { columns: Columns::Positional(width), rows })
    }

    /// Build a named table. `rows` must have one value per name.
    pub fn with_names(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        let width = check_rectangular(&rows)?;
        if names.len() != width {
            return Err(PipelineError::UnsupportedInputFormat(format!(
                "{} column names for {} columns",
                names.len(),
                width
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(PipelineError::UnsupportedInputFormat(format!(
                    "duplicate column '{name}'"
                )));
            }
        }
        Ok(Self { columns: Columns::Named(names), rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        match &self.columns {
            Columns::Positional(width) => *width,
            Columns::Named(names)      => names.len(),
        }
    }

    /// (rows, columns), same convention as a DataFrame
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Return the rows laid out in the order of `feature_names`.
    ///
    /// Positional tables must have exactly one column per feature.
    /// Named tables must name every feature and nothing else; their
    /// columns are reordered to match.
    pub fn align_to(&self, feature_names: &[String]) -> Result<Vec<Vec<f64>>, PipelineError> {
        match &self.columns {
            Columns::Positional(width) => {
                if *width != feature_names.len() {
                    return Err(PipelineError::SchemaMismatch(format!(
                        "input has {} columns, model expects {}",
                        width,
                        feature_names.len()
                    )));
                }
                Ok(self.rows.clone())
            }
            Columns::Named(names) => {
                if let Some(extra) = names.iter().find(|n| !feature_names.contains(n)) {
                    return Err(PipelineError::SchemaMismatch(format!(
                        "unknown feature '{extra}'"
                    )));
                }
                let order = feature_names
                    .iter()
                    .map(|f| {
                        names.iter().position(|n| n == f).ok_or_else(|| {
                            PipelineError::SchemaMismatch(format!("missing feature '{f}'"))
                        })
                    })
                    .collect::<Result<Vec<usize>, _>>()?;

                Ok(self
                    .rows
                    .iter()
                    .map(|row| order.iter().map(|&i| row[i]).collect())
                    .collect())
            }
        }
    }
}

/// Validate that `rows` is a non-empty rectangle and return its width.
fn check_rectangular(rows: &[Vec<f64>]) -> Result<usize, PipelineError> {
    let first = rows
        .first()
        .ok_or_else(|| PipelineError::UnsupportedInputFormat("no rows".into()))?;
    let width = first.len();
    if width == 0 {
        return Err(PipelineError::UnsupportedInputFormat("rows have no columns".into()));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(PipelineError::UnsupportedInputFormat(format!(
            "row {} has {} columns, expected {}",
            i,
            row.len(),
            width
        )));
    }
    Ok(width)
}
