// ============================================================
// Layer 4 — Request Payload Decoder
// ============================================================
// Turns a raw request body into a Table.
//
// Accepted content types (compared on the MIME essence, so
// "application/json; charset=utf-8" is still JSON):
//
//   application/json
//     {"instances": [[...], ...]}   → row matrix
//     {"data":      [[...], ...]}   → row matrix
//     {"feature": value, ...}       → one row of named features
//     [[...], ...]                  → row matrix
//   Row matrices may also be lists of feature maps
//   ([{"a": 1.0}, {"a": 2.0}]), which keeps the column names.
//
//   text/csv
//     comma-separated numeric rows, no header, blank lines skipped
//
// Anything else is rejected; there is no silent default.

use serde_json::{Map, Value};

use crate::domain::error::PipelineError;
use crate::domain::table::Table;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_CSV:         &str = "text/csv";

/// Lowercased MIME type without parameters: "Text/CSV; header=absent" → "text/csv"
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Decode `body` according to `content_type`.
pub fn parse_request(body: &[u8], content_type: &str) -> Result<Table, PipelineError> {
    match mime_essence(content_type).as_str() {
        APPLICATION_JSON => parse_json(body),
        TEXT_CSV         => parse_csv(body),
        _ => Err(PipelineError::UnsupportedContentType(content_type.to_string())),
    }
}

fn parse_json(body: &[u8]) -> Result<Table, PipelineError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PipelineError::MalformedBody(e.to_string()))?;

    match value {
        Value::Object(mut obj) => {
            if let Some(rows) = obj.remove("instances") {
                table_from_matrix(&rows)
            } else if let Some(rows) = obj.remove("data") {
                table_from_matrix(&rows)
            } else {
                let (names, row) = named_row(&obj)?;
                Table::with_names(names, vec![row])
            }
        }
        Value::Array(_) => table_from_matrix(&value),
        other => Err(PipelineError::UnsupportedInputFormat(format!(
            "expected a JSON object or array, got {}",
            json_kind(&other)
        ))),
    }
}

fn parse_csv(body: &[u8]) -> Result<Table, PipelineError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| PipelineError::MalformedBody(e.to_string()))?;

    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(lineno, line)| {
            line.split(',')
                .map(|cell| {
                    cell.trim().parse::<f64>().map_err(|_| {
                        PipelineError::MalformedBody(format!(
                            "line {}: '{}' is not a number",
                            lineno + 1,
                            cell.trim()
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Table::from_rows(rows)
}

/// A JSON array of rows, where every row is either an array of
/// numbers or an object of named numbers.
fn table_from_matrix(value: &Value) -> Result<Table, PipelineError> {
    let Value::Array(items) = value else {
        return Err(PipelineError::UnsupportedInputFormat(format!(
            "expected a list of rows, got {}",
            json_kind(value)
        )));
    };

    let objects: Vec<&Map<String, Value>> = items.iter().filter_map(Value::as_object).collect();
    if !items.is_empty() && objects.len() == items.len() {
        let (names, first) = named_row(objects[0])?;
        let mut rows = vec![first];
        for (i, obj) in objects.iter().enumerate().skip(1) {
            if obj.len() != names.len() {
                return Err(PipelineError::UnsupportedInputFormat(format!(
                    "row {i} has {} features, row 0 has {}",
                    obj.len(),
                    names.len()
                )));
            }
            let row = names
                .iter()
                .map(|name| match obj.get(name) {
                    Some(value) => number(value, i),
                    None => Err(PipelineError::UnsupportedInputFormat(format!(
                        "row {i} is missing feature '{name}'"
                    ))),
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(row);
        }
        return Table::with_names(names, rows);
    }

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Array(cells) => cells.iter().map(|c| number(c, i)).collect::<Result<Vec<f64>, _>>(),
            other => Err(PipelineError::UnsupportedInputFormat(format!(
                "row {i} is {}, expected a list of numbers",
                json_kind(other)
            ))),
        })
        .collect::<Result<Vec<Vec<f64>>, _>>()?;

    Table::from_rows(rows)
}

/// Flatten a feature map into (names, values). serde_json's default
/// map is ordered by key; the schema check reorders columns later.
fn named_row(obj: &Map<String, Value>) -> Result<(Vec<String>, Vec<f64>), PipelineError> {
    let mut names  = Vec::with_capacity(obj.len());
    let mut values = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        names.push(key.clone());
        values.push(number(value, 0)?);
    }
    Ok((names, values))
}

fn number(value: &Value, row: usize) -> Result<f64, PipelineError> {
    value.as_f64().ok_or_else(|| {
        PipelineError::UnsupportedInputFormat(format!(
            "row {row}: expected a number, got {}",
            json_kind(value)
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    }
}
