//! Local CSV preflight against the model's required features.
//!
//! Catches missing biomarker columns before the upload round-trip so the
//! user sees the column names instead of a generic server error.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read the header row of a CSV file.
pub fn read_header_columns(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    header_columns_from_reader(file)
        .with_context(|| format!("could not read CSV header from {}", path.display()))
}

fn header_columns_from_reader(reader: impl Read) -> Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

/// Extract feature names from the required-features response.
///
/// The backend has answered with `{"features": [...]}`,
/// `{"required_features": [...]}`, and a bare array across versions; the
/// entries are either plain strings or objects with a `feature`/`name` key.
#[must_use]
pub fn required_feature_names(value: &Value) -> Vec<String> {
    let list = value
        .get("features")
        .or_else(|| value.get("required_features"))
        .unwrap_or(value);
    match list {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name.clone()),
                Value::Object(fields) => fields
                    .get("feature")
                    .or_else(|| fields.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Required features absent from the file's header, in required order.
#[must_use]
pub fn missing_features(header: &[String], required: &[String]) -> Vec<String> {
    let present: HashSet<&str> = header.iter().map(String::as_str).collect();
    required
        .iter()
        .filter(|feature| !present.contains(feature.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_header_columns_trim_whitespace() {
        let csv = "seq_1, seq_2 ,seq_3\n0.1,0.2,0.3\n";
        let columns = header_columns_from_reader(csv.as_bytes()).expect("parse header");
        assert_eq!(columns, strings(&["seq_1", "seq_2", "seq_3"]));
    }

    #[test]
    fn test_required_names_from_features_object() {
        let value = json!({"features": ["seq_1", "seq_2"], "count": 2});
        assert_eq!(required_feature_names(&value), strings(&["seq_1", "seq_2"]));
    }

    #[test]
    fn test_required_names_from_bare_array_of_objects() {
        let value = json!([
            {"feature": "seq_1", "importance": 0.5},
            {"name": "seq_2"},
            42
        ]);
        assert_eq!(required_feature_names(&value), strings(&["seq_1", "seq_2"]));
    }

    #[test]
    fn test_required_names_from_unexpected_shape_is_empty() {
        assert!(required_feature_names(&json!({"message": "ok"})).is_empty());
    }

    #[test]
    fn test_missing_features_preserves_required_order() {
        let header = strings(&["seq_2", "patient_id"]);
        let required = strings(&["seq_1", "seq_2", "seq_3"]);
        assert_eq!(
            missing_features(&header, &required),
            strings(&["seq_1", "seq_3"])
        );
    }

    #[test]
    fn test_no_missing_features() {
        let header = strings(&["seq_1", "seq_2"]);
        let required = strings(&["seq_1", "seq_2"]);
        assert!(missing_features(&header, &required).is_empty());
    }
}
