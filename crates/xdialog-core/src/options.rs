// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Option normalization for select dialogs.
//
// Malformed entries are dropped one at a time; they never abort the list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::SelectOption;

/// A select entry as loosely supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOption {
    pub label: Option<String>,
    pub value: Option<String>,
}

impl RawOption {
    pub fn new(label: Option<&str>, value: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_owned),
            value: value.map(str::to_owned),
        }
    }

    /// Read `label`/`value` from an arbitrary JSON value. Non-string fields
    /// and non-object entries count as missing.
    pub fn from_json(entry: &Value) -> Self {
        let field = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            label: field("label"),
            value: field("value"),
        }
    }
}

/// Drop entries missing a label or value, preserving order of the rest.
pub fn normalize(raw: impl IntoIterator<Item = RawOption>) -> Vec<SelectOption> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match (entry.label, entry.value) {
            (Some(label), Some(value)) => Some(SelectOption { label, value }),
            _ => {
                tracing::warn!(index, "dropping select option without label or value");
                None
            }
        })
        .collect()
}

/// Deduplicate a preselection list, keeping first occurrences in order.
///
/// Values that match no option are kept; they just never render as checked.
pub fn normalize_selection(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in raw {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Whether `value` is one of the offered options.
pub fn is_offered(options: &[SelectOption], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_missing_value_are_dropped() {
        let raw = [json!({"label": "A"}), json!({"label": "B", "value": "b"})];
        let options = normalize(raw.iter().map(RawOption::from_json));
        assert_eq!(options, vec![SelectOption::new("B", "b")]);
        assert!(!is_offered(&options, "A"));
    }

    #[test]
    fn order_is_preserved() {
        let options = normalize([
            RawOption::new(Some("One"), Some("1")),
            RawOption::new(None, Some("x")),
            RawOption::new(Some("Two"), Some("2")),
            RawOption::new(Some("Three"), Some("3")),
        ]);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["1", "2", "3"]);
    }

    #[test]
    fn non_string_fields_count_as_missing() {
        let raw = [json!({"label": "N", "value": 7}), json!("plain"), json!(null)];
        assert!(normalize(raw.iter().map(RawOption::from_json)).is_empty());
    }

    #[test]
    fn duplicate_values_survive_normalization() {
        let options = normalize([
            RawOption::new(Some("First"), Some("dup")),
            RawOption::new(Some("Second"), Some("dup")),
        ]);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn selection_is_deduplicated_in_order() {
        let selection =
            normalize_selection(["b", "a", "b", "zz"].into_iter().map(String::from));
        assert_eq!(selection, ["b", "a", "zz"]);
    }
}
