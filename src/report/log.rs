//! Read the evolution log and extract the usage-patterns mapping.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Read and parse the evolution log, returning its usage-patterns mapping.
///
/// A missing or malformed file is an error. A document without the
/// `evolution_metrics.usage_patterns` chain is fine and yields an empty
/// mapping. Key order is the order encountered in the source document.
pub fn load_patterns(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read evolution log: {}", path.display()))?;
    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse evolution log: {}", path.display()))?;
    Ok(extract_patterns(&doc))
}

/// Pull `evolution_metrics.usage_patterns` out of a parsed document.
///
/// Each lookup is explicit so that a document with a genuinely different
/// shape still resolves to "no patterns" at the exact step that is missing,
/// rather than through blanket falsy coercion.
pub fn extract_patterns(doc: &Value) -> Map<String, Value> {
    doc.get("evolution_metrics")
        .and_then(|metrics| metrics.get("usage_patterns"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Invocation count for a single pattern entry.
///
/// The log is appended to by an external process, so a bad entry must not
/// take the whole report down: null counts as zero, and negative or
/// non-integer values are flagged and counted as zero too.
pub fn count_of(name: &str, value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            tracing::warn!("Ignoring non-countable value for {:?}: {}", name, n);
            0
        }),
        other => {
            tracing::warn!("Ignoring non-numeric count for {:?}: {}", name, other);
            0
        }
    }
}

/// Sum of all invocation counts.
pub fn total_operations(patterns: &Map<String, Value>) -> u64 {
    patterns.iter().map(|(name, value)| count_of(name, value)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extract_patterns_preserves_key_order() {
        let doc = json!({
            "evolution_metrics": {
                "usage_patterns": {"build": 3, "deploy": 0, "test": 5}
            }
        });
        let patterns = extract_patterns(&doc);
        let keys: Vec<&String> = patterns.keys().collect();
        assert_eq!(keys, vec!["build", "deploy", "test"]);
        assert_eq!(total_operations(&patterns), 8);
    }

    #[test]
    fn test_extract_patterns_missing_metrics() {
        let doc = json!({"something_else": true});
        assert!(extract_patterns(&doc).is_empty());
    }

    #[test]
    fn test_extract_patterns_missing_patterns() {
        let doc = json!({"evolution_metrics": {"generation": 7}});
        assert!(extract_patterns(&doc).is_empty());
    }

    #[test]
    fn test_extract_patterns_non_object_patterns() {
        let doc = json!({"evolution_metrics": {"usage_patterns": [1, 2, 3]}});
        assert!(extract_patterns(&doc).is_empty());
    }

    #[test]
    fn test_count_of_null_is_zero() {
        let doc = json!({"evolution_metrics": {"usage_patterns": {"x": null}}});
        let patterns = extract_patterns(&doc);
        assert_eq!(total_operations(&patterns), 0);
    }

    #[test]
    fn test_count_of_negative_is_zero() {
        assert_eq!(count_of("rollback", &json!(-4)), 0);
    }

    #[test]
    fn test_count_of_non_numeric_is_zero() {
        assert_eq!(count_of("build", &json!("often")), 0);
        assert_eq!(count_of("build", &json!(2.5)), 0);
    }

    #[test]
    fn test_total_mixed_entries() {
        let doc = json!({
            "evolution_metrics": {
                "usage_patterns": {"a": 2, "b": null, "c": -1, "d": 3}
            }
        });
        assert_eq!(total_operations(&extract_patterns(&doc)), 5);
    }
}
