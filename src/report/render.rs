//! Render the usage-patterns mapping as a markdown report.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::log::{count_of, total_operations};

/// Render the report body.
///
/// The generation date is a parameter so output is deterministic under test;
/// the caller passes today's local date. Entries are listed in mapping order,
/// not sorted.
pub fn render(title: &str, patterns: &Map<String, Value>, date: NaiveDate) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!("Generated: {}\n\n", date.format("%Y-%m-%d")));

    out.push_str("## Summary\n\n");
    out.push_str(&format!(
        "Total operations: {}\n\n",
        total_operations(patterns)
    ));

    out.push_str("## Operations\n");
    for (name, value) in patterns {
        out.push_str(&format!("- **{}**: {}\n", name, count_of(name, value)));
    }

    out
}
