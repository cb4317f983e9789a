//! Usage report generation - evolution log JSON in, markdown out.
//!
//! The evolution log is owned and appended to by an external process; this
//! module only reads it. A missing `evolution_metrics.usage_patterns` chain
//! is an empty report, not an error. A missing or malformed file is fatal.

pub mod log;
pub mod render;

pub use log::{count_of, extract_patterns, load_patterns, total_operations};
pub use render::render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Generate the usage report: read `input`, render, overwrite `output`.
///
/// Rendering completes before the output file is opened, so a read or parse
/// failure never leaves a corrupt report behind.
pub fn generate(title: &str, input: &Path, output: &Path) -> Result<()> {
    let patterns = log::load_patterns(input)?;
    let markdown = render::render(title, &patterns, chrono::Local::now().date_naive());

    fs::write(output, &markdown)
        .with_context(|| format!("Failed to write usage report: {}", output.display()))?;

    println!("Usage report written to {}", output.display());
    Ok(())
}
