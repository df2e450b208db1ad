//! Machine-readable dump of a suite outcome, for CI dashboards.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::SuiteOutcome;

pub fn write_json_report(outcome: &SuiteOutcome, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize outcome")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}
