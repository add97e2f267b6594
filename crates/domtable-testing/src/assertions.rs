//! Custom assertions for domtable output.
//!
//! Provides high-level assertions over the `list --output json` document:
//! - Row count and order validation
//! - Cell lookup by VM and column name
//! - Error message checks on stderr

use anyhow::{Context, Result};
use predicates::prelude::*;
use serde_json::Value;

use crate::world::CliResult;

fn rows(json: &Value) -> Result<&Vec<Value>> {
    json["rows"]
        .as_array()
        .context("Expected 'rows' array in JSON")
}

/// VM names of the listed rows, in order.
pub fn row_names(json: &Value) -> Result<Vec<String>> {
    rows(json)?
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row["vm"]
                .as_str()
                .map(String::from)
                .with_context(|| format!("Row {} missing 'vm'", i))
        })
        .collect()
}

/// Assert that JSON output contains the expected number of rows.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let count = rows(json)?.len();
    if count != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, count);
    }
    Ok(())
}

/// Assert that exactly these VMs are listed, in this order.
pub fn assert_row_names(json: &Value, expected: &[&str]) -> Result<()> {
    let names = row_names(json)?;
    if names != expected {
        anyhow::bail!("Expected rows {:?}, got {:?}", expected, names);
    }
    Ok(())
}

/// Column names of the document, in display order.
pub fn column_names(json: &Value) -> Result<Vec<String>> {
    json["columns"]
        .as_array()
        .context("Expected 'columns' array in JSON")?
        .iter()
        .map(|column| {
            column["name"]
                .as_str()
                .map(String::from)
                .context("Column missing 'name'")
        })
        .collect()
}

/// Raw cell value for `vm` in `column`.
pub fn cell(json: &Value, vm: &str, column: &str) -> Result<String> {
    let index = column_names(json)?
        .iter()
        .position(|name| name == column)
        .with_context(|| format!("Column {} not in output", column))?;

    let row = rows(json)?
        .iter()
        .find(|row| row["vm"] == vm)
        .with_context(|| format!("VM {} not in output", vm))?;

    row["cells"][index]
        .as_str()
        .map(String::from)
        .with_context(|| format!("Row {} has no cell {}", vm, index))
}

/// Assert the command failed with exit code 1 and `Error: ...` mentioning `needle`.
pub fn assert_failed_with(result: &CliResult, needle: &str) -> Result<()> {
    if result.code() != Some(1) {
        anyhow::bail!(
            "Expected exit code 1, got {:?}\nstderr: {}",
            result.code(),
            result.stderr()
        );
    }

    let predicate = predicate::str::contains("Error:").and(predicate::str::contains(needle));
    if !predicate.eval(result.stderr()) {
        anyhow::bail!(
            "Expected stderr to contain 'Error:' and {:?}, got:\n{}",
            needle,
            result.stderr()
        );
    }
    Ok(())
}
