//! CLI output formatting.
//!
//! Headless runs report a single JSON document on stdout so they can be
//! piped into other tools.

use serde::{Deserialize, Serialize};

use crate::engine::sorter::{Algorithm, Direction};
use crate::error::{SortError, SortResult};

/// Result of a headless sort run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Requested order.
    pub direction: Direction,
    /// Number of elements.
    pub length: usize,
    /// Seed the sequence was generated from.
    pub seed: u64,
    /// Visible steps until `Done`.
    pub steps: u64,
    /// Whether the final sequence is ordered in `direction`.
    pub sorted: bool,
    /// Final sequence.
    pub sequence: Vec<i64>,
}

impl RunSummary {
    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> SortResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SortError::serialization(e.to_string()))
    }
}

/// Print a run summary to stdout.
///
/// # Errors
///
/// Returns `Serialization` if encoding fails.
pub fn print_summary(summary: &RunSummary) -> SortResult<()> {
    println!("{}", summary.to_json()?);
    Ok(())
}
