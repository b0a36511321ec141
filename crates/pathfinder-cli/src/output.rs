//! Output formatting for solved cave grids.

use anyhow::{Context, Result};
use clap::ValueEnum;

use pathfinder_lib::SolutionSummary;

/// Presentation of the solution written to the `.csn` file or stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bare space-separated cave ids, or `0` when no path exists.
    #[default]
    Text,
    /// Serialised summary including cost and expansion counts.
    Json,
}

impl OutputFormat {
    pub fn render(self, summary: &SolutionSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.solution.clone()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).context("failed to serialise solution")
            }
        }
    }
}
