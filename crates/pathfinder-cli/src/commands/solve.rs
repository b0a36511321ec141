//! Solve command handler: read `NAME.cav`, search, write `NAME.csn`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pathfinder_lib::{
    load_grid, solve, write_solution, CaveId, GridPaths, SearchOptions, SolutionSummary,
    SolveRequest,
};

use crate::output::OutputFormat;

/// Arguments for the solve command.
#[derive(Debug, Clone, Args)]
pub struct SolveCommandArgs {
    /// Grid name; reads NAME.cav and writes NAME.csn.
    pub name: PathBuf,
    /// Write the solution here instead of NAME.csn.
    #[arg(long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,
    /// Print the solution to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
    /// Starting cave (defaults to the first cave).
    #[arg(long)]
    pub start: Option<CaveId>,
    /// Goal cave (defaults to the last cave).
    #[arg(long)]
    pub goal: Option<CaveId>,
    /// Abort after expanding this many caves.
    #[arg(long)]
    pub max_expansions: Option<usize>,
    /// Solution format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SolveCommandArgs {
    /// Input and output paths after applying `--output`.
    pub fn paths(&self) -> GridPaths {
        let paths = GridPaths::from_name(&self.name);
        match &self.output {
            Some(output) => paths.with_solution(output.clone()),
            None => paths,
        }
    }

    /// Convert CLI args to a library [`SolveRequest`].
    pub fn to_request(&self) -> SolveRequest {
        let options = SearchOptions {
            max_expansions: self.max_expansions,
        };
        SolveRequest {
            start: self.start,
            goal: self.goal,
            ..SolveRequest::default()
        }
        .with_options(options)
    }
}

/// Load, solve and render without touching the output destination.
pub fn render_solution(args: &SolveCommandArgs) -> Result<String> {
    let paths = args.paths();
    let graph = load_grid(&paths.grid)
        .with_context(|| format!("failed to load cave grid from {}", paths.grid.display()))?;

    let outcome = solve(&graph, &args.to_request())
        .with_context(|| format!("failed to solve {}", paths.grid.display()))?;

    let summary = SolutionSummary::from_outcome(&graph, &outcome);
    args.format.render(&summary)
}

/// Handle the solve command.
///
/// A grid without a path is a successful run that writes `0`.
pub fn handle_solve(args: &SolveCommandArgs) -> Result<()> {
    let rendered = render_solution(args)?;

    if args.stdout {
        println!("{rendered}");
        return Ok(());
    }

    let destination = args.paths().solution;
    write_solution(&destination, &rendered)
        .with_context(|| format!("failed to write solution to {}", destination.display()))?;
    info!(path = %destination.display(), "solution written");
    Ok(())
}
