use tracing::info;

use crate::error::Result;
use crate::grid::{parse_grid, CaveId, Graph};
use crate::search::{find_path_with, SearchOptions, SearchOutcome};

/// High-level solve request. Endpoints default to the first and last cave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveRequest {
    pub start: Option<CaveId>,
    pub goal: Option<CaveId>,
    pub options: SearchOptions,
}

impl SolveRequest {
    /// Route between explicit caves.
    pub fn between(start: CaveId, goal: CaveId) -> Self {
        Self {
            start: Some(start),
            goal: Some(goal),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the endpoints against a concrete grid.
    pub fn endpoints(&self, graph: &Graph) -> (CaveId, CaveId) {
        (
            self.start.unwrap_or(1),
            self.goal.unwrap_or_else(|| graph.node_count()),
        )
    }
}

/// Run the request against an already loaded grid.
pub fn solve(graph: &Graph, request: &SolveRequest) -> Result<SearchOutcome> {
    let (start, goal) = request.endpoints(graph);
    let outcome = find_path_with(graph, start, goal, &request.options)?;
    info!(
        caves = graph.node_count(),
        start,
        goal,
        found = outcome.is_found(),
        expanded = outcome.expanded,
        "solved cave grid"
    );
    Ok(outcome)
}

/// Parse raw `.cav` text and solve it in one step.
pub fn solve_str(raw: &str, request: &SolveRequest) -> Result<(Graph, SearchOutcome)> {
    let graph = parse_grid(raw)?;
    let outcome = solve(&graph, request)?;
    Ok((graph, outcome))
}
