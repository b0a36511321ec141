use std::fmt;

use serde::Serialize;

use crate::grid::{CaveId, Graph};
use crate::search::SearchOutcome;

/// Solution text written when no path connects the requested caves.
pub const NO_PATH: &str = "0";

/// Ordered caves from start to goal inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CavePath(Vec<CaveId>);

impl CavePath {
    pub fn new(ids: Vec<CaveId>) -> Self {
        Self(ids)
    }

    pub fn ids(&self) -> &[CaveId] {
        &self.0
    }

    /// Number of edges walked.
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Total Euclidean length of the walk, or `None` if any consecutive
    /// pair is not connected in `graph`.
    pub fn length_in(&self, graph: &Graph) -> Option<f64> {
        self.0.windows(2).try_fold(0.0, |total, pair| {
            if !graph.is_connected(pair[0], pair[1]) {
                return None;
            }
            let from = graph.position(pair[0])?;
            let to = graph.position(pair[1])?;
            Some(total + from.distance_to(&to))
        })
    }
}

impl fmt::Display for CavePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = self.0.iter();
        if let Some(first) = ids.next() {
            write!(f, "{first}")?;
            for id in ids {
                write!(f, " {id}")?;
            }
        }
        Ok(())
    }
}

/// Render a path as space-separated ids, or [`NO_PATH`] when absent.
pub fn render_solution(path: Option<&CavePath>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => NO_PATH.to_string(),
    }
}

/// Structured representation of a search result that consumers can serialise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionSummary {
    pub caves: usize,
    pub start: CaveId,
    pub goal: CaveId,
    pub found: bool,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub expanded: usize,
    pub path: Vec<CaveId>,
    pub solution: String,
}

impl SolutionSummary {
    pub fn from_outcome(graph: &Graph, outcome: &SearchOutcome) -> Self {
        let path = outcome
            .path
            .as_ref()
            .map(|path| path.ids().to_vec())
            .unwrap_or_default();
        Self {
            caves: graph.node_count(),
            start: outcome.start,
            goal: outcome.goal,
            found: outcome.is_found(),
            hops: outcome.path.as_ref().map_or(0, CavePath::hop_count),
            cost: outcome.cost,
            expanded: outcome.expanded,
            path,
            solution: outcome.solution(),
        }
    }
}
