use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::grid::{CaveId, CavePosition, Graph};
use crate::output::CavePath;

/// Tuning knobs for a single search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Abort once this many caves have been moved to the closed set.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// Result of one A* run between two caves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub start: CaveId,
    pub goal: CaveId,
    /// Caves from start to goal inclusive, or `None` when unreachable.
    pub path: Option<CavePath>,
    /// Sum of Euclidean edge lengths along `path`.
    pub cost: Option<f64>,
    /// Number of caves moved to the closed set.
    pub expanded: usize,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Text written to a `.csn` file: the path ids, or `0` when unreachable.
    pub fn solution(&self) -> String {
        crate::output::render_solution(self.path.as_ref())
    }
}

/// Find the shortest path between two caves without an expansion bound.
pub fn find_path(graph: &Graph, start: CaveId, goal: CaveId) -> Result<SearchOutcome> {
    find_path_with(graph, start, goal, &SearchOptions::default())
}

/// Run A* between `start` and `goal` using Euclidean distance for both edge
/// cost and heuristic.
///
/// Among open caves sharing the lowest f-cost, the lowest identifier is
/// expanded first. Closed caves are never reopened.
pub fn find_path_with(
    graph: &Graph,
    start: CaveId,
    goal: CaveId,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    let node_count = graph.node_count();
    check_id(start, node_count)?;
    check_id(goal, node_count)?;

    let mut nodes = SearchNode::arena(graph, goal);
    let start_index = start - 1;
    let goal_position = nodes[goal - 1].position;

    let start_node = &mut nodes[start_index];
    start_node.g_cost = 0.0;
    start_node.h_cost = start_node.position.distance_to(&goal_position);
    start_node.update_f_cost();
    start_node.status = NodeStatus::Open;

    let mut open = BinaryHeap::new();
    open.push(OpenEntry::new(start_index, start_node.f_cost));
    let mut expanded = 0usize;

    while let Some(entry) = open.pop() {
        let current = entry.index;
        let node = &nodes[current];
        if node.status != NodeStatus::Open || entry.f_cost != FloatOrd(node.f_cost) {
            continue;
        }

        if node.is_goal {
            let cost = node.g_cost;
            let path = reconstruct_path(&nodes, current);
            debug!(start, goal, hops = path.hop_count(), cost, expanded, "path found");
            return Ok(SearchOutcome {
                start,
                goal,
                path: Some(path),
                cost: Some(cost),
                expanded,
            });
        }

        if let Some(limit) = options.max_expansions {
            if expanded >= limit {
                return Err(Error::SearchLimitExceeded { limit });
            }
        }

        nodes[current].status = NodeStatus::Closed;
        expanded += 1;
        let current_g = nodes[current].g_cost;
        let current_position = nodes[current].position;
        trace!(cave = current + 1, g_cost = current_g, "expanding cave");

        for neighbour in graph.neighbours(current + 1) {
            let index = neighbour - 1;
            let next = &mut nodes[index];
            if next.status == NodeStatus::Closed {
                continue;
            }

            let tentative_g = current_g + current_position.distance_to(&next.position);
            if tentative_g < next.g_cost {
                next.g_cost = tentative_g;
                next.h_cost = next.position.distance_to(&goal_position);
                next.update_f_cost();
                next.parent = Some(current);
                next.status = NodeStatus::Open;
                open.push(OpenEntry::new(index, next.f_cost));
            }
        }
    }

    debug!(start, goal, expanded, "no path between caves");
    Ok(SearchOutcome {
        start,
        goal,
        path: None,
        cost: None,
        expanded,
    })
}

fn check_id(id: CaveId, node_count: usize) -> Result<()> {
    if id == 0 || id > node_count {
        return Err(Error::InvalidNodeId { id, node_count });
    }
    Ok(())
}

fn reconstruct_path(nodes: &[SearchNode], goal_index: usize) -> CavePath {
    let mut ids = Vec::new();
    let mut current = Some(goal_index);
    while let Some(index) = current {
        ids.push(nodes[index].id);
        current = nodes[index].parent;
    }
    ids.reverse();
    CavePath::new(ids)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeStatus {
    Unvisited,
    Open,
    Closed,
}

/// Per-run bookkeeping for one cave. Parents are arena indices.
#[derive(Debug, Clone)]
struct SearchNode {
    id: CaveId,
    position: CavePosition,
    g_cost: f64,
    h_cost: f64,
    f_cost: f64,
    is_goal: bool,
    parent: Option<usize>,
    status: NodeStatus,
}

impl SearchNode {
    fn arena(graph: &Graph, goal: CaveId) -> Vec<SearchNode> {
        (1..=graph.node_count())
            .filter_map(|id| {
                graph.position(id).map(|position| SearchNode {
                    id,
                    position,
                    g_cost: f64::INFINITY,
                    h_cost: 0.0,
                    f_cost: f64::INFINITY,
                    is_goal: id == goal,
                    parent: None,
                    status: NodeStatus::Unvisited,
                })
            })
            .collect()
    }

    fn update_f_cost(&mut self) {
        self.f_cost = self.g_cost + self.h_cost;
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    index: usize,
    f_cost: FloatOrd,
}

impl OpenEntry {
    fn new(index: usize, f_cost: f64) -> Self {
        Self {
            index,
            f_cost: FloatOrd(f_cost),
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the lowest f-cost, then lowest index.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
