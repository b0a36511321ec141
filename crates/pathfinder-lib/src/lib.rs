//! Cave pathfinder library entry points.
//!
//! This crate parses the comma-separated `.cav` cave grid encoding into an
//! immutable [`Graph`] and runs A* search between two caves, reporting the
//! route as space-separated cave ids (or `0` when unreachable). The CLI
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod files;
pub mod grid;
pub mod output;
pub mod routing;
pub mod search;

pub use error::{Error, Result};
pub use files::{load_grid, write_solution, GridPaths};
pub use grid::{parse_grid, parse_grid_bytes, CaveId, CavePosition, Graph};
pub use output::{render_solution, CavePath, SolutionSummary, NO_PATH};
pub use routing::{solve, solve_str, SolveRequest};
pub use search::{find_path, find_path_with, SearchOptions, SearchOutcome};
