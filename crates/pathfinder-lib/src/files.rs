use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{parse_grid_bytes, Graph};

/// Extension of cave grid input files.
pub const GRID_EXTENSION: &str = "cav";
/// Extension of solution output files.
pub const SOLUTION_EXTENSION: &str = "csn";

/// Input and output locations derived from a grid name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPaths {
    pub grid: PathBuf,
    pub solution: PathBuf,
}

impl GridPaths {
    /// Resolve `name` to `name.cav` / `name.csn`.
    ///
    /// A name already ending in `.cav` is used as-is for input. Other
    /// extensions are kept, so `maps/level.2` becomes `maps/level.2.cav`.
    pub fn from_name(name: impl AsRef<Path>) -> Self {
        let name = name.as_ref();
        if name.extension().is_some_and(|ext| ext == GRID_EXTENSION) {
            return Self {
                grid: name.to_path_buf(),
                solution: name.with_extension(SOLUTION_EXTENSION),
            };
        }
        Self {
            grid: append_extension(name, GRID_EXTENSION),
            solution: append_extension(name, SOLUTION_EXTENSION),
        }
    }

    pub fn with_solution(mut self, solution: impl Into<PathBuf>) -> Self {
        self.solution = solution.into();
        self
    }
}

fn append_extension(name: &Path, extension: &str) -> PathBuf {
    let mut raw: OsString = name.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

/// Read and parse a cave grid file.
pub fn load_grid(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::GridNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read(path)?;
    debug!(path = %path.display(), bytes = raw.len(), "read cave grid");
    parse_grid_bytes(&raw)
}

/// Write solution text without a trailing newline.
pub fn write_solution(path: &Path, solution: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, solution)?;
    debug!(path = %path.display(), "wrote solution");
    Ok(())
}
