use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

/// One-based identifier for a cave, as written in `.cav` and `.csn` files.
pub type CaveId = usize;

/// Cartesian coordinates for a cave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavePosition {
    pub x: f64,
    pub y: f64,
}

impl CavePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Immutable cave graph: positions plus an `N x N` connectivity matrix.
///
/// Matrix entry `(row, col)` set to 1 means cave `col + 1` leads to cave
/// `row + 1`. Travel out of a cave therefore reads its matrix column.
#[derive(Debug, Clone)]
pub struct Graph {
    positions: Arc<[CavePosition]>,
    connections: Arc<[bool]>,
}

impl Graph {
    /// Build a graph from positions and a row-major connectivity matrix.
    pub fn new(positions: Vec<CavePosition>, connections: Vec<bool>) -> Result<Self> {
        let node_count = positions.len();
        if node_count == 0 {
            return Err(Error::malformed("grid must contain at least one cave"));
        }
        if connections.len() != node_count * node_count {
            return Err(Error::malformed(format!(
                "connectivity matrix holds {} entries; cave count {} needs {}",
                connections.len(),
                node_count,
                node_count * node_count
            )));
        }
        Ok(Self {
            positions: positions.into(),
            connections: connections.into(),
        })
    }

    /// Number of caves in the grid.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Position of the cave with the given identifier.
    pub fn position(&self, id: CaveId) -> Option<CavePosition> {
        id.checked_sub(1)
            .and_then(|index| self.positions.get(index))
            .copied()
    }

    /// Whether the grid allows travelling directly from `from` to `to`.
    pub fn is_connected(&self, from: CaveId, to: CaveId) -> bool {
        let n = self.node_count();
        if from == 0 || to == 0 || from > n || to > n {
            return false;
        }
        self.connections[(to - 1) * n + (from - 1)]
    }

    /// Caves reachable in one step from `id`, in ascending identifier order.
    pub fn neighbours(&self, id: CaveId) -> impl Iterator<Item = CaveId> + '_ {
        (1..=self.node_count()).filter(move |&to| self.is_connected(id, to))
    }

    /// Number of set entries in the connectivity matrix.
    pub fn edge_count(&self) -> usize {
        self.connections.iter().filter(|&&set| set).count()
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_grid(s)
    }
}

/// Parse the textual `.cav` encoding into a [`Graph`].
pub fn parse_grid(raw: &str) -> Result<Graph> {
    parse_grid_bytes(raw.as_bytes())
}

/// Parse raw `.cav` bytes into a [`Graph`]. Bytes that are not valid text
/// are rejected like any other stray character.
///
/// The input is scanned twice: once for the leading cave count, then once
/// more into a field buffer sized from that count.
pub fn parse_grid_bytes(raw: &[u8]) -> Result<Graph> {
    let body = strip_line_terminator(raw);
    let node_count = read_node_count(body)?;
    let expected = expected_field_count(node_count, body.len())?;
    let fields = split_fields(body, expected)?;
    let graph = graph_from_fields(node_count, &fields)?;

    debug!(
        caves = graph.node_count(),
        connections = graph.edge_count(),
        bytes = raw.len(),
        "parsed cave grid"
    );
    Ok(graph)
}

/// Total comma-separated fields for `n` caves: the count itself, two
/// coordinates per cave, and the `n * n` matrix.
pub fn field_count_for(node_count: usize) -> Option<usize> {
    node_count
        .checked_mul(node_count)?
        .checked_add(node_count.checked_mul(2)?)?
        .checked_add(1)
}

// Editors commonly append a newline; nothing else besides digits and commas is tolerated.
fn strip_line_terminator(raw: &[u8]) -> &[u8] {
    raw.strip_suffix(b"\r\n")
        .or_else(|| raw.strip_suffix(b"\n"))
        .unwrap_or(raw)
}

fn read_node_count(body: &[u8]) -> Result<usize> {
    let mut value: usize = 0;
    let mut digits = 0usize;

    for (offset, &byte) in body.iter().enumerate() {
        match byte {
            b',' => break,
            b'0'..=b'9' => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(byte - b'0')))
                    .ok_or_else(|| Error::malformed("cave count does not fit in memory"))?;
                digits += 1;
            }
            _ => return Err(unexpected_character(body, offset)),
        }
    }

    if digits == 0 {
        return Err(Error::malformed("missing leading cave count"));
    }
    if value == 0 {
        return Err(Error::malformed("grid must contain at least one cave"));
    }
    Ok(value)
}

fn expected_field_count(node_count: usize, body_len: usize) -> Result<usize> {
    let expected = field_count_for(node_count).ok_or_else(|| {
        Error::malformed(format!("cave count {node_count} is too large"))
    })?;

    // Every field needs at least one digit and all but the last a comma.
    let capacity = body_len / 2 + 1;
    if expected > capacity {
        return Err(Error::malformed(format!(
            "cave count {node_count} needs {expected} fields but the input holds at most {capacity}"
        )));
    }
    Ok(expected)
}

fn split_fields(body: &[u8], expected: usize) -> Result<Vec<u32>> {
    let mut fields = vec![0u32; expected];
    let mut index = 0usize;
    let mut has_digit = false;

    for (offset, &byte) in body.iter().enumerate() {
        match byte {
            b',' => {
                if !has_digit {
                    return Err(Error::malformed(format!("field {} is empty", index + 1)));
                }
                index += 1;
                has_digit = false;
            }
            b'0'..=b'9' => {
                let slot = fields.get_mut(index).ok_or_else(|| {
                    Error::malformed(format!(
                        "found more than the {expected} fields expected"
                    ))
                })?;
                *slot = slot
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u32::from(byte - b'0')))
                    .ok_or_else(|| {
                        Error::malformed(format!("field {} overflows", index + 1))
                    })?;
                has_digit = true;
            }
            _ => return Err(unexpected_character(body, offset)),
        }
    }

    if !has_digit {
        return Err(Error::malformed(format!("field {} is empty", index + 1)));
    }

    let found = index + 1;
    if found != expected {
        return Err(Error::malformed(format!(
            "expected {expected} fields, found {found}"
        )));
    }
    Ok(fields)
}

fn graph_from_fields(node_count: usize, fields: &[u32]) -> Result<Graph> {
    let matrix_start = 1 + 2 * node_count;

    let positions = fields[1..matrix_start]
        .chunks_exact(2)
        .map(|pair| CavePosition::new(f64::from(pair[0]), f64::from(pair[1])))
        .collect();

    let connections = fields[matrix_start..]
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::malformed(format!(
                "connection ({}, {}) must be 0 or 1, found {other}",
                index / node_count + 1,
                index % node_count + 1
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Graph::new(positions, connections)
}

fn unexpected_character(body: &[u8], offset: usize) -> Error {
    let rest = &body[offset..];
    let text = match std::str::from_utf8(rest) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&rest[..err.valid_up_to()]).unwrap_or_default(),
    };
    match text.chars().next() {
        Some(found) => Error::malformed(format!(
            "unexpected character {found:?} at byte {offset}"
        )),
        None => Error::malformed(format!(
            "byte 0x{:02X} at offset {offset} is not valid text",
            rest[0]
        )),
    }
}
