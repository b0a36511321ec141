//! Common test utilities and fixture helpers.
//!
//! Provides a builder for `.cav` encodings, access to the checked-in
//! fixture grids, and a brute-force shortest-path oracle used to check A*
//! results on small graphs.

use std::path::PathBuf;

use pathfinder_lib::{parse_grid, CaveId, Graph};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Builder for cave grids in the textual `.cav` encoding.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    positions: Vec<(u32, u32)>,
    matrix: Vec<(CaveId, CaveId)>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cave(mut self, x: u32, y: u32) -> Self {
        self.positions.push((x, y));
        self
    }

    /// Connect two caves in both directions.
    pub fn link(self, a: CaveId, b: CaveId) -> Self {
        self.one_way(a, b).one_way(b, a)
    }

    /// Allow travel from `from` to `to` only.
    pub fn one_way(mut self, from: CaveId, to: CaveId) -> Self {
        self.matrix.push((from, to));
        self
    }

    pub fn encode(&self) -> String {
        let n = self.positions.len();
        let mut cells = vec![0u8; n * n];
        for &(from, to) in &self.matrix {
            cells[(to - 1) * n + (from - 1)] = 1;
        }

        let mut fields = vec![n.to_string()];
        for &(x, y) in &self.positions {
            fields.push(x.to_string());
            fields.push(y.to_string());
        }
        fields.extend(cells.iter().map(u8::to_string));
        fields.join(",")
    }

    pub fn graph(&self) -> Graph {
        parse_grid(&self.encode()).expect("builder produces valid grids")
    }
}

/// Deterministic xorshift generator so generated grids are reproducible.
#[allow(dead_code)]
pub struct Xorshift(u64);

#[allow(dead_code)]
impl Xorshift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Random symmetric grid with `n` caves and roughly `density`% of pairs linked.
#[allow(dead_code)]
pub fn random_grid(seed: u64, n: usize, density: u64) -> GridBuilder {
    let mut rng = Xorshift::new(seed);
    let mut builder = GridBuilder::new();
    for _ in 0..n {
        builder = builder.cave(rng.below(50) as u32, rng.below(50) as u32);
    }
    for a in 1..=n {
        for b in (a + 1)..=n {
            if rng.below(100) < density {
                builder = builder.link(a, b);
            }
        }
    }
    builder
}

/// Shortest Euclidean path cost via Floyd-Warshall, or `None` if unreachable.
#[allow(dead_code)]
pub fn shortest_cost(graph: &Graph, start: CaveId, goal: CaveId) -> Option<f64> {
    let n = graph.node_count();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for from in 1..=n {
        dist[from - 1][from - 1] = 0.0;
        let origin = graph.position(from).expect("cave exists");
        for to in graph.neighbours(from) {
            let target = graph.position(to).expect("cave exists");
            let d = origin.distance_to(&target);
            if d < dist[from - 1][to - 1] {
                dist[from - 1][to - 1] = d;
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    let best = dist[start - 1][goal - 1];
    best.is_finite().then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_encodes_grid_layout() {
        let encoded = GridBuilder::new().cave(0, 0).cave(3, 4).one_way(1, 2).encode();
        assert_eq!(encoded, "2,0,0,3,4,0,0,1,0");
    }

    #[test]
    fn fixtures_dir_exists() {
        assert!(fixtures_dir().join("chain.cav").exists());
    }
}
