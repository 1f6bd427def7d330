//! Sparse undirected simple graph with stable external vertex labels.
//!
//! The graph is stored as one sorted neighbor array per vertex, which keeps
//! memory proportional to the edge count and makes membership tests a binary
//! search. Vertices are dense indices `[0, n)`; every vertex additionally
//! carries a *label*, the index it had in the originally constructed graph.
//! Labels survive [`Graph::induced`] and [`Graph::remove_vertices`], so
//! per-vertex data computed on an earlier snapshot (coreness, most
//! importantly) can still be looked up after the graph has been cut down.

use rand::Rng;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Error produced while loading an edge-list file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A line did not contain exactly two comma-separated fields.
    #[error("line {line}: expected `u,v`, got {text:?}")]
    Malformed {
        /// 1-based line number in the input.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// An endpoint field was not a positive integer.
    #[error("line {line}: {text:?} is not a positive vertex id")]
    BadVertex {
        /// 1-based line number in the input.
        line: usize,
        /// The offending field.
        text: String,
    },
}

// ============================================================================
// Graph
// ============================================================================

/// An undirected simple graph over vertex indices `[0, n)`.
#[derive(Clone, Debug)]
pub struct Graph {
    /// Sorted, deduplicated neighbor list per vertex.
    adj: Vec<Vec<u32>>,
    /// External identity of each vertex (index in the originally built graph).
    labels: Vec<u32>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph with `n` vertices from an undirected edge list.
    ///
    /// Self-loops are dropped and parallel edges collapse into one. Labels
    /// are initialized to the vertex indices themselves.
    ///
    /// # Panics
    /// Panics if an endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(u32, u32)]) -> Self {
        let mut adj: Vec<Vec<u32>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            assert!(
                (u as usize) < n && (v as usize) < n,
                "edge ({u},{v}) out of range"
            );
            if u == v {
                continue;
            }
            adj[u as usize].push(v);
            adj[v as usize].push(u);
        }
        let mut edge_count = 0;
        for row in &mut adj {
            row.sort_unstable();
            row.dedup();
            edge_count += row.len();
        }
        Self {
            adj,
            labels: (0..n as u32).collect(),
            edge_count: edge_count / 2,
        }
    }

    /// Samples an Erdős–Rényi graph `G(n, p)`.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut edges = Vec::new();
        for i in 0..n as u32 {
            for j in (i + 1)..n as u32 {
                if rng.random_bool(p) {
                    edges.push((i, j));
                }
            }
        }
        Self::from_edges(n, &edges)
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Degree of vertex `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Sorted neighbor indices of vertex `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[u32] {
        &self.adj[v]
    }

    /// External label of vertex `v`.
    #[inline]
    pub fn label(&self, v: usize) -> u32 {
        self.labels[v]
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].binary_search(&(v as u32)).is_ok()
    }

    /// Returns a vertex of maximum degree, or `None` for the empty graph.
    pub fn max_degree_vertex(&self) -> Option<usize> {
        (0..self.vertex_count()).max_by_key(|&v| self.degree(v))
    }

    /// Builds the subgraph induced by `verts`, keeping each retained vertex's
    /// external label. `verts` must not contain duplicates.
    ///
    /// # Panics
    /// Panics if a vertex index is out of range.
    pub fn induced(&self, verts: &[usize]) -> Self {
        const ABSENT: u32 = u32::MAX;
        let mut index_of = vec![ABSENT; self.vertex_count()];
        for (new, &old) in verts.iter().enumerate() {
            debug_assert_eq!(index_of[old], ABSENT, "duplicate vertex {old}");
            index_of[old] = new as u32;
        }

        let mut adj: Vec<Vec<u32>> = Vec::with_capacity(verts.len());
        let mut labels = Vec::with_capacity(verts.len());
        let mut edge_count = 0;
        for &old in verts {
            let mut row: Vec<u32> = self.adj[old]
                .iter()
                .filter_map(|&w| {
                    let mapped = index_of[w as usize];
                    (mapped != ABSENT).then_some(mapped)
                })
                .collect();
            edge_count += row.len();
            row.sort_unstable();
            adj.push(row);
            labels.push(self.labels[old]);
        }
        Self {
            adj,
            labels,
            edge_count: edge_count / 2,
        }
    }

    /// Removes the given vertices and their incident edges, compacting the
    /// remaining vertices to a dense index range. Labels are preserved.
    pub fn remove_vertices(&mut self, remove: &[usize]) {
        if remove.is_empty() {
            return;
        }
        let mut drop = vec![false; self.vertex_count()];
        for &v in remove {
            drop[v] = true;
        }
        let keep: Vec<usize> = (0..self.vertex_count()).filter(|&v| !drop[v]).collect();
        *self = self.induced(&keep);
    }
}

// ============================================================================
// Edge-list loading
// ============================================================================

/// Loads a graph from a plain-text edge list file.
///
/// See [`parse_edge_list`] for the accepted format.
///
/// # Errors
/// Returns [`LoadError`] on I/O failure or malformed input.
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<Graph, LoadError> {
    parse_edge_list(File::open(path)?)
}

/// Parses an edge list: one undirected edge per line as `u,v`, endpoints
/// 1-indexed in an arbitrary (possibly sparse) id space. Duplicate edges and
/// self-loops are dropped, and ids are reindexed to a dense `[0, n)` range in
/// ascending id order. Blank lines are ignored.
///
/// # Errors
/// Returns [`LoadError`] on I/O failure or malformed input.
pub fn parse_edge_list<R: Read>(reader: R) -> Result<Graph, LoadError> {
    let mut raw_edges: Vec<(u64, u64)> = Vec::new();
    let mut ids: Vec<u64> = Vec::new();

    for (lineno, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let mut fields = text.split(',');
        let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(LoadError::Malformed {
                line: lineno + 1,
                text: text.to_string(),
            });
        };
        let parse = |field: &str| -> Result<u64, LoadError> {
            match field.trim().parse::<u64>() {
                Ok(id) if id >= 1 => Ok(id - 1),
                _ => Err(LoadError::BadVertex {
                    line: lineno + 1,
                    text: field.trim().to_string(),
                }),
            }
        };
        let u = parse(a)?;
        let v = parse(b)?;
        raw_edges.push((u, v));
        ids.push(u);
        ids.push(v);
    }

    ids.sort_unstable();
    ids.dedup();
    let dense: HashMap<u64, u32> = ids
        .iter()
        .enumerate()
        .map(|(new, &old)| (old, new as u32))
        .collect();

    let edges: Vec<(u32, u32)> = raw_edges
        .iter()
        .map(|&(u, v)| (dense[&u], dense[&v]))
        .collect();
    Ok(Graph::from_edges(ids.len(), &edges))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn from_edges_deduplicates_and_drops_self_loops() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 0), (0, 1), (2, 2), (2, 3)]);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(2), 1);
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(2, 2));
    }

    #[test]
    fn neighbors_are_sorted() {
        let g = Graph::from_edges(5, &[(3, 0), (3, 4), (3, 1)]);
        assert_eq!(g.neighbors(3), &[0, 1, 4]);
    }

    #[test]
    fn induced_preserves_labels_and_edges() {
        // Triangle 0-1-2 plus pendant 2-3.
        let g = Graph::from_edges(4, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
        let sub = g.induced(&[1, 2, 3]);
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.edge_count(), 2); // 1-2 and 2-3 survive
        let labels: Vec<u32> = (0..3).map(|v| sub.label(v)).collect();
        assert_eq!(labels, vec![1, 2, 3]);
    }

    #[test]
    fn induced_of_induced_keeps_original_labels() {
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let sub = g.induced(&[1, 2, 3, 4]);
        let subsub = sub.induced(&[2, 3]); // vertices labeled 3 and 4
        assert_eq!(subsub.label(0), 3);
        assert_eq!(subsub.label(1), 4);
        assert!(subsub.has_edge(0, 1));
    }

    #[test]
    fn remove_vertices_drops_incident_edges() {
        let g0 = Graph::from_edges(4, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
        let mut g = g0.clone();
        g.remove_vertices(&[2]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 1); // only 0-1 left
        let labels: Vec<u32> = (0..3).map(|v| g.label(v)).collect();
        assert_eq!(labels, vec![0, 1, 3]);
    }

    #[test]
    fn remove_nothing_is_a_no_op() {
        let mut g = Graph::from_edges(3, &[(0, 1), (1, 2)]);
        g.remove_vertices(&[]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn max_degree_vertex_picks_the_hub() {
        let g = Graph::from_edges(5, &[(2, 0), (2, 1), (2, 3), (2, 4), (0, 1)]);
        assert_eq!(g.max_degree_vertex(), Some(2));
        assert_eq!(Graph::from_edges(0, &[]).max_degree_vertex(), None);
    }

    #[test]
    fn parse_edge_list_reindexes_one_based_ids() {
        let text = "1,2\n2,3\n1,2\n7,3\n";
        let g = parse_edge_list(text.as_bytes()).unwrap();
        // Observed ids {1,2,3,7} map to {0,1,2,3} in ascending order.
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge(0, 1)); // 1,2
        assert!(g.has_edge(1, 2)); // 2,3
        assert!(g.has_edge(3, 2)); // 7,3
    }

    #[test]
    fn parse_edge_list_rejects_malformed_lines() {
        assert!(matches!(
            parse_edge_list("1,2\n3 4\n".as_bytes()),
            Err(LoadError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            parse_edge_list("1,2,3\n".as_bytes()),
            Err(LoadError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse_edge_list("0,2\n".as_bytes()),
            Err(LoadError::BadVertex { line: 1, .. })
        ));
    }

    #[test]
    fn parse_edge_list_ignores_blank_lines() {
        let g = parse_edge_list("1,2\n\n2,3\n".as_bytes()).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn random_density_extremes() {
        let mut rng = XorShiftRng::seed_from_u64(0x5EED);
        let empty = Graph::random(&mut rng, 12, 0.0);
        assert_eq!(empty.edge_count(), 0);
        let full = Graph::random(&mut rng, 12, 1.0);
        assert_eq!(full.edge_count(), 12 * 11 / 2);
    }
}
