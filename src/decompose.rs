//! k-core decomposition: per-vertex coreness and the shell partition.
//!
//! Uses the bucket-queue peeling algorithm (Batagelj–Zaversnik): vertices are
//! bin-sorted by degree and consumed in ascending order; removing a vertex
//! decrements the effective degree of its not-yet-removed neighbors, moving
//! them one bin down. A vertex's coreness is its effective degree at removal
//! time, which is monotone non-decreasing over the peeling order. Runs in
//! `O(V + E)`.

use crate::graph::Graph;
use std::collections::BTreeMap;

/// Result of decomposing a graph snapshot.
///
/// Coreness values are indexed by the vertex indices of the decomposed graph
/// and are invalidated by any later mutation of it.
#[derive(Clone, Debug)]
pub struct CoreDecomposition {
    coreness: Vec<u32>,
    shells: BTreeMap<u32, Vec<u32>>,
}

impl CoreDecomposition {
    /// Coreness of vertex `v`.
    #[inline]
    pub fn coreness(&self, v: usize) -> u32 {
        self.coreness[v]
    }

    /// Coreness of every vertex, indexed by vertex.
    #[inline]
    pub fn coreness_values(&self) -> &[u32] {
        &self.coreness
    }

    /// Shell partition: coreness value → vertices with exactly that coreness.
    /// Keys are the observed coreness values only.
    #[inline]
    pub fn shells(&self) -> &BTreeMap<u32, Vec<u32>> {
        &self.shells
    }

    /// Number of distinct shells.
    #[inline]
    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    /// Observed coreness values in decreasing order.
    pub fn shell_values_desc(&self) -> Vec<u32> {
        self.shells.keys().rev().copied().collect()
    }

    /// The largest coreness in the graph (its degeneracy), or `None` for the
    /// empty graph.
    pub fn max_coreness(&self) -> Option<u32> {
        self.shells.keys().next_back().copied()
    }
}

/// Computes the coreness of every vertex of `g` and the shell partition.
pub fn core_decomposition(g: &Graph) -> CoreDecomposition {
    let n = g.vertex_count();
    let mut coreness = vec![0u32; n];
    if n > 0 {
        let mut deg: Vec<usize> = (0..n).map(|v| g.degree(v)).collect();
        let max_deg = deg.iter().copied().max().unwrap_or(0);

        // Counting sort of vertices by degree. `bin[d]` is the start offset of
        // degree-d vertices in `vert`; `pos[v]` is v's slot in `vert`.
        let mut bin = vec![0usize; max_deg + 2];
        for &d in &deg {
            bin[d + 1] += 1;
        }
        for d in 1..bin.len() {
            bin[d] += bin[d - 1];
        }
        bin.pop();
        let mut vert = vec![0usize; n];
        let mut pos = vec![0usize; n];
        {
            let mut next = bin.clone();
            for v in 0..n {
                pos[v] = next[deg[v]];
                vert[pos[v]] = v;
                next[deg[v]] += 1;
            }
        }

        for i in 0..n {
            let v = vert[i];
            coreness[v] = deg[v] as u32;
            for &u in g.neighbors(v) {
                let u = u as usize;
                if deg[u] > deg[v] {
                    // Swap u to the front of its bin, then shrink the bin.
                    let du = deg[u];
                    let pu = pos[u];
                    let pw = bin[du];
                    let w = vert[pw];
                    if u != w {
                        vert.swap(pu, pw);
                        pos[u] = pw;
                        pos[w] = pu;
                    }
                    bin[du] += 1;
                    deg[u] -= 1;
                }
            }
        }
    }

    let mut shells: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for (v, &c) in coreness.iter().enumerate() {
        shells.entry(c).or_default().push(v as u32);
    }
    CoreDecomposition { coreness, shells }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    /// Reference coreness by repeated subgraph filtering: the coreness of v is
    /// the largest k such that v survives iterated deletion of degree-<k
    /// vertices. Quadratic, for cross-checking only.
    fn naive_coreness(g: &Graph) -> Vec<u32> {
        let n = g.vertex_count();
        let mut result = vec![0u32; n];
        let mut k = 1u32;
        loop {
            let mut alive = vec![true; n];
            loop {
                let mut changed = false;
                for v in 0..n {
                    if !alive[v] {
                        continue;
                    }
                    let d = g
                        .neighbors(v)
                        .iter()
                        .filter(|&&u| alive[u as usize])
                        .count();
                    if d < k as usize {
                        alive[v] = false;
                        changed = true;
                    }
                }
                if !changed {
                    break;
                }
            }
            if !alive.iter().any(|&a| a) {
                return result;
            }
            for v in 0..n {
                if alive[v] {
                    result[v] = k;
                }
            }
            k += 1;
        }
    }

    #[test]
    fn path_graph_is_all_ones() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let dec = core_decomposition(&g);
        assert_eq!(dec.coreness_values(), &[1, 1, 1, 1]);
        assert_eq!(dec.shell_count(), 1);
    }

    #[test]
    fn triangle_with_pendant_path() {
        let g = Graph::from_edges(5, &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]);
        let dec = core_decomposition(&g);
        assert_eq!(dec.coreness(0), 2);
        assert_eq!(dec.coreness(1), 2);
        assert_eq!(dec.coreness(2), 2);
        assert_eq!(dec.coreness(3), 1);
        assert_eq!(dec.coreness(4), 1);
        assert_eq!(dec.max_coreness(), Some(2));
        assert_eq!(dec.shell_values_desc(), vec![2, 1]);
    }

    #[test]
    fn two_disjoint_triangles_share_one_shell() {
        let g = Graph::from_edges(6, &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)]);
        let dec = core_decomposition(&g);
        for v in 0..6 {
            assert_eq!(dec.coreness(v), 2);
        }
        assert_eq!(dec.shell_count(), 1);
        assert_eq!(dec.shells()[&2].len(), 6);
    }

    #[test]
    fn complete_graph_coreness() {
        let edges: Vec<(u32, u32)> = (0..5u32)
            .flat_map(|i| ((i + 1)..5).map(move |j| (i, j)))
            .collect();
        let g = Graph::from_edges(5, &edges);
        let dec = core_decomposition(&g);
        assert!(dec.coreness_values().iter().all(|&c| c == 4));
    }

    #[test]
    fn empty_graph_has_no_shells() {
        let dec = core_decomposition(&Graph::from_edges(0, &[]));
        assert_eq!(dec.shell_count(), 0);
        assert_eq!(dec.max_coreness(), None);
    }

    #[test]
    fn isolated_vertices_form_shell_zero() {
        let dec = core_decomposition(&Graph::from_edges(3, &[]));
        assert_eq!(dec.coreness_values(), &[0, 0, 0]);
        assert_eq!(dec.shells()[&0].len(), 3);
    }

    #[test]
    fn shells_partition_all_vertices() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0DE);
        for _ in 0..10 {
            let g = Graph::random(&mut rng, 30, 0.2);
            let dec = core_decomposition(&g);
            let mut seen = vec![false; 30];
            for (&c, verts) in dec.shells() {
                for &v in verts {
                    assert!(!seen[v as usize], "vertex {v} in two shells");
                    seen[v as usize] = true;
                    assert_eq!(dec.coreness(v as usize), c);
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn matches_naive_peeling_on_random_graphs() {
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        for density in [0.1, 0.3, 0.6] {
            for _ in 0..10 {
                let g = Graph::random(&mut rng, 24, density);
                let dec = core_decomposition(&g);
                assert_eq!(dec.coreness_values(), naive_coreness(&g).as_slice());
            }
        }
    }

    #[test]
    fn decomposition_is_idempotent() {
        let mut rng = XorShiftRng::seed_from_u64(0xF00D);
        let g = Graph::random(&mut rng, 40, 0.15);
        let a = core_decomposition(&g);
        let b = core_decomposition(&g);
        assert_eq!(a.coreness_values(), b.coreness_values());
        assert_eq!(a.shells(), b.shells());
    }
}
