//! Two-stage shell-extraction pipeline around the exact search engine.
//!
//! The full graph is never searched directly. A cheap seed search on one
//! dense neighborhood yields an initial incumbent, which prunes low-degree
//! vertices before the coreness decomposition. Stage 1 then exposes only the
//! top `layer_num` shells to the exact search. Because no clique through a
//! vertex can exceed its coreness plus one, shells whose coreness fails
//! `coreness + 1 > incumbent` after stage 1 can be discarded wholesale; if
//! none survive, the incumbent is provably maximum and the run stops early.
//! Otherwise stage 2 admits a vertex subset of the surviving shells through a
//! neighbor-saturation rule and searches that induced subgraph to finalize
//! the result.

use crate::decompose::{core_decomposition, CoreDecomposition};
use crate::graph::Graph;
use crate::search::{CliqueSearch, Incumbent};
use log::{debug, info};

// ============================================================================
// Configuration and report
// ============================================================================

/// Tuning knobs for a solver run.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Number of highest-coreness shells exposed to the stage-1 exact search.
    /// Larger values make stage 1 more expensive but early termination more
    /// likely. Must be at least 1.
    pub layer_num: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { layer_num: 4 }
    }
}

/// Vertex/edge counts of one searched shell graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellStats {
    /// Vertices in the induced shell graph.
    pub vertices: usize,
    /// Edges in the induced shell graph.
    pub edges: usize,
}

/// Outcome of a solver run.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Size of the maximum clique.
    pub max_clique: usize,
    /// External labels of one maximum clique.
    pub clique: Vec<u32>,
    /// Vertices removed by the post-seed degree prune.
    pub pruned_vertices: usize,
    /// Number of distinct shells in the pruned graph.
    pub shell_count: usize,
    /// Size of the stage-1 shell graph.
    pub stage1: ShellStats,
    /// Size of the stage-2 shell graph, if stage 2 ran.
    pub stage2: Option<ShellStats>,
    /// Whether the coreness bound proved the incumbent maximum after stage 1.
    pub early_termination: bool,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Finds the maximum clique of `graph`.
///
/// Consumes the graph, as the pipeline prunes it in place between phases.
///
/// # Panics
/// Panics if `config.layer_num` is zero.
pub fn solve(mut graph: Graph, config: &SolverConfig) -> SolveReport {
    assert!(config.layer_num >= 1, "layer_num must be at least 1");

    let original_n = graph.vertex_count();
    if original_n == 0 {
        return SolveReport {
            max_clique: 0,
            clique: Vec::new(),
            pruned_vertices: 0,
            shell_count: 0,
            stage1: ShellStats::default(),
            stage2: None,
            early_termination: true,
        };
    }

    let mut incumbent = Incumbent::new();
    let mut engine = CliqueSearch::new();

    // Seed: exact search restricted to a max-degree vertex's closed
    // neighborhood, pruned by degree only.
    let u0 = graph
        .max_degree_vertex()
        .unwrap_or_else(|| unreachable!("graph is non-empty"));
    let mut seed_verts = vec![u0];
    seed_verts.extend(graph.neighbors(u0).iter().map(|&v| v as usize));
    let seed_graph = graph.induced(&seed_verts);
    engine.seed_search(&seed_graph, &mut incumbent);
    debug!(
        "seed search on {} vertices found clique of size {}",
        seed_graph.vertex_count(),
        incumbent.size()
    );

    // A vertex of degree below the incumbent cannot extend any clique past
    // it; drop such vertices before paying for the decomposition.
    let remove: Vec<usize> = (0..graph.vertex_count())
        .filter(|&v| graph.degree(v) < incumbent.size())
        .collect();
    let pruned_vertices = remove.len();
    graph.remove_vertices(&remove);
    info!(
        "degree prune removed {pruned_vertices} of {original_n} vertices (bound {})",
        incumbent.size()
    );

    let dec = core_decomposition(&graph);
    let shell_count = dec.shell_count();
    debug!(
        "decomposed into {shell_count} shells, degeneracy {:?}",
        dec.max_coreness()
    );

    // Coreness lookup by external label, valid inside any induced subgraph.
    let mut coreness_of_label = vec![0u32; original_n];
    for v in 0..graph.vertex_count() {
        coreness_of_label[graph.label(v) as usize] = dec.coreness(v);
    }

    // Stage 1: the top `layer_num` shells.
    let values = dec.shell_values_desc();
    let taken = values.len().min(config.layer_num);
    let stage1_verts = shell_union(&dec, &values[..taken]);
    let shell_graph = graph.induced(&stage1_verts);
    let stage1 = ShellStats {
        vertices: shell_graph.vertex_count(),
        edges: shell_graph.edge_count(),
    };
    engine.search(&shell_graph, &coreness_of_label, &mut incumbent);
    info!(
        "stage 1 searched {} vertices / {} edges, incumbent {}",
        stage1.vertices,
        stage1.edges,
        incumbent.size()
    );

    // Shells whose coreness bound cannot beat the incumbent are done; the
    // eligible ones form a prefix of the remaining descending core values.
    let eligible: Vec<u32> = values[taken..]
        .iter()
        .take_while(|&&c| c as usize + 1 > incumbent.size())
        .copied()
        .collect();

    if eligible.is_empty() {
        info!(
            "early termination after stage 1: maximum clique {}",
            incumbent.size()
        );
        return SolveReport {
            max_clique: incumbent.size(),
            clique: incumbent.members().to_vec(),
            pruned_vertices,
            shell_count,
            stage1,
            stage2: None,
            early_termination: true,
        };
    }

    // Stage 2: saturation-filtered vertices of the eligible shells, plus
    // boundary neighbors from the already-searched higher shells.
    let stage2_verts = saturated_shell_vertices(&graph, &dec, &eligible, incumbent.size());
    let shell_graph = graph.induced(&stage2_verts);
    let stage2 = ShellStats {
        vertices: shell_graph.vertex_count(),
        edges: shell_graph.edge_count(),
    };
    engine.search(&shell_graph, &coreness_of_label, &mut incumbent);
    info!(
        "stage 2 searched {} vertices / {} edges, incumbent {}",
        stage2.vertices,
        stage2.edges,
        incumbent.size()
    );

    SolveReport {
        max_clique: incumbent.size(),
        clique: incumbent.members().to_vec(),
        pruned_vertices,
        shell_count,
        stage1,
        stage2: Some(stage2),
        early_termination: false,
    }
}

/// Union of the shells with the given coreness values, as sorted indices.
fn shell_union(dec: &CoreDecomposition, values: &[u32]) -> Vec<usize> {
    let mut verts: Vec<usize> = values
        .iter()
        .flat_map(|c| dec.shells()[c].iter().map(|&v| v as usize))
        .collect();
    verts.sort_unstable();
    verts
}

/// Stage-2 admission. For each vertex of the eligible shells, scan its
/// neighbors of coreness `>= min_co` in ascending degree order and classify
/// each as saturated (overlap with the neighbor list above `incumbent - 2`)
/// or unsaturated. More than `incumbent - 1` saturated neighbors
/// force-accepts the vertex; more than `|nei| - (incumbent - 1)` unsaturated
/// ones rejects it. Accepted vertices also pull in their neighbors of
/// coreness above `max_co`, the boundary into the shells already searched.
///
/// Comparisons run in signed arithmetic so that a small incumbent behaves
/// like the thresholds read (`incumbent - 2` may be negative).
fn saturated_shell_vertices(
    graph: &Graph,
    dec: &CoreDecomposition,
    eligible: &[u32],
    incumbent: usize,
) -> Vec<usize> {
    debug_assert!(!eligible.is_empty());
    let max_co = *eligible.first().unwrap_or(&0);
    let min_co = *eligible.last().unwrap_or(&0);
    let bound = incumbent as i64;

    let n = graph.vertex_count();
    let mut admitted = vec![false; n];
    let mut in_nei = vec![false; n];

    for shell_vertex in shell_union(dec, eligible) {
        let mut nei: Vec<usize> = graph
            .neighbors(shell_vertex)
            .iter()
            .map(|&u| u as usize)
            .filter(|&u| dec.coreness(u) >= min_co)
            .collect();
        nei.sort_by_key(|&u| graph.degree(u));
        for &u in &nei {
            in_nei[u] = true;
        }

        let mut accept = true;
        let mut saturated = 0i64;
        let mut unsaturated = 0i64;
        for &u in &nei {
            let overlap = graph
                .neighbors(u)
                .iter()
                .filter(|&&w| in_nei[w as usize])
                .count() as i64;
            if overlap > bound - 2 {
                saturated += 1;
                if saturated > bound - 1 {
                    break; // force-accept
                }
            } else {
                unsaturated += 1;
                if unsaturated > nei.len() as i64 - (bound - 1) {
                    accept = false;
                    break;
                }
            }
        }
        for &u in &nei {
            in_nei[u] = false;
        }

        if accept {
            admitted[shell_vertex] = true;
            for &u in graph.neighbors(shell_vertex) {
                if dec.coreness(u as usize) > max_co {
                    admitted[u as usize] = true;
                }
            }
        }
    }

    (0..n).filter(|&v| admitted[v]).collect()
}

// ============================================================================
// Tests
// ============================================================================
