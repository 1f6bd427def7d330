//! Branch-and-bound maximum clique search with pivoting.
//!
//! One iterative engine backs both search phases of the pipeline:
//!
//! - the **seed search**, run early on a single dense neighborhood and pruned
//!   by plain subgraph degree (coreness does not exist yet), and
//! - the **exact search**, run on shell graphs and pruned by the coreness of
//!   each candidate, looked up through the vertex's external label.
//!
//! The recursion of the classic Bron–Kerbosch/Tomita formulation is unrolled
//! into an explicit stack of `(subg, cand, ext_u)` frames so that deep, dense
//! subgraphs cannot exhaust the call stack. At every level the pivot `u`
//! maximizes `|cand ∩ N(u)|` over `subg`, and only `cand − N(u)` is branched
//! on. Both phases prune against, and update, one shared [`Incumbent`].

use crate::graph::Graph;
use fixedbitset::FixedBitSet;

// ============================================================================
// Incumbent
// ============================================================================

/// The best clique found so far, shared by every search invocation of a run.
///
/// The size is monotone non-decreasing: [`Incumbent::offer`] ignores anything
/// no larger than the current best. The stored members are external labels,
/// so cliques found in different induced subgraphs are comparable.
#[derive(Clone, Debug, Default)]
pub struct Incumbent {
    size: usize,
    members: Vec<u32>,
}

impl Incumbent {
    /// Creates an empty incumbent (size 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the best clique found so far. Doubles as the pruning threshold.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// External labels of the best clique's vertices.
    #[inline]
    pub fn members(&self) -> &[u32] {
        &self.members
    }

    /// Records `members` as the new best clique if it is strictly larger than
    /// the current one. Returns whether the incumbent improved.
    pub fn offer(&mut self, members: &[u32]) -> bool {
        if members.len() > self.size {
            self.size = members.len();
            self.members.clear();
            self.members.extend_from_slice(members);
            true
        } else {
            false
        }
    }
}

// ============================================================================
// CliqueSearch
// ============================================================================

/// Candidate-rejection rule applied before a vertex is tried as an extension.
enum Prune<'a> {
    /// Reject `q` when `deg(q) + 1 <= incumbent` (degree in the searched
    /// subgraph). Used before coreness is available.
    Degree,
    /// Reject `q` when `coreness(q) + 1 <= incumbent`, with coreness indexed
    /// by external label.
    Coreness(&'a [u32]),
}

/// One suspended search level.
struct Frame {
    subg: FixedBitSet,
    cand: FixedBitSet,
    ext: FixedBitSet,
}

/// Iterative branch-and-bound clique search.
///
/// Scratch buffers (frame stack, partial-clique path, adjacency rows) are
/// reused across invocations to avoid repeated allocation.
#[derive(Default)]
pub struct CliqueSearch {
    stack: Vec<Frame>,
    path: Vec<usize>,
    rows: Vec<FixedBitSet>,
    clique: Vec<u32>,
}

impl CliqueSearch {
    /// Creates a search engine with empty scratch space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic seed search: explores `g` (a max-degree vertex's closed
    /// neighborhood) pruning by subgraph degree, updating `incumbent`.
    pub fn seed_search(&mut self, g: &Graph, incumbent: &mut Incumbent) {
        self.run(g, &Prune::Degree, incumbent);
    }

    /// Exact search over a shell graph, pruning by coreness. `coreness` must
    /// be indexed by external label and cover every label occurring in `g`.
    pub fn search(&mut self, g: &Graph, coreness: &[u32], incumbent: &mut Incumbent) {
        self.run(g, &Prune::Coreness(coreness), incumbent);
    }

    /// Rebuilds the per-vertex adjacency bitset rows for `g`.
    fn build_rows(&mut self, g: &Graph) {
        let n = g.vertex_count();
        self.rows.clear();
        for v in 0..n {
            let mut row = FixedBitSet::with_capacity(n);
            for &w in g.neighbors(v) {
                row.insert(w as usize);
            }
            self.rows.push(row);
        }
    }

    fn run(&mut self, g: &Graph, prune: &Prune<'_>, incumbent: &mut Incumbent) {
        let n = g.vertex_count();
        if n == 0 {
            return;
        }
        self.build_rows(g);
        self.stack.clear();
        self.path.clear();

        let mut subg = FixedBitSet::with_capacity(n);
        subg.insert_range(..);
        let mut cand = subg.clone();
        let mut ext = branch_set(&self.rows, &subg, &cand);

        loop {
            if let Some(q) = ext.ones().next() {
                ext.set(q, false);
                cand.set(q, false);

                let rejected = match prune {
                    Prune::Degree => self.rows[q].count_ones(..) + 1 <= incumbent.size(),
                    Prune::Coreness(coreness) => {
                        coreness[g.label(q) as usize] as usize + 1 <= incumbent.size()
                    }
                };
                if rejected {
                    continue;
                }

                // Tentatively place q at the current depth.
                let depth = self.stack.len();
                self.path.truncate(depth);
                self.path.push(q);

                let mut subg_q = subg.clone();
                subg_q.intersect_with(&self.rows[q]);
                if subg_q.count_ones(..) + self.path.len() <= incumbent.size() {
                    continue;
                }
                if subg_q.is_clear() {
                    // The path is a maximal clique.
                    self.clique.clear();
                    self.clique.extend(self.path.iter().map(|&v| g.label(v)));
                    incumbent.offer(&self.clique);
                } else {
                    let mut cand_q = cand.clone();
                    cand_q.intersect_with(&self.rows[q]);
                    if !cand_q.is_clear() {
                        let ext_q = branch_set(&self.rows, &subg_q, &cand_q);
                        self.stack.push(Frame { subg, cand, ext });
                        subg = subg_q;
                        cand = cand_q;
                        ext = ext_q;
                    }
                }
            } else if let Some(frame) = self.stack.pop() {
                subg = frame.subg;
                cand = frame.cand;
                ext = frame.ext;
            } else {
                break; // search complete
            }
        }
    }
}

/// Picks the pivot `u = argmax_{v ∈ subg} |cand ∩ N(v)|` and returns the
/// branch set `cand − N(u)`. `subg` is never empty at a call site.
fn branch_set(rows: &[FixedBitSet], subg: &FixedBitSet, cand: &FixedBitSet) -> FixedBitSet {
    let mut pivot = None;
    let mut best = 0usize;
    for v in subg.ones() {
        let overlap = cand.intersection(&rows[v]).count();
        if pivot.is_none() || overlap > best {
            pivot = Some(v);
            best = overlap;
        }
    }
    debug_assert!(pivot.is_some(), "pivot selection over empty subg");
    let mut ext = cand.clone();
    if let Some(u) = pivot {
        ext.difference_with(&rows[u]);
    }
    ext
}

// ============================================================================
// Tests
// ============================================================================
