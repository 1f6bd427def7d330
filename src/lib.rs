//! # coreclique
//!
//! Exact maximum clique search for large sparse graphs, built around k-core
//! decomposition.
//!
//! Enumerating cliques exhaustively is hopeless on large graphs; this crate
//! instead confines the expensive branch-and-bound search to small, provably
//! sufficient subgraphs derived from the graph's coreness structure:
//!
//! 1. A cheap **seed search** on one dense neighborhood produces an initial
//!    lower bound, which immediately deletes every vertex of lower degree.
//! 2. The pruned graph is **decomposed** into coreness shells.
//! 3. The **exact search** runs on the top shells only; a coreness bound then
//!    either proves the result maximum (early termination) or selects a
//!    second, saturation-filtered subgraph to finish the job.
//!
//! ## Quick Start
//!
//! ```
//! use coreclique::graph::Graph;
//! use coreclique::solver::{solve, SolverConfig};
//!
//! // Triangle plus a pendant path: the maximum clique has size 3.
//! let g = Graph::from_edges(5, &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]);
//! let report = solve(g, &SolverConfig::default());
//! assert_eq!(report.max_clique, 3);
//! ```
//!
//! ## Loading a network file
//!
//! ```no_run
//! let g = coreclique::graph::load_edge_list("network.txt").expect("readable edge list");
//! let report = coreclique::solver::solve(g, &Default::default());
//! println!("maximum clique: {}", report.max_clique);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Adjacency-set graph store, edge-list loading, random graphs.
//! - [`decompose`]: Coreness computation and the shell partition.
//! - [`search`]: Iterative branch-and-bound clique search and the shared
//!   incumbent bound.
//! - [`solver`]: The two-stage shell-extraction pipeline and its run report.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::missing_panics_doc)]

pub mod decompose;
pub mod graph;
pub mod search;
pub mod solver;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::decompose::{core_decomposition, CoreDecomposition};
    pub use crate::graph::{load_edge_list, Graph, LoadError};
    pub use crate::search::{CliqueSearch, Incumbent};
    pub use crate::solver::{solve, ShellStats, SolveReport, SolverConfig};
}
