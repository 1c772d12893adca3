//! # orbitsat
//!
//! Maximum independent sets (MIS) in large, highly symmetric graphs.
//!
//! The crate combines a group-theoretic symmetry-breaking tree derived from
//! the graph's automorphism group with a weighted satisfiability encoding of
//! the independent-set problem. The tree fixes a canonical branching order
//! for the search, and its structure is translated into implication clauses
//! that prune group-equivalent regions of the search space without discarding
//! any optimum.
//!
//! Two solving paths are provided:
//!
//! - **MaxSAT path**: encode MIS as weighted partial MaxSAT (edge exclusivity
//!   hard, unit-weight soft per vertex), optionally merged with
//!   symmetry-breaking clauses generated from the orbit-stabilizer tree.
//! - **MinSAT path**: greedy vertex elimination producing a MinSAT instance
//!   equivalent to MIS, re-encoded into MaxSAT via a heuristic clique
//!   partition of an auxiliary conflict graph.
//!
//! ## Example
//!
//! ```rust,ignore
//! use orbitsat::graph::Graph;
//! use orbitsat::group::PermGroup;
//! use orbitsat::solver::{Options, Solver};
//!
//! // The 4-cycle 0-1-2-3-0 with its full automorphism group (dihedral, order 8)
//! let graph = Graph::cycle(4);
//! let group = PermGroup::dihedral(4);
//!
//! let solver = Solver::new(Options::default());
//! let solution = solver.solve(&graph, &group)?;
//! assert_eq!(solution.size(), 2);
//! ```
//!
//! ## Preconditions
//!
//! The acting group must be a subgroup of the graph's automorphism group, and
//! the graph must be vertex-transitive under it at the root. This is a
//! documented caller responsibility, not a runtime check: violating it makes
//! the symmetry-breaking clauses over-prune and optimal solutions may be
//! lost. [`solver::Options::validate_transitivity`] enables a debug-mode
//! check of the root orbit.

#![warn(missing_docs)]

/// Undirected graphs over opaque, totally ordered vertex labels
pub mod graph;

/// Group action capability and a bundled permutation-group implementation
pub mod group;

/// Weighted formulas and bidirectional atom pools
pub mod formula;

/// The lazy orbit-stabilizer tree
pub mod tree;

/// Symmetry-breaking clause generation from the tree
pub mod breaker;

/// The base MIS weighted-formula assembler
pub mod mis;

/// Greedy reduction of MIS to MinSAT
pub mod minsat;

/// Clique-partition re-encoding of MinSAT into MaxSAT
pub mod clique;

/// SAT and weighted-SAT solving backends
pub mod engine;

/// High-level solving pipelines
pub mod solver;

/// Error types
pub mod error {
    //! Error types for orbitsat

    use thiserror::Error;

    /// Errors that can occur while building or solving a model
    #[derive(Error, Debug)]
    pub enum OrbitsatError {
        /// The input graph has no vertices, so no canonical root exists
        #[error("empty graph: no root vertex to anchor the orbit tree")]
        EmptyGraph,

        /// Debug-mode transitivity validation failed: the root orbit does
        /// not cover the vertex set
        #[error("graph is not vertex-transitive under the supplied group (root orbit covers {covered} of {total} vertices)")]
        NotVertexTransitive {
            /// Size of the root vertex's orbit
            covered: usize,
            /// Number of graph vertices
            total: usize,
        },

        /// The hard clauses are contradictory. This should not happen for a
        /// correctly assembled MIS encoding and is a defect signal, not a
        /// normal outcome.
        #[error("hard clauses are unsatisfiable")]
        Unsat,

        /// Invalid argument
        #[error("invalid argument: {0}")]
        InvalidArgument(String),
    }

    /// Result type for orbitsat operations
    pub type Result<T> = std::result::Result<T, OrbitsatError>;
}

pub use error::{OrbitsatError, Result};
