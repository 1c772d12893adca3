//! High-level solving pipelines
//!
//! The solver wires the encoders to a weighted solving engine and decodes the
//! result back to a vertex set. Three pipelines are provided: symmetry-broken
//! MaxSAT (the main path), plain MaxSAT (the baseline the symmetry clauses
//! must agree with), and the MinSAT route through the clique-partition
//! re-encoding.

use crate::breaker::ClauseGenerator;
use crate::clique;
use crate::engine::maxsat::{LinearSearch, MaxSatOutcome, MaxSatSolver};
use crate::graph::{Graph, Vertex};
use crate::group::GroupAction;
use crate::mis::{self, RootRule};
use crate::minsat;
use crate::tree::OrbitNode;
use crate::{OrbitsatError, Result};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Solver options
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum depth of the orbit-tree walk when generating symmetry-breaking
    /// clauses (0 = no symmetry clauses, default = 3).
    ///
    /// Deeper walks break more symmetries but the clause count can grow with
    /// the branching of the tree.
    pub symmetry_depth: usize,
    /// How the encoding anchors the search at a canonical vertex
    pub root_rule: RootRule,
    /// Check that the root orbit covers the vertex set before trusting the
    /// symmetry clauses. Vertex-transitivity is otherwise a caller invariant.
    pub validate_transitivity: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            symmetry_depth: 3,
            root_rule: RootRule::default(),
            validate_transitivity: false,
        }
    }
}

/// Callbacks observing the solve as it progresses.
///
/// All methods default to no-ops; implement only what you need.
pub trait Observer<V: Vertex> {
    /// Called once per orbit-tree node expanded into a clause
    fn node_expanded(&mut self, vertex: V, orbit_size: usize) {
        let _ = (vertex, orbit_size);
    }

    /// Called when the engine reports an optimum of the given satisfied
    /// soft weight
    fn solved(&mut self, weight: u64) {
        let _ = weight;
    }
}

/// An observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<V: Vertex> Observer<V> for NoopObserver {}

/// A maximum independent set together with solve statistics
#[derive(Debug, Clone)]
pub struct MisSolution<V: Vertex> {
    vertices: BTreeSet<V>,
    stats: Statistics,
}

impl<V: Vertex> MisSolution<V> {
    /// The chosen vertices
    pub fn vertices(&self) -> &BTreeSet<V> {
        &self.vertices
    }

    /// Number of chosen vertices (the independence number when the encoding
    /// is exact)
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// The statistics collected during the solve
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }
}

/// Statistics collected during solving
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    encode_time: Duration,
    solve_time: Duration,
    num_variables: u32,
    num_clauses: u32,
    num_symmetry_clauses: u32,
}

impl Statistics {
    /// Encoding time in milliseconds
    pub fn encode_time(&self) -> u64 {
        self.encode_time.as_millis() as u64
    }

    /// Engine time in milliseconds
    pub fn solve_time(&self) -> u64 {
        self.solve_time.as_millis() as u64
    }

    /// Total time in milliseconds
    pub fn total_time(&self) -> u64 {
        self.encode_time() + self.solve_time()
    }

    /// Number of formula variables (excluding engine auxiliaries)
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Number of clauses handed to the engine
    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }

    /// How many of the hard clauses came from the orbit tree
    pub fn num_symmetry_clauses(&self) -> u32 {
        self.num_symmetry_clauses
    }
}

/// Main MIS solver (uses batsat through the linear-search engine by default)
pub struct Solver {
    options: Options,
}

impl Solver {
    /// Creates a solver with the given options
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The options this solver was built with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Solves MIS on `graph` with symmetry-breaking clauses derived from
    /// `group`, using the default engine.
    ///
    /// `group` must be a subgroup of the graph's automorphism group, and the
    /// graph must be vertex-transitive under it (see the crate docs). An
    /// empty graph yields an empty solution.
    pub fn solve<V: Vertex, G: GroupAction<V>>(
        &self,
        graph: &Graph<V>,
        group: &G,
    ) -> Result<MisSolution<V>> {
        let mut engine: LinearSearch = LinearSearch::default();
        self.solve_with(&mut engine, graph, group, |_| true, &mut NoopObserver)
    }

    /// Solves with a custom engine, expansion predicate, and observer.
    ///
    /// The predicate decides, per visited orbit-tree node, whether to expand
    /// it into a clause; the depth bound from [`Options`] still applies.
    pub fn solve_with<V, G, E, P>(
        &self,
        engine: &mut E,
        graph: &Graph<V>,
        group: &G,
        should_expand: P,
        observer: &mut dyn Observer<V>,
    ) -> Result<MisSolution<V>>
    where
        V: Vertex,
        G: GroupAction<V>,
        E: MaxSatSolver,
        P: Fn(&OrbitNode<V, G>) -> bool,
    {
        if graph.is_empty() {
            return Ok(MisSolution {
                vertices: BTreeSet::new(),
                stats: Statistics::default(),
            });
        }

        let encode_start = Instant::now();
        let (mut formula, mut pool) = mis::assemble(graph);
        match self.options.root_rule {
            RootRule::None => {}
            RootRule::ForceMin => mis::force_min_vertex(&mut formula, &mut pool, graph)?,
            RootRule::OrbitCandidates => {
                mis::force_orbit_candidates(&mut formula, &mut pool, graph, group)?
            }
        }

        let mut num_symmetry_clauses = 0;
        if self.options.symmetry_depth > 0 {
            let root = OrbitNode::root(graph, group)?;
            if self.options.validate_transitivity && root.orbit_size() < graph.num_vertices() {
                return Err(OrbitsatError::NotVertexTransitive {
                    covered: root.orbit_size(),
                    total: graph.num_vertices(),
                });
            }
            let mut notify =
                |node: &OrbitNode<V, G>| observer.node_expanded(node.vertex(), node.orbit_size());
            let clauses: Vec<_> = ClauseGenerator::with_predicate(
                &mut pool,
                root,
                self.options.symmetry_depth,
                should_expand,
            )
            .observe(&mut notify)
            .collect();
            num_symmetry_clauses = clauses.len() as u32;
            formula.extend_hard(clauses);
        }
        let encode_time = encode_start.elapsed();

        let solve_start = Instant::now();
        let outcome = engine.solve(&formula)?;
        let solve_time = solve_start.elapsed();

        let stats = Statistics {
            encode_time,
            solve_time,
            num_variables: formula.num_vars(),
            num_clauses: formula.num_clauses() as u32,
            num_symmetry_clauses,
        };

        match outcome {
            MaxSatOutcome::Optimum { model, weight } => {
                observer.solved(weight);
                let vertices = mis::decode(&pool, &model);
                debug_assert!(graph.is_independent_set(&vertices));
                Ok(MisSolution { vertices, stats })
            }
            MaxSatOutcome::Unsat => Err(OrbitsatError::Unsat),
        }
    }

    /// Solves MIS on `graph` with the base encoding only.
    ///
    /// No root rule and no symmetry clauses; this is the baseline that the
    /// symmetry-broken path must agree with on solution size.
    pub fn solve_plain<V: Vertex>(&self, graph: &Graph<V>) -> Result<MisSolution<V>> {
        if graph.is_empty() {
            return Ok(MisSolution {
                vertices: BTreeSet::new(),
                stats: Statistics::default(),
            });
        }

        let encode_start = Instant::now();
        let (formula, pool) = mis::assemble(graph);
        let encode_time = encode_start.elapsed();

        let solve_start = Instant::now();
        let mut engine: LinearSearch = LinearSearch::default();
        let outcome = engine.solve(&formula)?;
        let solve_time = solve_start.elapsed();

        let stats = Statistics {
            encode_time,
            solve_time,
            num_variables: formula.num_vars(),
            num_clauses: formula.num_clauses() as u32,
            num_symmetry_clauses: 0,
        };

        match outcome {
            MaxSatOutcome::Optimum { model, .. } => {
                let vertices = mis::decode(&pool, &model);
                debug_assert!(graph.is_independent_set(&vertices));
                Ok(MisSolution { vertices, stats })
            }
            MaxSatOutcome::Unsat => Err(OrbitsatError::Unsat),
        }
    }

    /// Solves MIS on `graph` through the MinSAT route: greedy elimination,
    /// clique-partition re-encoding, then the default engine.
    pub fn solve_via_minsat<V: Vertex>(&self, graph: &Graph<V>) -> Result<MisSolution<V>> {
        if graph.is_empty() {
            return Ok(MisSolution {
                vertices: BTreeSet::new(),
                stats: Statistics::default(),
            });
        }

        let encode_start = Instant::now();
        let instance = minsat::reduce(graph);
        let encoding = clique::encode(instance.soft_clauses());
        let encode_time = encode_start.elapsed();

        let solve_start = Instant::now();
        let mut engine: LinearSearch = LinearSearch::default();
        let outcome = engine.solve(&encoding.formula)?;
        let solve_time = solve_start.elapsed();

        let stats = Statistics {
            encode_time,
            solve_time,
            num_variables: encoding.formula.num_vars(),
            num_clauses: encoding.formula.num_clauses() as u32,
            num_symmetry_clauses: 0,
        };

        match outcome {
            MaxSatOutcome::Optimum { model, .. } => {
                let vertices = clique::decode(&encoding, &instance, &model);
                debug_assert!(graph.is_independent_set(&vertices));
                Ok(MisSolution { vertices, stats })
            }
            MaxSatOutcome::Unsat => Err(OrbitsatError::Unsat),
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
