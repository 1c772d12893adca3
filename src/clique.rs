//! Clique-partition re-encoding of MinSAT into MaxSAT
//!
//! Following the clique-partition encoding of "Exact MinSAT Solving": build a
//! conflict graph whose nodes are the MinSAT soft clauses, with an edge
//! wherever two clauses cannot be falsified together (the literal-wise
//! complement of one intersects the other); partition the nodes into cliques
//! heuristically; then ask MaxSAT to activate (falsify) a node in as many
//! cliques as possible, subject to never activating two adjacent nodes.
//!
//! Atoms are nested two levels deep: clique atoms name MinSAT clauses, whose
//! literals name graph vertices, so decoding must invert both pools in
//! order.

use crate::engine::maxsat::Model;
use crate::formula::{Clause, IdPool, WeightedFormula};
use crate::graph::Vertex;
use crate::minsat::MinSatInstance;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Conflict graph over MinSAT clauses, nodes indexed by clause position.
///
/// Unlike the edge lists it is derived from, the node set always covers
/// every clause: conflict-free clauses appear as isolated nodes so that the
/// partition covers them too.
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    adj: Vec<BTreeSet<usize>>,
}

impl ConflictGraph {
    /// Builds the conflict graph: clauses are adjacent iff the complement of
    /// one intersects the other
    pub fn build(clauses: &[Clause]) -> Self {
        let sets: Vec<FxHashSet<i32>> = clauses
            .iter()
            .map(|clause| clause.iter().copied().collect())
            .collect();
        let mut adj = vec![BTreeSet::new(); clauses.len()];
        for (a, b) in (0..clauses.len()).tuple_combinations() {
            let conflicting = sets[a].iter().any(|lit| sets[b].contains(&-lit));
            if conflicting {
                adj[a].insert(b);
                adj[b].insert(a);
            }
        }
        Self { adj }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// True if there are no nodes
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Neighbors of a node
    pub fn neighbors(&self, node: usize) -> &BTreeSet<usize> {
        &self.adj[node]
    }

    /// True if `a` and `b` are adjacent
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adj[a].contains(&b)
    }

    /// Undirected edges, each once with `a < b`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(a, nbrs)| nbrs.iter().copied().filter(move |&b| a < b).map(move |b| (a, b)))
    }
}

/// Partitions the conflict graph's nodes into cliques heuristically.
///
/// Repeatedly selects the uncovered node minimizing `(number of partial
/// cliques whose candidate set contains it, degree among uncovered nodes)`,
/// smallest node index among ties. The node merges into the first clique (in
/// creation order) whose candidate set contains it, shrinking that clique's
/// candidates to the intersection with the node's neighbors, or opens a new
/// singleton clique whose candidates are its uncovered neighbors.
///
/// Every node lands in exactly one clique, and a clique's members are
/// pairwise adjacent by the candidate-set invariant.
pub fn heuristic_partition(gph: &ConflictGraph) -> Vec<Vec<usize>> {
    let mut remaining: BTreeSet<usize> = (0..gph.len()).collect();
    // (members, candidate extensions: uncovered nodes adjacent to all members)
    let mut parts: Vec<(Vec<usize>, BTreeSet<usize>)> = Vec::new();

    while !remaining.is_empty() {
        let mut choice: Option<((usize, usize), usize)> = None;
        for &node in &remaining {
            let compat = parts.iter().filter(|(_, cand)| cand.contains(&node)).count();
            let degree = gph.neighbors(node).intersection(&remaining).count();
            let val = (compat, degree);
            if choice.is_none_or(|(best, _)| val < best) {
                choice = Some((val, node));
            }
        }
        let (_, node) = choice.expect("remaining is non-empty");

        remaining.remove(&node);
        for (_, cand) in parts.iter_mut() {
            cand.remove(&node);
        }

        let nbrs = gph.neighbors(node);
        match parts.iter().position(|(_, cand)| cand.contains(&node)) {
            Some(i) => {
                let (members, cand) = &mut parts[i];
                members.push(node);
                let shrunk: BTreeSet<usize> = cand.intersection(nbrs).copied().collect();
                *cand = shrunk;
            }
            None => {
                let cand = nbrs.intersection(&remaining).copied().collect();
                parts.push((vec![node], cand));
            }
        }
    }

    parts.into_iter().map(|(members, _)| members).collect()
}

/// The MaxSAT re-encoding of a MinSAT instance
#[derive(Debug, Clone)]
pub struct CliqueEncoding {
    /// The MaxSAT formula to hand to the solving engine
    pub formula: WeightedFormula,
    /// Activation-atom pool: clause index ↔ variable
    pub pool: IdPool<usize>,
    /// The clique partition the soft clauses were built from
    pub parts: Vec<Vec<usize>>,
    graph: ConflictGraph,
}

impl CliqueEncoding {
    /// The conflict graph underlying the encoding
    pub fn conflict_graph(&self) -> &ConflictGraph {
        &self.graph
    }
}

/// Re-encodes MinSAT soft clauses as a MaxSAT instance.
///
/// Hard clauses forbid activating two adjacent conflict-graph nodes; one
/// unit-weight soft clause per clique asks for at least one active member.
/// Activation of a node means its MinSAT clause is falsified.
pub fn encode(clauses: &[Clause]) -> CliqueEncoding {
    let graph = ConflictGraph::build(clauses);
    let parts = heuristic_partition(&graph);

    let mut formula = WeightedFormula::new();
    let mut pool = IdPool::new();
    // Activation variables in node order, for reproducible ids.
    for node in 0..graph.len() {
        pool.id(node);
    }

    for (a, b) in graph.edges() {
        let clause = vec![-pool.id(a), -pool.id(b)];
        formula.add_hard(clause);
    }
    for part in &parts {
        let clause: Clause = part.iter().map(|&node| pool.id(node)).collect();
        formula.add_soft(clause, 1);
    }

    CliqueEncoding {
        formula,
        pool,
        parts,
        graph,
    }
}

/// Translates an optimal assignment of the re-encoding back to graph
/// vertices.
///
/// Active clique atoms invert to MinSAT clause indices; the positive literals
/// of those (falsified) clauses invert through the MinSAT pool to the chosen
/// vertices.
pub fn decode<V: Vertex>(
    encoding: &CliqueEncoding,
    instance: &MinSatInstance<V>,
    model: &Model,
) -> BTreeSet<V> {
    let mut chosen = BTreeSet::new();
    for (id, &node) in encoding.pool.iter() {
        if !model.is_true(id) {
            continue;
        }
        for &lit in &instance.soft_clauses()[node] {
            if lit > 0 {
                chosen.insert(*instance.pool().atom(lit));
            }
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::minsat;

    fn partition_is_exact_clique_cover(gph: &ConflictGraph, parts: &[Vec<usize>]) {
        let mut covered = BTreeSet::new();
        for part in parts {
            assert!(!part.is_empty());
            for &node in part {
                assert!(covered.insert(node), "node {} covered twice", node);
            }
            for (i, &a) in part.iter().enumerate() {
                for &b in &part[i + 1..] {
                    assert!(gph.has_edge(a, b), "{} and {} share a clique but no edge", a, b);
                }
            }
        }
        assert_eq!(covered, (0..gph.len()).collect());
    }

    #[test]
    fn conflict_edges_are_complement_intersections() {
        // (x1) conflicts with (¬x1, x2) but not with (x2)
        let clauses = vec![vec![1], vec![-1, 2], vec![2]];
        let gph = ConflictGraph::build(&clauses);
        assert!(gph.has_edge(0, 1));
        assert!(!gph.has_edge(0, 2));
        assert!(!gph.has_edge(1, 2));
    }

    #[test]
    fn isolated_clauses_become_singleton_cliques() {
        let clauses = vec![vec![1], vec![2], vec![3]];
        let gph = ConflictGraph::build(&clauses);
        let parts = heuristic_partition(&gph);
        assert_eq!(parts.len(), 3);
        partition_is_exact_clique_cover(&gph, &parts);
    }

    #[test]
    fn partition_of_reduced_complete_graph() {
        // K4's reduction conflicts pairwise: one clique covers everything.
        let instance = minsat::reduce(&Graph::complete(4));
        let gph = ConflictGraph::build(instance.soft_clauses());
        let parts = heuristic_partition(&gph);
        partition_is_exact_clique_cover(&gph, &parts);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 4);
    }

    #[test]
    fn partition_properties_on_cycles() {
        for n in [4usize, 5, 6, 7] {
            let instance = minsat::reduce(&Graph::cycle(n));
            let gph = ConflictGraph::build(instance.soft_clauses());
            let parts = heuristic_partition(&gph);
            partition_is_exact_clique_cover(&gph, &parts);
        }
    }

    #[test]
    fn encoding_shape_matches_graph_and_partition() {
        let instance = minsat::reduce(&Graph::cycle(5));
        let encoding = encode(instance.soft_clauses());
        let gph = encoding.conflict_graph();
        assert_eq!(encoding.formula.hard().len(), gph.edges().count());
        assert_eq!(encoding.formula.soft().len(), encoding.parts.len());
        // One activation atom per clause node.
        assert_eq!(encoding.pool.num_atoms(), instance.len());
    }
}
