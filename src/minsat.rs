//! Greedy reduction of MIS to MinSAT
//!
//! Repeatedly eliminates a vertex of maximum current degree, accumulating one
//! running clause per vertex: the chosen vertex appends its own selection
//! literal, each still-present neighbor appends the negation. When no edges
//! remain, every vertex's accumulated literal list becomes a unit-weight soft
//! clause. Minimizing the number of satisfied clauses of the result is
//! equivalent to MIS (Ignatiev, Morgado & Marques-Silva, "On Reducing Maximum
//! Independent Set to Minimum Satisfiability"); the falsified clauses of a
//! minimal assignment name the chosen vertices.
//!
//! Ties on maximum degree break to the smallest label, so the clause
//! structure is reproducible across runs.

use crate::formula::{Clause, IdPool};
use crate::graph::{Graph, Vertex};
use std::collections::BTreeMap;

/// A MinSAT instance produced by the greedy reduction.
///
/// Soft clauses (all weight 1) are emitted in ascending vertex order, one per
/// vertex; the selection-atom pool translates positive literals back to
/// vertices.
#[derive(Debug, Clone)]
pub struct MinSatInstance<V: Vertex> {
    soft: Vec<Clause>,
    vertices: Vec<V>,
    pool: IdPool<V>,
}

impl<V: Vertex> MinSatInstance<V> {
    /// The soft clauses, one per vertex in ascending vertex order
    pub fn soft_clauses(&self) -> &[Clause] {
        &self.soft
    }

    /// The vertex whose running clause became clause `index`
    pub fn vertex_of(&self, index: usize) -> V {
        self.vertices[index]
    }

    /// The selection-atom pool
    pub fn pool(&self) -> &IdPool<V> {
        &self.pool
    }

    /// Number of clauses (equals the number of graph vertices)
    pub fn len(&self) -> usize {
        self.soft.len()
    }

    /// True if the instance has no clauses
    pub fn is_empty(&self) -> bool {
        self.soft.is_empty()
    }
}

/// Runs the greedy elimination on `graph`.
///
/// After elimination, every never-chosen vertex's clause also receives that
/// vertex's own (otherwise unused) selection literal. The fresh literal can
/// always be assigned false, so the MinSAT optimum and the clause conflicts
/// are unchanged, but every clause now carries exactly one positive literal
/// and decoding a falsified clause always recovers its vertex.
pub fn reduce<V: Vertex>(graph: &Graph<V>) -> MinSatInstance<V> {
    let mut work = graph.clone();
    let mut pool = IdPool::new();
    let mut clauses: BTreeMap<V, Clause> = graph.vertices().map(|v| (v, Vec::new())).collect();

    while work.num_edges() > 0 {
        // Maximum current degree, smallest label among maxima. Vertices
        // iterate in ascending order, so the first strict maximum wins.
        let mut best: Option<(usize, V)> = None;
        for v in work.vertices() {
            let deg = work.degree(v);
            if best.is_none_or(|(bd, _)| deg > bd) {
                best = Some((deg, v));
            }
        }
        let (_, chosen) = best.expect("graph with edges has vertices");

        let lit = pool.id(chosen);
        clauses
            .get_mut(&chosen)
            .expect("chosen vertex has a running clause")
            .push(lit);
        let nbrs: Vec<V> = work.neighbors(chosen).collect();
        for nbr in nbrs {
            clauses
                .get_mut(&nbr)
                .expect("neighbor has a running clause")
                .push(-lit);
        }
        work.remove_vertex(chosen);
    }

    // Give never-chosen vertices their own positive literal.
    for (&v, clause) in clauses.iter_mut() {
        if pool.lookup(&v).is_none() {
            let lit = pool.id(v);
            clause.push(lit);
        }
    }

    let (vertices, soft): (Vec<V>, Vec<Clause>) = clauses.into_iter().unzip();
    MinSatInstance {
        soft,
        vertices,
        pool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_graph_elimination_order() {
        // K4: all ties, so elimination runs 0, 1, 2; vertex 3 is never
        // chosen and gets its own literal appended last.
        let instance = reduce(&Graph::complete(4));
        let ids: Vec<i32> = (0..4).map(|v| instance.pool().lookup(&v).unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(
            instance.soft_clauses(),
            &[
                vec![1],
                vec![-1, 2],
                vec![-1, -2, 3],
                vec![-1, -2, -3, 4],
            ]
        );
    }

    #[test]
    fn five_cycle_reduction() {
        let instance = reduce(&Graph::cycle(5));
        assert_eq!(instance.len(), 5);
        // Elimination: 0 (all degree 2), then 2, then 3; 1 and 4 are never
        // chosen.
        let x0 = instance.pool().lookup(&0).unwrap();
        let x2 = instance.pool().lookup(&2).unwrap();
        let x3 = instance.pool().lookup(&3).unwrap();
        let x1 = instance.pool().lookup(&1).unwrap();
        let x4 = instance.pool().lookup(&4).unwrap();
        assert_eq!(instance.soft_clauses()[0], vec![x0]);
        assert_eq!(instance.soft_clauses()[1], vec![-x0, -x2, x1]);
        assert_eq!(instance.soft_clauses()[2], vec![x2]);
        assert_eq!(instance.soft_clauses()[3], vec![-x2, x3]);
        assert_eq!(instance.soft_clauses()[4], vec![-x0, -x3, x4]);
    }

    #[test]
    fn every_clause_has_its_own_positive_literal() {
        for graph in [Graph::cycle(6), Graph::complete(5), Graph::petersen()] {
            let instance = reduce(&graph);
            for (idx, clause) in instance.soft_clauses().iter().enumerate() {
                let v = instance.vertex_of(idx);
                let own = instance.pool().lookup(&v).unwrap();
                assert!(clause.contains(&own));
                // The own literal is the only positive one.
                assert_eq!(clause.iter().filter(|&&l| l > 0).count(), 1);
            }
        }
    }

    #[test]
    fn isolated_vertices_get_unit_clauses() {
        let mut graph: Graph<usize> = Graph::new();
        graph.add_edge(0, 1);
        graph.add_vertex(7);
        let instance = reduce(&graph);
        assert_eq!(instance.len(), 3);
        let x7 = instance.pool().lookup(&7).unwrap();
        assert_eq!(instance.soft_clauses()[2], vec![x7]);
    }

    #[test]
    fn deterministic_across_runs() {
        let a = reduce(&Graph::petersen());
        let b = reduce(&Graph::petersen());
        assert_eq!(a.soft_clauses(), b.soft_clauses());
    }
}
