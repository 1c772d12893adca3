//! MIS as weighted satisfiability
//!
//! The base encoding is small: for every edge a hard mutual-exclusion clause,
//! for every vertex a unit-weight soft clause rewarding inclusion. An optimal
//! assignment's positive selection atoms are a maximum independent set.
//!
//! Two root rules exploit the orbit argument of the symmetry-breaking tree;
//! they are distinct design choices, not interchangeable:
//!
//! - [`RootRule::ForceMin`] pins the canonical minimum vertex into the set.
//!   Sound when the graph is vertex-transitive under the acting group.
//! - [`RootRule::OrbitCandidates`] requires at least one canonical orbit
//!   representative, which remains sound when the group has several orbits.

use crate::engine::maxsat::Model;
use crate::formula::{IdPool, WeightedFormula};
use crate::graph::{Graph, Vertex};
use crate::group::GroupAction;
use crate::{OrbitsatError, Result};
use std::collections::BTreeSet;

/// How the assembler anchors the search at a canonical vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootRule {
    /// No anchoring clause
    None,
    /// Hard unit clause selecting the minimum vertex
    #[default]
    ForceMin,
    /// Hard clause requiring at least one orbit representative (the minimum
    /// element of each orbit intersected with the vertex set)
    OrbitCandidates,
}

/// Builds the base MIS formula and its selection-atom pool.
///
/// Hard: `(¬xᵤ ∨ ¬xᵥ)` per edge. Soft: `(xᵥ)` with weight 1 per vertex.
pub fn assemble<V: Vertex>(graph: &Graph<V>) -> (WeightedFormula, IdPool<V>) {
    let mut formula = WeightedFormula::new();
    let mut pool = IdPool::new();
    for (u, v) in graph.edges() {
        let clause = vec![-pool.id(u), -pool.id(v)];
        formula.add_hard(clause);
    }
    for v in graph.vertices() {
        let lit = pool.id(v);
        formula.add_soft(vec![lit], 1);
    }
    (formula, pool)
}

/// Adds a hard unit clause selecting the canonical minimum vertex.
///
/// Sound (paired with the orbit argument) only when the graph is
/// vertex-transitive under the acting automorphism subgroup.
pub fn force_min_vertex<V: Vertex>(
    formula: &mut WeightedFormula,
    pool: &mut IdPool<V>,
    graph: &Graph<V>,
) -> Result<()> {
    let root = graph.min_vertex().ok_or(OrbitsatError::EmptyGraph)?;
    let lit = pool.id(root);
    formula.add_hard(vec![lit]);
    Ok(())
}

/// Adds a hard clause requiring at least one vertex from the canonical
/// candidate set: the minimum element of each group orbit restricted to the
/// vertex set.
pub fn force_orbit_candidates<V: Vertex, G: GroupAction<V>>(
    formula: &mut WeightedFormula,
    pool: &mut IdPool<V>,
    graph: &Graph<V>,
    group: &G,
) -> Result<()> {
    let support = graph.vertex_set();
    let mut clause = Vec::new();
    for orbit in group.orbits() {
        if let Some(&rep) = orbit.iter().find(|v| support.contains(v)) {
            clause.push(pool.id(rep));
        }
    }
    if clause.is_empty() {
        return Err(OrbitsatError::EmptyGraph);
    }
    formula.add_hard(clause);
    Ok(())
}

/// Reads the selected vertices back out of an optimal assignment
pub fn decode<V: Vertex>(pool: &IdPool<V>, model: &Model) -> BTreeSet<V> {
    pool.iter()
        .filter(|(id, _)| model.is_true(*id))
        .map(|(_, &v)| v)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::PermGroup;

    #[test]
    fn base_encoding_shape() {
        let graph = Graph::cycle(4);
        let (formula, pool) = assemble(&graph);
        assert_eq!(formula.hard().len(), 4);
        assert_eq!(formula.soft().len(), 4);
        assert_eq!(pool.num_atoms(), 4);
        assert_eq!(formula.total_soft_weight(), 4);
    }

    #[test]
    fn force_min_pins_root() {
        let graph = Graph::cycle(4);
        let (mut formula, mut pool) = assemble(&graph);
        force_min_vertex(&mut formula, &mut pool, &graph).unwrap();
        let root_lit = pool.lookup(&0).unwrap();
        assert_eq!(formula.hard().last().unwrap(), &vec![root_lit]);
    }

    #[test]
    fn force_min_on_empty_graph_errors() {
        let graph: Graph<usize> = Graph::new();
        let (mut formula, mut pool) = assemble(&graph);
        assert!(matches!(
            force_min_vertex(&mut formula, &mut pool, &graph),
            Err(OrbitsatError::EmptyGraph)
        ));
    }

    #[test]
    fn orbit_candidates_under_transitive_group_is_the_root() {
        let graph = Graph::cycle(4);
        let group = PermGroup::dihedral(4);
        let (mut formula, mut pool) = assemble(&graph);
        force_orbit_candidates(&mut formula, &mut pool, &graph, &group).unwrap();
        let root_lit = pool.lookup(&0).unwrap();
        assert_eq!(formula.hard().last().unwrap(), &vec![root_lit]);
    }

    #[test]
    fn orbit_candidates_with_trivial_group_lists_all_vertices() {
        let graph = Graph::cycle(3);
        let group = PermGroup::trivial(graph.vertex_set());
        let (mut formula, mut pool) = assemble(&graph);
        force_orbit_candidates(&mut formula, &mut pool, &graph, &group).unwrap();
        assert_eq!(formula.hard().last().unwrap().len(), 3);
    }
}
