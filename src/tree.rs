//! The orbit-stabilizer tree
//!
//! A rooted tree fixing a canonical branching order for MIS search. Each node
//! fixes one vertex into the independent set; its derived graph is the parent
//! graph minus that vertex and its neighbors, and its acting group is the
//! parent group's stabilizer of the vertex. Because the acting group is an
//! automorphism subgroup under which the root graph is vertex-transitive, any
//! maximum independent set is group-equivalent to one that follows some
//! root-to-leaf path of the tree.
//!
//! The tree is purely lazy: a node holds only the data needed to compute its
//! own children on demand, and no component may force full materialization.
//! There are no parent links; ownership is strictly downward.

use crate::graph::{Graph, Vertex};
use crate::group::GroupAction;
use crate::{OrbitsatError, Result};

/// One node of the orbit-stabilizer tree.
///
/// Immutable once built. `orbit_size` is the size of the orbit of `vertex`
/// under the *parent's* acting group, restricted to the parent's remaining
/// vertex set; an orbit of size 1 means there is no symmetry left to exploit
/// on this branch and the node is a leaf.
#[derive(Debug, Clone)]
pub struct OrbitNode<V: Vertex, G: GroupAction<V>> {
    vertex: V,
    orbit_size: usize,
    graph: Graph<V>,
    group: G,
}

impl<V: Vertex, G: GroupAction<V>> OrbitNode<V, G> {
    /// Builds the root of the tree for a graph/group pair.
    ///
    /// The root vertex is the minimum-labeled vertex (the caller-supplied
    /// invariant of vertex-transitivity makes this choice canonical). Errors
    /// with [`OrbitsatError::EmptyGraph`] if the graph has no vertices.
    pub fn root(graph: &Graph<V>, group: &G) -> Result<Self> {
        let vertex = graph.min_vertex().ok_or(OrbitsatError::EmptyGraph)?;
        let support = graph.vertex_set();
        let orbit_size = group
            .orbit(vertex)
            .iter()
            .filter(|v| support.contains(v))
            .count();
        Ok(Self::fix(graph, group, vertex, orbit_size))
    }

    /// Applies the root rule at `vertex`: remove its closed neighborhood
    /// from `graph` and stabilize `group` at it.
    fn fix(graph: &Graph<V>, group: &G, vertex: V, orbit_size: usize) -> Self {
        Self {
            vertex,
            orbit_size,
            graph: graph.without_closed_neighborhood(vertex),
            group: group.stabilizer(vertex),
        }
    }

    /// The vertex this node fixes into the independent set
    pub fn vertex(&self) -> V {
        self.vertex
    }

    /// Size of this vertex's orbit under the parent's acting group
    pub fn orbit_size(&self) -> usize {
        self.orbit_size
    }

    /// The derived graph: the parent graph minus this vertex and its
    /// neighbors
    pub fn graph(&self) -> &Graph<V> {
        &self.graph
    }

    /// The acting group at this node (the parent group stabilized at
    /// [`vertex`](Self::vertex))
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Enumerates the children of this node.
    ///
    /// Children are computed on demand and never cached: one per orbit of the
    /// node's acting group that lies entirely inside the derived vertex set,
    /// rooted at the orbit's minimum element, in ascending order of those
    /// representatives. Leaves (orbit size 1, or an empty derived graph) have
    /// no children.
    pub fn children(&self) -> Vec<Self> {
        if self.orbit_size == 1 || self.graph.is_empty() {
            return Vec::new();
        }
        let support = self.graph.vertex_set();
        self.group
            .orbits()
            .into_iter()
            .filter(|orbit| orbit.iter().all(|v| support.contains(v)))
            .map(|orbit| {
                let rep = *orbit.first().expect("orbits are non-empty");
                Self::fix(&self.graph, &self.group, rep, orbit.len())
            })
            .collect()
    }
}
