//! Undirected graphs over opaque vertex labels
//!
//! The core needs only a handful of graph capabilities: vertex iteration,
//! neighbor queries, removal producing a derived graph, and minimum-element
//! selection for canonical choices. Vertex labels are opaque values whose
//! total order is used solely for determinism.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::Hash;

/// Marker trait for vertex labels.
///
/// Labels are opaque to the core; the `Ord` bound exists only to pick
/// canonical representatives (roots, orbit minima, tie-breaks) so that runs
/// are reproducible.
pub trait Vertex: Copy + Eq + Ord + Hash + fmt::Debug {}

impl<T: Copy + Eq + Ord + Hash + fmt::Debug> Vertex for T {}

/// A finite undirected graph.
///
/// Adjacency is kept in ordered maps so that vertex and edge iteration order
/// is deterministic for a given construction sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph<V: Vertex> {
    adj: BTreeMap<V, BTreeSet<V>>,
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            adj: BTreeMap::new(),
        }
    }

    /// Adds an isolated vertex (no-op if already present)
    pub fn add_vertex(&mut self, v: V) {
        self.adj.entry(v).or_default();
    }

    /// Adds an undirected edge, inserting both endpoints.
    ///
    /// Self-loops are ignored: a vertex with a self-loop could never join an
    /// independent set, and the elimination procedures assume simple graphs.
    pub fn add_edge(&mut self, u: V, v: V) {
        if u == v {
            self.add_vertex(u);
            return;
        }
        self.adj.entry(u).or_default().insert(v);
        self.adj.entry(v).or_default().insert(u);
    }

    /// Returns true if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Number of vertices
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.adj.values().map(|nbrs| nbrs.len()).sum::<usize>() / 2
    }

    /// Returns true if `v` is a vertex of the graph
    pub fn contains(&self, v: V) -> bool {
        self.adj.contains_key(&v)
    }

    /// Returns true if `u` and `v` are adjacent
    pub fn has_edge(&self, u: V, v: V) -> bool {
        self.adj.get(&u).is_some_and(|nbrs| nbrs.contains(&v))
    }

    /// Iterates over vertices in ascending label order
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adj.keys().copied()
    }

    /// The vertex set as an ordered set
    pub fn vertex_set(&self) -> BTreeSet<V> {
        self.adj.keys().copied().collect()
    }

    /// The minimum-labeled vertex, used as the canonical root choice
    pub fn min_vertex(&self) -> Option<V> {
        self.adj.keys().next().copied()
    }

    /// Neighbors of `v` in ascending label order (empty if `v` is absent)
    pub fn neighbors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.adj.get(&v).into_iter().flatten().copied()
    }

    /// Degree of `v` (0 if absent)
    pub fn degree(&self, v: V) -> usize {
        self.adj.get(&v).map_or(0, |nbrs| nbrs.len())
    }

    /// Iterates over undirected edges, each reported once with `u < v`
    pub fn edges(&self) -> impl Iterator<Item = (V, V)> + '_ {
        self.adj
            .iter()
            .flat_map(|(&u, nbrs)| nbrs.iter().copied().filter(move |&v| u < v).map(move |v| (u, v)))
    }

    /// Removes a vertex and its incident edges in place
    pub fn remove_vertex(&mut self, v: V) {
        if let Some(nbrs) = self.adj.remove(&v) {
            for nbr in nbrs {
                if let Some(back) = self.adj.get_mut(&nbr) {
                    back.remove(&v);
                }
            }
        }
    }

    /// Removes the edge `(u, v)` in place, leaving both endpoints
    pub fn remove_edge(&mut self, u: V, v: V) {
        if let Some(nbrs) = self.adj.get_mut(&u) {
            nbrs.remove(&v);
        }
        if let Some(nbrs) = self.adj.get_mut(&v) {
            nbrs.remove(&u);
        }
    }

    /// Derived graph with `v` removed
    pub fn without_vertex(&self, v: V) -> Self {
        let mut derived = self.clone();
        derived.remove_vertex(v);
        derived
    }

    /// Derived graph with `v` and all of its neighbors removed.
    ///
    /// This is the reduction step of the orbit tree: once a vertex is fixed
    /// into the independent set, its neighbors are excluded anyway.
    pub fn without_closed_neighborhood(&self, v: V) -> Self {
        let mut derived = self.clone();
        let nbrs: Vec<V> = derived.neighbors(v).collect();
        for nbr in nbrs {
            derived.remove_vertex(nbr);
        }
        derived.remove_vertex(v);
        derived
    }

    /// Returns true if `set` is an independent set of this graph
    pub fn is_independent_set(&self, set: &BTreeSet<V>) -> bool {
        set.iter()
            .all(|&u| set.iter().all(|&v| u == v || !self.has_edge(u, v)))
    }
}

impl Graph<usize> {
    /// The cycle graph `0-1-...-(n-1)-0`
    pub fn cycle(n: usize) -> Self {
        let mut gph = Self::new();
        if n == 1 {
            gph.add_vertex(0);
            return gph;
        }
        for i in 0..n {
            gph.add_edge(i, (i + 1) % n);
        }
        gph
    }

    /// The complete graph on `0..n`
    pub fn complete(n: usize) -> Self {
        let mut gph = Self::new();
        for i in 0..n {
            gph.add_vertex(i);
            for j in 0..i {
                gph.add_edge(j, i);
            }
        }
        gph
    }

    /// The Petersen graph on vertices `0..10` (outer 5-cycle `0..5`,
    /// inner pentagram `5..10`, spokes `i - (i+5)`)
    pub fn petersen() -> Self {
        let mut gph = Self::new();
        for i in 0..5 {
            gph.add_edge(i, (i + 1) % 5);
            gph.add_edge(5 + i, 5 + (i + 2) % 5);
            gph.add_edge(i, 5 + i);
        }
        gph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_basics() {
        let gph = Graph::cycle(4);
        assert_eq!(gph.num_vertices(), 4);
        assert_eq!(gph.num_edges(), 4);
        assert!(gph.has_edge(0, 1));
        assert!(gph.has_edge(3, 0));
        assert!(!gph.has_edge(0, 2));
        assert_eq!(gph.min_vertex(), Some(0));
    }

    #[test]
    fn edges_reported_once() {
        let gph = Graph::complete(3);
        let edges: Vec<_> = gph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn closed_neighborhood_removal() {
        // Removing 0 and its neighbors from C4 leaves only the far vertex
        let gph = Graph::cycle(4);
        let derived = gph.without_closed_neighborhood(0);
        assert_eq!(derived.vertex_set(), BTreeSet::from([2]));
        assert_eq!(derived.num_edges(), 0);
    }

    #[test]
    fn remove_vertex_cleans_back_edges() {
        let mut gph = Graph::complete(3);
        gph.remove_vertex(1);
        assert_eq!(gph.num_vertices(), 2);
        assert_eq!(gph.num_edges(), 1);
        assert!(gph.has_edge(0, 2));
        assert_eq!(gph.degree(0), 1);
    }

    #[test]
    fn derived_graph_leaves_the_original_intact() {
        let gph = Graph::cycle(4);
        let derived = gph.without_vertex(0);
        assert_eq!(derived.num_vertices(), 3);
        assert_eq!(derived.num_edges(), 2);
        assert_eq!(gph.num_vertices(), 4);
    }

    #[test]
    fn self_loop_ignored() {
        let mut gph: Graph<usize> = Graph::new();
        gph.add_edge(3, 3);
        assert!(gph.contains(3));
        assert_eq!(gph.num_edges(), 0);
    }

    #[test]
    fn independence_check() {
        let gph = Graph::cycle(5);
        assert!(gph.is_independent_set(&BTreeSet::from([0, 2])));
        assert!(!gph.is_independent_set(&BTreeSet::from([0, 1])));
        assert!(gph.is_independent_set(&BTreeSet::new()));
    }

    #[test]
    fn petersen_shape() {
        let gph = Graph::petersen();
        assert_eq!(gph.num_vertices(), 10);
        assert_eq!(gph.num_edges(), 15);
        for v in gph.vertices() {
            assert_eq!(gph.degree(v), 3);
        }
    }
}
