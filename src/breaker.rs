//! Symmetry-breaking clause generation
//!
//! Walks the orbit-stabilizer tree to a bounded depth and translates its
//! structure into implication clauses: selecting a node's vertex canonically
//! forces selecting some child's vertex too. The clauses are sound as hard
//! constraints (no optimum is discarded) while pruning group-equivalent
//! branches of the search.
//!
//! The stream is lazy and single-traversal; it is driven by an explicit stack
//! so that only the active path of the tree is ever materialized.

use crate::formula::{Clause, IdPool};
use crate::graph::Vertex;
use crate::group::GroupAction;
use crate::tree::OrbitNode;

struct Frame<V: Vertex, G: GroupAction<V>> {
    node: OrbitNode<V, G>,
    /// Negated literals of every ancestor on the path: the whole subtree's
    /// constraints are conditioned on the ancestors being selected.
    prefix: Vec<i32>,
    depth: usize,
}

/// Lazy stream of symmetry-breaking clauses for one tree.
///
/// Finite and not restartable: iterating consumes the traversal. Nodes whose
/// remaining depth is exhausted, or that the expansion predicate rejects,
/// contribute nothing and their subtrees are skipped.
pub struct ClauseGenerator<'a, V: Vertex, G: GroupAction<V>> {
    pool: &'a mut IdPool<V>,
    stack: Vec<Frame<V, G>>,
    should_expand: Box<dyn Fn(&OrbitNode<V, G>) -> bool + 'a>,
    observer: Option<&'a mut dyn FnMut(&OrbitNode<V, G>)>,
}

impl<'a, V: Vertex, G: GroupAction<V>> ClauseGenerator<'a, V, G> {
    /// Creates a generator that always expands, bounded only by `depth`
    pub fn new(pool: &'a mut IdPool<V>, root: OrbitNode<V, G>, depth: usize) -> Self {
        Self::with_predicate(pool, root, depth, |_| true)
    }

    /// Creates a generator with a caller-supplied expansion predicate.
    ///
    /// The predicate is evaluated once per visited node; rejecting a node
    /// stops that branch without emitting anything for it.
    pub fn with_predicate(
        pool: &'a mut IdPool<V>,
        root: OrbitNode<V, G>,
        depth: usize,
        should_expand: impl Fn(&OrbitNode<V, G>) -> bool + 'a,
    ) -> Self {
        Self {
            pool,
            stack: vec![Frame {
                node: root,
                prefix: Vec::new(),
                depth,
            }],
            should_expand: Box::new(should_expand),
            observer: None,
        }
    }

    /// Attaches an observer invoked once per expanded node
    pub fn observe(mut self, observer: &'a mut dyn FnMut(&OrbitNode<V, G>)) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl<V: Vertex, G: GroupAction<V>> Iterator for ClauseGenerator<'_, V, G> {
    type Item = Clause;

    fn next(&mut self) -> Option<Clause> {
        while let Some(frame) = self.stack.pop() {
            if frame.depth == 0 || !(self.should_expand)(&frame.node) {
                continue;
            }

            // Children are enumerated exactly once per node: they feed both
            // the emitted clause and the frames for the recursive walk.
            let children = frame.node.children();
            if children.is_empty() {
                // A leaf ends a canonical path; there is nothing to force.
                continue;
            }

            if let Some(observer) = self.observer.as_deref_mut() {
                observer(&frame.node);
            }

            let lit = self.pool.id(frame.node.vertex());
            let mut clause = frame.prefix.clone();
            clause.push(-lit);
            let child_prefix = clause.clone();
            for child in &children {
                clause.push(self.pool.id(child.vertex()));
            }

            // Reversed push so children pop in enumeration order.
            for child in children.into_iter().rev() {
                self.stack.push(Frame {
                    node: child,
                    prefix: child_prefix.clone(),
                    depth: frame.depth - 1,
                });
            }

            return Some(clause);
        }
        None
    }
}
