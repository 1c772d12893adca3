//! Group actions on vertex labels
//!
//! The core treats the permutation-group algebra as a black box behind the
//! [`GroupAction`] capability: a partition of the domain into orbits, and
//! point stabilizers. Any correct implementation is substitutable; the
//! bundled [`PermGroup`] computes orbits by closure over generators and
//! stabilizers via Schreier's lemma.

use crate::graph::Vertex;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Capability contract for a finite permutation group acting on vertex
/// labels.
///
/// Implementations must guarantee that `stabilizer(p)` is the *point*
/// stabilizer: every member `g` satisfies `g(p) = p`. Composition and
/// membership are assumed correct and are not re-verified by the core.
pub trait GroupAction<V: Vertex>: Clone {
    /// Partition of the acting domain into orbits.
    ///
    /// The returned orbits are ordered by their minimum element so that
    /// callers iterating over them behave deterministically.
    fn orbits(&self) -> Vec<BTreeSet<V>>;

    /// The subgroup fixing `point`
    fn stabilizer(&self, point: V) -> Self;

    /// The orbit of a single point (singleton if the point is outside the
    /// acting domain)
    fn orbit(&self, point: V) -> BTreeSet<V> {
        self.orbits()
            .into_iter()
            .find(|orb| orb.contains(&point))
            .unwrap_or_else(|| BTreeSet::from([point]))
    }
}

/// A bijection of the vertex domain with finite support.
///
/// Only moved points are stored; everything else is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation<V: Vertex> {
    map: BTreeMap<V, V>,
}

impl<V: Vertex> Permutation<V> {
    /// The identity permutation
    pub fn identity() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Builds a permutation from an explicit point mapping.
    ///
    /// Fixed points may be included and are dropped. Panics if the mapping is
    /// not a bijection on its support (a programming error in the caller).
    pub fn from_mapping(mapping: impl IntoIterator<Item = (V, V)>) -> Self {
        let map: BTreeMap<V, V> = mapping.into_iter().filter(|(k, v)| k != v).collect();
        let sources: BTreeSet<V> = map.keys().copied().collect();
        let images: BTreeSet<V> = map.values().copied().collect();
        assert_eq!(
            sources, images,
            "permutation mapping is not a bijection on its support"
        );
        Self { map }
    }

    /// Builds a permutation from disjoint cycles
    pub fn from_cycles(cycles: &[Vec<V>]) -> Self {
        let mut map = BTreeMap::new();
        for cycle in cycles {
            for (i, &v) in cycle.iter().enumerate() {
                let img = cycle[(i + 1) % cycle.len()];
                if v != img {
                    let prev = map.insert(v, img);
                    assert!(prev.is_none(), "cycles are not disjoint");
                }
            }
        }
        Self { map }
    }

    /// Applies the permutation to a point
    pub fn apply(&self, v: V) -> V {
        self.map.get(&v).copied().unwrap_or(v)
    }

    /// Returns true if this is the identity
    pub fn is_identity(&self) -> bool {
        self.map.is_empty()
    }

    /// Points moved by this permutation
    pub fn support(&self) -> impl Iterator<Item = V> + '_ {
        self.map.keys().copied()
    }

    /// Composition applying `self` first, then `other`
    pub fn then(&self, other: &Self) -> Self {
        let mut map = BTreeMap::new();
        for &v in self.map.keys().chain(other.map.keys()) {
            let img = other.apply(self.apply(v));
            if img != v {
                map.insert(v, img);
            }
        }
        Self { map }
    }

    /// The inverse permutation
    pub fn inverse(&self) -> Self {
        Self {
            map: self.map.iter().map(|(&k, &v)| (v, k)).collect(),
        }
    }
}

/// A finite permutation group given by generators.
///
/// The domain is carried explicitly so that orbit partitions cover fixed
/// points too (a stabilizer's singleton orbits matter to the orbit tree).
#[derive(Debug, Clone)]
pub struct PermGroup<V: Vertex> {
    domain: BTreeSet<V>,
    gens: Vec<Permutation<V>>,
}

impl<V: Vertex> PermGroup<V> {
    /// Creates a group from a domain and generating permutations.
    ///
    /// Identity and duplicate generators are dropped; generator support must
    /// lie inside the domain.
    pub fn new(domain: BTreeSet<V>, gens: Vec<Permutation<V>>) -> Self {
        let mut seen = FxHashSet::default();
        let mut kept = Vec::new();
        for gen in gens {
            debug_assert!(
                gen.support().all(|v| domain.contains(&v)),
                "generator moves points outside the domain"
            );
            if !gen.is_identity() && seen.insert(gen.clone()) {
                kept.push(gen);
            }
        }
        Self { domain, gens: kept }
    }

    /// The trivial group on the given domain
    pub fn trivial(domain: BTreeSet<V>) -> Self {
        Self {
            domain,
            gens: Vec::new(),
        }
    }

    /// The acting domain
    pub fn domain(&self) -> &BTreeSet<V> {
        &self.domain
    }

    /// The stored generators
    pub fn generators(&self) -> &[Permutation<V>] {
        &self.gens
    }

    /// Orbit of `point` together with a transversal: for every orbit element
    /// `q`, a group element mapping `point` to `q`.
    fn transversal(&self, point: V) -> BTreeMap<V, Permutation<V>> {
        let mut reps = BTreeMap::new();
        reps.insert(point, Permutation::identity());
        let mut queue = VecDeque::from([point]);
        while let Some(p) = queue.pop_front() {
            for gen in &self.gens {
                let q = gen.apply(p);
                if !reps.contains_key(&q) {
                    let to_q = reps[&p].then(gen);
                    reps.insert(q, to_q);
                    queue.push_back(q);
                }
            }
        }
        reps
    }
}

impl<V: Vertex> GroupAction<V> for PermGroup<V> {
    fn orbits(&self) -> Vec<BTreeSet<V>> {
        let mut orbits = Vec::new();
        let mut visited: BTreeSet<V> = BTreeSet::new();
        for &start in &self.domain {
            if visited.contains(&start) {
                continue;
            }
            let mut orbit = BTreeSet::from([start]);
            let mut queue = VecDeque::from([start]);
            while let Some(p) = queue.pop_front() {
                for gen in &self.gens {
                    let q = gen.apply(p);
                    if orbit.insert(q) {
                        queue.push_back(q);
                    }
                }
            }
            visited.extend(orbit.iter().copied());
            orbits.push(orbit);
        }
        orbits
    }

    /// Point stabilizer via Schreier's lemma: with a transversal `t` of the
    /// orbit of `point`, the elements `t(p) · g · t(g(p))⁻¹` generate the
    /// stabilizer.
    fn stabilizer(&self, point: V) -> Self {
        if !self.domain.contains(&point) {
            return self.clone();
        }
        let reps = self.transversal(point);

        let mut seen = FxHashSet::default();
        let mut gens = Vec::new();
        for (&p, to_p) in &reps {
            for gen in &self.gens {
                let q = gen.apply(p);
                let schreier = to_p.then(gen).then(&reps[&q].inverse());
                debug_assert_eq!(schreier.apply(point), point);
                if !schreier.is_identity() && seen.insert(schreier.clone()) {
                    gens.push(schreier);
                }
            }
        }

        Self {
            domain: self.domain.clone(),
            gens,
        }
    }
}

impl PermGroup<usize> {
    /// The cyclic group generated by the rotation `i → i+1 (mod n)` on `0..n`
    pub fn cyclic(n: usize) -> Self {
        let domain: BTreeSet<usize> = (0..n).collect();
        let rotation = Permutation::from_mapping((0..n).map(|i| (i, (i + 1) % n)));
        Self::new(domain, vec![rotation])
    }

    /// The dihedral group of order `2n` acting on the cycle `0..n`
    pub fn dihedral(n: usize) -> Self {
        let domain: BTreeSet<usize> = (0..n).collect();
        let rotation = Permutation::from_mapping((0..n).map(|i| (i, (i + 1) % n)));
        let reflection = Permutation::from_mapping((0..n).map(|i| (i, (n - i) % n)));
        Self::new(domain, vec![rotation, reflection])
    }

    /// The full symmetric group on `0..n`, generated by adjacent
    /// transpositions
    pub fn symmetric(n: usize) -> Self {
        let domain: BTreeSet<usize> = (0..n).collect();
        let gens = (0..n.saturating_sub(1))
            .map(|i| Permutation::from_cycles(&[vec![i, i + 1]]))
            .collect();
        Self::new(domain, gens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_apply_and_compose() {
        let rot = Permutation::from_cycles(&[vec![0usize, 1, 2, 3]]);
        assert_eq!(rot.apply(0), 1);
        assert_eq!(rot.apply(3), 0);
        assert_eq!(rot.apply(7), 7);

        let twice = rot.then(&rot);
        assert_eq!(twice.apply(0), 2);
        assert!(rot.then(&rot.inverse()).is_identity());
    }

    #[test]
    fn from_mapping_rejects_non_bijection() {
        let result = std::panic::catch_unwind(|| {
            Permutation::from_mapping([(0usize, 1usize), (2, 1)]);
        });
        assert!(result.is_err());
    }

    #[test]
    fn dihedral_is_transitive_on_cycle() {
        let grp = PermGroup::dihedral(4);
        let orbits = grp.orbits();
        assert_eq!(orbits.len(), 1);
        assert_eq!(orbits[0], (0..4).collect());
    }

    #[test]
    fn dihedral_stabilizer_orbits() {
        // The stabilizer of 0 in D4 is {id, (1 3)}: orbits {0}, {1,3}, {2}
        let stab = PermGroup::dihedral(4).stabilizer(0);
        let orbits = stab.orbits();
        assert_eq!(
            orbits,
            vec![
                BTreeSet::from([0]),
                BTreeSet::from([1, 3]),
                BTreeSet::from([2]),
            ]
        );
    }

    #[test]
    fn cyclic_stabilizer_is_trivial() {
        let stab = PermGroup::cyclic(5).stabilizer(0);
        assert!(stab.orbits().iter().all(|orb| orb.len() == 1));
    }

    #[test]
    fn symmetric_group_orbit() {
        let grp = PermGroup::symmetric(4);
        assert_eq!(grp.orbit(2), (0..4).collect());
        // Stabilizer of 0 still acts transitively on the rest
        let stab = grp.stabilizer(0);
        assert_eq!(stab.orbit(1), (1..4).collect());
        assert_eq!(stab.orbit(0), BTreeSet::from([0]));
    }

    #[test]
    fn trivial_group_has_singleton_orbits() {
        let grp = PermGroup::trivial((0..3).collect());
        assert_eq!(grp.orbits().len(), 3);
        assert_eq!(grp.stabilizer(1).orbits().len(), 3);
    }

    #[test]
    fn stabilizer_of_outside_point_is_whole_group() {
        let grp = PermGroup::cyclic(4);
        let stab = grp.stabilizer(99);
        assert_eq!(stab.orbits(), grp.orbits());
    }
}
