//! Weighted formulas and atom pools
//!
//! Clauses use the DIMACS convention: literals are non-zero signed integers,
//! variables are 1-indexed, and negation is by sign. Structured atoms map to
//! variables through an [`IdPool`], which keeps the mapping bidirectional and
//! stable for the lifetime of one formula-construction pass.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A disjunction of literals
pub type Clause = Vec<i32>;

/// Bidirectional mapping between structured atoms and positive variable ids.
///
/// Ids are allocated sequentially from 1 on first sight and are stable
/// thereafter, so clauses referencing the same semantic atom share the same
/// variable.
#[derive(Debug, Clone, Default)]
pub struct IdPool<A> {
    ids: FxHashMap<A, i32>,
    atoms: Vec<A>,
}

impl<A: Clone + Eq + Hash> IdPool<A> {
    /// Creates an empty pool
    pub fn new() -> Self {
        Self {
            ids: FxHashMap::default(),
            atoms: Vec::new(),
        }
    }

    /// Returns the id of `atom`, allocating one on first sight
    pub fn id(&mut self, atom: A) -> i32 {
        if let Some(&id) = self.ids.get(&atom) {
            return id;
        }
        self.atoms.push(atom.clone());
        let id = self.atoms.len() as i32;
        self.ids.insert(atom, id);
        id
    }

    /// Returns the id of `atom` if it has been allocated
    pub fn lookup(&self, atom: &A) -> Option<i32> {
        self.ids.get(atom).copied()
    }

    /// Returns the atom for an allocated id.
    ///
    /// Panics if `id` was never allocated by this pool: such a lookup is a
    /// programming error, not a recoverable condition.
    pub fn atom(&self, id: i32) -> &A {
        self.try_atom(id)
            .unwrap_or_else(|| panic!("atom id {} was never allocated in this pool", id))
    }

    /// Returns the atom for an id, or `None` if it was never allocated
    pub fn try_atom(&self, id: i32) -> Option<&A> {
        if id < 1 {
            return None;
        }
        self.atoms.get((id - 1) as usize)
    }

    /// Number of allocated atoms (equals the highest id)
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Iterates over `(id, atom)` pairs in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &A)> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| (i as i32 + 1, atom))
    }
}

/// A weighted partial formula: hard clauses that must be satisfied, and
/// weighted soft clauses whose total satisfied weight is to be maximized.
#[derive(Debug, Clone, Default)]
pub struct WeightedFormula {
    hard: Vec<Clause>,
    soft: Vec<(Clause, u64)>,
    num_vars: u32,
}

impl WeightedFormula {
    /// Creates an empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hard clause
    pub fn add_hard(&mut self, clause: Clause) {
        self.track_vars(&clause);
        self.hard.push(clause);
    }

    /// Adds all clauses from an iterator as hard clauses
    pub fn extend_hard(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.add_hard(clause);
        }
    }

    /// Adds a soft clause with a non-negative weight
    pub fn add_soft(&mut self, clause: Clause, weight: u64) {
        self.track_vars(&clause);
        self.soft.push((clause, weight));
    }

    /// The hard clauses
    pub fn hard(&self) -> &[Clause] {
        &self.hard
    }

    /// The soft clauses with their weights
    pub fn soft(&self) -> &[(Clause, u64)] {
        &self.soft
    }

    /// Highest variable referenced by any clause
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Total number of clauses
    pub fn num_clauses(&self) -> usize {
        self.hard.len() + self.soft.len()
    }

    /// Sum of all soft-clause weights
    pub fn total_soft_weight(&self) -> u64 {
        self.soft.iter().map(|(_, w)| w).sum()
    }

    fn track_vars(&mut self, clause: &[i32]) {
        for &lit in clause {
            debug_assert_ne!(lit, 0, "0 is not a valid literal");
            let var = lit.unsigned_abs();
            if var > self.num_vars {
                self.num_vars = var;
            }
        }
    }
}
