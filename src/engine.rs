//! SAT and weighted-SAT solving backends
//!
//! The core consumes plain SAT through the [`SatSolver`] trait and weighted
//! solving through [`maxsat::MaxSatSolver`]; any correct backend is
//! substitutable behind either trait.

pub mod counter;
pub mod maxsat;
pub mod rustsat_adapter;

/// Core SAT solver trait.
///
/// Variables are 1-indexed; literals are signed integers, negated by sign.
pub trait SatSolver {
    /// Adds the given number of variables to the solver
    fn add_variables(&mut self, num_vars: u32);

    /// Adds a clause; returns false if the backend rejected it
    fn add_clause(&mut self, lits: &[i32]) -> bool;

    /// Solves the current formula; true iff satisfiable
    fn solve(&mut self) -> bool;

    /// Returns a variable's assignment. Only valid after `solve()` returned
    /// true.
    fn value_of(&self, var: u32) -> bool;

    /// Number of variables added
    fn num_variables(&self) -> u32;
}
