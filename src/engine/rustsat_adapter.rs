//! Adapter for rustsat solver backends
//!
//! Wraps any rustsat-compatible solver behind the crate's [`SatSolver`]
//! trait. The default backend throughout the crate is batsat.

use super::SatSolver;
use rustsat_batsat::BasicSolver;

/// Adapter that wraps rustsat solvers to implement [`SatSolver`]
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
}

impl<S> RustSatAdapter<S> {
    /// Creates a new adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
        }
    }
}

impl Default for RustSatAdapter<BasicSolver> {
    fn default() -> Self {
        Self::new(BasicSolver::default())
    }
}

impl<S: rustsat::solvers::Solve> SatSolver for RustSatAdapter<S> {
    fn add_variables(&mut self, num_vars: u32) {
        // rustsat backends create variables on demand as clauses arrive;
        // the count is tracked only for the trait interface.
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        use rustsat::types::{Clause, Lit, Var};

        let lits_vec: Vec<Lit> = lits
            .iter()
            .map(|&lit| {
                let var_idx = (lit.abs() - 1) as u32;
                assert!(
                    var_idx <= Var::MAX_IDX,
                    "variable index {} exceeds backend maximum {}",
                    var_idx,
                    Var::MAX_IDX
                );
                let var = Var::new(var_idx);
                if lit > 0 {
                    var.pos_lit()
                } else {
                    var.neg_lit()
                }
            })
            .collect();

        let clause = Clause::from(&lits_vec[..]);
        self.solver.add_clause(clause).is_ok()
    }

    fn solve(&mut self) -> bool {
        use rustsat::solvers::SolverResult;
        matches!(self.solver.solve(), Ok(SolverResult::Sat))
    }

    fn value_of(&self, var: u32) -> bool {
        use rustsat::types::{TernaryVal, Var};
        if var == 0 || var > self.num_vars {
            return false;
        }
        let v = Var::new(var - 1);
        match self.solver.solution(v) {
            Ok(assignment) => matches!(assignment.var_value(v), TernaryVal::True),
            Err(_) => false,
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batsat_basic_sat() {
        let mut solver = RustSatAdapter::default();
        solver.add_variables(2);
        assert!(solver.add_clause(&[1, 2]));
        assert!(solver.solve());
    }

    #[test]
    fn batsat_unsat() {
        let mut solver = RustSatAdapter::default();
        solver.add_variables(1);
        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);
        assert!(!solver.solve());
    }

    #[test]
    fn batsat_model_values() {
        let mut solver = RustSatAdapter::default();
        solver.add_variables(2);
        solver.add_clause(&[1]);
        solver.add_clause(&[-2]);
        assert!(solver.solve());
        assert!(solver.value_of(1));
        assert!(!solver.value_of(2));
    }
}
