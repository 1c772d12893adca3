//! Weighted partial MaxSAT by linear search over a SAT oracle
//!
//! Each soft clause receives a fresh relaxation variable; a sequential
//! weighted counter bounds the total weight of relaxed (violated) clauses.
//! The search asks the oracle for bound 0, 1, 2, ... with a fresh solver per
//! bound; the first satisfiable bound is the minimum violated weight, so the
//! maximum satisfied weight is the total soft weight minus it.

use super::counter::encode_weighted_at_most;
use super::SatSolver;
use crate::engine::rustsat_adapter::RustSatAdapter;
use crate::formula::WeightedFormula;
use crate::Result;
use rustsat_batsat::BasicSolver;
use std::marker::PhantomData;

/// A complete assignment to the variables of a [`WeightedFormula`].
///
/// Auxiliary variables introduced during solving are stripped; only the
/// formula's own variables are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Builds a model by reading the first `num_vars` variables off a solver
    /// in a satisfiable state
    pub fn from_solver<S: SatSolver>(solver: &S, num_vars: u32) -> Self {
        let values = (1..=num_vars).map(|v| solver.value_of(v)).collect();
        Self { values }
    }

    /// True iff the literal holds under this model.
    ///
    /// Literals over variables beyond the model's range are false when
    /// positive and true when negative.
    pub fn is_true(&self, lit: i32) -> bool {
        debug_assert_ne!(lit, 0, "0 is not a valid literal");
        let value = self
            .values
            .get((lit.unsigned_abs() - 1) as usize)
            .copied()
            .unwrap_or(false);
        if lit > 0 {
            value
        } else {
            !value
        }
    }

    /// Variables assigned true, in ascending order
    pub fn positive_vars(&self) -> impl Iterator<Item = u32> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(i, _)| i as u32 + 1)
    }

    /// Number of variables covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no variables are covered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outcome of a weighted solve
#[derive(Debug, Clone)]
pub enum MaxSatOutcome {
    /// The hard clauses are satisfiable; `model` maximizes the satisfied
    /// soft weight, which is `weight`
    Optimum {
        /// An optimal assignment over the formula's variables
        model: Model,
        /// Total weight of the soft clauses the model satisfies
        weight: u64,
    },
    /// The hard clauses alone are contradictory
    Unsat,
}

/// Capability to solve weighted partial MaxSAT
pub trait MaxSatSolver {
    /// Finds an assignment satisfying all hard clauses and maximizing the
    /// total weight of satisfied soft clauses
    fn solve(&mut self, formula: &WeightedFormula) -> Result<MaxSatOutcome>;
}

/// Linear-search MaxSAT over any [`SatSolver`] backend.
///
/// Spawns a fresh oracle per candidate bound, so backends need not support
/// incremental solving or assumption literals.
pub struct LinearSearch<S: SatSolver + Default = RustSatAdapter<BasicSolver>> {
    _backend: PhantomData<S>,
}

impl<S: SatSolver + Default> LinearSearch<S> {
    /// Creates a linear-search engine over backend `S`
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }

    fn hard_clauses_satisfiable(&self, formula: &WeightedFormula) -> bool {
        let mut solver = S::default();
        solver.add_variables(formula.num_vars());
        for clause in formula.hard() {
            solver.add_clause(clause);
        }
        solver.solve()
    }

    fn try_bound(&self, formula: &WeightedFormula, violated: u64) -> Option<Model> {
        let base_vars = formula.num_vars();
        let mut next_var = base_vars;
        let mut solver = S::default();

        for clause in formula.hard() {
            solver.add_clause(clause);
        }

        // Relax every soft clause; only positive weights enter the counter.
        let mut terms: Vec<(i32, u64)> = Vec::with_capacity(formula.soft().len());
        for (clause, weight) in formula.soft() {
            next_var += 1;
            let relax = next_var as i32;
            let mut relaxed = clause.clone();
            relaxed.push(relax);
            solver.add_clause(&relaxed);
            if *weight > 0 {
                terms.push((relax, *weight));
            }
        }

        for clause in encode_weighted_at_most(&terms, violated, &mut next_var) {
            solver.add_clause(&clause);
        }
        solver.add_variables(next_var);

        if solver.solve() {
            Some(Model::from_solver(&solver, base_vars))
        } else {
            None
        }
    }
}

impl<S: SatSolver + Default> Default for LinearSearch<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SatSolver + Default> MaxSatSolver for LinearSearch<S> {
    fn solve(&mut self, formula: &WeightedFormula) -> Result<MaxSatOutcome> {
        if !self.hard_clauses_satisfiable(formula) {
            return Ok(MaxSatOutcome::Unsat);
        }

        let total = formula.total_soft_weight();
        for violated in 0..=total {
            if let Some(model) = self.try_bound(formula, violated) {
                return Ok(MaxSatOutcome::Optimum {
                    model,
                    weight: total - violated,
                });
            }
        }
        // Bound == total relaxes every soft clause, and the hard clauses
        // were checked satisfiable above.
        unreachable!("hard-satisfiable formula must admit the trivial bound")
    }
}
