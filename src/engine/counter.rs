//! Sequential weighted counter encoding
//!
//! CNF encoding of the pseudo-boolean constraint `Σ wᵢ·xᵢ ≤ k` used by the
//! linear MaxSAT search to bound the total weight of violated soft clauses.
//!
//! Register variable `s[i][j]` (0-based `j`) reads "the weighted sum of the
//! first `i+1` terms is at least `j+1`". Registers are set from below by
//! implication only, so a satisfying assignment exists exactly when the sum
//! respects the bound.

use crate::formula::Clause;

/// Emits clauses enforcing `Σ wᵢ·xᵢ ≤ bound` over the given `(literal,
/// weight)` terms, allocating auxiliary variables from `next_var`.
///
/// Terms of weight 0 are ignored; if the total weight already respects the
/// bound, no clauses are emitted.
pub fn encode_weighted_at_most(
    terms: &[(i32, u64)],
    bound: u64,
    next_var: &mut u32,
) -> Vec<Clause> {
    let terms: Vec<(i32, u64)> = terms.iter().copied().filter(|&(_, w)| w > 0).collect();
    let mut clauses = Vec::new();

    let total: u64 = terms.iter().map(|&(_, w)| w).sum();
    if total <= bound {
        return clauses;
    }
    if bound == 0 {
        for &(lit, _) in &terms {
            clauses.push(vec![-lit]);
        }
        return clauses;
    }

    let k = bound as usize;
    let n = terms.len();

    // One register row per term.
    let mut reg = vec![vec![0i32; k]; n];
    for row in reg.iter_mut() {
        for slot in row.iter_mut() {
            *next_var += 1;
            *slot = *next_var as i32;
        }
    }

    for (i, &(x, w)) in terms.iter().enumerate() {
        let w = w.min(bound + 1) as usize;

        // x alone pushes the prefix sum to at least w.
        for j in 0..w.min(k) {
            clauses.push(vec![-x, reg[i][j]]);
        }

        if i == 0 {
            if w > k {
                clauses.push(vec![-x]);
            }
            continue;
        }

        // Carry the previous prefix forward.
        for j in 0..k {
            clauses.push(vec![-reg[i - 1][j], reg[i][j]]);
        }
        // Adding x on top of a prefix of at least j+1 gives at least j+1+w.
        for j in 0..k {
            let lifted = j + w;
            if lifted < k {
                clauses.push(vec![-x, -reg[i - 1][j], reg[i][lifted]]);
            }
        }
        // Overflow: a prefix of at least k+1-w plus x would exceed the bound.
        if w > k {
            clauses.push(vec![-x]);
        } else {
            clauses.push(vec![-x, -reg[i - 1][k - w]]);
        }
    }

    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rustsat_adapter::RustSatAdapter;
    use crate::engine::SatSolver;

    /// Checks satisfiability of the counter clauses with the given terms
    /// forced to the given polarities.
    fn satisfiable(terms: &[(i32, u64)], bound: u64, forced: &[i32]) -> bool {
        let mut next_var = terms.iter().map(|&(l, _)| l.unsigned_abs()).max().unwrap_or(0);
        let clauses = encode_weighted_at_most(terms, bound, &mut next_var);
        let mut solver = RustSatAdapter::default();
        solver.add_variables(next_var);
        for clause in &clauses {
            solver.add_clause(clause);
        }
        for &lit in forced {
            solver.add_clause(&[lit]);
        }
        solver.solve()
    }

    #[test]
    fn trivial_bound_emits_nothing() {
        let mut next_var = 3;
        let clauses = encode_weighted_at_most(&[(1, 1), (2, 1), (3, 1)], 3, &mut next_var);
        assert!(clauses.is_empty());
        assert_eq!(next_var, 3);
    }

    #[test]
    fn zero_bound_forces_all_off() {
        let mut next_var = 2;
        let clauses = encode_weighted_at_most(&[(1, 1), (2, 5)], 0, &mut next_var);
        assert_eq!(clauses, vec![vec![-1], vec![-2]]);
    }

    #[test]
    fn at_most_one_of_three() {
        let terms = [(1, 1), (2, 1), (3, 1)];
        assert!(satisfiable(&terms, 1, &[]));
        assert!(satisfiable(&terms, 1, &[2]));
        assert!(!satisfiable(&terms, 1, &[1, 2]));
        assert!(!satisfiable(&terms, 1, &[2, 3]));
        assert!(!satisfiable(&terms, 1, &[1, 3]));
    }

    #[test]
    fn weighted_bound() {
        // weights 2, 3, 4 with bound 5: {2,3} fits, {3,4} and {2,4} overflow
        let terms = [(1, 2), (2, 3), (3, 4)];
        assert!(satisfiable(&terms, 5, &[1, 2]));
        assert!(!satisfiable(&terms, 5, &[2, 3]));
        assert!(!satisfiable(&terms, 5, &[1, 3]));
        assert!(!satisfiable(&terms, 5, &[1, 2, 3]));
    }

    #[test]
    fn oversized_single_weight_is_forbidden() {
        let terms = [(1, 7), (2, 1)];
        assert!(satisfiable(&terms, 3, &[2]));
        assert!(!satisfiable(&terms, 3, &[1]));
    }

    #[test]
    fn zero_weight_terms_are_ignored() {
        let terms = [(1, 0), (2, 1)];
        assert!(satisfiable(&terms, 1, &[1, 2]));
        let mut next_var = 2;
        let clauses = encode_weighted_at_most(&terms, 1, &mut next_var);
        assert!(clauses.is_empty());
    }
}
