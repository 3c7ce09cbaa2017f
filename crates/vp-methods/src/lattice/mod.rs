//! Lattice methods for option pricing.
//!
//! * [`BinomialTree`]: recombining Cox-Ross-Rubinstein tree
//! * [`rollback`]: backward induction with optional early exercise
//!
//! The rollback keeps a single value vector of `steps + 1` entries and
//! overwrites it layer by layer: node `j` of layer `i` reads entries `j` and
//! `j + 1` of layer `i + 1`, and entry `j + 1` is only overwritten after node
//! `j` has been computed. Memory is O(steps), time O(steps²).

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use vp_core::{DiscountFactor, ExerciseStyle, Real};

/// Value an option by backward induction on a binomial tree.
///
/// # Arguments
/// * `tree`: the binomial tree (already constructed)
/// * `intrinsic`: exercise value `S → value` (e.g. `|s| (s - K).max(0.0)`);
///   it is the terminal payoff and, for American exercise, the value compared
///   against continuation at every interior node
/// * `discount`: per-step discount factor, typically `exp(−r · Δt)`
/// * `exercise`: European rolls back continuation only; American takes
///   `max(continuation, intrinsic)` at each node
pub fn rollback<F>(
    tree: &BinomialTree,
    intrinsic: F,
    discount: DiscountFactor,
    exercise: ExerciseStyle,
) -> Real
where
    F: Fn(Real) -> Real,
{
    let n = tree.steps();
    let early = exercise.allows_early_exercise();
    let pu = tree.probability(1);
    let pd = tree.probability(0);

    // Terminal values at maturity
    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|j| intrinsic(tree.underlying(n, j)))
        .collect();

    for i in (0..n).rev() {
        for j in 0..tree.size(i) {
            let up = values[tree.descendant(i, j, 1)];
            let down = values[tree.descendant(i, j, 0)];
            let continuation = discount * (pu * up + pd * down);
            values[j] = if early {
                continuation.max(intrinsic(tree.underlying(i, j)))
            } else {
                continuation
            };
        }
    }

    values[0]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
