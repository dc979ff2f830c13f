use riddle_core::Snapshot;

use crate::equation::Evaluation;

/// Why the bisection solver returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    /// Best estimate of the root.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn from_eval(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        let [x] = eval.x;
        let [residual] = eval.residuals;
        Self {
            status,
            x,
            residual,
            snapshot: eval.snapshot,
            iters,
        }
    }
}
