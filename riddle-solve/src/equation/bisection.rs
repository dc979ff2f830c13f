mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::Sign;
pub use config::Config;
pub use error::{Error, EvalStage};
pub use solution::{Solution, Status};

use riddle_core::Model;
use tracing::{debug, trace};

use crate::equation::{EquationProblem, Evaluation, Observer, evaluate};

use bracket::{Bounds, Bracket};

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the best evaluation seen so far.
    StopEarly,
}

/// Iteration event emitted by the bisection solver.
pub struct Event<'a, I, O> {
    /// Iteration counter (1-based within the bisection loop).
    pub iter: usize,
    /// Bracket the midpoint was taken from.
    pub bracket: [f64; 2],
    /// Evaluation at the bracket midpoint.
    pub eval: &'a Evaluation<I, O, 1>,
}

/// Finds a root of a single-variable equation by bisection.
///
/// Both bracket endpoints are evaluated first and must have residuals of
/// opposite sign (zero counts as positive). Each iteration then evaluates the
/// midpoint, reports it to `observer`, and keeps the half whose endpoints
/// still differ in sign.
///
/// # Errors
///
/// Returns an error if the bracket or config is invalid, if the endpoints do
/// not bracket a root, if any residual is non-finite, or if the model or
/// problem fails during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_eval = evaluate_finite(model, problem, left)?;
    if config.is_residual_converged(left_eval.residuals[0]) {
        return Ok(Solution::from_eval(left_eval, Status::Converged, 0));
    }

    let right_eval = evaluate_finite(model, problem, right)?;
    if config.is_residual_converged(right_eval.residuals[0]) {
        return Ok(Solution::from_eval(right_eval, Status::Converged, 0));
    }

    let mut bracket = Bracket::new(bounds, left_eval.residuals[0], right_eval.residuals[0])?;

    let mut best = if left_eval.residuals[0].abs() <= right_eval.residuals[0].abs() {
        left_eval
    } else {
        right_eval
    };

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        let mid_eval = evaluate_finite(model, problem, mid)?;
        let residual = mid_eval.residuals[0];
        trace!(iter, x = mid, residual, "bisection step");

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            eval: &mid_eval,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(iter, "bisection stopped by observer");
            if residual.abs() < best.residuals[0].abs() {
                best = mid_eval;
            }
            return Ok(Solution::from_eval(best, Status::StoppedByObserver, iter));
        }

        if bracket.is_x_converged(config.x_abs_tol, config.x_rel_tol)
            || config.is_residual_converged(residual)
        {
            debug!(iter, x = mid, residual, "bisection converged");
            return Ok(Solution::from_eval(mid_eval, Status::Converged, iter));
        }

        bracket.shrink(mid, Sign::of(residual));

        if residual.abs() < best.residuals[0].abs() {
            best = mid_eval;
        }
    }

    debug!(
        max_iters = config.max_iters,
        x = best.x[0],
        "bisection hit the iteration limit"
    );
    Ok(Solution::from_eval(best, Status::MaxIters, config.max_iters))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

fn evaluate_finite<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x])?;
    let residual = eval.residuals[0];
    if residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}
