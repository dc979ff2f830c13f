/// Configuration for the bisection solver.
///
/// The solver stops when the bracket width drops below
/// `x_abs_tol + x_rel_tol * |mid|`, or, if `residual_tol` is set, when a
/// residual magnitude drops to or below it.
///
/// Leave `residual_tol` as `None` to find the leftmost crossing of a
/// non-decreasing function that touches zero on a whole interval: the
/// bracket then keeps shrinking toward the first point where the residual
/// becomes non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: Some(1e-12),
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a static reason naming the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_tolerance(self.x_abs_tol) {
            return Err("x_abs_tol must be finite and non-negative");
        }
        if !is_tolerance(self.x_rel_tol) {
            return Err("x_rel_tol must be finite and non-negative");
        }
        if self.residual_tol.is_some_and(|tol| !is_tolerance(tol)) {
            return Err("residual_tol must be finite and non-negative");
        }
        Ok(())
    }

    /// Returns true if `residual` satisfies the residual tolerance, if any.
    #[must_use]
    pub fn is_residual_converged(&self, residual: f64) -> bool {
        self.residual_tol.is_some_and(|tol| residual.abs() <= tol)
    }
}

fn is_tolerance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
