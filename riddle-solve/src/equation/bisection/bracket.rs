use super::Error;

/// The sign of a residual for bracket logic.
///
/// Zero counts as positive, so a bracket whose left end is negative
/// collapses onto the first point where the residual reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Ordered, finite, non-degenerate bracket endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, Error> {
        let [a, b] = bracket;

        if let Some(value) = [a, b].into_iter().find(|v| !v.is_finite()) {
            return Err(Error::NonFiniteBracket { value });
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(Error::ZeroWidthBracket { value: a });
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }

    pub(super) fn as_array(self) -> [f64; 2] {
        [self.left, self.right]
    }
}

/// Current bracket bounds and the residual sign at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// Creates a bracket from evaluated endpoints.
    ///
    /// Fails with [`Error::NoBracket`] unless the residual signs differ.
    pub(super) fn new(
        bounds: Bounds,
        left_residual: f64,
        right_residual: f64,
    ) -> Result<Self, Error> {
        let [left, right] = bounds.as_array();
        let left_sign = Sign::of(left_residual);

        if left_sign == Sign::of(right_residual) {
            return Err(Error::NoBracket {
                left,
                right,
                left_residual,
                right_residual,
            });
        }

        Ok(Self {
            left,
            right,
            left_sign,
        })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns true if the bracket width satisfies the x tolerances, or if
    /// the endpoints are adjacent floats and the bracket cannot shrink.
    pub(super) fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        let mid = self.midpoint();
        mid <= self.left
            || mid >= self.right
            || self.right - self.left <= x_abs_tol + x_rel_tol * mid.abs()
    }

    /// Replaces whichever endpoint shares the sign of the new point.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if sign == self.left_sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn zero_is_positive() {
        assert_eq!(Sign::of(0.0), Sign::Positive);
        assert_eq!(Sign::of(-0.0), Sign::Positive);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
    }

    #[test]
    fn bounds_reorders_endpoints() {
        let [left, right] = Bounds::new([3.0, 1.0]).unwrap().as_array();
        assert_relative_eq!(left, 1.0);
        assert_relative_eq!(right, 3.0);
    }

    #[test]
    fn bounds_rejects_degenerate_input() {
        assert!(matches!(
            Bounds::new([f64::NAN, 1.0]),
            Err(Error::NonFiniteBracket { .. })
        ));
        assert!(matches!(
            Bounds::new([0.0, f64::NEG_INFINITY]),
            Err(Error::NonFiniteBracket { .. })
        ));
        assert!(matches!(
            Bounds::new([2.0, 2.0]),
            Err(Error::ZeroWidthBracket { .. })
        ));
    }

    #[test]
    fn bracket_requires_sign_change() {
        let bounds = Bounds::new([0.0, 1.0]).unwrap();
        assert!(matches!(
            Bracket::new(bounds, 0.0, 2.0),
            Err(Error::NoBracket { .. })
        ));
    }

    #[test]
    fn shrink_moves_matching_endpoint() {
        let bounds = Bounds::new([0.0, 4.0]).unwrap();
        let mut bracket = Bracket::new(bounds, -1.0, 1.0).unwrap();

        bracket.shrink(2.0, Sign::Negative);
        assert_eq!(bracket.as_array(), [2.0, 4.0]);

        bracket.shrink(3.0, Sign::Positive);
        assert_eq!(bracket.as_array(), [2.0, 3.0]);
        assert_relative_eq!(bracket.midpoint(), 2.5);
        assert!(bracket.is_x_converged(1.0, 0.0));
        assert!(!bracket.is_x_converged(0.5, 0.0));
    }

    #[test]
    fn adjacent_floats_are_converged() {
        let left: f64 = 1.5e9;
        let right = f64::from_bits(left.to_bits() + 1);
        let bounds = Bounds::new([left, right]).unwrap();
        let bracket = Bracket::new(bounds, -1.0, 1.0).unwrap();

        // The gap near 1.5e9 is about 2.4e-7, wider than the tolerance.
        assert!(right - left > 1e-7);
        assert!(bracket.is_x_converged(1e-7, 0.0));
    }
}
