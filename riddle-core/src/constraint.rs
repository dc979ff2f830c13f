//! Numeric invariants checked once, at construction.
//!
//! A [`Constrained<T, C>`] can only be built from a value that passes the
//! marker's [`Constraint::check`], so functions taking one never re-validate.
//!
//! # Provided Constraints
//!
//! - [`NonNegative`]: zero or greater
//! - [`StrictlyPositive`]: greater than zero
//!
//! # Extending
//!
//! Puzzle inputs often carry their own bounds (a box capacity in `1..=50`,
//! for instance). Implement [`Constraint<T>`] on a zero-sized marker type and
//! use it with [`Constrained`] like any provided constraint.

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value of type `T` known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use riddle_core::constraint::{Constrained, StrictlyPositive};
///
/// let side = Constrained::<_, StrictlyPositive>::new(3).unwrap();
/// assert_eq!(side.into_inner(), 3);
///
/// assert!(Constrained::<_, StrictlyPositive>::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
