//! Minimum number of boxes needed to hold every apple.
//!
//! Apples from any pack may be split across boxes, so only the total demand
//! matters. Taking the largest remaining box first is optimal: swapping any
//! chosen box for a larger unchosen one never increases the count.
//!
//! Two strategies are provided:
//!
//! - [`minimum_boxes_sorted`] sorts capacities in descending order and scans.
//! - [`minimum_boxes_counted`] buckets capacities by value, which is cheap
//!   because capacities lie in `1..=50`, and takes whole buckets at a time.
//!
//! # Example
//!
//! ```
//! use riddle_problems::boxes::{Method, minimum_boxes_counted};
//!
//! assert_eq!(minimum_boxes_counted(&[1, 3, 2], &[4, 3, 1, 5, 2]), Ok(2));
//!
//! for method in Method::ALL {
//!     assert_eq!(method.solve(&[5, 5, 5], &[2, 4, 2, 7]), Ok(4));
//! }
//! ```

use riddle_core::constraint::{Constrained, Constraint, ConstraintError};
use thiserror::Error;
use tracing::{debug, trace};

/// Smallest capacity a box may have.
pub const MIN_CAPACITY: u32 = 1;

/// Largest capacity a box may have.
pub const MAX_CAPACITY: u32 = 50;

/// Marker constraint for box capacities in `MIN_CAPACITY..=MAX_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapacityRange;

impl Constraint<u32> for CapacityRange {
    fn check(value: &u32) -> Result<(), ConstraintError> {
        if *value < MIN_CAPACITY {
            Err(ConstraintError::BelowMinimum)
        } else if *value > MAX_CAPACITY {
            Err(ConstraintError::AboveMaximum)
        } else {
            Ok(())
        }
    }
}

/// A validated box capacity.
pub type BoxCapacity = Constrained<u32, CapacityRange>;

/// Errors returned by the box-counting strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("capacity[{index}] = {value} is outside 1..=50")]
    Capacity {
        index: usize,
        value: u32,
        #[source]
        source: ConstraintError,
    },

    #[error("boxes hold {available} apples in total but {demand} need packing")]
    Infeasible { demand: u64, available: u64 },
}

/// The available box-counting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Sorted,
    Counted,
}

impl Method {
    /// Every strategy, in declaration order.
    pub const ALL: [Method; 2] = [Method::Sorted, Method::Counted];

    /// A short human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Sorted => "sort and scan",
            Method::Counted => "frequency buckets",
        }
    }

    /// Runs this strategy.
    ///
    /// # Errors
    ///
    /// See [`minimum_boxes_sorted`].
    pub fn solve(self, apple: &[u32], capacity: &[u32]) -> Result<usize, Error> {
        match self {
            Method::Sorted => minimum_boxes_sorted(apple, capacity),
            Method::Counted => minimum_boxes_counted(apple, capacity),
        }
    }
}

/// Counts boxes by sorting capacities from largest to smallest.
///
/// Runs in `O(n + m log m)` for `n` packs and `m` boxes.
///
/// # Errors
///
/// Returns [`Error::Capacity`] for a capacity outside `1..=50` and
/// [`Error::Infeasible`] if all boxes together cannot hold the apples.
pub fn minimum_boxes_sorted(apple: &[u32], capacity: &[u32]) -> Result<usize, Error> {
    let demand = total_demand(apple);

    let mut sorted = capacity
        .iter()
        .enumerate()
        .map(|(index, &value)| validate(index, value).map(Constrained::into_inner))
        .collect::<Result<Vec<u32>, Error>>()?;

    let available = sorted.iter().copied().map(u64::from).sum();
    ensure_feasible(demand, available)?;

    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut packed = 0;
    for (used, &c) in sorted.iter().enumerate() {
        if packed >= demand {
            return Ok(used);
        }
        packed += u64::from(c);
    }

    Ok(sorted.len())
}

/// Counts boxes by bucketing capacities, avoiding a full sort.
///
/// Buckets are consumed from the largest capacity down. From each bucket it
/// takes `min(ceil(remaining / c), available)` boxes at once. Runs in
/// `O(n + m + MAX_CAPACITY)`.
///
/// # Errors
///
/// Same as [`minimum_boxes_sorted`].
pub fn minimum_boxes_counted(apple: &[u32], capacity: &[u32]) -> Result<usize, Error> {
    let demand = total_demand(apple);

    let mut counts = [0_usize; MAX_CAPACITY as usize + 1];
    let mut largest = 0;
    let mut available = 0;
    for (index, &value) in capacity.iter().enumerate() {
        let c = validate(index, value)?.into_inner();
        counts[c as usize] += 1;
        largest = largest.max(c);
        available += u64::from(c);
    }
    ensure_feasible(demand, available)?;

    let mut remaining = demand;
    let mut used = 0;
    for c in (MIN_CAPACITY..=largest).rev() {
        if remaining == 0 {
            break;
        }

        let count = counts[c as usize];
        if count == 0 {
            continue;
        }

        let needed = remaining.div_ceil(u64::from(c));
        let take = usize::try_from(needed).map_or(count, |needed| needed.min(count));
        trace!(capacity = c, take, remaining, "taking boxes from bucket");

        remaining = remaining.saturating_sub(u64::from(c) * take as u64);
        used += take;
    }

    Ok(used)
}

fn total_demand(apple: &[u32]) -> u64 {
    apple.iter().copied().map(u64::from).sum()
}

fn validate(index: usize, value: u32) -> Result<BoxCapacity, Error> {
    BoxCapacity::new(value).map_err(|source| Error::Capacity {
        index,
        value,
        source,
    })
}

fn ensure_feasible(demand: u64, available: u64) -> Result<(), Error> {
    if available < demand {
        debug!(demand, available, "not enough box capacity");
        return Err(Error::Infeasible { demand, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_methods(apple: &[u32], capacity: &[u32]) -> Vec<Result<usize, Error>> {
        Method::ALL
            .iter()
            .map(|method| method.solve(apple, capacity))
            .collect()
    }

    fn check(apple: &[u32], capacity: &[u32], expected: usize) {
        for method in Method::ALL {
            assert_eq!(
                method.solve(apple, capacity),
                Ok(expected),
                "{} disagrees",
                method.name()
            );
        }
    }

    #[test]
    fn two_largest_boxes_suffice() {
        check(&[1, 3, 2], &[4, 3, 1, 5, 2], 2);
    }

    #[test]
    fn every_box_is_needed() {
        check(&[5, 5, 5], &[2, 4, 2, 7], 4);
    }

    #[test]
    fn single_large_box() {
        check(&[10], &[50], 1);
    }

    #[test]
    fn many_equal_small_boxes() {
        check(&[10, 10, 10], &[5, 5, 5, 5, 5, 5], 6);
    }

    #[test]
    fn exact_fit() {
        check(&[10, 20], &[15, 15], 2);
    }

    #[test]
    fn bucket_is_only_partly_used() {
        // Three 7s cover 20, the fourth 7 and the 3 stay unused.
        check(&[20], &[7, 3, 7, 7, 7], 3);
    }

    #[test]
    fn no_demand_needs_no_boxes() {
        check(&[], &[], 0);
        check(&[0, 0], &[3, 9], 0);
    }

    #[test]
    fn rejects_out_of_range_capacity() {
        for result in all_methods(&[1], &[4, 0, 5]) {
            assert_eq!(
                result,
                Err(Error::Capacity {
                    index: 1,
                    value: 0,
                    source: ConstraintError::BelowMinimum,
                })
            );
        }

        for result in all_methods(&[1], &[51]) {
            assert!(matches!(
                result,
                Err(Error::Capacity {
                    source: ConstraintError::AboveMaximum,
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_insufficient_capacity() {
        for result in all_methods(&[30, 30], &[50]) {
            assert_eq!(
                result,
                Err(Error::Infeasible {
                    demand: 60,
                    available: 50,
                })
            );
        }
        for result in all_methods(&[1], &[]) {
            assert!(matches!(result, Err(Error::Infeasible { .. })));
        }
    }

    #[test]
    fn large_demand_does_not_overflow() {
        let apple = vec![u32::MAX; 4];
        let capacity = vec![MAX_CAPACITY; 1];
        for result in all_methods(&apple, &capacity) {
            assert!(matches!(result, Err(Error::Infeasible { .. })));
        }
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = minimum_boxes_sorted(&[1], &[60]).unwrap_err();
        assert_eq!(err.to_string(), "capacity[0] = 60 is outside 1..=50");

        let err = minimum_boxes_counted(&[9], &[4]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "boxes hold 4 apples in total but 9 need packing"
        );
    }
}
