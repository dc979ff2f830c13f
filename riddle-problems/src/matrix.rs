//! Maximum sum of a square matrix after negating adjacent pairs.
//!
//! Negating two adjacent cells can be chained to move a minus sign anywhere
//! in the matrix, and two minus signs that meet cancel. So every negative can
//! be removed except, when their count is odd, exactly one, which is best
//! parked on the cell with the smallest absolute value.

use thiserror::Error;

/// Errors returned by [`max_matrix_sum`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("matrix has {rows} rows but row {row} has {len} columns")]
    NotSquare { rows: usize, row: usize, len: usize },
}

/// Returns the largest sum reachable by negating pairs of adjacent cells.
///
/// An empty matrix sums to zero. Sums are accumulated in `i64`.
///
/// # Errors
///
/// Returns [`Error::NotSquare`] unless every row is as long as the matrix
/// has rows.
///
/// # Example
///
/// ```
/// use riddle_problems::matrix::max_matrix_sum;
///
/// assert_eq!(max_matrix_sum(&[vec![1, -1], vec![-1, 1]]), Ok(4));
/// ```
pub fn max_matrix_sum(matrix: &[Vec<i32>]) -> Result<i64, Error> {
    let rows = matrix.len();

    let mut total = 0_i64;
    let mut negatives = 0_usize;
    let mut min_abs = i64::MAX;

    for (row, values) in matrix.iter().enumerate() {
        if values.len() != rows {
            return Err(Error::NotSquare {
                rows,
                row,
                len: values.len(),
            });
        }

        for &value in values {
            let abs = i64::from(value).abs();
            total += abs;
            min_abs = min_abs.min(abs);
            if value < 0 {
                negatives += 1;
            }
        }
    }

    if negatives % 2 == 1 {
        total -= 2 * min_abs;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_negatives_all_flip() {
        assert_eq!(max_matrix_sum(&[vec![1, -1], vec![-1, 1]]), Ok(4));
    }

    #[test]
    fn odd_negatives_keep_smallest() {
        let matrix = [vec![1, 2, 3], vec![-1, -2, -3], vec![1, 2, 3]];
        assert_eq!(max_matrix_sum(&matrix), Ok(16));
    }

    #[test]
    fn zero_absorbs_the_last_negative() {
        let matrix = [vec![-5, 0], vec![2, 3]];
        assert_eq!(max_matrix_sum(&matrix), Ok(10));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let matrix = [vec![i32::MIN, i32::MIN], vec![i32::MIN, i32::MAX]];
        let expected = 3 * (1_i64 << 31) + i64::from(i32::MAX);
        assert_eq!(max_matrix_sum(&matrix), Ok(expected - 2 * i64::from(i32::MAX)));
    }

    #[test]
    fn empty_matrix_sums_to_zero() {
        assert_eq!(max_matrix_sum(&[]), Ok(0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let matrix = [vec![1, 2], vec![3]];
        assert_eq!(
            max_matrix_sum(&matrix),
            Err(Error::NotSquare {
                rows: 2,
                row: 1,
                len: 1,
            })
        );
    }
}
