//! Puzzle solutions.
//!
//! Each module solves one puzzle and exposes every strategy as a free
//! function, plus a `Method` enum naming them so callers can compare
//! strategies side by side.

pub mod boxes;
pub mod matrix;
pub mod squares;
