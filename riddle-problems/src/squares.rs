//! The lowest horizontal line splitting a set of squares into equal areas.
//!
//! Each square is given by its bottom-left corner and side length. Overlaps
//! count twice. The area below a line at height `h` is
//! [`area_below`], which is continuous, piecewise linear and non-decreasing
//! in `h`. That monotonicity is what every strategy here relies on:
//!
//! - [`sweep_bisect`] scans the sorted square edges until the area below an
//!   edge reaches half the total, then bisects that one interval.
//! - [`binary_search`] bisects the whole vertical extent of the input.
//! - [`event_sweep`] sweeps edge events while tracking the total width of
//!   squares cut by the line, and solves the final interval exactly.
//!
//! # Example
//!
//! ```
//! use approx::assert_abs_diff_eq;
//! use riddle_problems::squares::{Config, Method, Square};
//!
//! let squares = [Square::new(0, 0, 2)?, Square::new(1, 1, 1)?];
//!
//! for method in Method::ALL {
//!     let y = method.solve(&squares, &Config::default())?;
//!     assert_abs_diff_eq!(y, 7.0 / 6.0, epsilon = 1e-5);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::convert::Infallible;

use riddle_core::{
    Model,
    constraint::{ConstraintError, NonNegative, StrictlyPositive},
};
use riddle_solve::equation::{
    EquationProblem,
    bisection::{self, Status},
};
use thiserror::Error;
use tracing::debug;

/// An axis-aligned square.
///
/// With the `serde` feature it (de)serializes as an `[x, y, side]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[i64; 3]", into = "[i64; 3]")
)]
pub struct Square {
    x: i64,
    y: i64,
    side: i64,
}

impl Square {
    /// Creates a square with bottom-left corner `(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails unless `side` is strictly positive.
    pub fn new(x: i64, y: i64, side: i64) -> Result<Self, ConstraintError> {
        let side = StrictlyPositive::new(side)?.into_inner();
        Ok(Self { x, y, side })
    }

    #[must_use]
    pub fn x(&self) -> i64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i64 {
        self.y
    }

    #[must_use]
    pub fn side(&self) -> i64 {
        self.side
    }

    /// Height of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y as f64
    }

    /// Height of the top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bottom() + self.width()
    }

    /// Side length as a float.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.side as f64
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.width()
    }

    /// Area of this square lying below the line at height `h`.
    #[must_use]
    pub fn area_below(&self, h: f64) -> f64 {
        if h <= self.bottom() {
            0.0
        } else if h >= self.top() {
            self.area()
        } else {
            self.width() * (h - self.bottom())
        }
    }
}

impl TryFrom<[i64; 3]> for Square {
    type Error = ConstraintError;

    fn try_from([x, y, side]: [i64; 3]) -> Result<Self, Self::Error> {
        Self::new(x, y, side)
    }
}

impl From<Square> for [i64; 3] {
    fn from(square: Square) -> Self {
        [square.x, square.y, square.side]
    }
}

/// Total area of all squares lying below the line at height `h`.
#[must_use]
pub fn area_below(squares: &[Square], h: f64) -> f64 {
    squares.iter().map(|square| square.area_below(h)).sum()
}

/// Sum of the areas of all squares.
#[must_use]
pub fn total_area(squares: &[Square]) -> f64 {
    squares.iter().map(Square::area).sum()
}

/// Tuning for the bisection-based strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Bisection stops once its bracket is no wider than this.
    pub x_tol: f64,
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x_tol: 1e-7,
            max_iters: 200,
        }
    }
}

impl Config {
    /// Checks that `x_tol` is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTolerance`] otherwise.
    pub fn validate(&self) -> Result<(), Error> {
        let value = self.x_tol;
        NonNegative::new(value).map_err(|source| Error::InvalidTolerance { value, source })?;
        if value.is_infinite() {
            return Err(Error::InvalidTolerance {
                value,
                source: ConstraintError::AboveMaximum,
            });
        }
        Ok(())
    }

    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.x_tol,
            x_rel_tol: 4.0 * f64::EPSILON,
            residual_tol: None,
        }
    }
}

/// Errors returned by the line-finding strategies.
#[derive(Debug, Error)]
pub enum Error {
    #[error("at least one square is required")]
    Empty,

    #[error("x_tol = {value} is not a usable tolerance")]
    InvalidTolerance {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("bisection did not converge within {iters} iterations (best x = {x})")]
    NotConverged { iters: usize, x: f64 },

    #[error("bisection failed")]
    Solver(#[from] bisection::Error),
}

/// The available line-finding strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SweepBisect,
    BinarySearch,
    EventSweep,
}

impl Method {
    /// Every strategy, in declaration order.
    pub const ALL: [Method; 3] = [Method::SweepBisect, Method::BinarySearch, Method::EventSweep];

    /// A short human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::SweepBisect => "edge sweep + bisection",
            Method::BinarySearch => "binary search",
            Method::EventSweep => "event sweep",
        }
    }

    /// Runs this strategy. `config` is ignored by [`Method::EventSweep`].
    ///
    /// # Errors
    ///
    /// See the individual strategy functions.
    pub fn solve(self, squares: &[Square], config: &Config) -> Result<f64, Error> {
        match self {
            Method::SweepBisect => sweep_bisect(squares, config),
            Method::BinarySearch => binary_search(squares, config),
            Method::EventSweep => event_sweep(squares),
        }
    }
}

/// Maps a line height to the total square area below it.
#[derive(Debug, Clone, Copy)]
pub struct AreaBelow<'a> {
    squares: &'a [Square],
}

impl<'a> AreaBelow<'a> {
    #[must_use]
    pub fn new(squares: &'a [Square]) -> Self {
        Self { squares }
    }
}

impl Model for AreaBelow<'_> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, h: &f64) -> Result<f64, Self::Error> {
        Ok(area_below(self.squares, *h))
    }
}

/// Drives the area below a line to a fixed target.
///
/// The residual is `area - target`.
#[derive(Debug, Clone, Copy)]
pub struct HalfArea {
    target: f64,
}

impl HalfArea {
    /// Targets half the total area of `squares`.
    #[must_use]
    pub fn of(squares: &[Square]) -> Self {
        Self {
            target: total_area(squares) / 2.0,
        }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl EquationProblem<1> for HalfArea {
    type Input = f64;
    type Output = f64;
    type InputError = Infallible;
    type ResidualError = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::InputError> {
        Ok(x[0])
    }

    fn residuals(&self, _h: &f64, area: &f64) -> Result<[f64; 1], Self::ResidualError> {
        Ok([area - self.target])
    }
}

/// Scans sorted square edges, then bisects the interval where half the area is reached.
///
/// Every edge evaluation costs `O(n)`, so the scan is `O(n²)` in the worst case.
///
/// # Errors
///
/// Returns [`Error::Empty`] for no squares, [`Error::InvalidTolerance`] for a
/// bad config, and [`Error::NotConverged`] if bisection runs out of iterations.
pub fn sweep_bisect(squares: &[Square], config: &Config) -> Result<f64, Error> {
    config.validate()?;
    let problem = half_area(squares)?;
    let target = problem.target();

    let mut edges: Vec<f64> = squares
        .iter()
        .flat_map(|square| [square.bottom(), square.top()])
        .collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    // Every square is thinner than the float spacing at its height.
    if let [edge] = edges[..] {
        return Ok(edge);
    }

    // The area below the lowest edge is zero, so the crossing lies in some
    // later interval; fall back to the full extent if rounding hides it.
    let full = [edges[0], edges[edges.len() - 1]];
    let bracket = edges
        .windows(2)
        .map(|pair| [pair[0], pair[1]])
        .find(|&[_, high]| area_below(squares, high) >= target)
        .unwrap_or(full);
    debug!(low = bracket[0], high = bracket[1], target, "found crossing interval");

    bisect(squares, &problem, bracket, config)
}

/// Bisects directly over `[min bottom, max top]`.
///
/// Costs `O(n log(extent / x_tol))`.
///
/// # Errors
///
/// Same as [`sweep_bisect`].
pub fn binary_search(squares: &[Square], config: &Config) -> Result<f64, Error> {
    config.validate()?;
    let problem = half_area(squares)?;

    let (low, high) = squares
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), square| {
            (low.min(square.bottom()), high.max(square.top()))
        });
    if high <= low {
        return Ok(low);
    }

    bisect(squares, &problem, [low, high], config)
}

/// Sweeps square edges upward and solves the final interval analytically.
///
/// Between consecutive edges the area below the line grows linearly at a
/// rate equal to the summed side lengths of the squares being cut. Once the
/// accumulated area reaches the target, the overshoot is divided by that
/// rate and backed off. Costs `O(n log n)` for the sort.
///
/// # Errors
///
/// Returns [`Error::Empty`] for no squares.
pub fn event_sweep(squares: &[Square]) -> Result<f64, Error> {
    let target = half_area(squares)?.target();

    let mut edges: Vec<Edge> = squares
        .iter()
        .flat_map(|square| {
            [
                Edge::new(square.bottom(), square.width(), EdgeKind::Start),
                Edge::new(square.top(), square.width(), EdgeKind::End),
            ]
        })
        .collect();
    edges.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.kind.cmp(&b.kind)));

    let mut prev = edges[0].y;
    let mut area = 0.0;
    let mut active_width = 0.0;

    for edge in &edges {
        let dy = edge.y - prev;
        if dy > 0.0 {
            area += active_width * dy;
        }

        if area >= target {
            if active_width > 0.0 && dy > 0.0 {
                return Ok(edge.y - (area - target) / active_width);
            }
            return Ok(edge.y);
        }

        match edge.kind {
            EdgeKind::Start => active_width += edge.width,
            EdgeKind::End => active_width -= edge.width,
        }
        prev = edge.y;
    }

    Ok(prev)
}

/// Whether the sweep line enters or leaves a square.
///
/// `End` sorts first so a square closing at the same height another opens
/// is never counted as active past that height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EdgeKind {
    End,
    Start,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    y: f64,
    width: f64,
    kind: EdgeKind,
}

impl Edge {
    fn new(y: f64, width: f64, kind: EdgeKind) -> Self {
        Self { y, width, kind }
    }
}

fn half_area(squares: &[Square]) -> Result<HalfArea, Error> {
    if squares.is_empty() {
        return Err(Error::Empty);
    }
    Ok(HalfArea::of(squares))
}

fn bisect(
    squares: &[Square],
    problem: &HalfArea,
    bracket: [f64; 2],
    config: &Config,
) -> Result<f64, Error> {
    let model = AreaBelow::new(squares);
    let solution = bisection::solve_unobserved(&model, problem, bracket, &config.bisection())?;

    match solution.status {
        Status::Converged => Ok(solution.x),
        Status::MaxIters | Status::StoppedByObserver => Err(Error::NotConverged {
            iters: solution.iters,
            x: solution.x,
        }),
    }
}
