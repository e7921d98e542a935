//! Interpolating cubic splines over tabulated nodes.
//!
//! The spline is stored as node values plus second derivatives `M_i`. On the
//! interval `[x_i, x_{i+1}]` with `h = x_{i+1} - x_i`, `a = (x_{i+1} - x)/h`
//! and `b = (x - x_i)/h`:
//!
//! ```text
//! s(x) = a·y_i + b·y_{i+1} + ((a³ - a)·M_i + (b³ - b)·M_{i+1})·h²/6
//! ```
//!
//! Points outside the node range use the polynomial of the nearest end
//! interval, so evaluation extrapolates instead of clamping.

use super::linalg::{lu_solve, DenseMatrix, LuError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineBoundary {
    /// Third derivative continuous at the second and penultimate nodes.
    /// Matches an unsmoothed FITPACK (`splrep(s=0)`) cubic interpolant.
    #[default]
    NotAKnot,
    /// Zero second derivative at both end nodes.
    Natural,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    #[error("cubic spline requires at least 2 nodes, got {actual}")]
    TooFewNodes { actual: usize },
    #[error("cubic spline node length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("cubic spline node {index} must be finite, got x={x}, y={y}")]
    NonFiniteNode { index: usize, x: f64, y: f64 },
    #[error(
        "cubic spline abscissas must be strictly increasing, index {index} has {current} after {previous}"
    )]
    NonIncreasingNodes {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("cubic spline system could not be solved: {0}")]
    Linalg(#[from] LuError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl CubicSpline {
    /// Not-a-knot interpolating spline through `(xs, ys)`.
    pub fn interpolate(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        Self::with_boundary(xs, ys, SplineBoundary::NotAKnot)
    }

    /// Natural interpolating spline through `(xs, ys)`.
    pub fn natural(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        Self::with_boundary(xs, ys, SplineBoundary::Natural)
    }

    pub fn with_boundary(
        xs: &[f64],
        ys: &[f64],
        boundary: SplineBoundary,
    ) -> Result<Self, SplineError> {
        validate_nodes(xs, ys)?;

        let second_derivatives = match (boundary, xs.len()) {
            (_, 2) => vec![0.0; 2],
            (SplineBoundary::NotAKnot, 3) => {
                // Not-a-knot on three nodes degenerates to the interpolating parabola.
                let curvature = 2.0 * second_divided_difference(xs, ys, 1);
                vec![curvature; 3]
            }
            _ => solve_second_derivatives(xs, ys, boundary)?,
        };

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            second_derivatives,
        })
    }

    pub fn nodes(&self) -> &[f64] {
        &self.xs
    }

    pub fn values(&self) -> &[f64] {
        &self.ys
    }

    pub fn second_derivatives(&self) -> &[f64] {
        &self.second_derivatives
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let lower = self.interval_index(x);
        let upper = lower + 1;

        let h = self.xs[upper] - self.xs[lower];
        let a = (self.xs[upper] - x) / h;
        let b = (x - self.xs[lower]) / h;

        a * self.ys[lower]
            + b * self.ys[upper]
            + ((a * a * a - a) * self.second_derivatives[lower]
                + (b * b * b - b) * self.second_derivatives[upper])
                * h
                * h
                / 6.0
    }

    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    fn interval_index(&self, x: f64) -> usize {
        let last_interval = self.xs.len() - 2;
        match self.xs.partition_point(|&node| node <= x) {
            0 => 0,
            index => (index - 1).min(last_interval),
        }
    }
}

fn validate_nodes(xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
    if xs.len() != ys.len() {
        return Err(SplineError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(SplineError::TooFewNodes { actual: xs.len() });
    }

    for (index, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(SplineError::NonFiniteNode { index, x, y });
        }
    }

    for index in 1..xs.len() {
        if xs[index] <= xs[index - 1] {
            return Err(SplineError::NonIncreasingNodes {
                index,
                previous: xs[index - 1],
                current: xs[index],
            });
        }
    }

    Ok(())
}

fn second_divided_difference(xs: &[f64], ys: &[f64], center: usize) -> f64 {
    let left_slope = (ys[center] - ys[center - 1]) / (xs[center] - xs[center - 1]);
    let right_slope = (ys[center + 1] - ys[center]) / (xs[center + 1] - xs[center]);
    (right_slope - left_slope) / (xs[center + 1] - xs[center - 1])
}

fn solve_second_derivatives(
    xs: &[f64],
    ys: &[f64],
    boundary: SplineBoundary,
) -> Result<Vec<f64>, SplineError> {
    let count = xs.len();
    let last = count - 1;
    let steps: Vec<f64> = xs.windows(2).map(|pair| pair[1] - pair[0]).collect();

    let mut system = DenseMatrix::zeros(count, count);
    let mut rhs = vec![0.0; count];

    for row in 1..last {
        let left = steps[row - 1];
        let right = steps[row];
        system[(row, row - 1)] = left;
        system[(row, row)] = 2.0 * (left + right);
        system[(row, row + 1)] = right;
        rhs[row] = 6.0 * ((ys[row + 1] - ys[row]) / right - (ys[row] - ys[row - 1]) / left);
    }

    match boundary {
        SplineBoundary::Natural => {
            system[(0, 0)] = 1.0;
            system[(last, last)] = 1.0;
        }
        SplineBoundary::NotAKnot => {
            system[(0, 0)] = steps[1];
            system[(0, 1)] = -(steps[0] + steps[1]);
            system[(0, 2)] = steps[0];

            let tail = steps[last - 1];
            let before_tail = steps[last - 2];
            system[(last, last - 2)] = tail;
            system[(last, last - 1)] = -(before_tail + tail);
            system[(last, last)] = before_tail;
        }
    }

    Ok(lu_solve(&system, &rhs)?)
}
