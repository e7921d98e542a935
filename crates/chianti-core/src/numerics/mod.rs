pub mod linalg;
pub mod masked;
pub mod spline;

pub use linalg::{lu_factorize, lu_solve, DenseMatrix, LuDecomposition, LuError};
pub use masked::MaskedSeries;
pub use spline::{CubicSpline, SplineBoundary, SplineError};

/// Indices of `values` lying in the closed range `[lower, upper]`, in input order.
pub fn indices_between(values: &[f64], (lower, upper): (f64, f64)) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| **value >= lower && **value <= upper)
        .map(|(index, _)| index)
        .collect()
}

pub fn relative_difference(lhs: f64, rhs: f64, relative_floor: f64) -> f64 {
    let scale = lhs.abs().max(rhs.abs()).max(relative_floor);
    (lhs - rhs).abs() / scale
}

pub fn within_tolerance(
    lhs: f64,
    rhs: f64,
    abs_tol: f64,
    rel_tol: f64,
    relative_floor: f64,
) -> bool {
    let abs_diff = (lhs - rhs).abs();
    abs_diff <= abs_tol || relative_difference(lhs, rhs, relative_floor) <= rel_tol
}

#[cfg(test)]
mod tests {
    use super::{indices_between, relative_difference, within_tolerance};

    #[test]
    fn indices_between_is_inclusive_and_order_preserving() {
        let values = [5.0, 1.0, 3.0, 2.0, 7.0, 3.0];
        assert_eq!(indices_between(&values, (2.0, 5.0)), vec![0, 2, 3, 5]);
        assert!(indices_between(&values, (8.0, 9.0)).is_empty());
        assert!(indices_between(&[f64::NAN], (0.0, 1.0)).is_empty());
    }

    #[test]
    fn relative_difference_uses_relative_floor() {
        let diff = relative_difference(0.0, 1.0e-10, 1.0e-6);
        assert!((diff - 1.0e-4).abs() < 1.0e-12);
    }

    #[test]
    fn within_tolerance_accepts_abs_or_relative_match() {
        assert!(within_tolerance(10.0, 10.001, 1.0e-2, 1.0e-6, 1.0e-12));
        assert!(within_tolerance(1000.0, 1000.2, 1.0e-6, 5.0e-4, 1.0e-12));
        assert!(!within_tolerance(1.0, 1.1, 1.0e-3, 1.0e-3, 1.0e-12));
    }
}
