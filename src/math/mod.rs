//! Mathematical utilities for section calculations

use nalgebra::{Matrix2, Vector2};

pub type Mat2 = Matrix2<f64>;
pub type Vec2 = Vector2<f64>;

/// Determinants below this (relative to the matrix scale) are treated as singular
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Solve a 2x2 linear system `a * x = b`
///
/// Returns `None` when the system is singular or nearly so.
pub fn solve_2x2(a: &Mat2, b: &Vec2) -> Option<Vec2> {
    let scale = a.abs().max();
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    if (a.determinant() / (scale * scale)).abs() < SINGULAR_TOLERANCE {
        return None;
    }
    a.lu().solve(b)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Relative error of `value` against `target`, falling back to the absolute
/// error when the target is (close to) zero
pub fn relative_error(value: f64, target: f64) -> f64 {
    let abs = (value - target).abs();
    if target.abs() > 1e-6 {
        abs / target.abs()
    } else {
        abs
    }
}
