//! Linear strain distribution over the section depth

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::math::{self, Mat2, Vec2};

/// Plane-section strain field described by its two extreme fibre strains
///
/// Equivalent to `eps(x) = k * x + q` with `x` the local coordinate measured
/// upward from the centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainField {
    /// Strain at the top fibre
    pub top: f64,
    /// Strain at the bottom fibre
    pub bottom: f64,
}

impl StrainField {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Same strain over the whole depth
    pub fn uniform(strain: f64) -> Self {
        Self::new(strain, strain)
    }

    /// Build from curvature `k` (1/m) and centroid strain `q`
    pub fn from_curvature(k: f64, q: f64, height: f64) -> Self {
        let half = 0.5 * height;
        Self::new(k * half + q, q - k * half)
    }

    /// The unique field passing through two (position, strain) constraints
    ///
    /// Positions are local coordinates. Fails when both positions coincide.
    pub fn through(height: f64, a: (f64, f64), b: (f64, f64)) -> SectionResult<Self> {
        let lhs = Mat2::new(a.0, 1.0, b.0, 1.0);
        let rhs = Vec2::new(a.1, b.1);
        let kq = math::solve_2x2(&lhs, &rhs).ok_or_else(|| {
            SectionError::SingularSystem(format!(
                "strain constraints at x = {} and x = {} do not define a unique field",
                a.0, b.0
            ))
        })?;
        Ok(Self::from_curvature(kq[0], kq[1], height))
    }

    /// Curvature `k` in 1/m
    pub fn curvature(&self, height: f64) -> f64 {
        (self.top - self.bottom) / height
    }

    /// Strain at the centroid, `q`
    pub fn centroid_strain(&self) -> f64 {
        0.5 * (self.top + self.bottom)
    }

    /// Strain at local coordinate `x`
    pub fn at(&self, x: f64, height: f64) -> f64 {
        self.curvature(height) * x + self.centroid_strain()
    }

    /// Strain at height `y` above the bottom fibre
    pub fn at_height(&self, y: f64, height: f64) -> f64 {
        self.bottom + (self.top - self.bottom) * y / height
    }

    /// Fibre-wise linear interpolation towards `other`
    pub fn lerp(&self, other: &StrainField, t: f64) -> Self {
        Self::new(
            math::lerp(self.top, other.top, t),
            math::lerp(self.bottom, other.bottom, t),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite() && self.bottom.is_finite()
    }
}
