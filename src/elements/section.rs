//! Rectangular cross-section geometry

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// Geometry of a rectangular section with one top and one bottom
/// reinforcement layer
///
/// Local coordinates are measured from the centroid, positive upward, so the
/// top fibre sits at `+height / 2` and the bottom fibre at `-height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Section width in m
    pub width: f64,
    /// Section height in m
    pub height: f64,
    /// Distance from the top fibre to the top layer centroid in m
    pub top_cover: f64,
    /// Distance from the bottom fibre to the bottom layer centroid in m
    pub bottom_cover: f64,
}

impl SectionGeometry {
    /// Create a new section geometry
    pub fn new(width: f64, height: f64, top_cover: f64, bottom_cover: f64) -> Self {
        Self {
            width,
            height,
            top_cover,
            bottom_cover,
        }
    }

    /// Create a section with equal cover to both layers
    pub fn symmetric(width: f64, height: f64, cover: f64) -> Self {
        Self::new(width, height, cover, cover)
    }

    /// Check the geometric preconditions
    pub fn validate(&self) -> SectionResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SectionError::InvalidGeometry(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SectionError::InvalidGeometry(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        for (name, cover) in [("top", self.top_cover), ("bottom", self.bottom_cover)] {
            if !(cover.is_finite() && cover > 0.0 && cover < self.height) {
                return Err(SectionError::InvalidGeometry(format!(
                    "{} cover must lie in (0, {}), got {}",
                    name, self.height, cover
                )));
            }
        }
        if self.top_cover + self.bottom_cover >= self.height {
            return Err(SectionError::InvalidGeometry(format!(
                "reinforcement layers overlap: top cover {} + bottom cover {} >= height {}",
                self.top_cover, self.bottom_cover, self.height
            )));
        }
        Ok(())
    }

    /// Gross concrete area in m²
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn half_height(&self) -> f64 {
        0.5 * self.height
    }

    /// Local coordinate of the top reinforcement layer
    pub fn top_layer_position(&self) -> f64 {
        self.half_height() - self.top_cover
    }

    /// Local coordinate of the bottom reinforcement layer (negative)
    pub fn bottom_layer_position(&self) -> f64 {
        self.bottom_cover - self.half_height()
    }

    /// Effective depth: top fibre to bottom layer, in m
    pub fn effective_depth(&self) -> f64 {
        self.height - self.bottom_cover
    }

    /// Convert a local coordinate to the height above the bottom fibre
    pub fn height_above_bottom(&self, x: f64) -> f64 {
        x + self.half_height()
    }
}

impl Default for SectionGeometry {
    fn default() -> Self {
        Self::symmetric(0.3, 0.5, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_positions() {
        let geom = SectionGeometry::new(0.3, 0.5, 0.04, 0.06);
        assert_relative_eq!(geom.top_layer_position(), 0.21, epsilon = 1e-12);
        assert_relative_eq!(geom.bottom_layer_position(), -0.19, epsilon = 1e-12);
        assert_relative_eq!(geom.effective_depth(), 0.44, epsilon = 1e-12);
        assert_relative_eq!(geom.area(), 0.15, epsilon = 1e-12);
        let x_s2 = geom.bottom_layer_position();
        assert_relative_eq!(geom.height_above_bottom(x_s2), 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_validation() {
        assert!(SectionGeometry::default().validate().is_ok());
        assert!(SectionGeometry::new(0.0, 0.5, 0.05, 0.05).validate().is_err());
        assert!(SectionGeometry::new(0.3, -0.5, 0.05, 0.05).validate().is_err());
        assert!(SectionGeometry::new(0.3, 0.5, 0.0, 0.05).validate().is_err());
        assert!(SectionGeometry::new(0.3, 0.5, 0.05, 0.5).validate().is_err());
        assert!(SectionGeometry::new(0.3, 0.5, 0.25, 0.25).validate().is_err());
        assert!(SectionGeometry::new(f64::NAN, 0.5, 0.05, 0.05).validate().is_err());
    }
}
