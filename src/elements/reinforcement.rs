//! Reinforcement areas of the two layers

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// Steel areas of the top and bottom layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reinforcement {
    /// Top layer area in m²
    pub top_area: f64,
    /// Bottom layer area in m²
    pub bottom_area: f64,
}

impl Reinforcement {
    pub fn new(top_area: f64, bottom_area: f64) -> Self {
        Self {
            top_area,
            bottom_area,
        }
    }

    /// No steel at all (plain concrete)
    pub fn none() -> Self {
        Self::default()
    }

    /// Steel in the bottom layer only
    pub fn bottom_only(area: f64) -> Self {
        Self::new(0.0, area)
    }

    /// Total area split equally between the two layers
    pub fn symmetric(total_area: f64) -> Self {
        Self::new(0.5 * total_area, 0.5 * total_area)
    }

    /// Build from areas given in cm²
    pub fn from_cm2(top: f64, bottom: f64) -> Self {
        Self::new(top * 1e-4, bottom * 1e-4)
    }

    pub fn total_area(&self) -> f64 {
        self.top_area + self.bottom_area
    }

    pub fn validate(&self) -> SectionResult<()> {
        for (name, area) in [("top", self.top_area), ("bottom", self.bottom_area)] {
            if !(area.is_finite() && area >= 0.0) {
                return Err(SectionError::InvalidInput(format!(
                    "{} reinforcement area must be non-negative, got {}",
                    name, area
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constructors() {
        let r = Reinforcement::from_cm2(2.0, 6.0);
        assert_relative_eq!(r.top_area, 2e-4, epsilon = 1e-15);
        assert_relative_eq!(r.total_area(), 8e-4, epsilon = 1e-15);
        assert_relative_eq!(Reinforcement::symmetric(8e-4).bottom_area, 4e-4, epsilon = 1e-15);
        assert_eq!(Reinforcement::bottom_only(1e-4).top_area, 0.0);
    }

    #[test]
    fn test_negative_area_rejected() {
        assert!(Reinforcement::new(-1e-4, 0.0).validate().is_err());
        assert!(Reinforcement::none().validate().is_ok());
    }
}
