//! Midpoint-rule reference integrator

use super::ConcreteIntegrator;
use crate::analysis::IntegrationSettings;
use crate::elements::{ConcreteLaw, SectionGeometry, StrainField};
use crate::results::SectionForces;

/// Slices the depth into equal strips and sums midpoint stresses
///
/// Used as the reference against which the closed form is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericalIntegrator {
    pub slices: usize,
}

impl NumericalIntegrator {
    pub fn new(slices: usize) -> Self {
        Self {
            slices: slices.max(1),
        }
    }

    pub fn from_settings(settings: &IntegrationSettings) -> Self {
        Self::new(settings.slices)
    }
}

impl Default for NumericalIntegrator {
    fn default() -> Self {
        Self::from_settings(&IntegrationSettings::default())
    }
}

impl ConcreteIntegrator for NumericalIntegrator {
    fn integrate(
        &self,
        strain: &StrainField,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
    ) -> SectionForces {
        let h = geometry.height;
        let dy = h / self.slices as f64;
        let mut n = 0.0;
        let mut m = 0.0;

        for i in 0..self.slices {
            let y = (i as f64 + 0.5) * dy;
            let sigma = concrete.stress(strain.at_height(y, h));
            if sigma == 0.0 {
                continue;
            }
            let df = sigma * geometry.width * dy;
            n += df;
            m += df * -(y - 0.5 * h);
        }

        SectionForces::new(n, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_plateau() {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let f = NumericalIntegrator::default().integrate(
            &StrainField::uniform(-0.0035),
            &geom,
            &concrete,
        );
        assert_relative_eq!(f.n, -20e6 * 0.15, max_relative = 1e-12);
        assert!(f.m.abs() < 1e-6);
    }

    #[test]
    fn test_tension_only_is_zero() {
        let f = NumericalIntegrator::new(50).integrate(
            &StrainField::new(0.001, 0.01),
            &SectionGeometry::default(),
            &ConcreteLaw::default(),
        );
        assert_eq!(f, SectionForces::zero());
    }

    #[test]
    fn test_top_compression_gives_positive_moment() {
        let f = NumericalIntegrator::default().integrate(
            &StrainField::new(-0.0035, 0.005),
            &SectionGeometry::default(),
            &ConcreteLaw::default(),
        );
        assert!(f.n < 0.0);
        assert!(f.m > 0.0);
    }
}
