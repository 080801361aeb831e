//! Concrete stress-block integration
//!
//! Converts a linear strain field into the concrete force and moment
//! resultant of the parabola-rectangle law.

mod analytical;
mod numerical;

pub use analytical::{AnalyticalIntegrator, StressBlock};
pub use numerical::NumericalIntegrator;

use crate::elements::{ConcreteLaw, SectionGeometry, StrainField};
use crate::results::SectionForces;

/// Integrates concrete stresses over a rectangular section
pub trait ConcreteIntegrator {
    /// Concrete resultant for the given strain field
    ///
    /// `n` is negative in compression; `m` is taken about the centroid and is
    /// positive when the compressed zone sits above it.
    fn integrate(
        &self,
        strain: &StrainField,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
    ) -> SectionForces;
}

impl<T: ConcreteIntegrator + ?Sized> ConcreteIntegrator for &T {
    fn integrate(
        &self,
        strain: &StrainField,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
    ) -> SectionForces {
        (**self).integrate(strain, geometry, concrete)
    }
}
