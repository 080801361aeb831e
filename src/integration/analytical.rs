//! Closed-form integration of the parabola-rectangle stress block

use serde::{Deserialize, Serialize};

use super::ConcreteIntegrator;
use crate::analysis::IntegrationSettings;
use crate::elements::{ConcreteLaw, SectionGeometry, StrainField};
use crate::results::SectionForces;

/// Shape of the compressed zone for a given strain field
///
/// Intervals are `(lo, hi)` in local coordinates, `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressBlock {
    /// No concrete in compression
    Unstressed,
    /// Uniform strain inside the parabolic branch; `stress` in Pa
    UniformParabolic { stress: f64 },
    /// Uniform strain on the plateau
    UniformPlateau,
    /// Linear strain with a parabolic and/or a plateau zone
    Graded {
        parabolic: Option<(f64, f64)>,
        plateau: Option<(f64, f64)>,
    },
}

/// Exact force and moment resultant of the concrete stress block
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyticalIntegrator {
    pub settings: IntegrationSettings,
}

impl AnalyticalIntegrator {
    pub fn new(settings: IntegrationSettings) -> Self {
        Self { settings }
    }

    /// Classify the compressed zone of `strain`
    pub fn stress_block(
        &self,
        strain: &StrainField,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
    ) -> StressBlock {
        if strain.top >= 0.0 && strain.bottom >= 0.0 {
            return StressBlock::Unstressed;
        }

        let half = geometry.half_height();
        let k = strain.curvature(geometry.height);
        let q = strain.centroid_strain();

        if k.abs() < self.settings.curvature_tolerance {
            return if q >= 0.0 {
                StressBlock::Unstressed
            } else if q > concrete.eps_c2 {
                StressBlock::UniformParabolic {
                    stress: concrete.stress(q),
                }
            } else {
                StressBlock::UniformPlateau
            };
        }

        // neutral axis and the eps_c2 fibre, possibly outside the section
        let x0 = -q / k;
        let x_c2 = (concrete.eps_c2 - q) / k;

        let parabolic = (
            (-half).max(x_c2.min(x0)),
            half.min(x_c2.max(x0)),
        );
        let plateau = if k > 0.0 {
            (-half, x_c2.min(half))
        } else {
            (x_c2.max(-half), half)
        };

        let tol = self.settings.interval_tolerance;
        let keep = |(lo, hi): (f64, f64)| if lo < hi - tol { Some((lo, hi)) } else { None };

        StressBlock::Graded {
            parabolic: keep(parabolic),
            plateau: keep(plateau),
        }
    }
}

/// Force and first moment `(∫σ·b dx, ∫σ·b·x dx)` of the parabolic branch
/// over `[lo, hi]`
fn parabolic_resultant(
    k: f64,
    q: f64,
    (lo, hi): (f64, f64),
    width: f64,
    concrete: &ConcreteLaw,
) -> (f64, f64) {
    // sigma / fcd = c1 * x + c0 + c2 * x^2
    let a = k / concrete.eps_c2;
    let c = q / concrete.eps_c2;
    let c1 = 2.0 * a - 2.0 * a * c;
    let c0 = 2.0 * c - c * c;
    let c2 = -a * a;

    let d1 = hi - lo;
    let d2 = hi * hi - lo * lo;
    let d3 = hi.powi(3) - lo.powi(3);
    let d4 = hi.powi(4) - lo.powi(4);

    let scale = concrete.fcd * width;
    let force = scale * (c1 * d2 / 2.0 + c0 * d1 + c2 * d3 / 3.0);
    let moment = scale * (c1 * d3 / 3.0 + c0 * d2 / 2.0 + c2 * d4 / 4.0);
    (force, moment)
}

/// Force and first moment of the constant plateau over `[lo, hi]`
fn plateau_resultant((lo, hi): (f64, f64), width: f64, concrete: &ConcreteLaw) -> (f64, f64) {
    let force = concrete.fcd * width * (hi - lo);
    (force, force * 0.5 * (lo + hi))
}

impl ConcreteIntegrator for AnalyticalIntegrator {
    fn integrate(
        &self,
        strain: &StrainField,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
    ) -> SectionForces {
        let area = geometry.area();
        match self.stress_block(strain, geometry, concrete) {
            StressBlock::Unstressed => SectionForces::zero(),
            StressBlock::UniformParabolic { stress } => SectionForces::new(stress * area, 0.0),
            StressBlock::UniformPlateau => SectionForces::new(concrete.fcd * area, 0.0),
            StressBlock::Graded { parabolic, plateau } => {
                let k = strain.curvature(geometry.height);
                let q = strain.centroid_strain();

                let (mut n, mut first_moment) = (0.0, 0.0);
                if let Some(interval) = parabolic {
                    let (f, s) = parabolic_resultant(k, q, interval, geometry.width, concrete);
                    n += f;
                    first_moment += s;
                }
                if let Some(interval) = plateau {
                    let (f, s) = plateau_resultant(interval, geometry.width, concrete);
                    n += f;
                    first_moment += s;
                }

                // compression above the centroid is a positive moment
                SectionForces::new(n, -first_moment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn integrator() -> AnalyticalIntegrator {
        AnalyticalIntegrator::default()
    }

    #[test]
    fn test_tension_is_unstressed() {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let block = integrator().stress_block(&StrainField::new(0.0, 0.01), &geom, &concrete);
        assert_eq!(block, StressBlock::Unstressed);
        let f = integrator().integrate(&StrainField::uniform(0.002), &geom, &concrete);
        assert_eq!(f, SectionForces::zero());
    }

    #[test]
    fn test_uniform_branches() {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let it = integrator();

        let f = it.integrate(&StrainField::uniform(-0.001), &geom, &concrete);
        assert_relative_eq!(f.n, -15e6 * 0.15, max_relative = 1e-12);
        assert_eq!(f.m, 0.0);

        let f = it.integrate(&StrainField::uniform(-0.0035), &geom, &concrete);
        assert_relative_eq!(f.n, -20e6 * 0.15, max_relative = 1e-12);
        assert!(matches!(
            it.stress_block(&StrainField::uniform(-0.0035), &geom, &concrete),
            StressBlock::UniformPlateau
        ));
    }

    #[test]
    fn test_triangular_parabola_to_zero() {
        // top at eps_c2, bottom at 0: full parabola over the depth
        // N = fcd * b * h * 2/3, centroid of the parabolic block at 5/8 h from the bottom
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let f = integrator().integrate(&StrainField::new(-0.002, 0.0), &geom, &concrete);
        let expected_n = -20e6 * 0.3 * 0.5 * 2.0 / 3.0;
        assert_relative_eq!(f.n, expected_n, max_relative = 1e-10);
        let arm = 5.0 / 8.0 * 0.5 - 0.25;
        assert_relative_eq!(f.m, -expected_n * arm, max_relative = 1e-10);
    }

    #[test]
    fn test_graded_block_intervals() {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let block = integrator().stress_block(&StrainField::new(-0.0035, 0.0035), &geom, &concrete);
        match block {
            StressBlock::Graded { parabolic, plateau } => {
                let (p_lo, p_hi) = parabolic.unwrap();
                let (r_lo, r_hi) = plateau.unwrap();
                assert_relative_eq!(p_lo, 0.0, epsilon = 1e-12);
                assert_relative_eq!(p_hi, r_lo, epsilon = 1e-12);
                assert_relative_eq!(r_hi, 0.25, epsilon = 1e-12);
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_mirror_symmetry() {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let top = integrator().integrate(&StrainField::new(-0.003, 0.004), &geom, &concrete);
        let bottom = integrator().integrate(&StrainField::new(0.004, -0.003), &geom, &concrete);
        assert_relative_eq!(top.n, bottom.n, max_relative = 1e-10);
        assert_relative_eq!(top.m, -bottom.m, max_relative = 1e-10);
        assert!(top.m > 0.0);
    }
}
