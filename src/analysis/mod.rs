//! Analysis and design options

use serde::{Deserialize, Serialize};

use crate::diagram::INTERVAL_COUNT;
use crate::error::{SectionError, SectionResult};

/// Numerical tolerances of the concrete integrators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Curvatures below this (1/m) are treated as a uniform strain field
    pub curvature_tolerance: f64,
    /// Minimum length (m) for a stress-block interval to contribute
    pub interval_tolerance: f64,
    /// Number of slices used by the numerical integrator
    pub slices: usize,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            curvature_tolerance: 1e-12,
            interval_tolerance: 1e-12,
            slices: 100,
        }
    }
}

impl IntegrationSettings {
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices;
        self
    }

    pub fn with_curvature_tolerance(mut self, tolerance: f64) -> Self {
        self.curvature_tolerance = tolerance;
        self
    }

    pub fn with_interval_tolerance(mut self, tolerance: f64) -> Self {
        self.interval_tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> SectionResult<()> {
        if self.slices == 0 {
            return Err(SectionError::InvalidInput(
                "numerical integration needs at least one slice".to_string(),
            ));
        }
        if !(self.curvature_tolerance >= 0.0 && self.interval_tolerance >= 0.0) {
            return Err(SectionError::InvalidInput(
                "integration tolerances must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Upper bound on the interpolated samples in one interval
pub const MAX_SAMPLES_PER_INTERVAL: usize = 1000;

/// How many interpolated samples go between consecutive characteristic states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Densification {
    /// Same count in every interval
    Uniform(usize),
    /// One count per interval, in diagram order
    PerInterval([usize; INTERVAL_COUNT]),
}

impl Densification {
    /// Number of samples strictly between state `interval` and `interval + 1`
    pub fn count(&self, interval: usize) -> usize {
        match self {
            Self::Uniform(n) => *n,
            Self::PerInterval(counts) => counts.get(interval).copied().unwrap_or(0),
        }
    }

    /// Total number of interpolated samples
    pub fn total(&self) -> usize {
        (0..INTERVAL_COUNT).fold(0, |sum, i| sum.saturating_add(self.count(i)))
    }

    pub fn validate(&self) -> SectionResult<()> {
        match (0..INTERVAL_COUNT).find(|&i| self.count(i) > MAX_SAMPLES_PER_INTERVAL) {
            Some(i) => Err(SectionError::InvalidInput(format!(
                "interval {} asks for {} samples, at most {} allowed",
                i,
                self.count(i),
                MAX_SAMPLES_PER_INTERVAL
            ))),
            None => Ok(()),
        }
    }
}

impl Default for Densification {
    fn default() -> Self {
        Self::Uniform(10)
    }
}

/// Solver used to find the required reinforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignMethod {
    /// Bracket and interpolate on a precomputed interaction diagram
    #[default]
    Lookup,
    /// Regula falsi on the top fibre strain with an inner equilibrium iteration
    RootSearch,
}

/// Options for reinforcement design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOptions {
    pub method: DesignMethod,
    /// Sampling of the precomputed diagram used by the lookup designer
    pub densification: Densification,
    /// Regula falsi steps inside the bracketing pair after interpolation (lookup only)
    pub refine_iterations: usize,
    /// Outer iteration cap of the root search
    pub max_iterations: usize,
    /// Inner equilibrium iteration cap of the root search
    pub max_inner_iterations: usize,
    /// Relative moment tolerance
    pub relative_tolerance: f64,
    /// Absolute moment tolerance in N·m
    pub absolute_tolerance: f64,
    /// Axial force tolerance in N
    pub axial_tolerance: f64,
    /// Damping applied to each Newton step of the inner iteration
    pub newton_damping: f64,
    /// Report per-iteration progress at debug level instead of trace
    pub log: bool,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            method: DesignMethod::Lookup,
            densification: Densification::Uniform(20),
            refine_iterations: 0,
            max_iterations: 50,
            max_inner_iterations: 50,
            relative_tolerance: 0.01,
            absolute_tolerance: 100.0,
            axial_tolerance: 1000.0,
            newton_damping: 0.5,
            log: false,
        }
    }
}

impl DesignOptions {
    /// Options for the diagram lookup designer
    pub fn lookup() -> Self {
        Self::default()
    }

    /// Options for the root-search designer
    pub fn root_search() -> Self {
        Self {
            method: DesignMethod::RootSearch,
            ..Self::default()
        }
    }

    pub fn with_densification(mut self, densification: Densification) -> Self {
        self.densification = densification;
        self
    }

    pub fn with_refinement(mut self, iterations: usize) -> Self {
        self.refine_iterations = iterations;
        self
    }

    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    pub fn with_tolerances(mut self, relative: f64, absolute: f64) -> Self {
        self.relative_tolerance = relative;
        self.absolute_tolerance = absolute;
        self
    }

    pub fn with_axial_tolerance(mut self, tolerance: f64) -> Self {
        self.axial_tolerance = tolerance;
        self
    }

    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Whether a moment error satisfies either tolerance
    pub fn is_converged(&self, absolute_error: f64, relative_error: f64) -> bool {
        relative_error < self.relative_tolerance || absolute_error < self.absolute_tolerance
    }

    pub fn validate(&self) -> SectionResult<()> {
        self.densification.validate()?;
        if self.max_iterations == 0 || self.max_inner_iterations == 0 {
            return Err(SectionError::InvalidInput(
                "iteration caps must be at least 1".to_string(),
            ));
        }
        if !(self.newton_damping > 0.0 && self.newton_damping <= 1.0) {
            return Err(SectionError::InvalidInput(format!(
                "Newton damping must lie in (0, 1], got {}",
                self.newton_damping
            )));
        }
        if !(self.relative_tolerance > 0.0
            && self.absolute_tolerance > 0.0
            && self.axial_tolerance > 0.0)
        {
            return Err(SectionError::InvalidInput(
                "design tolerances must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densification_counts() {
        assert_eq!(Densification::Uniform(3).count(5), 3);
        assert_eq!(Densification::Uniform(3).total(), 24);
        let per = Densification::PerInterval([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(per.count(0), 1);
        assert_eq!(per.count(7), 8);
        assert_eq!(per.total(), 36);
    }

    #[test]
    fn test_densification_cap() {
        assert!(Densification::Uniform(MAX_SAMPLES_PER_INTERVAL).validate().is_ok());
        assert!(Densification::Uniform(MAX_SAMPLES_PER_INTERVAL + 1).validate().is_err());
        let huge = Densification::Uniform(usize::MAX);
        assert_eq!(huge.total(), usize::MAX);
        assert!(huge.validate().is_err());
        let mut per = [0; INTERVAL_COUNT];
        per[5] = 5000;
        assert!(Densification::PerInterval(per).validate().is_err());
        let opts = DesignOptions::default().with_densification(Densification::Uniform(1_000_000));
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_design_option_presets() {
        let opts = DesignOptions::root_search().with_max_iterations(10);
        assert_eq!(opts.method, DesignMethod::RootSearch);
        assert_eq!(opts.max_iterations, 10);
        assert_eq!(DesignOptions::default().densification, Densification::Uniform(20));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_convergence_either_tolerance() {
        let opts = DesignOptions::default();
        assert!(opts.is_converged(50.0, 0.5));
        assert!(opts.is_converged(5000.0, 0.005));
        assert!(!opts.is_converged(5000.0, 0.05));
    }

    #[test]
    fn test_invalid_options() {
        let mut opts = DesignOptions::default();
        opts.newton_damping = 0.0;
        assert!(opts.validate().is_err());
        assert!(IntegrationSettings::default().with_slices(0).validate().is_err());
    }
}
