//! Result types for section analysis and design

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::diagram::CharacteristicState;
use crate::elements::StrainField;

/// Axial force and bending moment resultant
///
/// `n` in N (compression negative), `m` in N·m (positive when the bottom
/// edge is in tension).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionForces {
    pub n: f64,
    pub m: f64,
}

impl SectionForces {
    pub fn new(n: f64, m: f64) -> Self {
        Self { n, m }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Resultant of a single force acting at local coordinate `x`
    pub fn from_force_at(force: f64, x: f64) -> Self {
        Self::new(force, -force * x)
    }

    /// (kN, kN·m)
    pub fn in_kn(&self) -> (f64, f64) {
        (self.n / 1000.0, self.m / 1000.0)
    }
}

impl Add for SectionForces {
    type Output = SectionForces;

    fn add(self, rhs: SectionForces) -> SectionForces {
        SectionForces::new(self.n + rhs.n, self.m + rhs.m)
    }
}

/// State of one reinforcement layer at a given strain field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    /// Local coordinate of the layer in m
    pub position: f64,
    /// Steel area in m²
    pub area: f64,
    pub strain: f64,
    /// Stress in Pa
    pub stress: f64,
    /// Force in N
    pub force: f64,
}

impl LayerState {
    pub fn forces(&self) -> SectionForces {
        SectionForces::from_force_at(self.force, self.position)
    }
}

/// Origin of a diagram point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Characteristic(CharacteristicState),
    /// Sample `step` (1-based) inside the interval following state `interval`
    Intermediate { interval: usize, step: usize },
    /// Evaluated at an arbitrary strain field
    Evaluated,
}

/// One point of an interaction diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub label: String,
    pub kind: PointKind,
    pub strain: StrainField,
    pub top_layer: LayerState,
    pub bottom_layer: LayerState,
    /// Concrete contribution alone
    pub concrete: SectionForces,
    /// Axial force in N
    pub n: f64,
    /// Bending moment in N·m
    pub m: f64,
}

impl DiagramPoint {
    pub fn forces(&self) -> SectionForces {
        SectionForces::new(self.n, self.m)
    }

    pub fn is_characteristic(&self) -> bool {
        matches!(self.kind, PointKind::Characteristic(_))
    }
}

/// Extreme points of an interaction diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub num_points: usize,
    /// Largest axial compression (most negative N)
    pub min_n: f64,
    pub min_n_point: String,
    /// Largest axial tension
    pub max_n: f64,
    pub max_n_point: String,
    /// Largest moment magnitude
    pub max_abs_m: f64,
    pub max_abs_m_point: String,
}

/// Outcome of a design run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    Converged,
    /// The target cannot be reached by any admissible strain state
    OutsideFeasibleRange,
    /// Iteration budget exhausted before the tolerance was met
    NotConverged,
}

/// Required bottom reinforcement for a pair of design loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResult {
    pub status: DesignStatus,
    pub converged: bool,
    /// Required bottom layer area in m²
    pub required_area: f64,
    pub strain: StrainField,
    pub bottom_layer_strain: f64,
    /// Bottom layer stress in Pa
    pub bottom_layer_stress: f64,
    pub concrete: SectionForces,
    /// Achieved axial force in N
    pub n: f64,
    /// Achieved moment in N·m
    pub m: f64,
    /// Absolute moment error in N·m
    pub error_abs: f64,
    pub error_rel: f64,
    /// Outer iterations used (zero for a pure lookup)
    pub iterations: usize,
}

impl DesignResult {
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Required area in cm²
    pub fn required_area_cm2(&self) -> f64 {
        self.required_area * 1e4
    }

    pub fn forces(&self) -> SectionForces {
        SectionForces::new(self.n, self.m)
    }
}
