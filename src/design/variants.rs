//! Reinforcement arrangements for a fixed strain state
//!
//! Given the strain field (and therefore both layer stresses and the
//! concrete resultant), each arrangement is a linear problem in the steel
//! areas. Areas are returned unfloored: a negative value means the
//! arrangement cannot carry the loads at this strain state.

use serde::{Deserialize, Serialize};

use super::STRESS_TOLERANCE;
use crate::elements::{SectionGeometry, SteelLaw, StrainField};
use crate::error::{SectionError, SectionResult};
use crate::loads::DesignLoads;
use crate::math::{self, Mat2, Vec2};
use crate::results::SectionForces;

/// Both layer areas matching N and M exactly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalReinforcement {
    /// Top layer area in m²
    pub top_area: f64,
    /// Bottom layer area in m²
    pub bottom_area: f64,
    pub top_force: f64,
    pub bottom_force: f64,
}

/// Bottom layer only, sized for N; `moment` is the resulting capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BottomLayerReinforcement {
    pub area: f64,
    pub force: f64,
    /// Moment resisted in N·m
    pub moment: f64,
}

/// Equal areas in both layers, sized for N; `moment` is the resulting capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricReinforcement {
    /// Total area in m², split equally
    pub total_area: f64,
    pub top_force: f64,
    pub bottom_force: f64,
    /// Moment resisted in N·m
    pub moment: f64,
}

/// All three arrangements; a variant is `None` when its system is singular
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReinforcementVariants {
    pub optimal: Option<OptimalReinforcement>,
    pub bottom_only: Option<BottomLayerReinforcement>,
    pub symmetric: Option<SymmetricReinforcement>,
}

/// Layer positions and stresses at a strain state
struct LayerStresses {
    x1: f64,
    x2: f64,
    sigma1: f64,
    sigma2: f64,
}

impl LayerStresses {
    fn new(geometry: &SectionGeometry, steel: &SteelLaw, strain: &StrainField) -> Self {
        let x1 = geometry.top_layer_position();
        let x2 = geometry.bottom_layer_position();
        Self {
            x1,
            x2,
            sigma1: steel.stress(strain.at(x1, geometry.height)),
            sigma2: steel.stress(strain.at(x2, geometry.height)),
        }
    }
}

/// Solve both axial and moment equilibrium for the two layer areas
pub fn optimal(
    geometry: &SectionGeometry,
    steel: &SteelLaw,
    strain: &StrainField,
    concrete: &SectionForces,
    loads: &DesignLoads,
) -> SectionResult<OptimalReinforcement> {
    let s = LayerStresses::new(geometry, steel, strain);
    let lhs = Mat2::new(s.sigma1, s.sigma2, -s.sigma1 * s.x1, -s.sigma2 * s.x2);
    let rhs = Vec2::new(loads.n - concrete.n, loads.m - concrete.m);
    let areas = math::solve_2x2(&lhs, &rhs).ok_or_else(|| {
        SectionError::SingularSystem(format!(
            "layer stresses {:.1} MPa and {:.1} MPa give no unique two-layer solution",
            s.sigma1 / 1e6,
            s.sigma2 / 1e6
        ))
    })?;

    Ok(OptimalReinforcement {
        top_area: areas[0],
        bottom_area: areas[1],
        top_force: areas[0] * s.sigma1,
        bottom_force: areas[1] * s.sigma2,
    })
}

/// Bottom layer sized for axial equilibrium
pub fn bottom_only(
    geometry: &SectionGeometry,
    steel: &SteelLaw,
    strain: &StrainField,
    concrete: &SectionForces,
    loads: &DesignLoads,
) -> SectionResult<BottomLayerReinforcement> {
    let s = LayerStresses::new(geometry, steel, strain);
    if s.sigma2.abs() < STRESS_TOLERANCE {
        return Err(SectionError::SingularSystem(
            "bottom layer is unstressed at this strain state".to_string(),
        ));
    }
    let area = (loads.n - concrete.n) / s.sigma2;
    let force = area * s.sigma2;
    Ok(BottomLayerReinforcement {
        area,
        force,
        moment: concrete.m - force * s.x2,
    })
}

/// Equal layers sized for axial equilibrium
pub fn symmetric(
    geometry: &SectionGeometry,
    steel: &SteelLaw,
    strain: &StrainField,
    concrete: &SectionForces,
    loads: &DesignLoads,
) -> SectionResult<SymmetricReinforcement> {
    let s = LayerStresses::new(geometry, steel, strain);
    let sigma_sum = s.sigma1 + s.sigma2;
    if sigma_sum.abs() < STRESS_TOLERANCE {
        return Err(SectionError::SingularSystem(
            "layer stresses cancel at this strain state".to_string(),
        ));
    }
    let total_area = 2.0 * (loads.n - concrete.n) / sigma_sum;
    let top_force = 0.5 * total_area * s.sigma1;
    let bottom_force = 0.5 * total_area * s.sigma2;
    Ok(SymmetricReinforcement {
        total_area,
        top_force,
        bottom_force,
        moment: concrete.m - top_force * s.x1 - bottom_force * s.x2,
    })
}

/// Evaluate all three arrangements at one strain state
pub fn reinforcement_variants(
    geometry: &SectionGeometry,
    steel: &SteelLaw,
    strain: &StrainField,
    concrete: &SectionForces,
    loads: &DesignLoads,
) -> ReinforcementVariants {
    ReinforcementVariants {
        optimal: optimal(geometry, steel, strain, concrete, loads).ok(),
        bottom_only: bottom_only(geometry, steel, strain, concrete, loads).ok(),
        symmetric: symmetric(geometry, steel, strain, concrete, loads).ok(),
    }
}
