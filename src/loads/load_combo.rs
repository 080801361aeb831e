//! Load cases and factored load combinations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::DesignLoads;
use crate::error::{SectionError, SectionResult};

/// Characteristic section forces produced by one load case
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadEffect {
    /// Axial force in N
    pub n: f64,
    /// Bending moment in N·m
    pub m: f64,
}

impl LoadEffect {
    pub fn new(n: f64, m: f64) -> Self {
        Self { n, m }
    }

    pub fn from_kn(n_kn: f64, m_knm: f64) -> Self {
        Self::new(n_kn * 1000.0, m_knm * 1000.0)
    }
}

/// A load combination defines how load cases are factored and summed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Name of the load combination
    pub name: String,
    /// Factors for each load case (case_name -> factor)
    pub factors: HashMap<String, f64>,
}

impl LoadCombination {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            factors: HashMap::new(),
        }
    }

    /// A combination with a single load case at factor 1.0
    pub fn single(name: &str, case: &str) -> Self {
        Self::new(name).with_case(case, 1.0)
    }

    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.factors.insert(case.to_string(), factor);
        self
    }

    /// Factor for a load case (0.0 when absent)
    pub fn factor(&self, case: &str) -> f64 {
        self.factors.get(case).copied().unwrap_or(0.0)
    }

    pub fn includes(&self, case: &str) -> bool {
        self.factor(case).abs() > 1e-10
    }

    /// Factored sum of the load effects
    ///
    /// Every case with a non-zero factor must have an effect.
    pub fn combine(&self, effects: &HashMap<String, LoadEffect>) -> SectionResult<DesignLoads> {
        let mut loads = DesignLoads::default();
        for (case, &factor) in &self.factors {
            if factor.abs() <= 1e-10 {
                continue;
            }
            let effect = effects.get(case).ok_or_else(|| {
                SectionError::InvalidInput(format!(
                    "load case '{}' used by combination '{}' has no load effect",
                    case, self.name
                ))
            })?;
            loads.n += factor * effect.n;
            loads.m += factor * effect.m;
        }
        Ok(loads)
    }

    /// EN 1990 persistent ULS, permanent and imposed actions (6.10)
    pub fn uls_dead_live() -> Self {
        Self::new("1.35G + 1.5Q")
            .with_case("Dead", 1.35)
            .with_case("Live", 1.5)
    }

    /// EN 1990 persistent ULS with wind leading (6.10, psi0 = 0.7 on imposed)
    pub fn uls_dead_wind_live() -> Self {
        Self::new("1.35G + 1.5W + 1.05Q")
            .with_case("Dead", 1.35)
            .with_case("Wind", 1.5)
            .with_case("Live", 1.05)
    }

    /// Favourable permanent action with leading wind
    pub fn uls_uplift() -> Self {
        Self::new("1.0G + 1.5W")
            .with_case("Dead", 1.0)
            .with_case("Wind", 1.5)
    }

    /// Characteristic SLS combination
    pub fn sls_characteristic() -> Self {
        Self::new("G + Q")
            .with_case("Dead", 1.0)
            .with_case("Live", 1.0)
    }
}

impl Default for LoadCombination {
    fn default() -> Self {
        Self::single("Combo 1", "Case 1")
    }
}
