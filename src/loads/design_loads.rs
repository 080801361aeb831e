//! Design load pair acting on the section

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// Design axial force and bending moment
///
/// `n` in N (compression negative), `m` in N·m (positive with the bottom
/// edge in tension).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignLoads {
    pub n: f64,
    pub m: f64,
}

impl DesignLoads {
    pub fn new(n: f64, m: f64) -> Self {
        Self { n, m }
    }

    /// Pure bending
    pub fn bending(m: f64) -> Self {
        Self::new(0.0, m)
    }

    /// From kN and kN·m
    pub fn from_kn(n_kn: f64, m_knm: f64) -> Self {
        Self::new(n_kn * 1000.0, m_knm * 1000.0)
    }

    pub fn validate(&self) -> SectionResult<()> {
        if !(self.n.is_finite() && self.m.is_finite()) {
            return Err(SectionError::InvalidInput(format!(
                "design loads must be finite, got N = {}, M = {}",
                self.n, self.m
            )));
        }
        Ok(())
    }
}
