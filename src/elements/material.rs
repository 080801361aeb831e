//! Material laws for concrete and reinforcing steel
//!
//! Strains and stresses are signed: compression is negative.

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// Parabola-rectangle design law for concrete in compression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLaw {
    /// Design compressive strength in Pa (negative)
    pub fcd: f64,
    /// Strain at which the parabola reaches `fcd` (negative)
    pub eps_c2: f64,
    /// Ultimate compressive strain (negative, at most `eps_c2`)
    pub eps_cu: f64,
}

impl ConcreteLaw {
    pub fn new(fcd: f64, eps_c2: f64, eps_cu: f64) -> Self {
        Self { fcd, eps_c2, eps_cu }
    }

    /// Design law for a normal-strength concrete (fck <= 50 MPa) from its
    /// characteristic cylinder strength in Pa (positive)
    pub fn from_characteristic(fck: f64, gamma_c: f64, alpha_cc: f64) -> Self {
        Self {
            fcd: -alpha_cc * fck / gamma_c,
            eps_c2: -0.002,
            eps_cu: -0.0035,
        }
    }

    pub fn validate(&self) -> SectionResult<()> {
        if !(self.fcd.is_finite() && self.fcd < 0.0) {
            return Err(SectionError::InvalidMaterial(format!(
                "concrete fcd must be negative, got {}",
                self.fcd
            )));
        }
        if !(self.eps_c2.is_finite() && self.eps_c2 < 0.0) {
            return Err(SectionError::InvalidMaterial(format!(
                "concrete eps_c2 must be negative, got {}",
                self.eps_c2
            )));
        }
        if !(self.eps_cu.is_finite() && self.eps_cu <= self.eps_c2) {
            return Err(SectionError::InvalidMaterial(format!(
                "concrete eps_cu ({}) must not exceed eps_c2 ({})",
                self.eps_cu, self.eps_c2
            )));
        }
        Ok(())
    }

    /// Stress at the given strain, in Pa
    ///
    /// Zero in tension, parabolic between 0 and `eps_c2`, constant `fcd`
    /// beyond.
    pub fn stress(&self, strain: f64) -> f64 {
        if strain >= 0.0 {
            0.0
        } else if strain >= self.eps_c2 {
            let ratio = 1.0 - strain / self.eps_c2;
            self.fcd * (1.0 - ratio * ratio)
        } else {
            self.fcd
        }
    }
}

impl Default for ConcreteLaw {
    fn default() -> Self {
        Self::new(-20e6, -0.002, -0.0035)
    }
}

/// Bilinear elastic-perfectly-plastic design law for reinforcing steel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLaw {
    /// Design yield strength in Pa (positive)
    pub fyd: f64,
    /// Modulus of elasticity in Pa
    pub es: f64,
    /// Ultimate design strain (positive)
    pub eps_ud: f64,
}

impl SteelLaw {
    pub fn new(fyd: f64, es: f64, eps_ud: f64) -> Self {
        Self { fyd, es, eps_ud }
    }

    /// B500 class reinforcement with partial factor 1.15
    pub fn b500() -> Self {
        Self::new(500e6 / 1.15, 200e9, 0.01)
    }

    pub fn validate(&self) -> SectionResult<()> {
        if !(self.fyd.is_finite() && self.fyd > 0.0) {
            return Err(SectionError::InvalidMaterial(format!(
                "steel fyd must be positive, got {}",
                self.fyd
            )));
        }
        if !(self.es.is_finite() && self.es > 0.0) {
            return Err(SectionError::InvalidMaterial(format!(
                "steel Es must be positive, got {}",
                self.es
            )));
        }
        if !(self.eps_ud.is_finite() && self.eps_ud > self.yield_strain()) {
            return Err(SectionError::InvalidMaterial(format!(
                "steel eps_ud ({}) must exceed the yield strain ({})",
                self.eps_ud,
                self.yield_strain()
            )));
        }
        Ok(())
    }

    /// Design yield strain `fyd / Es`
    pub fn yield_strain(&self) -> f64 {
        self.fyd / self.es
    }

    /// Stress at the given strain, in Pa
    pub fn stress(&self, strain: f64) -> f64 {
        (strain * self.es).clamp(-self.fyd, self.fyd)
    }
}

impl Default for SteelLaw {
    fn default() -> Self {
        Self::new(435e6, 200e9, 0.01)
    }
}
