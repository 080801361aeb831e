//! Reinforcement design: inverting the section model for a target (N, M)
//!
//! Only the bottom layer is designed by the solvers; the variants module
//! covers the two-layer and symmetric arrangements for a fixed strain state.

mod lookup;
mod root_search;
mod variants;

pub use lookup::LookupDesigner;
pub use root_search::RootSearchDesigner;
pub use variants::{
    reinforcement_variants, BottomLayerReinforcement, OptimalReinforcement,
    ReinforcementVariants, SymmetricReinforcement,
};

/// Steel stresses below this (Pa) cannot balance an axial residual
pub const STRESS_TOLERANCE: f64 = 1e-6;

/// Bottom layer area closing axial equilibrium `Fc + As * sigma = N`,
/// floored at zero
///
/// `None` when the layer stress is too small to carry anything.
pub fn required_bottom_area(target_n: f64, concrete_n: f64, stress: f64) -> Option<f64> {
    if stress.abs() < STRESS_TOLERANCE {
        return None;
    }
    Some(((target_n - concrete_n) / stress).max(0.0))
}
