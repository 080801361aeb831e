//! Design loads and load combinations

mod design_loads;
mod load_combo;

pub use design_loads::DesignLoads;
pub use load_combo::{LoadCombination, LoadEffect};
