//! Section elements: geometry, materials, strain state and reinforcement

mod material;
mod reinforcement;
mod section;
mod strain;

pub use material::{ConcreteLaw, SteelLaw};
pub use reinforcement::Reinforcement;
pub use section::SectionGeometry;
pub use strain::StrainField;
