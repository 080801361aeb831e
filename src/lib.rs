//! RC Section Solver - reinforced concrete rectangular section analysis
//!
//! This library analyses rectangular reinforced concrete sections under a
//! plane strain distribution, supporting:
//! - Parabola-rectangle concrete stress block (closed form and quadrature)
//! - N-M interaction diagrams from the characteristic limit states
//! - Bottom reinforcement design by diagram lookup or root search
//! - Two-layer, bottom-only and symmetric reinforcement variants
//!
//! Sign convention: compression is negative; a positive moment puts the
//! bottom edge in tension.
//!
//! ## Example
//! ```rust
//! use rc_section_solver::prelude::*;
//!
//! let model = SectionModel::new(
//!     SectionGeometry::symmetric(0.3, 0.5, 0.05),
//!     ConcreteLaw::default(),
//!     SteelLaw::default(),
//! )?;
//!
//! // Capacity envelope for 6 cm² bottom steel
//! let diagram = model.interaction_diagram(
//!     &Reinforcement::from_cm2(0.0, 6.0),
//!     &Densification::Uniform(10),
//! )?;
//! assert_eq!(diagram.len(), 9 + 8 * 10);
//!
//! // Required steel for 30 kNm pure bending
//! let result = model.design(&DesignLoads::from_kn(0.0, 30.0), &DesignOptions::default())?;
//! assert!(result.converged);
//! # Ok::<(), SectionError>(())
//! ```

pub mod analysis;
pub mod api;
pub mod design;
pub mod diagram;
pub mod elements;
pub mod error;
pub mod integration;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{Densification, DesignMethod, DesignOptions, IntegrationSettings};
    pub use crate::design::{LookupDesigner, ReinforcementVariants, RootSearchDesigner};
    pub use crate::diagram::{CharacteristicState, InteractionDiagram, InteractionDiagramBuilder};
    pub use crate::elements::{ConcreteLaw, Reinforcement, SectionGeometry, SteelLaw, StrainField};
    pub use crate::error::{SectionError, SectionResult};
    pub use crate::integration::{
        AnalyticalIntegrator, ConcreteIntegrator, NumericalIntegrator, StressBlock,
    };
    pub use crate::loads::{DesignLoads, LoadCombination, LoadEffect};
    pub use crate::model::SectionModel;
    pub use crate::results::{
        DesignResult, DesignStatus, DiagramPoint, DiagramSummary, LayerState, PointKind,
        SectionForces,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
