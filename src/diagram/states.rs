//! Characteristic limit strain states of the section

use serde::{Deserialize, Serialize};

use crate::elements::{ConcreteLaw, SectionGeometry, SteelLaw, StrainField};
use crate::error::SectionResult;

/// Limit states that bound the interaction diagram, ordered from pure
/// compression to pure tension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicState {
    /// Whole section at the ultimate compressive strain
    PureCompression,
    /// Top at eps_cu, bottom fibre at eps_c2
    BottomAtEpsC2,
    /// Top at eps_cu, neutral axis at the bottom fibre
    NeutralAxisAtBottom,
    /// Top at eps_cu, bottom layer just yielding
    BottomLayerYield,
    /// Top at eps_cu, bottom layer at its ultimate strain
    BalancedRupture,
    /// Top at eps_c2, bottom layer at its ultimate strain
    TopAtEpsC2,
    /// Neutral axis at the top fibre, bottom layer at its ultimate strain
    NeutralAxisAtTop,
    /// Top layer yielding in tension, bottom layer at its ultimate strain
    TopLayerYield,
    /// Whole section at the ultimate tensile strain
    PureTension,
}

impl CharacteristicState {
    /// Diagram order
    pub const ALL: [CharacteristicState; 9] = [
        CharacteristicState::PureCompression,
        CharacteristicState::BottomAtEpsC2,
        CharacteristicState::NeutralAxisAtBottom,
        CharacteristicState::BottomLayerYield,
        CharacteristicState::BalancedRupture,
        CharacteristicState::TopAtEpsC2,
        CharacteristicState::NeutralAxisAtTop,
        CharacteristicState::TopLayerYield,
        CharacteristicState::PureTension,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PureCompression => "P1",
            Self::BottomAtEpsC2 => "P2",
            Self::NeutralAxisAtBottom => "P2b",
            Self::BottomLayerYield => "P3",
            Self::BalancedRupture => "P4",
            Self::TopAtEpsC2 => "P5",
            Self::NeutralAxisAtTop => "P6",
            Self::TopLayerYield => "P7",
            Self::PureTension => "P8",
        }
    }

    /// Strain field of this state, found as the line through two
    /// (position, strain) constraints
    pub fn strain_field(
        &self,
        geometry: &SectionGeometry,
        concrete: &ConcreteLaw,
        steel: &SteelLaw,
    ) -> SectionResult<StrainField> {
        let h = geometry.height;
        let top = geometry.half_height();
        let bottom = -top;
        let x_s1 = geometry.top_layer_position();
        let x_s2 = geometry.bottom_layer_position();
        let eps_cu = concrete.eps_cu;
        let eps_c2 = concrete.eps_c2;
        let eps_yd = steel.yield_strain();
        let eps_ud = steel.eps_ud;

        let (a, b) = match self {
            Self::PureCompression => ((top, eps_cu), (bottom, eps_cu)),
            Self::BottomAtEpsC2 => ((top, eps_cu), (bottom, eps_c2)),
            Self::NeutralAxisAtBottom => ((top, eps_cu), (bottom, 0.0)),
            Self::BottomLayerYield => ((top, eps_cu), (x_s2, eps_yd)),
            Self::BalancedRupture => ((top, eps_cu), (x_s2, eps_ud)),
            Self::TopAtEpsC2 => ((top, eps_c2), (x_s2, eps_ud)),
            Self::NeutralAxisAtTop => ((top, 0.0), (x_s2, eps_ud)),
            Self::TopLayerYield => ((x_s1, eps_yd), (x_s2, eps_ud)),
            Self::PureTension => ((top, eps_ud), (bottom, eps_ud)),
        };
        StrainField::through(h, a, b)
    }
}

impl std::fmt::Display for CharacteristicState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
