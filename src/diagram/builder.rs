//! Interaction diagram construction

use log::debug;

use super::{CharacteristicState, InteractionDiagram};
use crate::analysis::Densification;
use crate::elements::{ConcreteLaw, Reinforcement, SectionGeometry, SteelLaw, StrainField};
use crate::error::SectionResult;
use crate::integration::ConcreteIntegrator;
use crate::results::{DiagramPoint, LayerState, PointKind};

/// Walks the characteristic states and evaluates the section at each one
/// and at the interpolated samples in between
pub struct InteractionDiagramBuilder<'a, I> {
    geometry: &'a SectionGeometry,
    concrete: &'a ConcreteLaw,
    steel: &'a SteelLaw,
    integrator: I,
}

impl<'a, I: ConcreteIntegrator> InteractionDiagramBuilder<'a, I> {
    pub fn new(
        geometry: &'a SectionGeometry,
        concrete: &'a ConcreteLaw,
        steel: &'a SteelLaw,
        integrator: I,
    ) -> Self {
        Self {
            geometry,
            concrete,
            steel,
            integrator,
        }
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Strain fields of all characteristic states, in diagram order
    pub fn characteristic_fields(&self) -> SectionResult<Vec<(CharacteristicState, StrainField)>> {
        CharacteristicState::ALL
            .iter()
            .map(|state| {
                state
                    .strain_field(self.geometry, self.concrete, self.steel)
                    .map(|field| (*state, field))
            })
            .collect()
    }

    fn layer(&self, strain: &StrainField, position: f64, area: f64) -> LayerState {
        let eps = strain.at(position, self.geometry.height);
        let stress = self.steel.stress(eps);
        LayerState {
            position,
            area,
            strain: eps,
            stress,
            force: area * stress,
        }
    }

    /// Evaluate the full section resultant at one strain field
    pub fn evaluate(
        &self,
        strain: &StrainField,
        reinforcement: &Reinforcement,
        label: String,
        kind: PointKind,
    ) -> DiagramPoint {
        let concrete = self.integrator.integrate(strain, self.geometry, self.concrete);
        let top_layer = self.layer(
            strain,
            self.geometry.top_layer_position(),
            reinforcement.top_area,
        );
        let bottom_layer = self.layer(
            strain,
            self.geometry.bottom_layer_position(),
            reinforcement.bottom_area,
        );
        let total = concrete + top_layer.forces() + bottom_layer.forces();

        DiagramPoint {
            label,
            kind,
            strain: *strain,
            top_layer,
            bottom_layer,
            concrete,
            n: total.n,
            m: total.m,
        }
    }

    /// Build the diagram for the given reinforcement
    ///
    /// Samples inside each interval sit at `t = j / (n + 1)`, `j = 1..=n`.
    pub fn build(
        &self,
        reinforcement: &Reinforcement,
        densification: &Densification,
    ) -> SectionResult<InteractionDiagram> {
        reinforcement.validate()?;
        densification.validate()?;
        let states = self.characteristic_fields()?;
        let mut points = Vec::with_capacity(states.len() + densification.total());

        for (i, (state, field)) in states.iter().enumerate() {
            points.push(self.evaluate(
                field,
                reinforcement,
                state.label().to_string(),
                PointKind::Characteristic(*state),
            ));

            let Some((_, next)) = states.get(i + 1) else {
                continue;
            };
            let n = densification.count(i);
            for j in 1..=n {
                let t = j as f64 / (n + 1) as f64;
                points.push(self.evaluate(
                    &field.lerp(next, t),
                    reinforcement,
                    format!("{}.{}", state.label(), j),
                    PointKind::Intermediate {
                        interval: i,
                        step: j,
                    },
                ));
            }
        }

        debug!(
            "Interaction diagram: {} points (As1 = {:.3e} m², As2 = {:.3e} m²)",
            points.len(),
            reinforcement.top_area,
            reinforcement.bottom_area
        );

        Ok(InteractionDiagram::new(*reinforcement, points))
    }
}
