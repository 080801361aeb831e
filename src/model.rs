//! Section model - validated container for geometry, materials and settings

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::{Densification, DesignMethod, DesignOptions, IntegrationSettings};
use crate::design::{self, LookupDesigner, ReinforcementVariants, RootSearchDesigner};
use crate::diagram::{InteractionDiagram, InteractionDiagramBuilder};
use crate::elements::{ConcreteLaw, Reinforcement, SectionGeometry, SteelLaw, StrainField};
use crate::error::SectionResult;
use crate::integration::{AnalyticalIntegrator, ConcreteIntegrator};
use crate::loads::{DesignLoads, LoadCombination, LoadEffect};
use crate::results::{DesignResult, DiagramPoint, PointKind, SectionForces};

/// A rectangular reinforced concrete section ready for analysis and design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionModel {
    pub geometry: SectionGeometry,
    pub concrete: ConcreteLaw,
    pub steel: SteelLaw,
    #[serde(default)]
    pub settings: IntegrationSettings,
}

impl Default for SectionModel {
    fn default() -> Self {
        Self {
            geometry: SectionGeometry::default(),
            concrete: ConcreteLaw::default(),
            steel: SteelLaw::default(),
            settings: IntegrationSettings::default(),
        }
    }
}

impl SectionModel {
    /// Create a model, rejecting invalid geometry or materials
    pub fn new(
        geometry: SectionGeometry,
        concrete: ConcreteLaw,
        steel: SteelLaw,
    ) -> SectionResult<Self> {
        let model = Self {
            geometry,
            concrete,
            steel,
            settings: IntegrationSettings::default(),
        };
        model.validate()?;
        Ok(model)
    }

    /// Replace the integration settings
    pub fn with_settings(mut self, settings: IntegrationSettings) -> SectionResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn validate(&self) -> SectionResult<()> {
        self.geometry.validate()?;
        self.concrete.validate()?;
        self.steel.validate()?;
        self.settings.validate()
    }

    pub fn integrator(&self) -> AnalyticalIntegrator {
        AnalyticalIntegrator::new(self.settings)
    }

    // ========================
    // Forward analysis
    // ========================

    /// Concrete resultant from the closed form
    pub fn concrete_forces(&self, strain: &StrainField) -> SectionForces {
        self.integrator()
            .integrate(strain, &self.geometry, &self.concrete)
    }

    /// Full section state (concrete plus both layers) at a strain field
    pub fn evaluate_state(
        &self,
        strain: &StrainField,
        reinforcement: &Reinforcement,
    ) -> DiagramPoint {
        self.builder()
            .evaluate(strain, reinforcement, "state".to_string(), PointKind::Evaluated)
    }

    fn builder(&self) -> InteractionDiagramBuilder<'_, AnalyticalIntegrator> {
        InteractionDiagramBuilder::new(
            &self.geometry,
            &self.concrete,
            &self.steel,
            self.integrator(),
        )
    }

    /// N-M interaction diagram for the given reinforcement
    pub fn interaction_diagram(
        &self,
        reinforcement: &Reinforcement,
        densification: &Densification,
    ) -> SectionResult<InteractionDiagram> {
        self.builder().build(reinforcement, densification)
    }

    // ========================
    // Design
    // ========================

    pub fn lookup_designer(&self, options: DesignOptions) -> SectionResult<LookupDesigner> {
        LookupDesigner::new(
            self.geometry,
            self.concrete,
            self.steel,
            self.integrator(),
            options,
        )
    }

    pub fn root_search_designer(
        &self,
        options: DesignOptions,
    ) -> SectionResult<RootSearchDesigner> {
        RootSearchDesigner::new(
            self.geometry,
            self.concrete,
            self.steel,
            self.integrator(),
            options,
        )
    }

    /// Required bottom reinforcement for one pair of design loads
    pub fn design(
        &self,
        loads: &DesignLoads,
        options: &DesignOptions,
    ) -> SectionResult<DesignResult> {
        loads.validate()?;
        let result = match options.method {
            DesignMethod::Lookup => self.lookup_designer(options.clone())?.design(loads),
            DesignMethod::RootSearch => self.root_search_designer(options.clone())?.design(loads),
        };
        if options.log {
            info!(
                "Design N = {:.1} kN, M = {:.1} kNm: {:?}, As = {:.2} cm²",
                loads.n / 1000.0,
                loads.m / 1000.0,
                result.status,
                result.required_area_cm2()
            );
        }
        Ok(result)
    }

    /// Design every load combination against one designer
    ///
    /// For the lookup method the diagram is built only once.
    pub fn design_combinations(
        &self,
        effects: &HashMap<String, LoadEffect>,
        combos: &[LoadCombination],
        options: &DesignOptions,
    ) -> SectionResult<Vec<(String, DesignResult)>> {
        let loads = combos
            .iter()
            .map(|combo| {
                let loads = combo.combine(effects)?;
                loads.validate()?;
                Ok((combo.name.clone(), loads))
            })
            .collect::<SectionResult<Vec<_>>>()?;

        let results = match options.method {
            DesignMethod::Lookup => {
                let designer = self.lookup_designer(options.clone())?;
                loads
                    .into_iter()
                    .map(|(name, l)| (name, designer.design(&l)))
                    .collect()
            }
            DesignMethod::RootSearch => {
                let designer = self.root_search_designer(options.clone())?;
                loads
                    .into_iter()
                    .map(|(name, l)| (name, designer.design(&l)))
                    .collect()
            }
        };
        Ok(results)
    }

    /// Two-layer, bottom-only and symmetric reinforcement for a fixed
    /// strain state
    pub fn reinforcement_variants(
        &self,
        strain: &StrainField,
        loads: &DesignLoads,
    ) -> ReinforcementVariants {
        let concrete = self.concrete_forces(strain);
        design::reinforcement_variants(&self.geometry, &self.steel, strain, &concrete, loads)
    }
}
