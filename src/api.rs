//! JSON request and response types shared by the HTTP server and the WASM
//! bindings
//!
//! Inputs use SI base units except loads (kN, kNm) and areas (cm²); outputs
//! report strains in per mille, stresses in MPa, forces in kN and moments in
//! kNm.

use serde::{Deserialize, Serialize};

use crate::analysis::{Densification, DesignMethod, DesignOptions};
use crate::design::ReinforcementVariants;
use crate::diagram::INTERVAL_COUNT;
use crate::elements::{ConcreteLaw, Reinforcement, SectionGeometry, SteelLaw};
use crate::error::{SectionError, SectionResult};
use crate::loads::DesignLoads;
use crate::model::SectionModel;
use crate::results::{DesignResult, DesignStatus, DiagramPoint, DiagramSummary};

/// Section, materials, loads and options; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionRequest {
    pub b: Option<f64>,
    pub h: Option<f64>,
    pub top_cover: Option<f64>,
    pub bottom_cover: Option<f64>,
    pub fcd: Option<f64>,
    pub eps_c2: Option<f64>,
    pub eps_cu: Option<f64>,
    pub fyd: Option<f64>,
    pub es: Option<f64>,
    pub eps_ud: Option<f64>,
    /// Design axial force in kN
    pub n_design: Option<f64>,
    /// Design moment in kNm
    pub m_design: Option<f64>,
    /// Top layer area in cm²
    pub as1: Option<f64>,
    /// Bottom layer area in cm²
    pub as2: Option<f64>,
    /// One count for every interval, or one per interval
    pub densities: Option<Vec<usize>>,
    pub method: Option<DesignMethod>,
    pub refine_iterations: Option<usize>,
}

impl SectionRequest {
    pub fn model(&self) -> SectionResult<SectionModel> {
        let geom = SectionGeometry::default();
        let concrete = ConcreteLaw::default();
        let steel = SteelLaw::default();
        SectionModel::new(
            SectionGeometry::new(
                self.b.unwrap_or(geom.width),
                self.h.unwrap_or(geom.height),
                self.top_cover.unwrap_or(geom.top_cover),
                self.bottom_cover.unwrap_or(geom.bottom_cover),
            ),
            ConcreteLaw::new(
                self.fcd.unwrap_or(concrete.fcd),
                self.eps_c2.unwrap_or(concrete.eps_c2),
                self.eps_cu.unwrap_or(concrete.eps_cu),
            ),
            SteelLaw::new(
                self.fyd.unwrap_or(steel.fyd),
                self.es.unwrap_or(steel.es),
                self.eps_ud.unwrap_or(steel.eps_ud),
            ),
        )
    }

    pub fn loads(&self) -> DesignLoads {
        DesignLoads::from_kn(self.n_design.unwrap_or(0.0), self.m_design.unwrap_or(30.0))
    }

    pub fn reinforcement(&self) -> Reinforcement {
        Reinforcement::from_cm2(self.as1.unwrap_or(0.0), self.as2.unwrap_or(0.0))
    }

    pub fn densification(&self, default: usize) -> SectionResult<Densification> {
        let densification = match self.densities.as_deref() {
            None => Densification::Uniform(default),
            Some([n]) => Densification::Uniform(*n),
            Some(counts) if counts.len() == INTERVAL_COUNT => {
                let mut per = [0; INTERVAL_COUNT];
                per.copy_from_slice(counts);
                Densification::PerInterval(per)
            }
            Some(counts) => {
                return Err(SectionError::InvalidInput(format!(
                    "densities must hold 1 or {} counts, got {}",
                    INTERVAL_COUNT,
                    counts.len()
                )))
            }
        };
        densification.validate()?;
        Ok(densification)
    }

    pub fn design_options(&self) -> SectionResult<DesignOptions> {
        let mut options = DesignOptions::default();
        options.method = self.method.unwrap_or_default();
        options.densification = self.densification(20)?;
        options.refine_iterations = self.refine_iterations.unwrap_or(0);
        Ok(options)
    }
}

/// Envelope for every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn from_result(result: SectionResult<T>) -> Self {
        match result {
            Ok(results) => Self {
                success: true,
                error: None,
                results: Some(results),
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            results: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagramPointData {
    pub name: String,
    pub characteristic: bool,
    pub eps_top: f64,
    pub eps_bottom: f64,
    pub eps_s1: f64,
    pub eps_s2: f64,
    pub sigma_s1: f64,
    pub sigma_s2: f64,
    pub fs1: f64,
    pub fs2: f64,
    pub fc: f64,
    pub mc: f64,
    pub n: f64,
    pub m: f64,
}

impl From<&DiagramPoint> for DiagramPointData {
    fn from(p: &DiagramPoint) -> Self {
        Self {
            name: p.label.clone(),
            characteristic: p.is_characteristic(),
            eps_top: p.strain.top * 1000.0,
            eps_bottom: p.strain.bottom * 1000.0,
            eps_s1: p.top_layer.strain * 1000.0,
            eps_s2: p.bottom_layer.strain * 1000.0,
            sigma_s1: p.top_layer.stress / 1e6,
            sigma_s2: p.bottom_layer.stress / 1e6,
            fs1: p.top_layer.force / 1000.0,
            fs2: p.bottom_layer.force / 1000.0,
            fc: p.concrete.n / 1000.0,
            mc: p.concrete.m / 1000.0,
            n: p.n / 1000.0,
            m: p.m / 1000.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagramData {
    pub points: Vec<DiagramPointData>,
    pub summary: DiagramSummary,
}

/// Plain concrete point described by curvature and centroid strain
#[derive(Debug, Serialize)]
pub struct ConcretePointData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Curvature in 1/m
    pub k: f64,
    pub q: f64,
    pub n: f64,
    pub m: f64,
}

#[derive(Debug, Serialize)]
pub struct DesignData {
    pub status: DesignStatus,
    pub converged: bool,
    /// Required bottom area in cm²
    pub as2: f64,
    pub eps_top: f64,
    pub eps_bottom: f64,
    pub eps_s2: f64,
    pub sigma_s2: f64,
    pub fc: f64,
    pub mc: f64,
    pub fs2: f64,
    pub n: f64,
    pub m: f64,
    pub n_design: f64,
    pub m_design: f64,
    pub error_abs: f64,
    pub error_rel: f64,
    pub iterations: usize,
    /// Alternative arrangements at the design strain state
    pub variants: ReinforcementVariants,
}

impl DesignData {
    fn new(result: &DesignResult, loads: &DesignLoads, variants: ReinforcementVariants) -> Self {
        Self {
            status: result.status,
            converged: result.converged,
            as2: result.required_area_cm2(),
            eps_top: result.strain.top * 1000.0,
            eps_bottom: result.strain.bottom * 1000.0,
            eps_s2: result.bottom_layer_strain * 1000.0,
            sigma_s2: result.bottom_layer_stress / 1e6,
            fc: result.concrete.n / 1000.0,
            mc: result.concrete.m / 1000.0,
            fs2: result.required_area * result.bottom_layer_stress / 1000.0,
            n: result.n / 1000.0,
            m: result.m / 1000.0,
            n_design: loads.n / 1000.0,
            m_design: loads.m / 1000.0,
            error_abs: result.error_abs / 1000.0,
            error_rel: result.error_rel,
            iterations: result.iterations,
            variants,
        }
    }
}

/// Interaction diagram for the requested reinforcement
pub fn interaction_diagram(request: &SectionRequest) -> SectionResult<DiagramData> {
    let model = request.model()?;
    let reinforcement = request.reinforcement();
    let densification = request.densification(10)?;
    let diagram = model.interaction_diagram(&reinforcement, &densification)?;
    Ok(DiagramData {
        points: diagram.iter().map(DiagramPointData::from).collect(),
        summary: diagram.summary(),
    })
}

/// Plain concrete diagram in (k, q) form
pub fn concrete_diagram(request: &SectionRequest) -> SectionResult<Vec<ConcretePointData>> {
    let model = request.model()?;
    let densification = request.densification(10)?;
    let diagram = model.interaction_diagram(&Reinforcement::none(), &densification)?;
    let h = model.geometry.height;
    Ok(diagram
        .iter()
        .map(|p| ConcretePointData {
            name: p.is_characteristic().then(|| p.label.clone()),
            k: p.strain.curvature(h),
            q: p.strain.centroid_strain(),
            n: p.concrete.n / 1000.0,
            m: p.concrete.m / 1000.0,
        })
        .collect())
}

/// Required bottom reinforcement for the requested loads
pub fn design(request: &SectionRequest) -> SectionResult<DesignData> {
    let model = request.model()?;
    let loads = request.loads();
    let options = request.design_options()?;
    let result = model.design(&loads, &options)?;
    let variants = model.reinforcement_variants(&result.strain, &loads);
    Ok(DesignData::new(&result, &loads, variants))
}
