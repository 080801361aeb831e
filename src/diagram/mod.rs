//! N-M interaction diagram of a reinforced section

mod builder;
mod states;

pub use builder::InteractionDiagramBuilder;
pub use states::CharacteristicState;

use serde::{Deserialize, Serialize};

use crate::elements::Reinforcement;
use crate::results::{DiagramPoint, DiagramSummary, PointKind};

/// Number of intervals between the characteristic states
pub const INTERVAL_COUNT: usize = 8;

/// Ordered sequence of diagram points, from pure compression to pure tension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDiagram {
    pub reinforcement: Reinforcement,
    points: Vec<DiagramPoint>,
}

impl InteractionDiagram {
    pub fn new(reinforcement: Reinforcement, points: Vec<DiagramPoint>) -> Self {
        Self {
            reinforcement,
            points,
        }
    }

    pub fn points(&self) -> &[DiagramPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<DiagramPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagramPoint> {
        self.points.iter()
    }

    pub fn characteristic_points(&self) -> impl Iterator<Item = &DiagramPoint> {
        self.points.iter().filter(|p| p.is_characteristic())
    }

    /// Point of a given characteristic state
    pub fn point(&self, state: CharacteristicState) -> Option<&DiagramPoint> {
        self.points
            .iter()
            .find(|p| p.kind == PointKind::Characteristic(state))
    }

    /// Extremes of the diagram
    pub fn summary(&self) -> DiagramSummary {
        let mut summary = DiagramSummary {
            num_points: self.points.len(),
            min_n: 0.0,
            min_n_point: String::new(),
            max_n: 0.0,
            max_n_point: String::new(),
            max_abs_m: 0.0,
            max_abs_m_point: String::new(),
        };
        let Some(first) = self.points.first() else {
            return summary;
        };
        summary.min_n = first.n;
        summary.min_n_point = first.label.clone();
        summary.max_n = first.n;
        summary.max_n_point = first.label.clone();

        for p in &self.points {
            if p.n < summary.min_n {
                summary.min_n = p.n;
                summary.min_n_point = p.label.clone();
            }
            if p.n > summary.max_n {
                summary.max_n = p.n;
                summary.max_n_point = p.label.clone();
            }
            if p.m.abs() > summary.max_abs_m {
                summary.max_abs_m = p.m.abs();
                summary.max_abs_m_point = p.label.clone();
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a InteractionDiagram {
    type Item = &'a DiagramPoint;
    type IntoIter = std::slice::Iter<'a, DiagramPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
