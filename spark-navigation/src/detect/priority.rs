use crate::detect::property::distance::DepthPolicy;
use crate::detect::property::geometry::{DetectedObject, FrameContext};
use crate::detect::property::risk::ObjectTypeCatalog;
use crate::detect::{
    PRIORITY_DEPTH_WEIGHT, PRIORITY_POSITION_WEIGHT, PRIORITY_SIZE_WEIGHT, PRIORITY_TYPE_WEIGHT,
};
use crate::error::{NavigationError, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// How the horizontal position enters the priority score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionTerm {
    /// `(x - x_center) / W`: negative left of center, positive right of it.
    #[default]
    Signed,
    /// `1 - |x - x_center| / W`: highest for objects straight ahead.
    Centrality,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub depth: f32,
    pub position: f32,
    pub size: f32,
    #[serde(rename = "type")]
    pub object_type: f32,
    pub position_term: PositionTerm,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            depth: PRIORITY_DEPTH_WEIGHT,
            position: PRIORITY_POSITION_WEIGHT,
            size: PRIORITY_SIZE_WEIGHT,
            object_type: PRIORITY_TYPE_WEIGHT,
            position_term: PositionTerm::Signed,
        }
    }
}

/// Computes `P = w1*d + w2*((x - x_center)/W) + w3*(A/A_total) + w4*S_type`.
///
/// The score only orders objects against each other; it is not clamped and never spoken.
#[derive(Debug, Copy, Clone, Default)]
pub struct PriorityScorer {
    weights: PriorityWeights,
    depth_policy: DepthPolicy,
}

impl PriorityScorer {
    pub fn new(weights: PriorityWeights, depth_policy: DepthPolicy) -> Self {
        Self {
            weights,
            depth_policy,
        }
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    pub fn score(
        &self,
        obj: &DetectedObject,
        frame: &FrameContext,
        catalog: &ObjectTypeCatalog,
    ) -> Result<f32> {
        obj.bounding_box.validate()?;
        if !obj.depth.is_finite() {
            return Err(NavigationError::InvalidDepth(obj.depth));
        }

        let depth = if (0.0..=1.0).contains(&obj.depth) {
            obj.depth
        } else {
            warn!(
                "Depth {} of '{}' is outside the expected range [0, 1]",
                obj.depth, obj.label
            );
            self.depth_policy.apply(obj.depth)
        };

        let width = frame.width() as f32;
        let offset = obj.bounding_box.center_x() - frame.center_x();
        let position = match self.weights.position_term {
            PositionTerm::Signed => offset / width,
            PositionTerm::Centrality => 1.0 - offset.abs() / width,
        };
        let size = obj.bounding_box.area() / frame.total_area();
        let type_score = catalog.lookup(&obj.label);

        Ok(self.weights.depth * depth
            + self.weights.position * position
            + self.weights.size * size
            + self.weights.object_type * type_score)
    }
}
