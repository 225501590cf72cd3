use crate::config::DistanceConfig;
use crate::detect::{DISTANCE_QUITE_CLOSE_THRESHOLD, DISTANCE_VERY_CLOSE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceBand {
    VeryClose,  // Strong warning
    QuiteClose, // Mild warning
    FarAway,    // No warning needed
}

impl Display for DistanceBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceBand::VeryClose => write!(f, "very close"),
            DistanceBand::QuiteClose => write!(f, "quite close"),
            DistanceBand::FarAway => write!(f, "far away"),
        }
    }
}

impl DistanceBand {
    /// Bands that put "Warning!" in front of the utterance.
    pub fn is_warning(&self) -> bool {
        matches!(self, DistanceBand::VeryClose | DistanceBand::QuiteClose)
    }

    /// Classifies with the default thresholds (0.7 / 0.3).
    pub fn from_depth(depth: f32) -> Self {
        DistanceClassifier::default().classify(depth)
    }
}

/// What to do with a depth outside `[0, 1]` before scoring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    #[default]
    PassThrough,
    Clamp,
}

impl DepthPolicy {
    pub fn apply(&self, depth: f32) -> f32 {
        match self {
            DepthPolicy::PassThrough => depth,
            DepthPolicy::Clamp => depth.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistanceClassifier {
    very_close: f32,
    quite_close: f32,
    policy: DepthPolicy,
}

impl Default for DistanceClassifier {
    fn default() -> Self {
        Self {
            very_close: DISTANCE_VERY_CLOSE_THRESHOLD,
            quite_close: DISTANCE_QUITE_CLOSE_THRESHOLD,
            policy: DepthPolicy::PassThrough,
        }
    }
}

impl DistanceClassifier {
    pub fn from_config(config: &DistanceConfig) -> Self {
        Self {
            very_close: config.very_close,
            quite_close: config.quite_close,
            policy: config.out_of_range,
        }
    }

    /// Maps a normalized depth (1 is near) to a distance band.
    /// Thresholds are exclusive and checked from nearest to farthest.
    pub fn classify(&self, depth: f32) -> DistanceBand {
        let depth = self.check_range(depth);
        if depth > self.very_close {
            DistanceBand::VeryClose
        } else if depth > self.quite_close {
            DistanceBand::QuiteClose
        } else {
            DistanceBand::FarAway
        }
    }

    /// Applies the out-of-range policy. Depth comes from an external estimator, so values
    /// outside `[0, 1]` are not rejected; the scorer reports them when the object is ranked.
    pub fn check_range(&self, depth: f32) -> f32 {
        if (0.0..=1.0).contains(&depth) || depth.is_nan() {
            return depth;
        }
        self.policy.apply(depth)
    }
}
