pub mod config;
pub mod detect;
pub mod error;

pub use config::{CatalogConfig, DistanceConfig, NavigationConfig};
pub use detect::analysis::compose::NavigationTextGenerator;
pub use detect::guide::{FrameDetections, FrameGuide, NavigationGuide, PriorityObject};
pub use detect::priority::{PriorityScorer, PriorityWeights, PositionTerm};
pub use detect::property::depth::DepthMap;
pub use detect::property::direction::PositionGroup;
pub use detect::property::distance::{DepthPolicy, DistanceBand, DistanceClassifier};
pub use detect::property::geometry::{BoundingBox, DetectedObject, FrameContext};
pub use detect::property::risk::{ObjectTypeCatalog, RiskTier};
pub use detect::ranker::{ObjectRanker, Ranking, ScoredObject};
pub use error::{NavigationError, Result};
