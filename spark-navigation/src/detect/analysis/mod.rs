pub mod compose;
mod object_detected_describer;
mod warning_describer;

use crate::detect::property::direction::PositionGroup;
use crate::detect::property::distance::DistanceBand;
use crate::detect::ranker::ScoredObject;

pub(crate) use object_detected_describer::DetectedObjectDescriber;
pub(crate) use warning_describer::WarningDescriber;

/// A ranked detection with its distance band and position group assigned.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DescribedObject<'a> {
    pub scored: ScoredObject<'a>,
    pub distance: DistanceBand,
    pub position: PositionGroup,
}

/// Everything a describer may look at for one frame. Objects are in priority order.
#[derive(Debug)]
pub struct GuideData<'a> {
    pub objects: Vec<DescribedObject<'a>>,
}

/// Trait for generating a specific *part* of the navigation sentence.
pub trait Describer {
    /// Returns Some(description_part) if relevant, None otherwise.
    fn describe(&self, data: &GuideData) -> Option<String>;
}
