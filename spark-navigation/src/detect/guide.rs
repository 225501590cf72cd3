use crate::config::NavigationConfig;
use crate::detect::analysis::compose::NavigationTextGenerator;
use crate::detect::analysis::GuideData;
use crate::detect::priority::PriorityScorer;
use crate::detect::property::direction::PositionGroup;
use crate::detect::property::distance::DistanceBand;
use crate::detect::property::geometry::{BoundingBox, DetectedObject, FrameContext};
use crate::detect::property::risk::{normalize_label, ObjectTypeCatalog};
use crate::detect::ranker::ObjectRanker;
use crate::error::Result;
use hashbrown::HashSet;
use log::{debug, error};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Detections of one sampled frame, as delivered by the detection and depth providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    pub frame_index: usize,
    /// Seconds from the start of the video.
    #[serde(default)]
    pub timestamp: Option<f64>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
}

/// An announced object, as handed to the speech component alongside the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityObject {
    pub label: String,
    pub bounding_box: BoundingBox,
    pub depth: f32,
    pub priority_score: f32,
    pub distance: DistanceBand,
    pub position: PositionGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGuide {
    pub frame_index: usize,
    pub timestamp: Option<f64>,
    pub navigation_text: String,
    pub priority_objects: Vec<PriorityObject>,
    /// Detections that could not be scored (malformed box, non-finite depth).
    pub dropped: usize,
    /// Labels that were scored with the catalog default.
    pub unknown_labels: Vec<String>,
    /// Set when the frame could not be analyzed and the fallback message was used.
    pub degraded: bool,
}

/// Per-frame pipeline: rank, select, describe. Built once and shared across worker threads.
pub struct NavigationGuide {
    ranker: ObjectRanker,
    generator: NavigationTextGenerator,
    top_k: usize,
    excluded_labels: HashSet<String>,
    fallback_message: String,
}

impl Default for NavigationGuide {
    fn default() -> Self {
        Self::build(&NavigationConfig::default(), ObjectTypeCatalog::default())
    }
}

impl NavigationGuide {
    pub fn new(config: &NavigationConfig) -> Result<Self> {
        config.validate()?;
        let catalog = ObjectTypeCatalog::from_config(&config.catalog)?;
        Ok(Self::build(config, catalog))
    }

    fn build(config: &NavigationConfig, catalog: ObjectTypeCatalog) -> Self {
        let scorer = PriorityScorer::new(config.weights, config.distance.out_of_range);
        Self {
            ranker: ObjectRanker::new(scorer, catalog),
            generator: NavigationTextGenerator::from_config(config),
            top_k: config.top_k,
            excluded_labels: config
                .excluded_labels
                .iter()
                .map(|label| normalize_label(label))
                .collect(),
            fallback_message: config.fallback_message.clone(),
        }
    }

    pub fn ranker(&self) -> &ObjectRanker {
        &self.ranker
    }

    pub fn generator(&self) -> &NavigationTextGenerator {
        &self.generator
    }

    pub fn is_excluded(&self, label: &str) -> bool {
        self.excluded_labels.contains(&normalize_label(label))
    }

    /// Generates the navigation guide for one frame.
    ///
    /// Fails only when the frame geometry is invalid; malformed detections are dropped and
    /// counted in `FrameGuide::dropped`.
    pub fn guide_frame(&self, detections: &FrameDetections) -> Result<FrameGuide> {
        let frame = FrameContext::new(detections.width, detections.height)?;

        let mut ranking = self.ranker.rank(&detections.objects, &frame);
        ranking
            .scored
            .retain(|scored| !self.is_excluded(&scored.object.label));

        let mut unknown_labels: Vec<String> = Vec::new();
        for scored in &ranking.scored {
            let label = &scored.object.label;
            if !self.ranker.catalog().is_known(label) && !unknown_labels.contains(label) {
                unknown_labels.push(label.clone());
            }
        }

        let selected = ranking.top(self.top_k);
        let data = GuideData {
            objects: self.generator.describe_objects(selected, &frame),
        };
        let navigation_text = self.generator.compose(&data);

        let priority_objects = data
            .objects
            .iter()
            .map(|described| PriorityObject {
                label: described.scored.object.label.clone(),
                bounding_box: described.scored.object.bounding_box,
                depth: described.scored.object.depth,
                priority_score: described.scored.priority_score,
                distance: described.distance,
                position: described.position,
            })
            .collect();

        debug!(
            "Frame {}: {} detections, {} announced, {} dropped",
            detections.frame_index,
            detections.objects.len(),
            data.objects.len(),
            ranking.rejected.len()
        );

        Ok(FrameGuide {
            frame_index: detections.frame_index,
            timestamp: detections.timestamp,
            navigation_text,
            priority_objects,
            dropped: ranking.rejected.len(),
            unknown_labels,
            degraded: false,
        })
    }

    /// Like [`guide_frame`](Self::guide_frame), but a frame that cannot be analyzed yields the
    /// fallback message instead of an error.
    pub fn guide_or_fallback(&self, detections: &FrameDetections) -> FrameGuide {
        match self.guide_frame(detections) {
            Ok(guide) => guide,
            Err(e) => {
                error!("Frame {} could not be guided: {}", detections.frame_index, e);
                FrameGuide {
                    frame_index: detections.frame_index,
                    timestamp: detections.timestamp,
                    navigation_text: self.fallback_message.clone(),
                    priority_objects: Vec::new(),
                    dropped: detections.objects.len(),
                    unknown_labels: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    /// Guides independent frames in parallel. The output keeps the input order.
    pub fn guide_frames(&self, frames: &[FrameDetections]) -> Vec<FrameGuide> {
        frames
            .par_iter()
            .map(|detections| self.guide_or_fallback(detections))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::Cell;
    use std::sync::Once;

    thread_local! {
        static RANGE_WARNINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts out-of-range depth warnings emitted on the current thread.
    struct RangeWarningCounter;

    impl Log for RangeWarningCounter {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if record.level() == Level::Warn
                && record.args().to_string().contains("outside the expected range")
            {
                RANGE_WARNINGS.with(|count| count.set(count.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    fn count_range_warnings(f: impl FnOnce()) -> usize {
        static INIT: Once = Once::new();
        static LOGGER: RangeWarningCounter = RangeWarningCounter;
        INIT.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Warn);
            }
        });
        RANGE_WARNINGS.with(|count| count.set(0));
        f();
        RANGE_WARNINGS.with(|count| count.get())
    }

    fn detections(objects: Vec<DetectedObject>) -> FrameDetections {
        FrameDetections {
            frame_index: 7,
            timestamp: Some(3.5),
            width: 1000,
            height: 600,
            objects,
        }
    }

    #[test]
    fn test_excluded_labels_are_not_announced() {
        let guide = NavigationGuide::default();
        let frame = detections(vec![
            DetectedObject::new("Sky", BoundingBox::new(0.0, 0.0, 1000.0, 200.0), 0.0),
            DetectedObject::new("bench", BoundingBox::new(100.0, 300.0, 200.0, 400.0), 0.1),
        ]);

        let result = guide.guide_frame(&frame).unwrap();
        assert_eq!(result.priority_objects.len(), 1);
        assert_eq!(result.priority_objects[0].label, "bench");
        assert!(!result.navigation_text.to_lowercase().contains("sky"));
        assert_eq!(result.frame_index, 7);
        assert_eq!(result.timestamp, Some(3.5));
    }

    #[test]
    fn test_unknown_labels_are_reported_once() {
        let guide = NavigationGuide::default();
        let frame = detections(vec![
            DetectedObject::new("umbrella", BoundingBox::new(100.0, 300.0, 200.0, 400.0), 0.1),
            DetectedObject::new("umbrella", BoundingBox::new(700.0, 300.0, 800.0, 400.0), 0.2),
            DetectedObject::new("car", BoundingBox::new(400.0, 300.0, 600.0, 400.0), 0.2),
        ]);

        let result = guide.guide_frame(&frame).unwrap();
        assert_eq!(result.unknown_labels, vec!["umbrella".to_string()]);
    }

    #[test]
    fn test_invalid_geometry_falls_back() {
        let guide = NavigationGuide::default();
        let mut frame = detections(vec![DetectedObject::new(
            "car",
            BoundingBox::new(400.0, 300.0, 600.0, 400.0),
            0.9,
        )]);
        frame.width = 0;

        assert!(guide.guide_frame(&frame).is_err());
        let result = guide.guide_or_fallback(&frame);
        assert!(result.degraded);
        assert_eq!(
            result.navigation_text,
            "Unable to analyze the surroundings. Please move carefully."
        );
    }

    #[test]
    fn test_top_k_from_config() {
        let config = NavigationConfig {
            top_k: 1,
            ..NavigationConfig::default()
        };
        let guide = NavigationGuide::new(&config).unwrap();
        let frame = detections(vec![
            DetectedObject::new("bench", BoundingBox::new(100.0, 300.0, 200.0, 400.0), 0.1),
            DetectedObject::new("car", BoundingBox::new(400.0, 300.0, 600.0, 400.0), 0.9),
        ]);

        let result = guide.guide_frame(&frame).unwrap();
        assert_eq!(result.priority_objects.len(), 1);
        assert_eq!(result.priority_objects[0].label, "car");
        assert_eq!(
            result.navigation_text,
            "Warning! There is a car (very close) directly ahead."
        );
    }

    #[test]
    fn test_out_of_range_depth_is_reported_once() {
        let guide = NavigationGuide::default();
        let frame = detections(vec![DetectedObject::new(
            "car",
            BoundingBox::new(400.0, 300.0, 600.0, 400.0),
            1.4,
        )]);

        let mut result = None;
        let warnings = count_range_warnings(|| result = guide.guide_frame(&frame).ok());
        assert_eq!(warnings, 1);
        assert_eq!(
            result.map(|r| r.navigation_text),
            Some("Warning! There is a car (very close) directly ahead.".to_string())
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = NavigationConfig {
            top_k: 0,
            ..NavigationConfig::default()
        };
        assert!(NavigationGuide::new(&config).is_err());
    }
}
