use log::warn;
use serde::Deserialize;
use spark_navigation::{BoundingBox, DepthMap, DetectedObject, FrameContext, FrameDetections};

/// One sampled frame as written by the detection/depth stage.
///
/// Each object carries either a pixel `bbox` (`[x_min, y_min, x_max, y_max]`) or a detector
/// `box_2d` (`[y_min, x_min, y_max, x_max]` on a 0..1000 scale), and either its own `depth`
/// or the frame's `depth_map` to sample it from.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    #[serde(default)]
    pub frame_index: Option<usize>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub depth_map: Option<DepthMap>,
    #[serde(default)]
    pub objects: Vec<ObjectInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectInput {
    pub label: String,
    #[serde(default)]
    pub bbox: Option<[f32; 4]>,
    #[serde(default)]
    pub box_2d: Option<[f32; 4]>,
    #[serde(default)]
    pub depth: Option<f32>,
}

impl FrameInput {
    /// Converts the input into detections for the guide.
    ///
    /// Returns the detections and the number of objects that had to be skipped because
    /// they carried no box or no depth.
    pub fn into_detections(self, position: usize) -> (FrameDetections, usize) {
        let frame_index = self.frame_index.unwrap_or(position);
        let mut detections = FrameDetections {
            frame_index,
            timestamp: self.timestamp,
            width: self.width,
            height: self.height,
            objects: Vec::with_capacity(self.objects.len()),
        };

        // Invalid geometry is reported by the guide, which substitutes the fallback message.
        let Ok(frame) = FrameContext::new(self.width, self.height) else {
            return (detections, self.objects.len());
        };

        let depth_map = self.depth_map.map(|map| map.normalized());
        let mut skipped = 0;

        for object in self.objects {
            let bounding_box = match (object.bbox, object.box_2d) {
                (Some([x_min, y_min, x_max, y_max]), _) => {
                    BoundingBox::new(x_min, y_min, x_max, y_max)
                }
                (None, Some(box_2d)) => BoundingBox::from_normalized_yxyx(box_2d, &frame),
                (None, None) => {
                    warn!(
                        "Frame {}: '{}' has no bounding box, skipping",
                        frame_index, object.label
                    );
                    skipped += 1;
                    continue;
                }
            };

            let depth = match (object.depth, &depth_map) {
                (Some(depth), _) => depth,
                (None, Some(map)) => map.object_depth(&bounding_box, &frame),
                (None, None) => {
                    warn!(
                        "Frame {}: '{}' has no depth and the frame has no depth map, skipping",
                        frame_index, object.label
                    );
                    skipped += 1;
                    continue;
                }
            };

            detections
                .objects
                .push(DetectedObject::new(object.label, bounding_box, depth));
        }

        (detections, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_boxes_with_depth() -> anyhow::Result<()> {
        let frame: FrameInput = serde_json::from_str(
            r#"{
                "timestamp": 2.0,
                "width": 1000,
                "height": 600,
                "objects": [
                    {"label": "car", "bbox": [400, 200, 600, 400], "depth": 0.85}
                ]
            }"#,
        )?;

        let (detections, skipped) = frame.into_detections(4);
        assert_eq!(skipped, 0);
        assert_eq!(detections.frame_index, 4);
        assert_eq!(detections.timestamp, Some(2.0));
        assert_eq!(
            detections.objects[0].bounding_box,
            BoundingBox::new(400.0, 200.0, 600.0, 400.0)
        );
        assert_eq!(detections.objects[0].depth, 0.85);
        Ok(())
    }

    #[test]
    fn test_normalized_boxes_and_depth_map() -> anyhow::Result<()> {
        let frame: FrameInput = serde_json::from_str(
            r#"{
                "frame_index": 9,
                "width": 200,
                "height": 100,
                "depth_map": {"width": 2, "height": 1, "values": [3.0, 7.0]},
                "objects": [
                    {"label": "dog", "box_2d": [0, 500, 1000, 1000]},
                    {"label": "tree", "bbox": [0, 0, 100, 100]},
                    {"label": "ghost"}
                ]
            }"#,
        )?;

        let (detections, skipped) = frame.into_detections(0);
        assert_eq!(detections.frame_index, 9);
        assert_eq!(skipped, 1);
        assert_eq!(detections.objects.len(), 2);
        assert_eq!(
            detections.objects[0].bounding_box,
            BoundingBox::new(100.0, 0.0, 200.0, 100.0)
        );
        assert_eq!(detections.objects[0].depth, 1.0);
        assert_eq!(detections.objects[1].depth, 0.0);
        Ok(())
    }

    #[test]
    fn test_missing_depth_is_skipped() -> anyhow::Result<()> {
        let frame: FrameInput = serde_json::from_str(
            r#"{"width": 10, "height": 10, "objects": [{"label": "car", "bbox": [0, 0, 5, 5]}]}"#,
        )?;
        let (detections, skipped) = frame.into_detections(0);
        assert!(detections.objects.is_empty());
        assert_eq!(skipped, 1);
        Ok(())
    }

    #[test]
    fn test_bad_depth_map_is_rejected() {
        let parsed = serde_json::from_str::<FrameInput>(
            r#"{"width": 10, "height": 10, "depth_map": {"width": 2, "height": 2, "values": [1.0]}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_zero_width_keeps_frame_for_fallback() {
        let frame = FrameInput {
            frame_index: None,
            timestamp: None,
            width: 0,
            height: 10,
            depth_map: None,
            objects: vec![ObjectInput {
                label: "car".to_string(),
                bbox: Some([0.0, 0.0, 5.0, 5.0]),
                box_2d: None,
                depth: Some(0.5),
            }],
        };
        let (detections, skipped) = frame.into_detections(3);
        assert_eq!(detections.width, 0);
        assert_eq!(detections.frame_index, 3);
        assert_eq!(skipped, 1);
    }
}
