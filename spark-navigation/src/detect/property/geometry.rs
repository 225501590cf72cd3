use crate::detect::NORMALIZED_BOX_SCALE;
use crate::error::{NavigationError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in frame-pixel coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Converts a detector `box_2d` (`[y_min, x_min, y_max, x_max]`, each axis scaled to 0..1000)
    /// into frame pixels.
    pub fn from_normalized_yxyx(box_2d: [f32; 4], frame: &FrameContext) -> Self {
        let [y_min, x_min, y_max, x_max] = box_2d;
        let sx = frame.width() as f32 / NORMALIZED_BOX_SCALE;
        let sy = frame.height() as f32 / NORMALIZED_BOX_SCALE;
        Self::new(x_min * sx, y_min * sy, x_max * sx, y_max * sy)
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if ![self.x_min, self.y_min, self.x_max, self.y_max]
            .iter()
            .all(|v| v.is_finite())
        {
            Some("coordinates must be finite")
        } else if self.x_min < 0.0 || self.y_min < 0.0 {
            Some("coordinates must be non-negative")
        } else if self.x_max <= self.x_min {
            Some("x_max must be greater than x_min")
        } else if self.y_max <= self.y_min {
            Some("y_max must be greater than y_min")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(NavigationError::InvalidBoundingBox {
                x_min: self.x_min,
                y_min: self.y_min,
                x_max: self.x_max,
                y_max: self.y_max,
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

/// Pixel dimensions of one frame. Both sides are guaranteed positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrameContext")]
pub struct FrameContext {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawFrameContext {
    width: u32,
    height: u32,
}

impl TryFrom<RawFrameContext> for FrameContext {
    type Error = NavigationError;

    fn try_from(raw: RawFrameContext) -> Result<Self> {
        FrameContext::new(raw.width, raw.height)
    }
}

impl FrameContext {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NavigationError::InvalidFrameGeometry { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }

    pub fn total_area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }
}

/// One detection of a frame, with the depth estimated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub bounding_box: BoundingBox,
    /// Normalized depth, 0 is far and 1 is near.
    pub depth: f32,
}

impl DetectedObject {
    pub fn new(label: impl Into<String>, bounding_box: BoundingBox, depth: f32) -> Self {
        Self {
            label: label.into(),
            bounding_box,
            depth,
        }
    }
}
