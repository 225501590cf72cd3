use crate::detect::property::geometry::{BoundingBox, FrameContext};
use crate::error::{NavigationError, Result};
use serde::{Deserialize, Serialize};

/// Dense per-pixel depth produced by the depth provider, row-major.
///
/// The map may have a different resolution than the frame it was estimated from; boxes are
/// rescaled into map coordinates before sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDepthMap")]
pub struct DepthMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct RawDepthMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl TryFrom<RawDepthMap> for DepthMap {
    type Error = NavigationError;

    fn try_from(raw: RawDepthMap) -> Result<Self> {
        DepthMap::new(raw.width, raw.height, raw.values)
    }
}

impl DepthMap {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || values.len() != width as usize * height as usize {
            return Err(NavigationError::InvalidDepthMap {
                width,
                height,
                len: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Min-max rescales the map to `[0, 1]`. A constant map becomes all zeros.
    pub fn normalized(&self) -> Self {
        let (min, max) = self
            .values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;

        let values = if range > 0.0 && range.is_finite() {
            self.values.iter().map(|v| (v - min) / range).collect()
        } else {
            vec![0.0; self.values.len()]
        };

        Self {
            width: self.width,
            height: self.height,
            values,
        }
    }

    /// Mean depth under a frame-pixel box.
    ///
    /// Args:
    ///     bbox (&BoundingBox): Box in frame-pixel coordinates.
    ///     frame (&FrameContext): Frame the box belongs to, used to rescale into map coordinates.
    ///
    /// Returns:
    ///     f32: Mean over the box region clipped to the map; at least one pixel is sampled.
    pub fn object_depth(&self, bbox: &BoundingBox, frame: &FrameContext) -> f32 {
        let sx = self.width as f32 / frame.width() as f32;
        let sy = self.height as f32 / frame.height() as f32;

        let (x1, x2) = Self::pixel_span(bbox.x_min * sx, bbox.x_max * sx, self.width);
        let (y1, y2) = Self::pixel_span(bbox.y_min * sy, bbox.y_max * sy, self.height);

        let row = self.width as usize;
        let mut sum = 0.0f64;
        for y in y1..y2 {
            sum += self.values[y * row + x1..y * row + x2]
                .iter()
                .map(|&v| v as f64)
                .sum::<f64>();
        }
        let count = ((x2 - x1) * (y2 - y1)) as f64;

        (sum / count) as f32
    }

    /// Half-open pixel range `[start, end)` clipped to `[0, limit)`, never empty.
    fn pixel_span(from: f32, to: f32, limit: u32) -> (usize, usize) {
        let last = limit as usize - 1;
        let start = (from.max(0.0) as usize).min(last);
        let end = (to.max(0.0) as usize).min(limit as usize).max(start + 1);
        (start, end)
    }
}
