use crate::detect::property::geometry::FrameContext;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Left,
    Center,
    Right,
}

impl Display for PositionGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionGroup::Left => write!(f, "to the left"),
            PositionGroup::Center => write!(f, "directly ahead"),
            PositionGroup::Right => write!(f, "to the right"),
        }
    }
}

impl PositionGroup {
    /// Groups a horizontal center coordinate into frame thirds.
    ///
    /// Args:
    ///     x (f32): Horizontal center of the object in frame pixels.
    ///     frame (&FrameContext): The frame the object was detected in.
    ///
    /// Returns:
    ///     PositionGroup: `Left` strictly before the first third, `Right` strictly after the
    ///     second third, `Center` otherwise (boundaries included).
    pub fn get_position(x: f32, frame: &FrameContext) -> Self {
        let width = frame.width() as f32;
        if x < width / 3.0 {
            PositionGroup::Left
        } else if x > 2.0 * width / 3.0 {
            PositionGroup::Right
        } else {
            PositionGroup::Center
        }
    }
}
