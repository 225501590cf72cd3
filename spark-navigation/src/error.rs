use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavigationError>;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid frame geometry: {width}x{height}, both sides must be positive")]
    InvalidFrameGeometry { width: u32, height: u32 },

    #[error("Invalid bounding box ({x_min}, {y_min}, {x_max}, {y_max}): {reason}")]
    InvalidBoundingBox {
        x_min: f32,
        y_min: f32,
        x_max: f32,
        y_max: f32,
        reason: &'static str,
    },

    #[error("Invalid depth value: {0}")]
    InvalidDepth(f32),

    #[error("Invalid depth map: {width}x{height} with {len} values")]
    InvalidDepthMap { width: u32, height: u32, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NavigationError {
    /// Whether the error only concerns a single detection, so the rest of the frame can still be guided.
    pub fn is_per_object(&self) -> bool {
        matches!(
            self,
            NavigationError::InvalidBoundingBox { .. } | NavigationError::InvalidDepth(_)
        )
    }
}
