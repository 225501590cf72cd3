pub mod analysis;
pub mod guide;
pub mod priority;
pub mod property;
pub mod ranker;

// --- Priority Score Weights ---
pub(crate) const PRIORITY_DEPTH_WEIGHT: f32 = 0.5;
pub(crate) const PRIORITY_POSITION_WEIGHT: f32 = 0.2;
pub(crate) const PRIORITY_SIZE_WEIGHT: f32 = 0.1;
pub(crate) const PRIORITY_TYPE_WEIGHT: f32 = 0.2;

// --- Distance Thresholds ---
pub(crate) const DISTANCE_VERY_CLOSE_THRESHOLD: f32 = 0.7; // depth above this is "very close"
pub(crate) const DISTANCE_QUITE_CLOSE_THRESHOLD: f32 = 0.3; // depth above this is "quite close"

/// Number of objects announced per frame.
pub(crate) const DEFAULT_TOP_K: usize = 3;

/// Risk score for labels missing from the catalog (Minimal tier).
pub(crate) const UNKNOWN_LABEL_RISK: f32 = 0.2;

/// Scores closer than this are treated as tied and keep their input order.
pub(crate) const SCORE_TIE_EPSILON: f32 = 1e-6;

/// Detectors emitting `box_2d` use a 0..1000 coordinate range on both axes.
pub(crate) const NORMALIZED_BOX_SCALE: f32 = 1000.0;

pub(crate) const NO_HAZARD_MESSAGE: &str = "No objects detected, the path ahead is clear.";
pub(crate) const FALLBACK_MESSAGE: &str =
    "Unable to analyze the surroundings. Please move carefully.";

// --- Default Risk Tiers ---
pub(crate) const HIGH_RISK_OBJECTS: &[&str] = &["person", "car", "motorcycle", "truck", "bus", "vehicle"];
pub(crate) const MEDIUM_RISK_OBJECTS: &[&str] = &["bicycle", "dog", "pothole", "stairs", "structure"];
pub(crate) const LOW_RISK_OBJECTS: &[&str] = &["traffic_light", "stop_sign", "door"];
pub(crate) const MINIMAL_RISK_OBJECTS: &[&str] = &["bench", "wall", "tree", "building"];

/// Scenery that never affects walking safety and is not announced.
pub(crate) const EXCLUDED_OBJECTS: &[&str] = &[
    "mountain", "land", "sky", "lake", "sea", "ocean", "river", "cloud", "forest", "grass",
    "field", "landscape", "hill", "valley",
];
