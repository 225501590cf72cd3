//! Tunable constants of the navigation guide, loadable from TOML.

use crate::detect::priority::PriorityWeights;
use crate::detect::property::distance::DepthPolicy;
use crate::detect::{
    DEFAULT_TOP_K, DISTANCE_QUITE_CLOSE_THRESHOLD, DISTANCE_VERY_CLOSE_THRESHOLD,
    EXCLUDED_OBJECTS, FALLBACK_MESSAGE, HIGH_RISK_OBJECTS, LOW_RISK_OBJECTS,
    MEDIUM_RISK_OBJECTS, MINIMAL_RISK_OBJECTS, NO_HAZARD_MESSAGE, UNKNOWN_LABEL_RISK,
};
use crate::error::{NavigationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Label lists for each risk tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
    pub minimal: Vec<String>,
    /// Risk score used for labels that appear in no tier.
    pub unknown_risk: f32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            high: to_strings(HIGH_RISK_OBJECTS),
            medium: to_strings(MEDIUM_RISK_OBJECTS),
            low: to_strings(LOW_RISK_OBJECTS),
            minimal: to_strings(MINIMAL_RISK_OBJECTS),
            unknown_risk: UNKNOWN_LABEL_RISK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    pub very_close: f32,
    pub quite_close: f32,
    pub out_of_range: DepthPolicy,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            very_close: DISTANCE_VERY_CLOSE_THRESHOLD,
            quite_close: DISTANCE_QUITE_CLOSE_THRESHOLD,
            out_of_range: DepthPolicy::PassThrough,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum number of objects announced per frame.
    pub top_k: usize,
    pub weights: PriorityWeights,
    pub distance: DistanceConfig,
    pub catalog: CatalogConfig,
    /// Scenery labels that are removed before ranking.
    pub excluded_labels: Vec<String>,
    /// Spoken when a frame has nothing to announce.
    pub no_hazard_message: String,
    /// Spoken when a frame could not be analyzed at all.
    pub fallback_message: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            weights: PriorityWeights::default(),
            distance: DistanceConfig::default(),
            catalog: CatalogConfig::default(),
            excluded_labels: to_strings(EXCLUDED_OBJECTS),
            no_hazard_message: NO_HAZARD_MESSAGE.to_string(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl NavigationConfig {
    /// Parses a (possibly partial) TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NavigationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(NavigationError::Config("top_k must be at least 1".to_string()));
        }

        let weights = &self.weights;
        if [weights.depth, weights.position, weights.size, weights.object_type]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(NavigationError::Config(
                "priority weights must be finite and non-negative".to_string(),
            ));
        }

        let distance = &self.distance;
        if !distance.very_close.is_finite()
            || !distance.quite_close.is_finite()
            || distance.quite_close > distance.very_close
        {
            return Err(NavigationError::Config(format!(
                "distance thresholds must satisfy quite_close <= very_close, got {} and {}",
                distance.quite_close, distance.very_close
            )));
        }

        if !(0.0..=1.0).contains(&self.catalog.unknown_risk) {
            return Err(NavigationError::Config(format!(
                "catalog.unknown_risk must be within [0, 1], got {}",
                self.catalog.unknown_risk
            )));
        }

        if self.no_hazard_message.trim().is_empty() || self.fallback_message.trim().is_empty() {
            return Err(NavigationError::Config(
                "no_hazard_message and fallback_message must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::priority::PositionTerm;

    #[test]
    fn test_default_is_valid() {
        let config = NavigationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_k, 3);
        assert_eq!(config.weights.depth, 0.5);
        assert_eq!(config.distance.very_close, 0.7);
        assert!(config.excluded_labels.contains(&"sky".to_string()));
    }

    #[test]
    fn test_partial_toml() {
        let config = NavigationConfig::from_toml_str(
            r#"
            top_k = 2
            no_hazard_message = "All clear."

            [weights]
            position_term = "centrality"

            [distance]
            out_of_range = "clamp"

            [catalog]
            high = ["person", "scooter"]
            "#,
        )
        .unwrap();

        assert_eq!(config.top_k, 2);
        assert_eq!(config.no_hazard_message, "All clear.");
        assert_eq!(config.weights.position_term, PositionTerm::Centrality);
        assert_eq!(config.weights.depth, 0.5);
        assert_eq!(config.distance.out_of_range, DepthPolicy::Clamp);
        assert_eq!(config.catalog.high, vec!["person", "scooter"]);
        assert_eq!(config.catalog.minimal, CatalogConfig::default().minimal);
    }

    #[test]
    fn test_invalid_values() {
        assert!(NavigationConfig::from_toml_str("top_k = 0").is_err());
        assert!(NavigationConfig::from_toml_str("[weights]\ndepth = -1.0").is_err());
        assert!(NavigationConfig::from_toml_str(
            "[distance]\nvery_close = 0.2\nquite_close = 0.5"
        )
        .is_err());
        assert!(NavigationConfig::from_toml_str("[catalog]\nunknown_risk = 2.0").is_err());
        assert!(NavigationConfig::from_toml_str("top_k = \"three\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        match NavigationConfig::load("/nonexistent/navigation.toml") {
            Err(NavigationError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
