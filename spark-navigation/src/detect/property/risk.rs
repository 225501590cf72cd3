use crate::config::CatalogConfig;
use crate::error::{NavigationError, Result};
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,    // Moving traffic, people
    Medium,  // Bicycles, animals, ground hazards
    Low,     // Signals and doors
    Minimal, // Static objects
}

impl Display for RiskTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::High => write!(f, "High risk"),
            RiskTier::Medium => write!(f, "Medium risk"),
            RiskTier::Low => write!(f, "Low risk"),
            RiskTier::Minimal => write!(f, "Minimal risk"),
        }
    }
}

impl RiskTier {
    pub fn score(&self) -> f32 {
        match self {
            RiskTier::High => 1.0,
            RiskTier::Medium => 0.7,
            RiskTier::Low => 0.4,
            RiskTier::Minimal => 0.2,
        }
    }
}

/// Lowercases a label and folds whitespace and hyphens to `_`, so "Traffic Light" matches
/// `traffic_light`.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Read-only mapping from class label to risk tier. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct ObjectTypeCatalog {
    tiers: HashMap<String, RiskTier>,
    unknown_risk: f32,
}

impl Default for ObjectTypeCatalog {
    fn default() -> Self {
        Self::build(&CatalogConfig::default())
    }
}

impl ObjectTypeCatalog {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.unknown_risk) {
            return Err(NavigationError::Config(format!(
                "unknown_risk must be within [0, 1], got {}",
                config.unknown_risk
            )));
        }
        Ok(Self::build(config))
    }

    fn build(config: &CatalogConfig) -> Self {
        let mut tiers = HashMap::new();
        // Lower tiers are inserted first so a label listed twice keeps its highest tier.
        for (tier, labels) in [
            (RiskTier::Minimal, &config.minimal),
            (RiskTier::Low, &config.low),
            (RiskTier::Medium, &config.medium),
            (RiskTier::High, &config.high),
        ] {
            for label in labels {
                tiers.insert(normalize_label(label), tier);
            }
        }

        Self {
            tiers,
            unknown_risk: config.unknown_risk,
        }
    }

    /// Returns the tier of a label, or `None` when the catalog does not know it.
    pub fn resolve(&self, label: &str) -> Option<RiskTier> {
        self.tiers.get(&normalize_label(label)).copied()
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.resolve(label).is_some()
    }

    /// Risk score of a label, falling back to the configured default for unknown labels.
    pub fn lookup(&self, label: &str) -> f32 {
        match self.resolve(label) {
            Some(tier) => tier.score(),
            None => {
                debug!(
                    "Unknown object label '{}', using default risk {}",
                    label, self.unknown_risk
                );
                self.unknown_risk
            }
        }
    }

    pub fn unknown_risk(&self) -> f32 {
        self.unknown_risk
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
