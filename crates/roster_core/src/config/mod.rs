//! # Recommender Configuration
//!
//! All tuning constants of the engine live here instead of inline, so that
//! deployments and tests can swap them.
//!
//! ## Usage
//! ```rust
//! use roster_core::config::RecommenderConfig;
//!
//! let config = RecommenderConfig::default();
//! let greedy = RecommenderConfig::strict();
//! assert_eq!(greedy.selection.top_k, 1);
//! assert!(config.validate().is_ok());
//! ```

mod role_weights;
mod selection_config;
mod team_config;

pub use role_weights::{RoleWeights, WeightTable};
pub use selection_config::SelectionConfig;
pub use team_config::TeamConfig;

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub team: TeamConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub role_weights: RoleWeights,
}

impl RecommenderConfig {
    /// Wider top-K: more variety across runs, less score pressure
    pub fn exploratory() -> Self {
        let mut cfg = Self::default();
        cfg.selection.top_k = 24;
        cfg.team.max_attempts = 60;
        cfg
    }

    /// Always take the best-scoring candidate (no sampling variety)
    pub fn strict() -> Self {
        let mut cfg = Self::default();
        cfg.selection.top_k = 1;
        cfg
    }

    /// Parse a JSON document; missing sections and fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded recommender config from {:?}", path);
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.team.target_size == 0 {
            return Err(RosterError::InvalidConfig(
                "target_size must be at least 1".to_string(),
            ));
        }
        if self.team.max_attempts == 0 {
            return Err(RosterError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.selection.top_k == 0 {
            return Err(RosterError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        if let Some(margin) = self.team.power_margin {
            if !margin.is_finite() {
                return Err(RosterError::InvalidConfig(format!(
                    "power_margin must be finite, got {}",
                    margin
                )));
            }
        }
        let selection = self.selection.weights();
        let weights = selection
            .iter()
            .map(|(k, v)| (*k, *v))
            .chain(self.role_weights.all_weights());
        for (name, weight) in weights {
            if !weight.is_finite() {
                return Err(RosterError::InvalidConfig(format!(
                    "weight '{}' must be finite, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_default_config() {
        let cfg = RecommenderConfig::default();
        assert_eq!(cfg.team.target_size, 6);
        assert_eq!(cfg.team.max_attempts, 30);
        assert_eq!(cfg.selection.top_k, 12);
        assert_eq!(cfg.team.power_margin, Some(150.0));
        assert!((cfg.selection.coverage_weight - 10.0).abs() < 1e-9);
        assert!((cfg.selection.coverage_weight_vs_enemy - 50.0).abs() < 1e-9);
        assert!(cfg.role_weights.for_role(Role::Wall).is_some());
        assert!(cfg.role_weights.for_role(Role::SpecialTank).is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let exploratory = RecommenderConfig::exploratory();
        let strict = RecommenderConfig::strict();
        assert!(exploratory.selection.top_k > RecommenderConfig::default().selection.top_k);
        assert_eq!(strict.selection.top_k, 1);
        assert!(exploratory.validate().is_ok());
        assert!(strict.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RecommenderConfig::from_json_str(
            r#"{ "team": { "target_size": 4 }, "selection": { "top_k": 3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.team.target_size, 4);
        assert_eq!(cfg.team.max_attempts, 30);
        assert_eq!(cfg.selection.top_k, 3);
        assert!((cfg.selection.diversity_bonus - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_role_weights_from_json() {
        let cfg = RecommenderConfig::from_json_str(
            r#"{ "role_weights": { "roles": { "DPS": { "offense_score": 2.0 } } } }"#,
        )
        .unwrap();
        let dps = cfg.role_weights.for_role(Role::Dps).unwrap();
        assert_eq!(dps.len(), 1);
        assert_eq!(dps.get("offense_score"), Some(&2.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = RecommenderConfig::default();
        cfg.selection.top_k = 0;
        assert!(matches!(cfg.validate(), Err(RosterError::InvalidConfig(_))));

        let mut cfg = RecommenderConfig::default();
        cfg.team.target_size = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RecommenderConfig::default();
        cfg.role_weights.set_role(Role::Tank, &[("bulk_score", f64::NAN)]);
        assert!(cfg.validate().is_err());

        assert!(RecommenderConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let cfg = RecommenderConfig::exploratory();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
        let loaded = RecommenderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }
}
