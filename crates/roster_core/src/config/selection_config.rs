//! Candidate selection knobs

use serde::{Deserialize, Serialize};

/// Composite score weights and sampling width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    // === Sampling ===
    /// Number of top-ranked candidates sampled from (default: 12)
    pub top_k: usize,

    // === Coverage ===
    /// Weight on lowering the team's worst matchup (default: 10.0)
    pub coverage_weight: f64,
    /// Coverage weight used when an enemy roster is supplied, kept above
    /// `coverage_weight` so targeted coverage counts for more (default: 50.0)
    pub coverage_weight_vs_enemy: f64,

    // === Diversity ===
    /// Bonus for a secondary type not yet on the team (default: 2.0)
    pub diversity_bonus: f64,

    // === Enemy awareness ===
    /// Weight on hitting the enemy's weaknesses (default: 20.0)
    pub enemy_offense_weight: f64,
    /// Weight on taking damage from the enemy's types (default: 12.0)
    pub enemy_defense_weight: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_k: 12,

            coverage_weight: 10.0,
            coverage_weight_vs_enemy: 50.0,

            diversity_bonus: 2.0,

            enemy_offense_weight: 20.0,
            enemy_defense_weight: 12.0,
        }
    }
}

impl SelectionConfig {
    pub fn coverage_weight_for(&self, has_enemy: bool) -> f64 {
        if has_enemy {
            self.coverage_weight_vs_enemy
        } else {
            self.coverage_weight
        }
    }

    pub(crate) fn weights(&self) -> [(&'static str, f64); 5] {
        [
            ("coverage_weight", self.coverage_weight),
            ("coverage_weight_vs_enemy", self.coverage_weight_vs_enemy),
            ("diversity_bonus", self.diversity_bonus),
            ("enemy_offense_weight", self.enemy_offense_weight),
            ("enemy_defense_weight", self.enemy_defense_weight),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_context_uses_larger_coverage_weight() {
        let cfg = SelectionConfig::default();
        assert_eq!(cfg.coverage_weight_for(false), 10.0);
        assert_eq!(cfg.coverage_weight_for(true), 50.0);
        assert!(cfg.coverage_weight_for(true) > cfg.coverage_weight_for(false));
    }
}
