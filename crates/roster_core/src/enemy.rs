//! Enemy roster context for enemy-aware scoring

use crate::models::Entity;
use std::collections::{BTreeMap, BTreeSet};

/// Precomputed view of an enemy roster
///
/// - `weakness_profile`: mean damage the enemy takes from each attacking type
///   (higher = better for us)
/// - `attack_types`: the enemy's own types, approximating what they attack with
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyContext {
    weakness_profile: BTreeMap<String, f64>,
    attack_types: Vec<String>,
}

impl EnemyContext {
    /// `None` for an empty roster
    pub fn from_roster(roster: &[Entity]) -> Option<Self> {
        if roster.is_empty() {
            return None;
        }

        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for enemy in roster {
            for (ty, value) in enemy.matchups.iter().filter(|(_, v)| !v.is_nan()) {
                let entry = sums.entry(ty.clone()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
        let weakness_profile = sums
            .into_iter()
            .map(|(ty, (sum, n))| (ty, sum / n as f64))
            .collect();

        let attack_types: BTreeSet<&str> = roster.iter().flat_map(|e| e.types()).collect();

        Some(Self {
            weakness_profile,
            attack_types: attack_types.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn weakness_profile(&self) -> &BTreeMap<String, f64> {
        &self.weakness_profile
    }

    pub fn attack_types(&self) -> &[String] {
        &self.attack_types
    }

    /// Best multiplier the candidate's types inflict on the enemy, centered at 1.0
    ///
    /// Neutral = 0, super-effective > 0. Never negative: a candidate with no
    /// useful type simply gets no bonus.
    pub fn offense_bonus(&self, candidate: &Entity) -> f64 {
        let best = candidate
            .types()
            .filter_map(|t| self.weakness_profile.get(t).copied())
            .fold(1.0, f64::max);
        best - 1.0
    }

    /// Mean multiplier the candidate takes from the enemy's types, centered at 1.0
    ///
    /// Only types the candidate has data for are averaged; zero when none.
    pub fn defense_penalty(&self, candidate: &Entity) -> f64 {
        let taken: Vec<f64> = self
            .attack_types
            .iter()
            .filter_map(|t| candidate.matchup(t))
            .collect();
        if taken.is_empty() {
            return 0.0;
        }
        taken.iter().sum::<f64>() / taken.len() as f64 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Entity> {
        vec![
            Entity::new("Geodude")
                .with_types(Some("Rock"), Some("Ground"))
                .with_matchup("water", 4.0)
                .with_matchup("fire", 0.5),
            Entity::new("Onix")
                .with_types(Some("Rock"), Some("Ground"))
                .with_matchup("water", 2.0)
                .with_matchup("fire", 0.5),
        ]
    }

    #[test]
    fn test_profile_and_attack_types() {
        let ctx = EnemyContext::from_roster(&roster()).unwrap();
        assert_eq!(ctx.weakness_profile().get("water"), Some(&3.0));
        assert_eq!(ctx.weakness_profile().get("fire"), Some(&0.5));
        assert_eq!(ctx.attack_types(), &["ground".to_string(), "rock".to_string()]);
        assert!(EnemyContext::from_roster(&[]).is_none());
    }

    #[test]
    fn test_offense_bonus() {
        let ctx = EnemyContext::from_roster(&roster()).unwrap();
        let squirtle = Entity::new("Squirtle").with_types(Some("Water"), None);
        let charmander = Entity::new("Charmander").with_types(Some("Fire"), None);
        let pidgey = Entity::new("Pidgey").with_types(Some("Normal"), Some("Flying"));
        assert_eq!(ctx.offense_bonus(&squirtle), 2.0);
        assert_eq!(ctx.offense_bonus(&charmander), 0.0);
        assert_eq!(ctx.offense_bonus(&pidgey), 0.0);
    }

    #[test]
    fn test_defense_penalty() {
        let ctx = EnemyContext::from_roster(&roster()).unwrap();
        let charmander = Entity::new("Charmander")
            .with_matchup("rock", 2.0)
            .with_matchup("ground", 2.0);
        let bulbasaur = Entity::new("Bulbasaur")
            .with_matchup("rock", 1.0)
            .with_matchup("ground", 0.5);
        assert_eq!(ctx.defense_penalty(&charmander), 1.0);
        assert_eq!(ctx.defense_penalty(&bulbasaur), -0.25);
        assert_eq!(ctx.defense_penalty(&Entity::new("Blank")), 0.0);
    }
}
