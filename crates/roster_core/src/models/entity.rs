use super::Role;
use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known stat attribute names
pub mod stat {
    pub const OFFENSE_SCORE: &str = "offense_score";
    pub const BULK_SCORE: &str = "bulk_score";
    pub const AVG_DAMAGE_TAKEN: &str = "avg_damage_taken";
    pub const DIFFICULTY_SCORE: &str = "difficulty_score";
    pub const BASE_TOTAL: &str = "base_total";
    pub const SPEED: &str = "speed";
    pub const HP: &str = "hp";
    pub const ATTACK: &str = "attack";
    pub const DEFENSE: &str = "defense";
    pub const SP_ATTACK: &str = "sp_attack";
    pub const SP_DEFENSE: &str = "sp_defense";
}

/// One candidate (or team member)
///
/// Read-only input to the engine. Stats and matchups are sparse: a missing key
/// (or a NaN value) means "undefined" and scores as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
    /// Damage multiplier received from each attacking type
    #[serde(default)]
    pub matchups: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Legendary / restricted entities are kept out of candidate pools
    #[serde(default)]
    pub restricted: bool,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_type: None,
            secondary_type: None,
            stats: BTreeMap::new(),
            matchups: BTreeMap::new(),
            role: None,
            restricted: false,
        }
    }

    /// Set type tags (stored lowercase, blank tags dropped)
    pub fn with_types(mut self, primary: Option<&str>, secondary: Option<&str>) -> Self {
        self.primary_type = normalize_type(primary);
        self.secondary_type = normalize_type(secondary);
        self
    }

    pub fn with_stat(mut self, key: &str, value: f64) -> Self {
        self.stats.insert(key.to_string(), value);
        self
    }

    pub fn with_matchup(mut self, attacking_type: &str, multiplier: f64) -> Self {
        self.matchups
            .insert(attacking_type.trim().to_lowercase(), multiplier);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// Stat value, `None` when absent or NaN
    pub fn stat(&self, key: &str) -> Option<f64> {
        self.stats.get(key).copied().filter(|v| !v.is_nan())
    }

    /// Stat value with undefined treated as zero
    pub fn stat_or_zero(&self, key: &str) -> f64 {
        self.stat(key).unwrap_or(0.0)
    }

    pub fn base_total(&self) -> Option<f64> {
        self.stat(stat::BASE_TOTAL)
    }

    /// Multiplier received from `attacking_type`, `None` when unknown
    pub fn matchup(&self, attacking_type: &str) -> Option<f64> {
        self.matchups
            .get(attacking_type)
            .copied()
            .filter(|v| !v.is_nan())
    }

    pub fn has_matchups(&self) -> bool {
        self.matchups.values().any(|v| !v.is_nan())
    }

    /// Primary then secondary type, skipping absent ones
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.primary_type
            .as_deref()
            .into_iter()
            .chain(self.secondary_type.as_deref())
    }

    pub fn has_type(&self, ty: &str) -> bool {
        self.types().any(|t| t == ty)
    }
}

fn normalize_type(tag: Option<&str>) -> Option<String> {
    tag.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty())
}

/// Look up an entity by exact name
pub fn find_entity<'a>(entities: &'a [Entity], name: &str) -> Result<&'a Entity> {
    entities
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| RosterError::EntityNotFound {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_stat_is_undefined() {
        let e = Entity::new("Missingno").with_stat(stat::SPEED, f64::NAN);
        assert_eq!(e.stat(stat::SPEED), None);
        assert_eq!(e.stat_or_zero(stat::SPEED), 0.0);
        assert_eq!(e.stat(stat::HP), None);
    }

    #[test]
    fn test_types_are_normalized() {
        let e = Entity::new("Charmander").with_types(Some(" Fire "), Some(""));
        assert_eq!(e.primary_type.as_deref(), Some("fire"));
        assert_eq!(e.secondary_type, None);
        assert_eq!(e.types().collect::<Vec<_>>(), vec!["fire"]);
        assert!(e.has_type("fire"));
    }

    #[test]
    fn test_find_entity() {
        let entities = vec![Entity::new("Pidgey"), Entity::new("Rattata")];
        assert_eq!(find_entity(&entities, "Rattata").unwrap().name, "Rattata");
        assert!(matches!(
            find_entity(&entities, "Mew"),
            Err(RosterError::EntityNotFound { .. })
        ));
    }
}
