//! Attribute weight tables per role

use crate::models::{stat, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// attribute name → weight
pub type WeightTable = BTreeMap<String, f64>;

/// What "good" means for each role
///
/// Each role rewards the stats it cares about and penalizes the ones it
/// doesn't. `general` scores flexible slots where no role is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeights {
    pub roles: BTreeMap<Role, WeightTable>,
    pub general: WeightTable,
}

impl Default for RoleWeights {
    fn default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(
            Role::Dps,
            table(&[
                (stat::OFFENSE_SCORE, 1.0),
                (stat::BASE_TOTAL, 0.25),
                (stat::AVG_DAMAGE_TAKEN, -0.6),
                (stat::DIFFICULTY_SCORE, -0.25),
            ]),
        );
        roles.insert(
            Role::Tank,
            table(&[
                (stat::BULK_SCORE, 1.0),
                (stat::AVG_DAMAGE_TAKEN, -1.0),
                (stat::BASE_TOTAL, 0.15),
                (stat::DIFFICULTY_SCORE, -0.20),
            ]),
        );
        roles.insert(
            Role::Wall,
            table(&[
                (stat::BULK_SCORE, 1.2),
                (stat::AVG_DAMAGE_TAKEN, -1.3),
                (stat::BASE_TOTAL, 0.10),
                (stat::DIFFICULTY_SCORE, -0.20),
            ]),
        );
        roles.insert(
            Role::Speedster,
            table(&[
                (stat::SPEED, 0.7),
                (stat::OFFENSE_SCORE, 0.6),
                (stat::AVG_DAMAGE_TAKEN, -0.4),
                (stat::DIFFICULTY_SCORE, -0.20),
            ]),
        );

        Self {
            roles,
            general: table(&[
                (stat::BASE_TOTAL, 0.25),
                (stat::OFFENSE_SCORE, 0.7),
                (stat::BULK_SCORE, 0.7),
                (stat::DIFFICULTY_SCORE, -0.25),
                (stat::AVG_DAMAGE_TAKEN, -0.6),
            ]),
        }
    }
}

impl RoleWeights {
    /// Weight table for `role`, `None` when the role has none
    pub fn for_role(&self, role: Role) -> Option<&WeightTable> {
        self.roles.get(&role)
    }

    pub fn set_role(&mut self, role: Role, weights: &[(&str, f64)]) {
        self.roles.insert(role, table(weights));
    }

    pub(crate) fn all_weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.roles
            .values()
            .chain(std::iter::once(&self.general))
            .flat_map(|t| t.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

fn table(entries: &[(&str, f64)]) -> WeightTable {
    entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}
