//! Role classification from population-wide stat thresholds
//!
//! Each threshold is the population median of one raw stat. Rules are checked
//! in order and the first match wins:
//!
//! | # | Condition                                   | Role         |
//! |---|---------------------------------------------|--------------|
//! | 1 | hp > HP and (defense > DEF or sp_def > SPD) | Wall         |
//! | 2 | attack > ATK and sp_attack > SPA            | DPS          |
//! | 3 | sp_attack > SPA                             | Special DPS  |
//! | 4 | hp > HP or defense > DEF                    | Tank         |
//! | 5 | sp_defense > SPDEF                          | Special Tank |
//! | 6 | speed > SPE                                 | Speedster    |
//! | 7 | attack > ATK                                | DPS 2        |
//! | - | otherwise                                   | Unclassified |

use crate::models::{stat, Entity, Role};
use serde::{Deserialize, Serialize};

pub trait RoleClassifier {
    fn classify(&self, entity: &Entity) -> Role;
}

/// Median of each raw stat; `None` when no entity defines it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleThresholds {
    pub hp: Option<f64>,
    pub attack: Option<f64>,
    pub defense: Option<f64>,
    pub sp_attack: Option<f64>,
    pub sp_defense: Option<f64>,
    pub speed: Option<f64>,
}

impl RoleThresholds {
    pub fn from_population(entities: &[Entity]) -> Self {
        let median_of = |key: &str| median(entities.iter().filter_map(|e| e.stat(key)).collect());
        Self {
            hp: median_of(stat::HP),
            attack: median_of(stat::ATTACK),
            defense: median_of(stat::DEFENSE),
            sp_attack: median_of(stat::SP_ATTACK),
            sp_defense: median_of(stat::SP_DEFENSE),
            speed: median_of(stat::SPEED),
        }
    }
}

impl RoleClassifier for RoleThresholds {
    fn classify(&self, entity: &Entity) -> Role {
        // undefined stat or threshold never exceeds
        let above = |key: &str, threshold: Option<f64>| match (entity.stat(key), threshold) {
            (Some(v), Some(t)) => v > t,
            _ => false,
        };

        let hp = above(stat::HP, self.hp);
        let atk = above(stat::ATTACK, self.attack);
        let def = above(stat::DEFENSE, self.defense);
        let sp_atk = above(stat::SP_ATTACK, self.sp_attack);
        let sp_def = above(stat::SP_DEFENSE, self.sp_defense);
        let speed = above(stat::SPEED, self.speed);

        if hp && (def || sp_def) {
            Role::Wall
        } else if atk && sp_atk {
            Role::Dps
        } else if sp_atk {
            Role::SpecialDps
        } else if hp || def {
            Role::Tank
        } else if sp_def {
            Role::SpecialTank
        } else if speed {
            Role::Speedster
        } else if atk {
            Role::SecondaryDps
        } else {
            Role::Unclassified
        }
    }
}

/// Assign a role to every entity; with `overwrite == false` existing labels stay
///
/// Returns the number of entities whose role was set.
pub fn assign_roles<C: RoleClassifier + ?Sized>(
    entities: &mut [Entity],
    classifier: &C,
    overwrite: bool,
) -> usize {
    let mut assigned = 0;
    for entity in entities.iter_mut() {
        if entity.role.is_some() && !overwrite {
            continue;
        }
        entity.role = Some(classifier.classify(entity));
        assigned += 1;
    }
    log::debug!("assigned roles to {} of {} entities", assigned, entities.len());
    assigned
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, hp: f64, atk: f64, def: f64, spa: f64, spd: f64, spe: f64) -> Entity {
        Entity::new(name)
            .with_stat(stat::HP, hp)
            .with_stat(stat::ATTACK, atk)
            .with_stat(stat::DEFENSE, def)
            .with_stat(stat::SP_ATTACK, spa)
            .with_stat(stat::SP_DEFENSE, spd)
            .with_stat(stat::SPEED, spe)
    }

    fn thresholds() -> RoleThresholds {
        RoleThresholds {
            hp: Some(50.0),
            attack: Some(50.0),
            defense: Some(50.0),
            sp_attack: Some(50.0),
            sp_defense: Some(50.0),
            speed: Some(50.0),
        }
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(Vec::new()), None);
    }

    #[test]
    fn test_rule_order() {
        let t = thresholds();
        assert_eq!(t.classify(&raw("a", 60.0, 60.0, 60.0, 60.0, 0.0, 0.0)), Role::Wall);
        assert_eq!(t.classify(&raw("b", 0.0, 60.0, 0.0, 60.0, 0.0, 0.0)), Role::Dps);
        assert_eq!(t.classify(&raw("c", 0.0, 0.0, 0.0, 60.0, 60.0, 0.0)), Role::SpecialDps);
        assert_eq!(t.classify(&raw("d", 60.0, 60.0, 0.0, 0.0, 0.0, 60.0)), Role::Tank);
        assert_eq!(t.classify(&raw("e", 0.0, 0.0, 0.0, 0.0, 60.0, 60.0)), Role::SpecialTank);
        assert_eq!(t.classify(&raw("f", 0.0, 60.0, 0.0, 0.0, 0.0, 60.0)), Role::Speedster);
        assert_eq!(t.classify(&raw("g", 0.0, 60.0, 0.0, 0.0, 0.0, 0.0)), Role::SecondaryDps);
        assert_eq!(t.classify(&raw("h", 50.0, 50.0, 50.0, 50.0, 50.0, 50.0)), Role::Unclassified);
        assert_eq!(t.classify(&Entity::new("blank")), Role::Unclassified);
    }

    #[test]
    fn test_assign_roles_respects_existing() {
        let mut entities = vec![
            raw("a", 10.0, 10.0, 10.0, 10.0, 10.0, 10.0),
            raw("b", 90.0, 90.0, 90.0, 90.0, 90.0, 90.0).with_role(Role::Speedster),
            raw("c", 50.0, 50.0, 50.0, 50.0, 50.0, 50.0),
        ];
        let t = RoleThresholds::from_population(&entities);
        assert_eq!(t.hp, Some(50.0));

        assert_eq!(assign_roles(&mut entities, &t, false), 2);
        assert_eq!(entities[1].role, Some(Role::Speedster));
        assert_eq!(entities[0].role, Some(Role::Unclassified));

        assert_eq!(assign_roles(&mut entities, &t, true), 3);
        assert_eq!(entities[1].role, Some(Role::Wall));
    }
}
