//! RoleScorer: role-specific and general candidate scores
//!
//! Two modes:
//! 1) Role-based scoring when filling a specific missing role (enforces team structure)
//! 2) General scoring when filling flexible slots (favors well-rounded entities)

use crate::config::{RoleWeights, WeightTable};
use crate::models::{Entity, Role};

#[derive(Debug, Clone, Copy)]
pub struct RoleScorer<'a> {
    weights: &'a RoleWeights,
}

impl<'a> RoleScorer<'a> {
    pub fn new(weights: &'a RoleWeights) -> Self {
        Self { weights }
    }

    /// Score `entity` for `role`, or in general mode when `role` is `None`
    ///
    /// Undefined attributes contribute zero. A role without a weight table
    /// scores zero.
    pub fn score(&self, entity: &Entity, role: Option<Role>) -> f64 {
        match role {
            Some(role) => self
                .weights
                .for_role(role)
                .map_or(0.0, |table| weighted_sum(entity, table)),
            None => weighted_sum(entity, &self.weights.general),
        }
    }
}

fn weighted_sum(entity: &Entity, table: &WeightTable) -> f64 {
    table
        .iter()
        .filter_map(|(attr, weight)| entity.stat(attr).map(|v| v * weight))
        .sum()
}
