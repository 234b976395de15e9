//! Team shape and generation limits

use crate::models::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Members per team, anchor included (default: 6)
    pub target_size: usize,
    /// Distinct teams requested per anchor (default: 3)
    pub n_teams: usize,
    /// Build attempts before giving up on more teams (default: 30)
    pub max_attempts: usize,
    /// Roles filled first, in order; the anchor's own role is skipped
    pub required_roles: Vec<Role>,
    /// Max base_total above the anchor's; `None` disables the cap (default: 150)
    pub power_margin: Option<f64>,
    /// Admit restricted (legendary) entities into the pool (default: false)
    pub allow_restricted: bool,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            target_size: 6,
            n_teams: 3,
            max_attempts: 30,
            required_roles: Role::required(),
            power_margin: Some(150.0),
            allow_restricted: false,
        }
    }
}
