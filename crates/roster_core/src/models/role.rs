use serde::{Deserialize, Serialize};
use std::fmt;

/// Team role label, precomputed per entity (see [`crate::roles`])
///
/// Labels match the role column of the candidate table:
/// Tank, Wall, DPS, Speedster, Special DPS, Special Tank, DPS 2, Unclassified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "DPS")]
    Dps,
    Tank,
    Wall,
    Speedster,
    #[serde(rename = "Special DPS")]
    SpecialDps,
    #[serde(rename = "Special Tank")]
    SpecialTank,
    #[serde(rename = "DPS 2")]
    SecondaryDps,
    Unclassified,
}

impl Role {
    /// Get all roles in classification order
    pub fn all() -> &'static [Role] {
        &[
            Role::Wall,
            Role::Dps,
            Role::SpecialDps,
            Role::Tank,
            Role::SpecialTank,
            Role::Speedster,
            Role::SecondaryDps,
            Role::Unclassified,
        ]
    }

    /// Roles every team tries to cover, in filling order
    pub fn required() -> Vec<Role> {
        vec![Role::Tank, Role::Speedster, Role::Dps, Role::Wall]
    }

    /// Get role label as it appears in the candidate table
    pub fn label(&self) -> &'static str {
        match self {
            Role::Dps => "DPS",
            Role::Tank => "Tank",
            Role::Wall => "Wall",
            Role::Speedster => "Speedster",
            Role::SpecialDps => "Special DPS",
            Role::SpecialTank => "Special Tank",
            Role::SecondaryDps => "DPS 2",
            Role::Unclassified => "Unclassified",
        }
    }

    /// Parse from a table label (case-insensitive, surrounding whitespace ignored)
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dps" => Some(Role::Dps),
            "tank" => Some(Role::Tank),
            "wall" => Some(Role::Wall),
            "speedster" => Some(Role::Speedster),
            "special dps" => Some(Role::SpecialDps),
            "special tank" => Some(Role::SpecialTank),
            "dps 2" => Some(Role::SecondaryDps),
            "unclassified" => Some(Role::Unclassified),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}
