//! Entities, roles and teams

pub mod entity;
pub mod role;
pub mod team;

pub use entity::{find_entity, stat, Entity};
pub use role::Role;
pub use team::{Team, TeamSet, TeamSignature};
