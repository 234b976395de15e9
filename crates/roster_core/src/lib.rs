//! # roster_core - Role-aware team composition engine
//!
//! Builds teams around a fixed anchor entity from a larger candidate pool.
//!
//! ## Features
//! - Role quotas filled in two tiers (exact role, then unconstrained fallback)
//! - Incremental type-coverage tracking (worst matchup of the running mean)
//! - Optional enemy-aware scoring
//! - Top-K sampling with an injected RNG (same seed = same teams)
//! - Multi-team generation with signature deduplication

pub mod analysis;
pub mod builder;
pub mod config;
pub mod coverage;
pub mod enemy;
pub mod error;
pub mod generator;
pub mod models;
pub mod roles;
pub mod scoring;
pub mod selector;

pub use analysis::TeamProfile;
pub use builder::{build_team, BuildPhase, CandidatePool, TeamBuilder};
pub use config::{RecommenderConfig, RoleWeights, SelectionConfig, TeamConfig};
pub use coverage::{matchup_axis, CoverageState, CoverageTracker};
pub use enemy::EnemyContext;
pub use error::{Result, RosterError};
pub use generator::{generate, generate_for_anchors, TeamSetGenerator};
pub use models::{find_entity, stat, Entity, Role, Team, TeamSet, TeamSignature};
pub use roles::{assign_roles, RoleClassifier, RoleThresholds};
pub use scoring::RoleScorer;
pub use selector::{CandidateSelector, ScoredCandidate, SelectionState};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
