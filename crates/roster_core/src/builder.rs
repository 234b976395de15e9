//! TeamBuilder: one full team around an anchor
//!
//! Seeded → FillingRequiredRoles → FillingRemaining → Done
//!
//! Required roles are filled in two tiers: an exact role match first, then any
//! remaining candidate scored in general mode. A slot neither tier can fill is
//! skipped, so a team may come back under-sized.

use crate::config::{RecommenderConfig, TeamConfig};
use crate::coverage::matchup_axis;
use crate::enemy::EnemyContext;
use crate::models::{Entity, Role, Team};
use crate::selector::{CandidateSelector, SelectionState};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Seeded,
    FillingRequiredRoles,
    FillingRemaining,
    Done,
}

/// Candidates eligible to join a team built around one anchor
///
/// Restricted entities are dropped unless allowed, and so is the anchor itself.
/// With a power margin, entities whose `base_total` exceeds the anchor's by
/// more than the margin are dropped too.
#[derive(Debug, Clone)]
pub struct CandidatePool<'e> {
    members: Vec<&'e Entity>,
    axis: Vec<String>,
}

impl<'e> CandidatePool<'e> {
    pub fn eligible(anchor: &Entity, entities: &'e [Entity], config: &TeamConfig) -> Self {
        let power_cap = power_cap(anchor, entities, config);

        let members: Vec<&'e Entity> = entities
            .iter()
            .filter(|e| e.name != anchor.name)
            .filter(|e| config.allow_restricted || !e.restricted)
            .filter(|e| match power_cap {
                Some(cap) => e.base_total().is_some_and(|total| total <= cap),
                None => true,
            })
            .collect();

        let axis = matchup_axis(entities.iter().chain(std::iter::once(anchor)));

        log::debug!(
            "pool for {}: {} of {} candidates eligible (power cap {:?}, {} matchup types)",
            anchor.name,
            members.len(),
            entities.len(),
            power_cap,
            axis.len()
        );

        Self { members, axis }
    }

    pub fn members(&self) -> &[&'e Entity] {
        &self.members
    }

    /// Matchup types used for coverage; empty disables coverage scoring
    pub fn axis(&self) -> &[String] {
        &self.axis
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Cap only applies when the anchor has a power level and the table tracks it
fn power_cap(anchor: &Entity, entities: &[Entity], config: &TeamConfig) -> Option<f64> {
    let margin = config.power_margin?;
    let anchor_total = anchor.base_total()?;
    if !entities.iter().any(|e| e.base_total().is_some()) {
        return None;
    }
    Some(anchor_total + margin)
}

pub struct TeamBuilder<'a> {
    anchor: &'a Entity,
    pool: &'a [&'a Entity],
    config: &'a RecommenderConfig,
    selector: CandidateSelector<'a>,
    state: SelectionState,
    members: Vec<&'a Entity>,
    phase: BuildPhase,
}

impl<'a> TeamBuilder<'a> {
    pub fn new(
        anchor: &'a Entity,
        pool: &'a CandidatePool<'a>,
        config: &'a RecommenderConfig,
        enemy: Option<&'a EnemyContext>,
    ) -> Self {
        Self {
            anchor,
            pool: pool.members(),
            config,
            selector: CandidateSelector::new(config, enemy),
            state: SelectionState::seeded(anchor, pool.axis().to_vec()),
            members: vec![anchor],
            phase: BuildPhase::Seeded,
        }
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Run every phase to completion
    pub fn build<R: Rng + ?Sized>(mut self, rng: &mut R) -> Team {
        while self.phase != BuildPhase::Done {
            self.step(rng);
        }
        Team::from_members(self.members.into_iter().cloned().collect())
    }

    /// Advance one phase
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BuildPhase {
        self.phase = match self.phase {
            BuildPhase::Seeded => BuildPhase::FillingRequiredRoles,
            BuildPhase::FillingRequiredRoles => {
                self.fill_required_roles(rng);
                BuildPhase::FillingRemaining
            }
            BuildPhase::FillingRemaining => {
                self.fill_remaining(rng);
                BuildPhase::Done
            }
            BuildPhase::Done => BuildPhase::Done,
        };
        self.phase
    }

    fn is_full(&self) -> bool {
        self.members.len() >= self.config.team.target_size
    }

    fn fill_required_roles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let roles: Vec<Role> = self
            .config
            .team
            .required_roles
            .iter()
            .copied()
            .filter(|r| self.anchor.role != Some(*r))
            .collect();

        for role in roles {
            if self.is_full() {
                break;
            }

            // Tier 1: enforce role match
            let mut chosen = self
                .selector
                .select(self.pool, Some(role), &mut self.state, rng);

            // Tier 2: fall back to any remaining candidate
            if chosen.is_none() {
                chosen = self.selector.select(self.pool, None, &mut self.state, rng);
            }

            match chosen {
                Some(entity) => self.members.push(entity),
                None => log::warn!(
                    "no candidate left for {} slot on {}'s team, skipping",
                    role,
                    self.anchor.name
                ),
            }
        }
    }

    fn fill_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while !self.is_full() {
            match self.selector.select(self.pool, None, &mut self.state, rng) {
                Some(entity) => self.members.push(entity),
                None => {
                    log::debug!(
                        "pool exhausted for {} at {} of {} members",
                        self.anchor.name,
                        self.members.len(),
                        self.config.team.target_size
                    );
                    break;
                }
            }
        }
    }
}

/// Build a single team around `anchor` from the full candidate list
pub fn build_team<R: Rng + ?Sized>(
    anchor: &Entity,
    entities: &[Entity],
    config: &RecommenderConfig,
    enemy: Option<&EnemyContext>,
    rng: &mut R,
) -> Team {
    let pool = CandidatePool::eligible(anchor, entities, &config.team);
    TeamBuilder::new(anchor, &pool, config, enemy).build(rng)
}
