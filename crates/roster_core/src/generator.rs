//! TeamSetGenerator: several distinct teams per anchor
//!
//! Each attempt runs a fresh [`TeamBuilder`]. Teams short of the target size
//! and teams whose signature was already produced are discarded. Generation
//! stops at `n_teams` teams or after `max_attempts` builds, whichever comes
//! first; a partial or empty set is a normal outcome.

use crate::builder::{CandidatePool, TeamBuilder};
use crate::config::RecommenderConfig;
use crate::enemy::EnemyContext;
use crate::models::{Entity, TeamSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct TeamSetGenerator<'a> {
    config: &'a RecommenderConfig,
    enemy: Option<&'a EnemyContext>,
}

impl<'a> TeamSetGenerator<'a> {
    pub fn new(config: &'a RecommenderConfig, enemy: Option<&'a EnemyContext>) -> Self {
        Self { config, enemy }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        anchor: &Entity,
        entities: &[Entity],
        rng: &mut R,
    ) -> TeamSet {
        let team_cfg = &self.config.team;
        let pool = CandidatePool::eligible(anchor, entities, team_cfg);
        let mut set = TeamSet::new(anchor.name.clone());

        let mut attempts = 0;
        while set.len() < team_cfg.n_teams && attempts < team_cfg.max_attempts {
            attempts += 1;
            let team = TeamBuilder::new(anchor, &pool, self.config, self.enemy).build(rng);

            if team.len() != team_cfg.target_size {
                log::debug!(
                    "attempt {}: team of {} discarded (target {})",
                    attempts,
                    team.len(),
                    team_cfg.target_size
                );
                continue;
            }
            if !set.try_insert(team) {
                log::debug!("attempt {}: duplicate composition discarded", attempts);
            }
        }

        log::info!(
            "{}: {} of {} teams after {} attempts",
            anchor.name,
            set.len(),
            team_cfg.n_teams,
            attempts
        );
        set
    }
}

/// Generate teams for `anchor` with a generator seeded from `seed`
///
/// `enemy_roster` may be empty (no enemy-aware scoring).
pub fn generate(
    anchor: &Entity,
    entities: &[Entity],
    config: &RecommenderConfig,
    enemy_roster: &[Entity],
    seed: u64,
) -> TeamSet {
    let enemy = EnemyContext::from_roster(enemy_roster);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    TeamSetGenerator::new(config, enemy.as_ref()).generate(anchor, entities, &mut rng)
}

/// Generate team sets for several anchors in parallel
///
/// Builds share only read-only data; each anchor gets its own RNG seeded
/// with `seed + index`, so results match running [`generate`] one by one.
pub fn generate_for_anchors(
    anchors: &[&Entity],
    entities: &[Entity],
    config: &RecommenderConfig,
    enemy_roster: &[Entity],
    seed: u64,
) -> Vec<TeamSet> {
    let enemy = EnemyContext::from_roster(enemy_roster);
    let generator = TeamSetGenerator::new(config, enemy.as_ref());

    anchors
        .par_iter()
        .enumerate()
        .map(|(i, anchor)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            generator.generate(anchor, entities, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{stat, Role};

    fn entity(name: &str, role: Role, offense: f64) -> Entity {
        Entity::new(name)
            .with_role(role)
            .with_stat(stat::OFFENSE_SCORE, offense)
            .with_stat(stat::BASE_TOTAL, 400.0)
    }

    fn pool(n: usize) -> Vec<Entity> {
        let roles = [Role::Tank, Role::Speedster, Role::Wall, Role::Dps];
        (0..n)
            .map(|i| entity(&format!("e{:02}", i), roles[i % roles.len()], i as f64))
            .collect()
    }

    #[test]
    fn test_teams_are_distinct() {
        let anchor = entity("Anchor", Role::Dps, 50.0);
        let entities = pool(20);
        let mut config = RecommenderConfig::default();
        config.team.n_teams = 5;

        let set = generate(&anchor, &entities, &config, &[], 42);
        assert_eq!(set.anchor, "Anchor");
        assert!(!set.is_empty());
        let mut signatures: Vec<_> = set.iter().map(|t| t.signature()).collect();
        let total = signatures.len();
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), total);
        assert!(set.iter().all(|t| t.len() == 6));
    }

    #[test]
    fn test_undersized_teams_are_discarded() {
        let anchor = entity("Anchor", Role::Dps, 50.0);
        let entities = pool(3);
        let config = RecommenderConfig::default();
        let set = generate(&anchor, &entities, &config, &[], 7);
        assert!(set.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let entities = pool(16);
        let anchors: Vec<&Entity> = entities.iter().take(3).collect();
        let config = RecommenderConfig::default();

        let parallel = generate_for_anchors(&anchors, &entities, &config, &[], 100);
        assert_eq!(parallel.len(), 3);
        for (i, anchor) in anchors.iter().enumerate() {
            let sequential = generate(anchor, &entities, &config, &[], 100 + i as u64);
            let a: Vec<_> = parallel[i].iter().map(|t| t.signature()).collect();
            let b: Vec<_> = sequential.iter().map(|t| t.signature()).collect();
            assert_eq!(a, b);
        }
    }
}
