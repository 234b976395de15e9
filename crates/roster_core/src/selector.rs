//! CandidateSelector: composite scoring + top-K sampling
//!
//! composite = role/general score
//!           + coverage term  (lowers the team's worst matchup)
//!           + diversity term (new secondary type)
//!           + enemy offense term - enemy defense term (enemy roster only)

use crate::config::{RecommenderConfig, SelectionConfig};
use crate::coverage::CoverageTracker;
use crate::enemy::EnemyContext;
use crate::models::{Entity, Role};
use crate::scoring::RoleScorer;
use rand::Rng;
use std::collections::HashSet;

/// Mutable state of one build; never shared between builds
#[derive(Debug, Clone)]
pub struct SelectionState {
    pub used_names: HashSet<String>,
    pub used_types: HashSet<String>,
    pub coverage: CoverageTracker,
}

impl SelectionState {
    /// State with `anchor` seated
    pub fn seeded(anchor: &Entity, axis: Vec<String>) -> Self {
        Self {
            used_names: HashSet::from([anchor.name.clone()]),
            used_types: anchor.types().map(str::to_string).collect(),
            coverage: CoverageTracker::new(axis, anchor),
        }
    }

    pub fn is_used(&self, entity: &Entity) -> bool {
        self.used_names.contains(&entity.name)
    }

    /// Fold a chosen entity into the state
    pub fn record(&mut self, entity: &Entity) {
        self.used_names.insert(entity.name.clone());
        self.used_types
            .extend(entity.types().map(str::to_string));
        self.coverage.commit(entity);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'e> {
    pub entity: &'e Entity,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector<'a> {
    scorer: RoleScorer<'a>,
    config: &'a SelectionConfig,
    enemy: Option<&'a EnemyContext>,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(config: &'a RecommenderConfig, enemy: Option<&'a EnemyContext>) -> Self {
        Self {
            scorer: RoleScorer::new(&config.role_weights),
            config: &config.selection,
            enemy,
        }
    }

    pub fn composite_score(
        &self,
        candidate: &Entity,
        role: Option<Role>,
        state: &SelectionState,
    ) -> f64 {
        let mut score = self.scorer.score(candidate, role);

        score += state.coverage.worst_reduction(candidate)
            * self.config.coverage_weight_for(self.enemy.is_some());

        if let Some(secondary) = candidate.secondary_type.as_deref() {
            if !state.used_types.contains(secondary) {
                score += self.config.diversity_bonus;
            }
        }

        if let Some(enemy) = self.enemy {
            score += self.config.enemy_offense_weight * enemy.offense_bonus(candidate);
            score -= self.config.enemy_defense_weight * enemy.defense_penalty(candidate);
        }

        score
    }

    /// Eligible candidates ranked by composite score, best first
    ///
    /// Used names are dropped; with a role only exact role matches remain.
    /// Ties keep pool order.
    pub fn rank<'e>(
        &self,
        pool: &[&'e Entity],
        role: Option<Role>,
        state: &SelectionState,
    ) -> Vec<ScoredCandidate<'e>> {
        let mut ranked: Vec<ScoredCandidate<'e>> = pool
            .iter()
            .copied()
            .filter(|e| !state.is_used(e))
            .filter(|e| role.map_or(true, |r| e.role == Some(r)))
            .map(|entity| {
                let score = self.composite_score(entity, role, state);
                ScoredCandidate {
                    entity,
                    // NaN ranks last
                    score: if score.is_nan() { f64::NEG_INFINITY } else { score },
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Pick one candidate uniformly from the top-K and record it in `state`
    ///
    /// Returns `None` when nothing eligible remains; the caller decides the
    /// fallback.
    pub fn select<'e, R: Rng + ?Sized>(
        &self,
        pool: &[&'e Entity],
        role: Option<Role>,
        state: &mut SelectionState,
        rng: &mut R,
    ) -> Option<&'e Entity> {
        let mut ranked = self.rank(pool, role, state);
        if ranked.is_empty() {
            return None;
        }
        ranked.truncate(self.config.top_k.max(1));

        let idx = if ranked.len() == 1 {
            0
        } else {
            rng.gen_range(0..ranked.len())
        };
        let chosen = ranked[idx];

        log::debug!(
            "picked {} (role {:?}, score {:.2}, rank {}/{})",
            chosen.entity.name,
            role,
            chosen.score,
            idx + 1,
            ranked.len()
        );

        state.record(chosen.entity);
        Some(chosen.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::matchup_axis;
    use crate::models::stat;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn candidate(name: &str, role: Role, offense: f64) -> Entity {
        Entity::new(name)
            .with_role(role)
            .with_stat(stat::OFFENSE_SCORE, offense)
    }

    fn state_for(anchor: &Entity, pool: &[Entity]) -> SelectionState {
        let axis = matchup_axis(pool.iter().chain(std::iter::once(anchor)));
        SelectionState::seeded(anchor, axis)
    }

    #[test]
    fn test_role_filter_and_used_names() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = candidate("Anchor", Role::Dps, 10.0);
        let entities = vec![
            candidate("Anchor", Role::Dps, 10.0),
            candidate("Tank1", Role::Tank, 10.0),
            candidate("Dps1", Role::Dps, 10.0),
        ];
        let pool: Vec<&Entity> = entities.iter().collect();
        let state = state_for(&anchor, &entities);

        let dps = selector.rank(&pool, Some(Role::Dps), &state);
        assert_eq!(dps.len(), 1);
        assert_eq!(dps[0].entity.name, "Dps1");
        assert_eq!(selector.rank(&pool, None, &state).len(), 2);
        assert!(selector.rank(&pool, Some(Role::Wall), &state).is_empty());
    }

    #[test]
    fn test_empty_pool_returns_none() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = candidate("Anchor", Role::Dps, 10.0);
        let mut state = state_for(&anchor, &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(selector.select(&[], None, &mut state, &mut rng).is_none());
        assert_eq!(state.used_names.len(), 1);
    }

    #[test]
    fn test_single_candidate_is_deterministic() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = candidate("Anchor", Role::Dps, 10.0);
        let entities = vec![candidate("Only", Role::Tank, 1.0)];
        let pool: Vec<&Entity> = entities.iter().collect();

        for seed in 0..5 {
            let mut state = state_for(&anchor, &entities);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chosen = selector.select(&pool, None, &mut state, &mut rng);
            assert_eq!(chosen.map(|e| e.name.as_str()), Some("Only"));
            assert!(state.used_names.contains("Only"));
            assert_eq!(state.coverage.count(), 2);
        }
    }

    #[test]
    fn test_samples_only_from_top_k() {
        let mut config = RecommenderConfig::default();
        config.selection.top_k = 3;
        let selector = CandidateSelector::new(&config, None);
        let anchor = candidate("Anchor", Role::Dps, 0.0);
        let entities: Vec<Entity> = (0..10)
            .map(|i| candidate(&format!("c{}", i), Role::Tank, i as f64 * 10.0))
            .collect();
        let pool: Vec<&Entity> = entities.iter().collect();

        let mut seen = HashSet::new();
        for seed in 0..64 {
            let mut state = state_for(&anchor, &entities);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chosen = selector.select(&pool, None, &mut state, &mut rng).unwrap();
            seen.insert(chosen.name.clone());
        }
        let expected: HashSet<String> = ["c9", "c8", "c7"].iter().map(|s| s.to_string()).collect();
        assert!(seen.is_subset(&expected));
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_diversity_bonus_for_new_secondary_type() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = Entity::new("Anchor").with_types(Some("grass"), Some("poison"));
        let state = state_for(&anchor, &[]);

        let repeat = Entity::new("Oddish").with_types(Some("grass"), Some("poison"));
        let fresh = Entity::new("Pidgey").with_types(Some("normal"), Some("flying"));
        let mono = Entity::new("Rattata").with_types(Some("normal"), None);
        assert_eq!(selector.composite_score(&repeat, None, &state), 0.0);
        assert_eq!(selector.composite_score(&fresh, None, &state), 2.0);
        assert_eq!(selector.composite_score(&mono, None, &state), 0.0);
    }

    #[test]
    fn test_coverage_term_prefers_resist() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = Entity::new("Charmander")
            .with_matchup("water", 2.0)
            .with_matchup("grass", 0.5);
        let resist = Entity::new("Bulbasaur")
            .with_matchup("water", 0.5)
            .with_matchup("grass", 0.5);
        let weak = Entity::new("Vulpix")
            .with_matchup("water", 2.0)
            .with_matchup("grass", 0.5);
        let entities = vec![resist.clone(), weak.clone()];
        let state = state_for(&anchor, &entities);

        // worst 2.0 -> 1.25 : 0.75 * 10
        assert!((selector.composite_score(&resist, None, &state) - 7.5).abs() < 1e-9);
        assert_eq!(selector.composite_score(&weak, None, &state), 0.0);
    }

    #[test]
    fn test_enemy_terms_raise_matching_type() {
        let config = RecommenderConfig::default();
        let enemy_roster = vec![Entity::new("Geodude")
            .with_types(Some("rock"), None)
            .with_matchup("water", 2.0)];
        let enemy = EnemyContext::from_roster(&enemy_roster).unwrap();
        let plain = CandidateSelector::new(&config, None);
        let aware = CandidateSelector::new(&config, Some(&enemy));

        let anchor = Entity::new("Anchor");
        let state = state_for(&anchor, &[]);
        let squirtle = Entity::new("Squirtle").with_types(Some("water"), None);
        let gain = aware.composite_score(&squirtle, None, &state)
            - plain.composite_score(&squirtle, None, &state);
        assert!((gain - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_enemy_context_raises_candidate_that_also_covers() {
        let config = RecommenderConfig::default();
        let enemy_roster = vec![Entity::new("Geodude")
            .with_types(Some("rock"), Some("ground"))
            .with_matchup("water", 2.0)
            .with_matchup("grass", 2.0)
            .with_matchup("fire", 1.0)];
        let enemy = EnemyContext::from_roster(&enemy_roster).unwrap();
        let plain = CandidateSelector::new(&config, None);
        let aware = CandidateSelector::new(&config, Some(&enemy));

        let anchor = Entity::new("Charmander")
            .with_types(Some("fire"), None)
            .with_matchup("fire", 0.5)
            .with_matchup("grass", 0.5)
            .with_matchup("water", 2.0)
            .with_matchup("rock", 2.0)
            .with_matchup("ground", 2.0);
        let squirtle = Entity::new("Squirtle")
            .with_types(Some("water"), None)
            .with_matchup("fire", 0.5)
            .with_matchup("grass", 2.0)
            .with_matchup("water", 0.5)
            .with_matchup("rock", 1.0)
            .with_matchup("ground", 1.0);
        let state = state_for(&anchor, std::slice::from_ref(&squirtle));

        // worst 2.0 -> 1.5
        let plain_score = plain.composite_score(&squirtle, None, &state);
        let aware_score = aware.composite_score(&squirtle, None, &state);
        assert!((plain_score - 5.0).abs() < 1e-9);
        // 0.5 * 50 coverage + 20 offense, no defense penalty at neutral 1.0
        assert!((aware_score - 45.0).abs() < 1e-9);
        assert!(aware_score > plain_score);
    }

    #[test]
    fn test_nan_score_ranks_last() {
        let config = RecommenderConfig::default();
        let selector = CandidateSelector::new(&config, None);
        let anchor = candidate("Anchor", Role::Dps, 0.0);
        // inf offense and inf damage taken cancel to NaN in general mode
        let broken = Entity::new("Broken")
            .with_stat(stat::OFFENSE_SCORE, f64::INFINITY)
            .with_stat(stat::AVG_DAMAGE_TAKEN, f64::INFINITY);
        let entities = vec![
            candidate("Low", Role::Tank, 1.0),
            broken,
            candidate("High", Role::Tank, 9.0),
        ];
        let pool: Vec<&Entity> = entities.iter().collect();
        let state = state_for(&anchor, &entities);

        let names: Vec<&str> = selector
            .rank(&pool, None, &state)
            .iter()
            .map(|c| c.entity.name.as_str())
            .collect();
        assert_eq!(names, vec!["High", "Low", "Broken"]);
    }
}
