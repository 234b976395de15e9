//! Team-wide matchup and stat profile

use crate::models::Team;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated view of a finished team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub size: usize,
    /// (attacking type, mean multiplier), highest (worst) first
    pub matchups: Vec<(String, f64)>,
    /// Mean of every stat, over members that define it
    pub stat_means: BTreeMap<String, f64>,
}

impl TeamProfile {
    pub fn from_team(team: &Team) -> Self {
        let mut matchups: Vec<(String, f64)> = mean_by_key(
            team.members()
                .iter()
                .flat_map(|m| m.matchups.iter()),
        )
        .into_iter()
        .collect();
        matchups.sort_by(|a, b| b.1.total_cmp(&a.1));

        let stat_means = mean_by_key(team.members().iter().flat_map(|m| m.stats.iter()));

        Self {
            size: team.len(),
            matchups,
            stat_means,
        }
    }

    /// The `n` types the team is weakest against (higher = worse)
    pub fn worst(&self, n: usize) -> &[(String, f64)] {
        &self.matchups[..n.min(self.matchups.len())]
    }

    /// The `n` types the team handles best, still ordered worst-first
    pub fn best(&self, n: usize) -> &[(String, f64)] {
        let start = self.matchups.len().saturating_sub(n);
        &self.matchups[start..]
    }

    pub fn stat_mean(&self, key: &str) -> Option<f64> {
        self.stat_means.get(key).copied()
    }
}

fn mean_by_key<'a>(values: impl Iterator<Item = (&'a String, &'a f64)>) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (key, value) in values.filter(|(_, v)| !v.is_nan()) {
        let entry = sums.entry(key.clone()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}
