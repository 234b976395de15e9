//! CoverageTracker: running mean of the team's matchup vector
//!
//! The mean is updated incrementally, `(mean * n + v) / (n + 1)`, so each
//! update costs O(types) regardless of team size. "Worst" is the largest
//! component of the mean: the attacking type the team is collectively weakest
//! against.

use crate::models::Entity;
use std::collections::BTreeSet;

/// Multiplier assumed for a type an entity has no data for
const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Sorted union of every matchup type present on `entities`
///
/// Empty when no entity carries matchup data, which disables coverage scoring.
pub fn matchup_axis<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<String> {
    let types: BTreeSet<&str> = entities
        .into_iter()
        .flat_map(|e| {
            e.matchups
                .iter()
                .filter(|(_, v)| !v.is_nan())
                .map(|(k, _)| k.as_str())
        })
        .collect();
    types.into_iter().map(str::to_string).collect()
}

/// Per-build coverage state
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageState {
    axis: Vec<String>,
    mean: Vec<f64>,
    worst: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageTracker {
    state: Option<CoverageState>,
    count: usize,
}

impl CoverageTracker {
    /// Seed from the anchor (count 1). Disabled when `axis` is empty.
    pub fn new(axis: Vec<String>, anchor: &Entity) -> Self {
        if axis.is_empty() {
            return Self {
                state: None,
                count: 1,
            };
        }
        let mean = vector(&axis, anchor);
        let worst = max_component(&mean);
        Self {
            state: Some(CoverageState { axis, mean, worst }),
            count: 1,
        }
    }

    pub fn disabled() -> Self {
        Self {
            state: None,
            count: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    /// Members folded in so far
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current_worst(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.worst)
    }

    pub fn mean(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.mean.as_slice())
    }

    pub fn axis(&self) -> &[String] {
        match &self.state {
            Some(s) => &s.axis,
            None => &[],
        }
    }

    /// Worst component if `candidate` joined, without committing
    pub fn peek_updated_worst(&self, candidate: &Entity) -> Option<f64> {
        let state = self.state.as_ref()?;
        let n = self.count as f64;
        let worst = state
            .axis
            .iter()
            .zip(&state.mean)
            .map(|(ty, m)| (m * n + component(candidate, ty)) / (n + 1.0))
            .fold(f64::NEG_INFINITY, f64::max);
        Some(worst)
    }

    /// How much `candidate` would lower the worst matchup (negative if it raises it)
    pub fn worst_reduction(&self, candidate: &Entity) -> f64 {
        match (self.current_worst(), self.peek_updated_worst(candidate)) {
            (Some(current), Some(updated)) => current - updated,
            _ => 0.0,
        }
    }

    pub fn commit(&mut self, candidate: &Entity) {
        let n = self.count as f64;
        if let Some(state) = self.state.as_mut() {
            for (ty, m) in state.axis.iter().zip(state.mean.iter_mut()) {
                *m = (*m * n + component(candidate, ty)) / (n + 1.0);
            }
            state.worst = max_component(&state.mean);
        }
        self.count += 1;
    }
}

fn component(entity: &Entity, ty: &str) -> f64 {
    entity.matchup(ty).unwrap_or(NEUTRAL_MULTIPLIER)
}

fn vector(axis: &[String], entity: &Entity) -> Vec<f64> {
    axis.iter().map(|ty| component(entity, ty)).collect()
}

fn max_component(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
