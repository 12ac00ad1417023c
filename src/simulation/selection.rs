//! Fitness scoring and parent selection over the dead pool.

use rand::Rng;

use super::agent::Agent;

/// Assigns `age² / Σ age²` to every agent and sorts the pool, fittest first.
///
/// A pool whose squared ages sum to zero gets uniform fitness.
pub fn score(pool: &mut [Agent]) {
    if pool.is_empty() {
        return;
    }

    let total: f64 = pool.iter().map(|agent| squared_age(agent)).sum();
    if total > 0.0 {
        for agent in pool.iter_mut() {
            agent.fitness = squared_age(agent) / total;
        }
    } else {
        let uniform = 1.0 / pool.len() as f64;
        for agent in pool.iter_mut() {
            agent.fitness = uniform;
        }
    }

    pool.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Walks `fitness` subtracting each value from `draw` and returns the index at
/// which the running value goes negative.
///
/// Falls back to the last index when rounding leaves the draw non-negative.
/// Returns `None` only for an empty sequence.
pub fn pick_index(fitness: impl IntoIterator<Item = f64>, draw: f64) -> Option<usize> {
    let mut remaining = draw;
    let mut last = None;
    for (index, value) in fitness.into_iter().enumerate() {
        remaining -= value;
        if remaining < 0.0 {
            return Some(index);
        }
        last = Some(index);
    }
    last
}

/// Biased roulette-wheel draw over a pool sorted by [`score`].
///
/// The uniform draw is squared before walking the pool, which favours the
/// front of the sorted pool beyond plain fitness-proportionate selection.
pub fn select_parent<'a, R: Rng + ?Sized>(pool: &'a [Agent], rng: &mut R) -> Option<&'a Agent> {
    if pool.is_empty() {
        return None;
    }
    let r = rng.random::<f64>();
    pick_index(pool.iter().map(|agent| agent.fitness), r * r).map(|index| &pool[index])
}

fn squared_age(agent: &Agent) -> f64 {
    let age = agent.age as f64;
    age * age
}
