//! Tournament selection.
//!
//! Tournament selection bounds selection pressure by the tournament size
//! and never needs a global sort of the population.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Chromosome, Fitness};
use rand::Rng;

/// Picks `k` individuals uniformly with replacement and returns the index of
/// the highest-scoring one.
///
/// Ties keep the individual drawn first, so the outcome depends only on the
/// random draws.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<G, F: Fitness, R: Rng>(
    population: &[Chromosome<G, F>],
    k: usize,
    rng: &mut R,
) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].score() > population[best_idx].score() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Runs `count` tournaments and clones each winner into a fresh offspring set.
pub fn select_offspring<G: Clone, F: Fitness, R: Rng>(
    population: &[Chromosome<G, F>],
    k: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Chromosome<G, F>> {
    (0..count)
        .map(|_| population[tournament(population, k, rng)].clone())
        .collect()
}
