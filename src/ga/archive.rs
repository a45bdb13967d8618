//! Elitist archive of the best distinct chromosomes seen during a run.
//!
//! Generational replacement is non-elitist: the best individual of one
//! generation may be lost to selection or mutation in the next. The archive
//! keeps copies of the top `capacity` distinct genotypes ever evaluated, so
//! its best score can only grow.

use std::cmp::Ordering;

use super::types::{Chromosome, Fitness};

/// Bounded, descending-sorted set of the best chromosomes seen so far.
#[derive(Debug, Clone)]
pub struct Archive<G, F> {
    capacity: usize,
    members: Vec<Chromosome<G, F>>,
}

impl<G: Clone + PartialEq, F: Fitness> Archive<G, F> {
    /// Creates an empty archive holding at most `capacity` members.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    /// Merges `population` into the archive.
    ///
    /// Unevaluated chromosomes and genotypes already archived are skipped.
    /// A newcomer ranks ahead of archived members with an equal score, but
    /// a full archive only admits scores strictly above its worst member.
    /// Returns `true` if the best score improved.
    pub fn update(&mut self, population: &[Chromosome<G, F>]) -> bool {
        let before = self.best_fitness();

        for candidate in population {
            let Some(fitness) = candidate.fitness() else {
                continue;
            };
            if self.is_full() {
                let worst = self.members[self.members.len() - 1].score();
                // NaN never compares greater, so it is never admitted.
                if fitness.partial_cmp(&worst) != Some(Ordering::Greater) {
                    continue;
                }
            }
            if self.members.iter().any(|m| m == candidate) {
                continue;
            }

            let pos = self
                .members
                .iter()
                .position(|m| fitness >= m.score())
                .unwrap_or(self.members.len());
            self.members.insert(pos, candidate.clone());
            self.members.truncate(self.capacity);
        }

        match (before, self.best_fitness()) {
            (None, Some(_)) => true,
            (Some(old), Some(new)) => new > old,
            _ => false,
        }
    }

    /// The highest-scoring member.
    pub fn best(&self) -> Option<&Chromosome<G, F>> {
        self.members.first()
    }

    /// Score of the highest-scoring member.
    pub fn best_fitness(&self) -> Option<F> {
        self.best().map(Chromosome::score)
    }

    /// Members, best first.
    pub fn members(&self) -> &[Chromosome<G, F>] {
        &self.members
    }

    /// Consumes the archive, returning its members best first.
    pub fn into_members(self) -> Vec<Chromosome<G, F>> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }
}
