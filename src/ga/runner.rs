//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! re-evaluation → archive update → repeat.
//!
//! Replacement is generational and non-elitist; the [`Archive`] is what
//! guarantees the best solution found is never lost.

use super::archive::Archive;
use super::config::GaConfig;
use super::error::GaError;
use super::operators::{random_allele, resample_mutation, two_point_crossover};
use super::selection::select_offspring;
use super::types::{Chromosome, Fitness, GaProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Population statistics for one completed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Highest score in the current population.
    pub max_fitness: f64,
    /// Mean score of the current population.
    pub mean_fitness: f64,
    /// Best score held by the archive after this generation.
    pub best_fitness: f64,
    /// Number of chromosomes evaluated during this generation.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
///
/// Contains the best solution found, the archive, and the per-generation
/// history of the population.
#[derive(Debug, Clone)]
pub struct GaResult<G, F> {
    /// The best chromosome found during the entire run.
    pub best: Chromosome<G, F>,

    /// Best fitness value (same as `best.score()`).
    pub best_fitness: F,

    /// Archive members, best first. `archive[0] == best`.
    pub archive: Vec<Chromosome<G, F>>,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Population maximum at the end of each generation.
    pub max_history: Vec<f64>,

    /// Population mean at the end of each generation.
    pub mean_history: Vec<f64>,

    /// Archive best at the end of each generation. Non-decreasing.
    pub best_history: Vec<f64>,

    /// Total number of fitness evaluations performed.
    pub evaluations: usize,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Gene, P::Fitness>, GaError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked between generations. When it is set the run stops
    /// and returns what the completed generations produced; the archive and
    /// histories never contain a partially processed generation.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Gene, P::Fitness>, GaError> {
        config.validate()?;
        let alleles = problem.alleles();
        if alleles.is_empty() {
            return Err(GaError::EmptyAlleles);
        }
        let len = problem.chromosome_len();
        if len == 0 {
            return Err(GaError::EmptyChromosome);
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        info!(
            seed,
            population = config.population_size,
            generations = config.max_generations,
            genes = len,
            alleles = alleles.len(),
            "starting GA run"
        );

        // 1. Initialize population
        let mut population: Vec<Chromosome<P::Gene, P::Fitness>> = (0..config.population_size)
            .map(|_| {
                let genes = (0..len)
                    .map(|_| random_allele(alleles, &mut rng))
                    .collect();
                Chromosome::new(genes)
            })
            .collect();

        // 2. Evaluate initial population
        let mut evaluations = evaluate_pending(problem, &mut population, config.parallel);

        // 3. Seed the archive
        let mut archive = Archive::new(config.archive_size);
        archive.update(&population);

        let mut max_history = Vec::with_capacity(config.max_generations);
        let mut mean_history = Vec::with_capacity(config.max_generations);
        let mut best_history = Vec::with_capacity(config.max_generations);
        let mut cancelled = false;

        // 4. Evolutionary loop
        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Selection (full replacement)
            let mut offspring = select_offspring(
                &population,
                config.tournament_size,
                config.population_size,
                &mut rng,
            );

            // Crossover on consecutive pairs
            for pair in offspring.chunks_exact_mut(2) {
                if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let (left, right) = pair.split_at_mut(1);
                    two_point_crossover(left[0].genes_mut(), right[0].genes_mut(), &mut rng);
                }
            }

            // Mutation
            for child in offspring.iter_mut() {
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    let previous = child.fitness();
                    let changed = resample_mutation(
                        child.genes_mut(),
                        alleles,
                        config.gene_mutation_rate,
                        &mut rng,
                    );
                    // A score survives a mutation pass that redrew no gene.
                    if let (false, Some(f)) = (changed, previous) {
                        child.set_fitness(f);
                    }
                }
            }

            // Re-evaluate only what changed
            let evaluated = evaluate_pending(problem, &mut offspring, config.parallel);
            evaluations += evaluated;
            population = offspring;

            archive.update(&population);

            let (max_fitness, mean_fitness) = population_stats(&population);
            let best_fitness = archive
                .best_fitness()
                .map(Fitness::to_f64)
                .unwrap_or(f64::NEG_INFINITY);
            max_history.push(max_fitness);
            mean_history.push(mean_fitness);
            best_history.push(best_fitness);

            let stats = GenerationStats {
                generation: gen,
                max_fitness,
                mean_fitness,
                best_fitness,
                evaluations: evaluated,
            };
            if gen == 1 || gen % 10 == 0 {
                debug!(
                    generation = gen,
                    max = max_fitness,
                    mean = mean_fitness,
                    best = best_fitness,
                    "generation complete"
                );
            }
            problem.on_generation(&stats);
        }

        let generations = max_history.len();
        let archive = archive.into_members();
        let best = archive[0].clone();
        info!(
            generations,
            cancelled,
            evaluations,
            best = best.score().to_f64(),
            "GA run finished"
        );

        Ok(GaResult {
            best_fitness: best.score(),
            best,
            archive,
            generations,
            cancelled,
            max_history,
            mean_history,
            best_history,
            evaluations,
        })
    }
}

/// Evaluate every chromosome whose score is invalid. Returns how many were
/// evaluated.
fn evaluate_pending<P: GaProblem>(
    problem: &P,
    population: &mut [Chromosome<P::Gene, P::Fitness>],
    parallel: bool,
) -> usize {
    let pending = population.iter().filter(|c| !c.is_evaluated()).count();

    #[cfg(feature = "parallel")]
    {
        if parallel {
            population
                .par_iter_mut()
                .filter(|c| !c.is_evaluated())
                .for_each(|c| {
                    let f = problem.evaluate(c.genes());
                    c.set_fitness(f);
                });
            return pending;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for c in population.iter_mut().filter(|c| !c.is_evaluated()) {
        let f = problem.evaluate(c.genes());
        c.set_fitness(f);
    }
    pending
}

/// Maximum and mean score of an evaluated population.
fn population_stats<G, F: Fitness>(population: &[Chromosome<G, F>]) -> (f64, f64) {
    let scores = population.iter().map(|c| c.score().to_f64());
    let max = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let mean = scores.sum::<f64>() / population.len() as f64;
    (max, mean)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    // ---- OneMax problem: maximize the number of 1 genes ----

    struct OneMaxProblem {
        n: usize,
        alleles: Vec<u8>,
    }

    impl OneMaxProblem {
        fn new(n: usize) -> Self {
            Self {
                n,
                alleles: vec![0, 1],
            }
        }
    }

    impl GaProblem for OneMaxProblem {
        type Gene = u8;
        type Fitness = f64;

        fn chromosome_len(&self) -> usize {
            self.n
        }

        fn alleles(&self) -> &[u8] {
            &self.alleles
        }

        fn evaluate(&self, genes: &[u8]) -> f64 {
            genes.iter().map(|&g| g as f64).sum()
        }
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem::new(20);
        let result = GaRunner::run(&problem, &config().with_max_generations(150)).unwrap();

        assert!(
            result.best_fitness >= 17.0,
            "expected fitness >= 17 for 20-bit OneMax, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_histories_have_one_entry_per_generation() {
        let problem = OneMaxProblem::new(10);
        let result = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(result.generations, 60);
        assert_eq!(result.max_history.len(), 60);
        assert_eq!(result.mean_history.len(), 60);
        assert_eq!(result.best_history.len(), 60);
        for (max, mean) in result.max_history.iter().zip(&result.mean_history) {
            assert!(mean <= max);
        }
    }

    #[test]
    fn test_archive_monotonic() {
        let problem = OneMaxProblem::new(16);
        let result = GaRunner::run(&problem, &config().with_mutation_rate(0.9)).unwrap();

        for window in result.best_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "archive best must not regress: {} < {}",
                window[1],
                window[0]
            );
        }
        // The archive has seen every generation's population.
        for (best, max) in result.best_history.iter().zip(&result.max_history) {
            assert!(best >= max);
        }
    }

    #[test]
    fn test_archive_sorted_and_distinct() {
        let problem = OneMaxProblem::new(12);
        let result = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(result.archive.len(), 3);
        assert_eq!(result.archive[0], result.best);
        for w in result.archive.windows(2) {
            assert!(w[0].score() >= w[1].score());
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let problem = OneMaxProblem::new(24);
        let a = GaRunner::run(&problem, &config()).unwrap();
        let b = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.max_history, b.max_history);
        assert_eq!(a.mean_history, b.mean_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let problem = OneMaxProblem::new(24);
        let seq = GaRunner::run(&problem, &config()).unwrap();
        let par = GaRunner::run(&problem, &config().with_parallel(true)).unwrap();

        assert_eq!(seq.best.genes(), par.best.genes());
        assert_eq!(seq.mean_history, par.mean_history);
    }

    #[test]
    fn test_chromosome_length_invariant() {
        struct Checked(OneMaxProblem);

        impl GaProblem for Checked {
            type Gene = u8;
            type Fitness = f64;
            fn chromosome_len(&self) -> usize {
                self.0.chromosome_len()
            }
            fn alleles(&self) -> &[u8] {
                self.0.alleles()
            }
            fn evaluate(&self, genes: &[u8]) -> f64 {
                assert_eq!(genes.len(), 9);
                self.0.evaluate(genes)
            }
        }

        let result = GaRunner::run(&Checked(OneMaxProblem::new(9)), &config()).unwrap();
        assert!(result.archive.iter().all(|c| c.len() == 9));
    }

    #[test]
    fn test_only_changed_offspring_are_reevaluated() {
        let problem = OneMaxProblem::new(10);
        let config = config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let result = GaRunner::run(&problem, &config).unwrap();

        // Without variation only the initial population is ever evaluated.
        assert_eq!(result.evaluations, 30);
    }

    #[test]
    fn test_on_generation_called_each_generation() {
        struct Counting {
            inner: OneMaxProblem,
            calls: AtomicUsize,
        }

        impl GaProblem for Counting {
            type Gene = u8;
            type Fitness = f64;
            fn chromosome_len(&self) -> usize {
                self.inner.chromosome_len()
            }
            fn alleles(&self) -> &[u8] {
                self.inner.alleles()
            }
            fn evaluate(&self, genes: &[u8]) -> f64 {
                self.inner.evaluate(genes)
            }
            fn on_generation(&self, stats: &GenerationStats) {
                let prev = self.calls.fetch_add(1, Ordering::Relaxed);
                assert_eq!(stats.generation, prev + 1);
            }
        }

        let problem = Counting {
            inner: OneMaxProblem::new(8),
            calls: AtomicUsize::new(0),
        };
        GaRunner::run(&problem, &config().with_max_generations(25)).unwrap();
        assert_eq!(problem.calls.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let problem = OneMaxProblem::new(10);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &config(), Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.max_history.is_empty());
        // The initial population still populates the archive.
        assert!(!result.archive.is_empty());
    }

    #[test]
    fn test_cancellation_midway_keeps_histories_consistent() {
        struct CancelAt {
            inner: OneMaxProblem,
            flag: Arc<AtomicBool>,
            at: usize,
        }

        impl GaProblem for CancelAt {
            type Gene = u8;
            type Fitness = f64;
            fn chromosome_len(&self) -> usize {
                self.inner.chromosome_len()
            }
            fn alleles(&self) -> &[u8] {
                self.inner.alleles()
            }
            fn evaluate(&self, genes: &[u8]) -> f64 {
                self.inner.evaluate(genes)
            }
            fn on_generation(&self, stats: &GenerationStats) {
                if stats.generation == self.at {
                    self.flag.store(true, Ordering::Relaxed);
                }
            }
        }

        let flag = Arc::new(AtomicBool::new(false));
        let problem = CancelAt {
            inner: OneMaxProblem::new(10),
            flag: flag.clone(),
            at: 7,
        };
        let result = GaRunner::run_with_cancel(&problem, &config(), Some(flag)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 7);
        assert_eq!(result.max_history.len(), 7);
        assert_eq!(result.mean_history.len(), 7);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let problem = OneMaxProblem::new(10);
        let err = GaRunner::run(&problem, &config().with_population_size(1)).unwrap_err();
        assert!(matches!(err, GaError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_alleles() {
        let problem = OneMaxProblem {
            n: 4,
            alleles: Vec::new(),
        };
        assert_eq!(
            GaRunner::run(&problem, &config()).unwrap_err(),
            GaError::EmptyAlleles
        );
    }

    #[test]
    fn test_rejects_empty_chromosome() {
        let problem = OneMaxProblem::new(0);
        assert_eq!(
            GaRunner::run(&problem, &config()).unwrap_err(),
            GaError::EmptyChromosome
        );
    }
}
