//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::error::GaError;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, tournament pressure, operator rates,
/// generation count, archive size and parallelism.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Number of generations to run. The loop never stops earlier unless
    /// cancelled.
    pub max_generations: usize,

    /// Individuals drawn (with replacement) per tournament.
    ///
    /// - 2: light pressure (good for diversity)
    /// - 3-5: moderate pressure (typical default)
    /// - >5: strong pressure (risk of premature convergence)
    pub tournament_size: usize,

    /// Probability of applying two-point crossover to a pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability that an offspring enters mutation at all (0.0–1.0).
    pub mutation_rate: f64,

    /// Per-gene resampling probability once an offspring is mutated (0.0–1.0).
    pub gene_mutation_rate: f64,

    /// Number of best distinct chromosomes kept across the run.
    pub archive_size: usize,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect when the `parallel` feature is disabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            tournament_size: 3,
            crossover_rate: 0.7,
            mutation_rate: 0.2,
            gene_mutation_rate: 0.2,
            archive_size: 3,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_gene_mutation_rate(mut self, rate: f64) -> Self {
        self.gene_mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the archive size.
    pub fn with_archive_size(mut self, n: usize) -> Self {
        self.archive_size = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Setters clamp rates, but deserialized configs are taken verbatim, so
    /// every range is checked here.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(invalid("tournament_size must be at least 1"));
        }
        if self.archive_size == 0 {
            return Err(invalid("archive_size must be at least 1"));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("gene_mutation_rate", self.gene_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(invalid(format!("{name} must be within [0, 1], got {rate}")));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GaError {
    GaError::InvalidConfig(message.into())
}
