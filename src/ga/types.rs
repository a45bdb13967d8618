//! Core type definitions for the GA framework.
//!
//! [`Chromosome`] is the fixed-length genotype the engine evolves, and
//! [`GaProblem`] is the contract between the generic engine and a
//! domain-specific fitness function.

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Higher fitness is considered better (maximization).
///
/// Built-in implementations exist for `f64` and `f32`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used to rank individuals whose score has been invalidated.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::NEG_INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::NEG_INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution: a fixed-length gene sequence plus its score.
///
/// The score is `None` until the engine evaluates the chromosome, and is
/// cleared again by [`genes_mut`](Chromosome::genes_mut) or
/// [`invalidate`](Chromosome::invalidate). Equality compares genes only, so
/// two chromosomes with the same genotype are equal regardless of score.
#[derive(Debug, Clone)]
pub struct Chromosome<G, F> {
    genes: Vec<G>,
    fitness: Option<F>,
}

impl<G, F: Fitness> Chromosome<G, F> {
    /// Creates an unevaluated chromosome.
    pub fn new(genes: Vec<G>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Returns the gene sequence.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Returns the genes for modification and invalidates the score.
    pub fn genes_mut(&mut self) -> &mut [G] {
        self.fitness = None;
        &mut self.genes
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the score, or `None` if it is invalid.
    pub fn fitness(&self) -> Option<F> {
        self.fitness
    }

    /// Returns the score, treating an invalid score as [`Fitness::worst`].
    pub fn score(&self) -> F {
        self.fitness.unwrap_or_else(F::worst)
    }

    /// Stores a freshly computed score.
    pub fn set_fitness(&mut self, fitness: F) {
        self.fitness = Some(fitness);
    }

    /// Marks the score as stale.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Whether the chromosome carries a valid score.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }
}

impl<G: PartialEq, F> PartialEq for Chromosome<G, F> {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

/// Defines a GA optimization problem.
///
/// The engine owns every evolutionary mechanic (initialization, selection,
/// crossover, mutation, archive). A problem only describes:
///
/// 1. **Alphabet**: the set of values a gene may take
/// 2. **Shape**: the fixed chromosome length
/// 3. **Evaluation**: how to score a gene sequence
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// chromosomes in parallel using rayon. `evaluate` must therefore be a pure
/// function of the genes and the problem's read-only state.
pub trait GaProblem: Send + Sync {
    /// Gene type. Genes are drawn from [`alleles`](GaProblem::alleles).
    type Gene: Clone + PartialEq + Send + Sync;

    /// Score type. Higher is better.
    type Fitness: Fitness;

    /// Length of every chromosome in the run.
    fn chromosome_len(&self) -> usize;

    /// The valid gene values. Initialization and mutation sample uniformly
    /// from this slice.
    fn alleles(&self) -> &[Self::Gene];

    /// Scores a gene sequence of length [`chromosome_len`](GaProblem::chromosome_len).
    ///
    /// This is typically the most expensive operation. The GA framework
    /// may call this in parallel across the population.
    fn evaluate(&self, genes: &[Self::Gene]) -> Self::Fitness;

    /// Called at the end of each completed generation.
    ///
    /// Useful for progress reporting or external communication. The default
    /// implementation is a no-op.
    fn on_generation(&self, _stats: &super::GenerationStats) {}
}
