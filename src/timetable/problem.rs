//! Binds the timetable evaluator to the generic GA engine.

use tracing::trace;

use super::fitness::{FitnessEvaluator, FitnessWeights};
use super::models::SlotId;
use super::template::ChromosomeTemplate;
use crate::ga::{Chromosome, GaProblem, GenerationStats};

/// A candidate timetable: one slot id per lesson position.
pub type Candidate = Chromosome<SlotId, f64>;

/// Timetabling as a [`GaProblem`]: genes are slot ids, the alphabet is the
/// loaded slot set, and the score is [`FitnessEvaluator::evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct TimetableProblem<'a> {
    template: &'a ChromosomeTemplate,
    weights: &'a FitnessWeights,
}

impl<'a> TimetableProblem<'a> {
    pub fn new(template: &'a ChromosomeTemplate, weights: &'a FitnessWeights) -> Self {
        Self { template, weights }
    }

    pub fn template(&self) -> &'a ChromosomeTemplate {
        self.template
    }

    pub fn evaluator(&self) -> FitnessEvaluator<'a> {
        FitnessEvaluator::new(self.template, self.weights)
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Gene = SlotId;
    type Fitness = f64;

    fn chromosome_len(&self) -> usize {
        self.template.len()
    }

    fn alleles(&self) -> &[SlotId] {
        self.template.slot_ids()
    }

    fn evaluate(&self, genes: &[SlotId]) -> f64 {
        self.evaluator().evaluate(genes)
    }

    fn on_generation(&self, stats: &GenerationStats) {
        trace!(
            generation = stats.generation,
            max = stats.max_fitness,
            mean = stats.mean_fitness,
            evaluated = stats.evaluations,
            "timetable generation"
        );
    }
}
