//! End-to-end timetabling run: validate, search, decode, check.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::check::AllocationReport;
use super::config::TimetableConfig;
use super::decoder::{decode, ScheduledLesson};
use super::fitness::FitnessBreakdown;
use super::models::{Course, SlotId, TimeSlot};
use super::problem::{Candidate, TimetableProblem};
use super::template::ChromosomeTemplate;
use crate::error::Result;
use crate::ga::GaRunner;

/// One archive member, scored and decoded.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSchedule {
    /// 1-based position in the archive.
    pub rank: usize,
    pub genes: Vec<SlotId>,
    pub fitness: f64,
    pub breakdown: FitnessBreakdown,
    pub schedule: Vec<ScheduledLesson>,
}

/// Outcome of [`TimetableSolver::solve`].
#[derive(Debug, Clone, Serialize)]
pub struct TimetableSolution {
    /// Best timetable found. Same as `archive[0]`.
    pub best: RankedSchedule,
    /// Best distinct timetables, best first.
    pub archive: Vec<RankedSchedule>,
    /// Population maximum per generation.
    pub max_history: Vec<f64>,
    /// Population mean per generation.
    pub mean_history: Vec<f64>,
    pub generations: usize,
    pub cancelled: bool,
    /// Consistency check of the winner.
    pub allocation: AllocationReport,
    pub solve_time_ms: u64,
}

/// Owns the validated inputs of a run.
///
/// ```
/// use u_timetable::ga::GaConfig;
/// use u_timetable::timetable::{Course, TimeSlot, TimetableConfig, TimetableSolver};
///
/// let courses = vec![Course::new(1, "MAT1", "Calculus", 60, "Ada", 2)];
/// let slots = vec![
///     TimeSlot::new(1, "Monday", "07:30".parse()?, "08:20".parse()?),
///     TimeSlot::new(2, "Monday", "08:20".parse()?, "09:10".parse()?),
/// ];
/// let ga = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(1);
/// let config = TimetableConfig::default().with_ga(ga);
///
/// let solution = TimetableSolver::new(courses, slots, config)?.solve()?;
/// assert_eq!(solution.best.genes.len(), 2);
/// assert_eq!(solution.max_history.len(), 5);
/// # Ok::<(), u_timetable::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TimetableSolver {
    template: ChromosomeTemplate,
    config: TimetableConfig,
}

impl TimetableSolver {
    /// Validates the configuration and builds the chromosome template.
    pub fn new(
        courses: Vec<Course>,
        slots: Vec<TimeSlot>,
        config: TimetableConfig,
    ) -> Result<Self> {
        config.validate()?;
        let template = ChromosomeTemplate::build(courses, slots)?;
        Ok(Self { template, config })
    }

    pub fn template(&self) -> &ChromosomeTemplate {
        &self.template
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Runs the search to completion.
    pub fn solve(&self) -> Result<TimetableSolution> {
        self.solve_with_cancel(None)
    }

    /// Runs the search, stopping early at the next generation boundary once
    /// `cancel` is set.
    pub fn solve_with_cancel(
        &self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TimetableSolution> {
        let started = Instant::now();
        let problem = TimetableProblem::new(&self.template, &self.config.weights);
        let result = GaRunner::run_with_cancel(&problem, &self.config.ga, cancel)?;

        let archive: Vec<RankedSchedule> = result
            .archive
            .iter()
            .enumerate()
            .map(|(idx, candidate)| self.rank(idx + 1, candidate))
            .collect();
        let best = self.rank(1, &result.best);

        let allocation = AllocationReport::inspect(&self.template, &best.genes);
        allocation.log_warnings();

        let solve_time_ms = started.elapsed().as_millis() as u64;
        info!(
            fitness = best.fitness,
            hard_penalty = best.breakdown.hard_penalty(),
            lessons = best.schedule.len(),
            generations = result.generations,
            solve_time_ms,
            "timetable solved"
        );

        Ok(TimetableSolution {
            best,
            archive,
            max_history: result.max_history,
            mean_history: result.mean_history,
            generations: result.generations,
            cancelled: result.cancelled,
            allocation,
            solve_time_ms,
        })
    }

    /// Scores and decodes an arbitrary candidate against this run's inputs.
    pub fn rank(&self, rank: usize, candidate: &Candidate) -> RankedSchedule {
        let genes = candidate.genes().to_vec();
        let problem = TimetableProblem::new(&self.template, &self.config.weights);
        let breakdown = problem.evaluator().breakdown(&genes);
        let schedule = decode(&self.template, &genes);
        RankedSchedule {
            rank,
            fitness: breakdown.total,
            genes,
            breakdown,
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ga::GaConfig;
    use crate::timetable::template::tests::{course, slot};

    fn slots() -> Vec<TimeSlot> {
        let mut slots = Vec::new();
        let times = [
            ("07:30", "08:20"),
            ("08:20", "09:10"),
            ("09:10", "10:00"),
            ("10:20", "11:10"),
        ];
        for (d, day) in ["Monday", "Tuesday", "Wednesday"].iter().enumerate() {
            for (i, (s, e)) in times.iter().enumerate() {
                slots.push(slot((d * 10 + i + 1) as SlotId, day, s, e));
            }
        }
        slots
    }

    fn courses() -> Vec<Course> {
        vec![
            course(1, "MAT1", "ana", 3),
            course(1, "PHY1", "bo", 2),
            course(1, "CHE1", "cy", 2),
            course(2, "MAT2", "ana", 2),
            course(2, "BIO2", "di", 3),
        ]
    }

    fn config(seed: u64) -> TimetableConfig {
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_population_size(40)
                .with_max_generations(60)
                .with_seed(seed)
                .with_parallel(false),
        )
    }

    #[test]
    fn test_solution_shape() {
        let solver = TimetableSolver::new(courses(), slots(), config(13)).unwrap();
        let solution = solver.solve().unwrap();

        assert_eq!(solution.generations, 60);
        assert_eq!(solution.max_history.len(), 60);
        assert_eq!(solution.mean_history.len(), 60);
        assert!(!solution.cancelled);

        assert_eq!(solution.best.genes.len(), 12);
        assert_eq!(solution.best.rank, 1);
        assert_eq!(solution.best.genes, solution.archive[0].genes);
        assert_eq!(solution.best.schedule.len(), 12);
        assert!(solution.allocation.is_consistent());

        for w in solution.archive.windows(2) {
            assert!(w[0].fitness >= w[1].fitness);
            assert_ne!(w[0].genes, w[1].genes);
        }
        for (i, member) in solution.archive.iter().enumerate() {
            assert_eq!(member.rank, i + 1);
            assert_eq!(member.fitness, member.breakdown.total);
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = TimetableSolver::new(courses(), slots(), config(5))
            .unwrap()
            .solve()
            .unwrap();
        let b = TimetableSolver::new(courses(), slots(), config(5))
            .unwrap()
            .solve()
            .unwrap();

        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.max_history, b.max_history);
        assert_eq!(a.mean_history, b.mean_history);
    }

    #[test]
    fn test_best_never_below_any_generation_max() {
        let solution = TimetableSolver::new(courses(), slots(), config(21))
            .unwrap()
            .solve()
            .unwrap();
        for max in &solution.max_history {
            assert!(solution.best.fitness >= *max);
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let solver = TimetableSolver::new(courses(), slots(), config(3)).unwrap();
        let solution = solver
            .solve_with_cancel(Some(Arc::new(AtomicBool::new(true))))
            .unwrap();

        assert!(solution.cancelled);
        assert_eq!(solution.generations, 0);
        assert!(solution.max_history.is_empty());
        assert_eq!(solution.best.genes.len(), 12);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert_eq!(
            TimetableSolver::new(Vec::new(), slots(), config(1)).unwrap_err(),
            Error::EmptyRoster
        );
        assert_eq!(
            TimetableSolver::new(courses(), Vec::new(), config(1)).unwrap_err(),
            Error::EmptySlotSet
        );

        let bad = config(1).with_ga(GaConfig::default().with_max_generations(0));
        assert!(matches!(
            TimetableSolver::new(courses(), slots(), bad),
            Err(Error::Ga(_))
        ));
    }
}
