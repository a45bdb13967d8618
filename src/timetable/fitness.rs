//! Timetable fitness: base score minus hard and soft penalties, plus a bonus
//! for well-formed lesson blocks.
//!
//! # Hard penalties
//!
//! - **Professor conflict**: per `(professor, weekday, start, end)` holding
//!   `k > 1` distinct courses, `C(k, 2) × weight`
//! - **Period conflict**: same rule keyed by the student period
//!
//! # Soft penalties
//!
//! Computed from the [`DailyDistribution`] built once per evaluation:
//! fragmentation, weekly dispersion, temporal jump, concentration, block
//! shape (isolated / overload), plus two per-period metrics: gaps between
//! used daily positions and daily overload.
//!
//! Genes pointing at unknown slot ids are ignored by every metric.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::distribution::{
    blocks, breaks, resolve, BlockCounts, BlockKind, DailyDistribution, Placement,
};
use super::models::SlotId;
use super::template::ChromosomeTemplate;
use crate::error::{Error, Result};

/// Weights and thresholds of every fitness component.
///
/// Defaults reproduce the calibration the search was tuned with: hard
/// conflicts dominate, block shape comes next, fine-grained layout last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Score before penalties and bonuses.
    pub base_score: f64,

    /// Per conflicting pair of courses sharing a professor and an interval.
    pub professor_conflict: f64,
    /// Per conflicting pair of courses sharing a period and an interval.
    pub period_conflict: f64,

    /// Per single-lesson block.
    pub isolated_block: f64,
    /// Per block longer than the ideal range.
    pub overload_block: f64,
    /// Bonus per block within the ideal range.
    pub ideal_block_bonus: f64,
    /// Smallest ideal block length. Must be at least 2.
    pub ideal_block_min: usize,
    /// Largest ideal block length.
    pub ideal_block_max: usize,

    /// Multiplies a course's average breaks per used day.
    pub fragmentation: f64,

    /// Multiplies the scaled excess of days-used / lessons.
    pub weekly_dispersion: f64,
    /// Days-used / lessons ratio tolerated without penalty.
    pub dispersion_threshold: f64,
    /// Scale applied to the excess ratio.
    pub dispersion_scale: f64,

    /// Per day whose first-to-last span exceeds the threshold.
    pub temporal_jump: f64,
    /// Largest tolerated span, in daily positions, between a course's first
    /// and last lesson of a day.
    pub temporal_jump_threshold: usize,

    /// Per lesson beyond the limit for one course on one day.
    pub concentration: f64,
    pub concentration_limit: usize,

    /// Per skipped daily position between two lessons of a period.
    pub gap: f64,

    /// Per lesson beyond the daily maximum for one period.
    pub daily_overload: f64,
    pub max_daily_lessons: usize,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            base_score: 10_000.0,
            professor_conflict: 4_000.0,
            period_conflict: 4_000.0,
            isolated_block: 350.0,
            overload_block: 550.0,
            ideal_block_bonus: 220.0,
            ideal_block_min: 2,
            ideal_block_max: 3,
            fragmentation: 160.0,
            weekly_dispersion: 150.0,
            dispersion_threshold: 0.75,
            dispersion_scale: 4.0,
            temporal_jump: 120.0,
            temporal_jump_threshold: 4,
            concentration: 60.0,
            concentration_limit: 2,
            gap: 25.0,
            daily_overload: 180.0,
            max_daily_lessons: 5,
        }
    }
}

impl FitnessWeights {
    /// Inclusive range of ideal block lengths.
    pub fn ideal_range(&self) -> RangeInclusive<usize> {
        self.ideal_block_min..=self.ideal_block_max
    }

    /// Rejects non-finite or negative weights and an unusable ideal range.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("base_score", self.base_score),
            ("professor_conflict", self.professor_conflict),
            ("period_conflict", self.period_conflict),
            ("isolated_block", self.isolated_block),
            ("overload_block", self.overload_block),
            ("ideal_block_bonus", self.ideal_block_bonus),
            ("fragmentation", self.fragmentation),
            ("weekly_dispersion", self.weekly_dispersion),
            ("dispersion_threshold", self.dispersion_threshold),
            ("dispersion_scale", self.dispersion_scale),
            ("temporal_jump", self.temporal_jump),
            ("concentration", self.concentration),
            ("gap", self.gap),
            ("daily_overload", self.daily_overload),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(Error::InvalidWeights(format!("{name} must be finite")));
            }
            if name != "base_score" && value < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.ideal_block_min < 2 {
            return Err(Error::InvalidWeights(
                "ideal_block_min must be at least 2".into(),
            ));
        }
        if self.ideal_block_max < self.ideal_block_min {
            return Err(Error::InvalidWeights(
                "ideal_block_max must not be below ideal_block_min".into(),
            ));
        }
        Ok(())
    }
}

/// Every component of a candidate's score.
///
/// `total = base_score - hard_penalty() - soft_penalty() + ideal_block_bonus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub total: f64,
    pub base_score: f64,

    pub professor_conflict: f64,
    pub period_conflict: f64,

    pub fragmentation: f64,
    pub weekly_dispersion: f64,
    pub temporal_jump: f64,
    pub concentration: f64,
    pub gap: f64,
    pub daily_overload: f64,
    pub overload_blocks: f64,
    pub isolated_blocks: f64,

    pub ideal_block_bonus: f64,

    /// Aggregate block tallies over all courses and days.
    pub blocks: BlockCounts,
}

impl FitnessBreakdown {
    pub fn hard_penalty(&self) -> f64 {
        self.professor_conflict + self.period_conflict
    }

    pub fn soft_penalty(&self) -> f64 {
        self.fragmentation
            + self.weekly_dispersion
            + self.temporal_jump
            + self.concentration
            + self.gap
            + self.daily_overload
            + self.overload_blocks
            + self.isolated_blocks
    }

    /// Whether no professor or period is double-booked.
    pub fn is_feasible(&self) -> bool {
        self.hard_penalty() == 0.0
    }
}

/// Scores candidates against a template. Holds only shared references, so
/// it is cheap to construct and safe to use from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    template: &'a ChromosomeTemplate,
    weights: &'a FitnessWeights,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(template: &'a ChromosomeTemplate, weights: &'a FitnessWeights) -> Self {
        Self { template, weights }
    }

    /// Total score of a candidate.
    ///
    /// # Panics
    /// Panics if `genes` does not have the template's length.
    pub fn evaluate(&self, genes: &[SlotId]) -> f64 {
        self.breakdown(genes).total
    }

    /// Itemized score of a candidate.
    ///
    /// # Panics
    /// Panics if `genes` does not have the template's length.
    pub fn breakdown(&self, genes: &[SlotId]) -> FitnessBreakdown {
        let w = self.weights;
        let placements = resolve(self.template, genes);
        let distribution = DailyDistribution::build(self.template, &placements);

        let professor_conflict =
            self.professor_conflicts(&placements) as f64 * w.professor_conflict;
        let period_conflict = self.period_conflicts(&placements) as f64 * w.period_conflict;

        let course = self.course_metrics(&distribution);
        let period = self.period_metrics(&placements);

        let overload_blocks = course.blocks.overload as f64 * w.overload_block;
        let isolated_blocks = course.blocks.isolated as f64 * w.isolated_block;
        let ideal_block_bonus = course.blocks.ideal as f64 * w.ideal_block_bonus;

        let mut breakdown = FitnessBreakdown {
            total: 0.0,
            base_score: w.base_score,
            professor_conflict,
            period_conflict,
            fragmentation: course.fragmentation,
            weekly_dispersion: course.weekly_dispersion,
            temporal_jump: course.temporal_jump,
            concentration: course.concentration,
            gap: period.gap,
            daily_overload: period.daily_overload,
            overload_blocks,
            isolated_blocks,
            ideal_block_bonus,
            blocks: course.blocks,
        };
        breakdown.total = breakdown.base_score
            - breakdown.hard_penalty()
            - breakdown.soft_penalty()
            + breakdown.ideal_block_bonus;
        breakdown
    }

    /// Conflicting course pairs per `(professor, interval)`.
    fn professor_conflicts(&self, placements: &[Placement]) -> usize {
        let keys = placements.iter().map(|p| {
            let moment = self.template.coords(p.slot).moment;
            ((self.template.professor_of(p.course), moment), p.course)
        });
        conflicting_pairs(keys.collect())
    }

    /// Conflicting course pairs per `(period, interval)`.
    fn period_conflicts(&self, placements: &[Placement]) -> usize {
        let courses = self.template.courses();
        let keys = placements.iter().map(|p| {
            let moment = self.template.coords(p.slot).moment;
            ((courses[p.course].period as usize, moment), p.course)
        });
        conflicting_pairs(keys.collect())
    }

    fn course_metrics(&self, distribution: &DailyDistribution) -> CourseMetrics {
        let w = self.weights;
        let ideal = w.ideal_range();
        let mut m = CourseMetrics::default();

        for course in 0..distribution.course_count() {
            let mut days_used = 0usize;
            let mut lessons = 0usize;
            let mut total_breaks = 0usize;
            let mut jump_days = 0usize;
            let mut widest_span = 0usize;

            for day in distribution.days(course) {
                days_used += 1;
                lessons += day.len();
                total_breaks += breaks(day);

                if day.len() > w.concentration_limit {
                    m.concentration += (day.len() - w.concentration_limit) as f64 * w.concentration;
                }

                if day.len() >= 2 {
                    let span = day[day.len() - 1] - day[0];
                    if span > w.temporal_jump_threshold {
                        jump_days += 1;
                        widest_span = widest_span.max(span);
                    }
                }

                for len in blocks(day) {
                    m.blocks.record(BlockKind::classify(len, &ideal));
                }
            }

            if days_used == 0 {
                continue;
            }

            let breaks_per_day = total_breaks as f64 / days_used as f64;
            m.fragmentation += (breaks_per_day * w.fragmentation).trunc();

            let dispersion = days_used as f64 / lessons as f64;
            if dispersion > w.dispersion_threshold {
                let excess = (dispersion - w.dispersion_threshold) * w.dispersion_scale;
                m.weekly_dispersion += (excess * w.weekly_dispersion).trunc();
            }

            if jump_days > 0 {
                m.temporal_jump += jump_days as f64 * w.temporal_jump;
                if widest_span > w.temporal_jump_threshold + 2 {
                    m.temporal_jump += w.temporal_jump;
                }
            }
        }
        m
    }

    fn period_metrics(&self, placements: &[Placement]) -> PeriodMetrics {
        let w = self.weights;
        let courses = self.template.courses();

        // (period, weekday, time index), one entry per placed lesson.
        let mut used: Vec<(u32, usize, usize)> = placements
            .iter()
            .map(|p| {
                let c = self.template.coords(p.slot);
                (courses[p.course].period, c.weekday, c.time_index)
            })
            .collect();
        used.sort_unstable();

        let mut m = PeriodMetrics::default();
        for group in used.chunk_by(|a, b| (a.0, a.1) == (b.0, b.1)) {
            if group.len() > w.max_daily_lessons {
                m.daily_overload += (group.len() - w.max_daily_lessons) as f64 * w.daily_overload;
            }

            // Sorted by time index; equal indices are the same position.
            let mut skipped = 0usize;
            for pair in group.windows(2) {
                let (prev, next) = (pair[0].2, pair[1].2);
                if next > prev + 1 {
                    skipped += next - prev - 1;
                }
            }
            m.gap += skipped as f64 * w.gap;
        }
        m
    }
}

#[derive(Debug, Default)]
struct CourseMetrics {
    fragmentation: f64,
    weekly_dispersion: f64,
    temporal_jump: f64,
    concentration: f64,
    blocks: BlockCounts,
}

#[derive(Debug, Default)]
struct PeriodMetrics {
    gap: f64,
    daily_overload: f64,
}

/// Sums `C(k, 2)` over keys held by `k > 1` distinct courses.
fn conflicting_pairs(mut entries: Vec<((usize, usize), usize)>) -> usize {
    entries.sort_unstable();
    entries.dedup();
    entries
        .chunk_by(|a, b| a.0 == b.0)
        .map(|group| group.len() * (group.len() - 1) / 2)
        .sum()
}
