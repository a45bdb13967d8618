//! Weekly class timetabling on top of the [`ga`](crate::ga) engine.
//!
//! A roster of [`Course`]s is expanded into lesson positions
//! ([`ChromosomeTemplate`]); a candidate assigns one [`TimeSlot`] id per
//! position. The [`FitnessEvaluator`] scores candidates, the engine evolves
//! them, and [`decode`] turns the winner into a [`ScheduledLesson`] list.
//!
//! [`TimetableSolver`] runs the whole pipeline.
//!
//! # Modules
//!
//! - [`models`]: course and slot records
//! - [`template`]: chromosome layout and slot indexing
//! - [`distribution`]: per-course, per-day lesson layout and block analysis
//! - [`fitness`]: weighted penalties and bonuses
//! - [`problem`]: [`GaProblem`](crate::ga::GaProblem) adapter
//! - [`decoder`]: candidate to readable schedule
//! - [`check`]: post-run allocation report
//! - [`config`]: run configuration
//! - [`solver`]: end-to-end orchestration

pub mod check;
pub mod config;
pub mod decoder;
pub mod distribution;
pub mod fitness;
pub mod models;
pub mod problem;
pub mod solver;
pub mod template;

pub use check::{AllocationReport, CountMismatch, InvalidGene};
pub use config::TimetableConfig;
pub use decoder::{decode, ScheduledLesson};
pub use distribution::{BlockCounts, BlockKind};
pub use fitness::{FitnessBreakdown, FitnessEvaluator, FitnessWeights};
pub use models::{ClockTime, Course, SlotId, TimeSlot};
pub use problem::{Candidate, TimetableProblem};
pub use solver::{RankedSchedule, TimetableSolution, TimetableSolver};
pub use template::ChromosomeTemplate;
