//! Evolutionary weekly class timetabling.
//!
//! Assigns every weekly lesson of a course roster to a time slot so that no
//! professor or student period is double-booked, while shaping each course's
//! week into compact, well-sized blocks.
//!
//! - **Genetic Algorithm (GA)**: generic population-based search over
//!   fixed-length gene sequences with tournament selection, two-point
//!   crossover, resample mutation and a top-N archive.
//! - **Timetabling**: chromosome template, weighted fitness, schedule
//!   decoding and the end-to-end [`TimetableSolver`](timetable::TimetableSolver).
//!
//! # Architecture
//!
//! The [`ga`] module contains no scheduling concepts; the [`timetable`]
//! module plugs into it through [`ga::GaProblem`]. Input loading and output
//! rendering are left to consumers.
//!
//! Progress is reported through `tracing`. The crate never installs a
//! subscriber.

pub mod error;
pub mod ga;
pub mod timetable;

pub use error::{Error, Result};
