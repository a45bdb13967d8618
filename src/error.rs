//! Crate-level error type.

use thiserror::Error;

use crate::ga::GaError;
use crate::timetable::SlotId;

/// Errors that stop a timetabling run before the search starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("course roster is empty")]
    EmptyRoster,

    #[error("time-slot set is empty")]
    EmptySlotSet,

    #[error("duplicate time-slot id {0}")]
    DuplicateSlotId(SlotId),

    #[error("duplicate course code {0:?}")]
    DuplicateCourseCode(String),

    /// Every course asks for zero weekly lessons.
    #[error("course roster requires no weekly lessons")]
    NoLessons,

    #[error("invalid clock time {0:?}, expected HH:MM")]
    InvalidClockTime(String),

    #[error("invalid fitness weights: {0}")]
    InvalidWeights(String),

    #[error(transparent)]
    Ga(#[from] GaError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
