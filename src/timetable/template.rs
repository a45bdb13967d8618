//! Chromosome template: the fixed layout every candidate timetable shares.
//!
//! A course with `N` weekly lessons is expanded into `N` consecutive lesson
//! positions, in roster order. Gene `i` of a candidate is the slot id chosen
//! for lesson position `i`.
//!
//! The template also indexes the slot set once per run, so evaluation never
//! compares strings:
//!
//! - **weekday index**: order in which weekdays first appear in the slot list
//! - **time index**: rank of the slot's start among the distinct start times
//! - **moment**: identity of the `(weekday, start, end)` triple, shared by
//!   slots that describe the same interval under different ids

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::models::{ClockTime, Course, SlotId, TimeSlot};
use crate::error::{Error, Result};

/// One lesson to be placed: a reference to its course in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonPosition {
    /// Index into [`ChromosomeTemplate::courses`].
    pub course: usize,
    /// 0-based lesson number within the course's week.
    pub ordinal: u32,
}

/// Precomputed coordinates of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCoords {
    pub weekday: usize,
    pub time_index: usize,
    pub moment: usize,
}

/// Read-only run context: roster, lesson positions and slot lookup.
#[derive(Debug, Clone)]
pub struct ChromosomeTemplate {
    courses: Vec<Course>,
    positions: Vec<LessonPosition>,
    professors: Vec<usize>,
    slots: Vec<TimeSlot>,
    slot_ids: Vec<SlotId>,
    lookup: HashMap<SlotId, usize>,
    coords: Vec<SlotCoords>,
    weekdays: Vec<String>,
    time_positions: Vec<ClockTime>,
}

impl ChromosomeTemplate {
    /// Expands the roster and indexes the slot set.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyRoster`] / [`Error::EmptySlotSet`] for empty inputs
    /// - [`Error::DuplicateCourseCode`] / [`Error::DuplicateSlotId`]
    /// - [`Error::NoLessons`] when the expansion would be empty
    pub fn build(courses: Vec<Course>, slots: Vec<TimeSlot>) -> Result<Self> {
        if courses.is_empty() {
            return Err(Error::EmptyRoster);
        }
        if slots.is_empty() {
            return Err(Error::EmptySlotSet);
        }

        let mut codes = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !codes.insert(course.code.as_str()) {
                return Err(Error::DuplicateCourseCode(course.code.clone()));
            }
        }

        let mut lookup = HashMap::with_capacity(slots.len());
        for (idx, slot) in slots.iter().enumerate() {
            if lookup.insert(slot.id, idx).is_some() {
                return Err(Error::DuplicateSlotId(slot.id));
            }
        }

        let positions: Vec<LessonPosition> = courses
            .iter()
            .enumerate()
            .flat_map(|(course, c)| {
                (0..c.weekly_lessons).map(move |ordinal| LessonPosition { course, ordinal })
            })
            .collect();
        if positions.is_empty() {
            return Err(Error::NoLessons);
        }

        let mut professor_ids: HashMap<&str, usize> = HashMap::new();
        let professors = courses
            .iter()
            .map(|c| {
                let next = professor_ids.len();
                *professor_ids.entry(c.professor.as_str()).or_insert(next)
            })
            .collect();

        let mut weekdays: Vec<String> = Vec::new();
        for slot in &slots {
            if !weekdays.contains(&slot.weekday) {
                weekdays.push(slot.weekday.clone());
            }
        }

        let mut time_positions: Vec<ClockTime> = slots.iter().map(|s| s.start).collect();
        time_positions.sort_unstable();
        time_positions.dedup();

        let mut moments: HashMap<(usize, ClockTime, ClockTime), usize> = HashMap::new();
        let coords = slots
            .iter()
            .map(|slot| {
                let weekday = weekdays
                    .iter()
                    .position(|d| *d == slot.weekday)
                    .unwrap_or_default();
                let time_index = time_positions
                    .binary_search(&slot.start)
                    .unwrap_or_default();
                let next = moments.len();
                let moment = *moments
                    .entry((weekday, slot.start, slot.end))
                    .or_insert(next);
                SlotCoords {
                    weekday,
                    time_index,
                    moment,
                }
            })
            .collect();

        let slot_ids = slots.iter().map(|s| s.id).collect();

        debug!(
            courses = courses.len(),
            genes = positions.len(),
            slots = slots.len(),
            weekdays = weekdays.len(),
            daily_positions = time_positions.len(),
            "chromosome template built"
        );

        Ok(Self {
            courses,
            positions,
            professors,
            slots,
            slot_ids,
            lookup,
            coords,
            weekdays,
            time_positions,
        })
    }

    /// Chromosome length: total weekly lessons over the roster.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn positions(&self) -> &[LessonPosition] {
        &self.positions
    }

    /// Course bound to a lesson position.
    pub fn course_at(&self, position: usize) -> &Course {
        &self.courses[self.positions[position].course]
    }

    /// Dense professor id of a course (equal ids ⇔ same professor).
    pub fn professor_of(&self, course: usize) -> usize {
        self.professors[course]
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Valid slot ids, in load order. This is the gene alphabet.
    pub fn slot_ids(&self) -> &[SlotId] {
        &self.slot_ids
    }

    /// Index into [`slots`](Self::slots) for a slot id.
    pub fn slot_index(&self, id: SlotId) -> Option<usize> {
        self.lookup.get(&id).copied()
    }

    pub fn slot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.slot_index(id).map(|idx| &self.slots[idx])
    }

    /// Precomputed coordinates of the slot at `slot_index`.
    pub fn coords(&self, slot_index: usize) -> SlotCoords {
        self.coords[slot_index]
    }

    /// Weekdays in calendar order (first appearance in the slot list).
    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    /// Distinct slot start times, ascending. A slot's time index is its
    /// start's position in this list.
    pub fn time_positions(&self) -> &[ClockTime] {
        &self.time_positions
    }

    /// Number of lesson positions per course, recounted from the expansion.
    pub fn lesson_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.courses.len()];
        for p in &self.positions {
            counts[p.course] += 1;
        }
        counts
    }
}
