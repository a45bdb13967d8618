//! Daily distribution: where each course's lessons fall within each day.
//!
//! Built once per evaluation and shared by every soft metric. For each
//! `(course, weekday)` it holds the sorted time indices of the lessons placed
//! there. Duplicates are kept: two lessons of a course on the same slot are
//! two entries, and they never count as consecutive.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::models::SlotId;
use super::template::ChromosomeTemplate;

/// A gene resolved against the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub course: usize,
    /// Index into [`ChromosomeTemplate::slots`].
    pub slot: usize,
}

/// Resolves genes to placements, dropping genes whose slot id is unknown.
///
/// # Panics
/// Panics if `genes` does not have the template's length.
pub fn resolve(template: &ChromosomeTemplate, genes: &[SlotId]) -> Vec<Placement> {
    assert_eq!(
        genes.len(),
        template.len(),
        "chromosome length does not match the template"
    );
    template
        .positions()
        .iter()
        .zip(genes)
        .filter_map(|(position, &id)| {
            template.slot_index(id).map(|slot| Placement {
                course: position.course,
                slot,
            })
        })
        .collect()
}

/// Per-course, per-weekday sorted time indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyDistribution {
    weekdays: usize,
    cells: Vec<Vec<usize>>,
}

impl DailyDistribution {
    pub fn build(template: &ChromosomeTemplate, placements: &[Placement]) -> Self {
        let weekdays = template.weekdays().len();
        let mut cells = vec![Vec::new(); template.courses().len() * weekdays];
        for p in placements {
            let coords = template.coords(p.slot);
            cells[p.course * weekdays + coords.weekday].push(coords.time_index);
        }
        for cell in &mut cells {
            cell.sort_unstable();
        }
        Self { weekdays, cells }
    }

    /// Time indices of `course` on `weekday`, ascending.
    pub fn day(&self, course: usize, weekday: usize) -> &[usize] {
        &self.cells[course * self.weekdays + weekday]
    }

    /// Non-empty days of `course`, in weekday order.
    pub fn days(&self, course: usize) -> impl Iterator<Item = &[usize]> + '_ {
        let start = course * self.weekdays;
        self.cells[start..start + self.weekdays]
            .iter()
            .map(Vec::as_slice)
            .filter(|d| !d.is_empty())
    }

    pub fn course_count(&self) -> usize {
        if self.weekdays == 0 {
            0
        } else {
            self.cells.len() / self.weekdays
        }
    }
}

/// Lengths of the maximal runs of consecutive indices in a sorted day.
pub fn blocks(day: &[usize]) -> Blocks<'_> {
    Blocks { rest: day }
}

/// Iterator returned by [`blocks`].
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    rest: &'a [usize],
}

impl Iterator for Blocks<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.rest.is_empty() {
            return None;
        }
        let mut len = 1;
        while len < self.rest.len() && self.rest[len] == self.rest[len - 1] + 1 {
            len += 1;
        }
        self.rest = &self.rest[len..];
        Some(len)
    }
}

/// Number of non-contiguous steps between adjacent lessons of a day.
pub fn breaks(day: &[usize]) -> usize {
    day.windows(2).filter(|w| w[1] != w[0] + 1).count()
}

/// Classification of a block by its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// A single lesson.
    Isolated,
    /// Length within the ideal range.
    Ideal,
    /// Any other length.
    Overload,
}

impl BlockKind {
    pub fn classify(len: usize, ideal: &RangeInclusive<usize>) -> Self {
        if len == 1 {
            BlockKind::Isolated
        } else if ideal.contains(&len) {
            BlockKind::Ideal
        } else {
            BlockKind::Overload
        }
    }
}

/// Block tallies over a whole timetable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    pub isolated: usize,
    pub ideal: usize,
    pub overload: usize,
}

impl BlockCounts {
    pub fn record(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Isolated => self.isolated += 1,
            BlockKind::Ideal => self.ideal += 1,
            BlockKind::Overload => self.overload += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.isolated + self.ideal + self.overload
    }
}
