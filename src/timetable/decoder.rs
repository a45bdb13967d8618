//! Projects a candidate into a readable schedule.

use serde::{Deserialize, Serialize};

use super::distribution::resolve;
use super::models::{ClockTime, SlotId};
use super::template::ChromosomeTemplate;

/// One placed lesson of a decoded timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledLesson {
    pub period: u32,
    pub code: String,
    pub name: String,
    pub professor: String,
    pub weekday: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Decodes `genes` into lessons sorted by period, weekday and start time.
///
/// Weekdays sort in the order they first appear in the slot list. Genes with
/// unknown slot ids are skipped.
///
/// # Panics
/// Panics if `genes` does not have the template's length.
pub fn decode(template: &ChromosomeTemplate, genes: &[SlotId]) -> Vec<ScheduledLesson> {
    let mut placed: Vec<_> = resolve(template, genes)
        .into_iter()
        .map(|p| {
            let course = &template.courses()[p.course];
            let slot = &template.slots()[p.slot];
            let weekday = template.coords(p.slot).weekday;
            (course.period, weekday, slot.start, course, slot)
        })
        .collect();
    // Stable, so lessons sharing a key keep their chromosome order.
    placed.sort_by_key(|(period, weekday, start, ..)| (*period, *weekday, *start));

    placed
        .into_iter()
        .map(|(_, _, _, course, slot)| ScheduledLesson {
            period: course.period,
            code: course.code.clone(),
            name: course.name.clone(),
            professor: course.professor.clone(),
            weekday: slot.weekday.clone(),
            start: slot.start,
            end: slot.end,
        })
        .collect()
}
