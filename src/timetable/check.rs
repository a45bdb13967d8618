//! Post-run consistency check of a winning candidate.
//!
//! The engine never produces an out-of-alphabet gene, so a non-empty report
//! points at a problem in how the candidate was built or loaded.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::distribution::resolve;
use super::models::SlotId;
use super::template::ChromosomeTemplate;

/// A course whose placed lessons differ from its weekly requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    pub code: String,
    pub expected: u32,
    pub allocated: u32,
}

/// A gene holding a slot id absent from the slot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidGene {
    pub position: usize,
    pub slot_id: SlotId,
}

/// Expected vs. allocated lessons per course, plus any unknown slot ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub mismatches: Vec<CountMismatch>,
    pub invalid_genes: Vec<InvalidGene>,
}

impl AllocationReport {
    /// # Panics
    /// Panics if `genes` does not have the template's length.
    pub fn inspect(template: &ChromosomeTemplate, genes: &[SlotId]) -> Self {
        let mut allocated = vec![0u32; template.courses().len()];
        for p in resolve(template, genes) {
            allocated[p.course] += 1;
        }

        let mismatches = template
            .courses()
            .iter()
            .zip(allocated)
            .filter(|(course, count)| course.weekly_lessons != *count)
            .map(|(course, count)| CountMismatch {
                code: course.code.clone(),
                expected: course.weekly_lessons,
                allocated: count,
            })
            .collect();

        let invalid_genes = genes
            .iter()
            .enumerate()
            .filter(|(_, id)| template.slot_index(**id).is_none())
            .map(|(position, &slot_id)| InvalidGene { position, slot_id })
            .collect();

        Self {
            mismatches,
            invalid_genes,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty() && self.invalid_genes.is_empty()
    }

    /// Emits one warning per finding.
    pub fn log_warnings(&self) {
        for m in &self.mismatches {
            warn!(
                code = %m.code,
                expected = m.expected,
                allocated = m.allocated,
                "lesson count mismatch"
            );
        }
        for g in &self.invalid_genes {
            warn!(
                position = g.position,
                slot_id = g.slot_id,
                "gene references unknown slot"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::template::tests::{course, slot};

    fn template() -> ChromosomeTemplate {
        ChromosomeTemplate::build(
            vec![course(1, "A", "ana", 2), course(1, "B", "bo", 1)],
            vec![
                slot(1, "Monday", "07:30", "08:20"),
                slot(2, "Monday", "08:20", "09:10"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_valid_candidate_is_consistent() {
        let report = AllocationReport::inspect(&template(), &[1, 2, 1]);
        assert!(report.is_consistent());
        assert_eq!(report, AllocationReport::default());
    }

    #[test]
    fn test_unknown_gene_reported_twice() {
        let report = AllocationReport::inspect(&template(), &[1, 77, 2]);

        assert!(!report.is_consistent());
        assert_eq!(
            report.invalid_genes,
            vec![InvalidGene {
                position: 1,
                slot_id: 77
            }]
        );
        assert_eq!(
            report.mismatches,
            vec![CountMismatch {
                code: "A".into(),
                expected: 2,
                allocated: 1
            }]
        );
        report.log_warnings();
    }
}
