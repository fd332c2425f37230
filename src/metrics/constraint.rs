//! Constraint satisfaction rate (CSR).
//!
//! Two availability rules are checked per entry:
//!
//! | Rule | Violated when |
//! |------|---------------|
//! | Student availability | the student's section is busy at the slot |
//! | Teacher availability | a known teacher is not free at the slot |
//!
//! An entry breaking either rule (or both) is one violation. Rules that
//! cannot be evaluated (unknown student, unknown teacher) are not triggered;
//! those defects are already counted by fabrication detection.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::warn;

use crate::models::{display_or_missing, ScheduleEntry, SlotId};

/// Availability rule broken by an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// The student's section is busy at the slot.
    StudentBusy {
        /// Section of the student.
        section: String,
    },
    /// The teacher is not free at the slot.
    TeacherUnavailable,
}

/// A schedule entry that breaks at least one availability rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Position of the entry in the candidate schedule.
    pub entry_index: usize,
    /// Rules broken by the entry (one or two).
    pub rules: Vec<ViolationType>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of the constraint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrOutcome {
    /// Rule-abiding entries as a percentage of all entries.
    pub csr: f64,
    /// Number of violating entries.
    pub violation_count: usize,
    /// Number of entries evaluated.
    pub total_assignments: usize,
    /// One record per violating entry, in schedule order.
    pub violations: Vec<Violation>,
}

/// Computes the constraint satisfaction rate.
///
/// CSR = (total − violations) / total × 100. An empty schedule yields 0,
/// not 100, so that "nothing scheduled" never reads as a perfect result.
///
/// # Arguments
/// * `schedule` - Candidate schedule.
/// * `student_sections` - Student name → section.
/// * `busy_windows` - Section → busy slots.
/// * `teacher_free_slots` - Teacher name → free slots.
pub fn compute_csr(
    schedule: &[ScheduleEntry],
    student_sections: &HashMap<String, String>,
    busy_windows: &HashMap<String, BTreeSet<SlotId>>,
    teacher_free_slots: &HashMap<String, BTreeSet<SlotId>>,
) -> CsrOutcome {
    let mut violations = Vec::new();

    for (entry_index, entry) in schedule.iter().enumerate() {
        let slot = entry.slot_id.as_ref();
        let mut rules = Vec::new();
        let mut reasons = Vec::new();

        let section = entry
            .student_name
            .as_deref()
            .and_then(|name| student_sections.get(name));
        if let Some(section) = section {
            let busy = busy_windows
                .get(section)
                .is_some_and(|slots| slot.is_some_and(|s| slots.contains(s)));
            if busy {
                reasons.push(format!(
                    "{} ({section}) is busy at {}",
                    entry.student(),
                    display_or_missing(slot.map(SlotId::as_str))
                ));
                rules.push(ViolationType::StudentBusy {
                    section: section.clone(),
                });
            }
        }

        let free_slots = entry
            .teacher_name
            .as_deref()
            .and_then(|name| teacher_free_slots.get(name));
        if let Some(free_slots) = free_slots {
            if !slot.is_some_and(|s| free_slots.contains(s)) {
                reasons.push(format!(
                    "{} is NOT free at {}",
                    entry.teacher(),
                    display_or_missing(slot.map(SlotId::as_str))
                ));
                rules.push(ViolationType::TeacherUnavailable);
            }
        }

        if !rules.is_empty() {
            let message = format!("Constraint Violation: {}", reasons.join("; "));
            warn!(
                entry = entry_index,
                student = entry.student(),
                teacher = entry.teacher(),
                "{message}"
            );
            violations.push(Violation {
                entry_index,
                rules,
                message,
            });
        }
    }

    let total_assignments = schedule.len();
    let violation_count = violations.len();
    let csr = if total_assignments == 0 {
        0.0
    } else {
        ((total_assignments - violation_count) as f64 / total_assignments as f64) * 100.0
    };

    CsrOutcome {
        csr,
        violation_count,
        total_assignments,
        violations,
    }
}
