//! Fabrication detection (hallucination rate).
//!
//! Every entry carries three identifiers (student, teacher, slot). Each one
//! is checked for existence in the reference universe on its own; a failed
//! check never skips the others. Whether the combination makes sense is
//! left to the constraint pass.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use crate::models::{display_or_missing, ScheduleEntry, SlotId};

/// Identifier checks performed per entry.
pub const CHECKS_PER_ENTRY: usize = 3;

/// Which identifier of an entry was fabricated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FabricationKind {
    /// Student name not in the roster.
    Student,
    /// Teacher name not in the teacher table.
    Teacher,
    /// Slot id not in the slot table.
    Slot,
}

impl fmt::Display for FabricationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "Student",
            Self::Teacher => "Teacher",
            Self::Slot => "Slot ID",
        })
    }
}

/// An identifier that does not exist in the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fabrication {
    /// Position of the entry in the candidate schedule.
    pub entry_index: usize,
    /// Which identifier failed.
    pub kind: FabricationKind,
    /// The offending value, `None` when the field was missing.
    pub value: Option<String>,
}

impl fmt::Display for Fabrication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hallucination Found: Unknown {} '{}'",
            self.kind,
            display_or_missing(self.value.as_deref())
        )
    }
}

/// Result of the fabrication pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HallucinationOutcome {
    /// Fabricated identifiers as a percentage of identifiers checked.
    pub rate: f64,
    /// Number of fabricated identifiers.
    pub fabricated_count: usize,
    /// Number of identifiers checked (3 per entry).
    pub checked_count: usize,
    /// One record per fabricated identifier, in schedule order.
    pub fabrications: Vec<Fabrication>,
}

/// Computes the hallucination rate.
///
/// rate = fabricated / checked × 100, with 0 for an empty schedule.
/// Missing fields count as fabricated.
///
/// # Arguments
/// * `schedule` - Candidate schedule.
/// * `valid_students` - All reference student names.
/// * `valid_teachers` - All reference teacher names.
/// * `valid_slots` - All canonical reference slot ids.
pub fn compute_hallucination_rate(
    schedule: &[ScheduleEntry],
    valid_students: &HashSet<String>,
    valid_teachers: &HashSet<String>,
    valid_slots: &HashSet<SlotId>,
) -> HallucinationOutcome {
    let mut fabrications = Vec::new();
    let mut checked_count = 0;

    for (entry_index, entry) in schedule.iter().enumerate() {
        checked_count += CHECKS_PER_ENTRY;

        let student = entry.student_name.as_deref();
        if !student.is_some_and(|name| valid_students.contains(name)) {
            fabrications.push(Fabrication {
                entry_index,
                kind: FabricationKind::Student,
                value: student.map(str::to_string),
            });
        }

        let teacher = entry.teacher_name.as_deref();
        if !teacher.is_some_and(|name| valid_teachers.contains(name)) {
            fabrications.push(Fabrication {
                entry_index,
                kind: FabricationKind::Teacher,
                value: teacher.map(str::to_string),
            });
        }

        let slot = entry.slot_id.as_ref();
        if !slot.is_some_and(|id| valid_slots.contains(id)) {
            fabrications.push(Fabrication {
                entry_index,
                kind: FabricationKind::Slot,
                value: slot.map(|id| id.as_str().to_string()),
            });
        }
    }

    for f in &fabrications {
        warn!(entry = f.entry_index, kind = %f.kind, "{f}");
    }

    let fabricated_count = fabrications.len();
    let rate = if checked_count == 0 {
        0.0
    } else {
        (fabricated_count as f64 / checked_count as f64) * 100.0
    };

    HallucinationOutcome {
        rate,
        fabricated_count,
        checked_count,
        fabrications,
    }
}
