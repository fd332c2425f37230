//! Reference tables and their read-only lookup index.
//!
//! [`ReferenceData`] holds the four ground-truth tables as loaded.
//! [`ReferenceIndex`] derives every set and map the metrics need, once,
//! so that entry-by-entry evaluation is pure lookup.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::{BusyWindow, Slot, SlotId, Student, Teacher};

/// The four ground-truth tables a candidate schedule is checked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Student roster.
    pub students: Vec<Student>,
    /// Teachers with their free slots.
    pub teachers: Vec<Teacher>,
    /// Universe of valid slots.
    pub slots: Vec<Slot>,
    /// Section-wide busy windows.
    pub busy_windows: Vec<BusyWindow>,
}

impl ReferenceData {
    /// Creates empty reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a student.
    pub fn with_student(mut self, student: Student) -> Self {
        self.students.push(student);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Adds a busy window.
    pub fn with_busy_window(mut self, window: BusyWindow) -> Self {
        self.busy_windows.push(window);
        self
    }

    /// Students scoring strictly below `threshold`.
    pub fn failing_students(&self, threshold: f64) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(move |s| s.is_failing(threshold))
    }
}

/// Lookup structures derived from [`ReferenceData`].
///
/// Built once per evaluator and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    /// All student names.
    pub student_names: HashSet<String>,
    /// All teacher names.
    pub teacher_names: HashSet<String>,
    /// All slot identifiers.
    pub slot_ids: HashSet<SlotId>,
    /// Student name → section.
    pub student_sections: HashMap<String, String>,
    /// Section → busy slots.
    pub busy_windows: HashMap<String, BTreeSet<SlotId>>,
    /// Teacher name → free slots.
    pub teacher_free_slots: HashMap<String, BTreeSet<SlotId>>,
}

impl ReferenceIndex {
    /// Builds the index. On duplicate keys the last row wins.
    pub fn build(data: &ReferenceData) -> Self {
        let mut index = Self::default();

        for s in &data.students {
            index.student_names.insert(s.name.clone());
            index
                .student_sections
                .insert(s.name.clone(), s.section.clone());
        }

        for t in &data.teachers {
            index.teacher_names.insert(t.name.clone());
            index
                .teacher_free_slots
                .insert(t.name.clone(), t.free_slots.clone());
        }

        index.slot_ids = data.slots.iter().map(|s| s.id.clone()).collect();

        for w in &data.busy_windows {
            index
                .busy_windows
                .insert(w.section.clone(), w.busy_slots.clone());
        }

        index
    }
}
