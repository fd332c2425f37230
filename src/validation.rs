//! Reference data validation.
//!
//! Checks structural integrity of the four reference tables before any
//! candidate schedule is measured against them. Metrics computed on broken
//! reference data would be misleading, so these checks fail loudly.
//!
//! Fatal problems ([`validate_reference`]):
//! - Duplicate keys (student name, teacher name, slot id, busy section)
//! - Empty key fields
//! - Empty student, teacher, or slot tables
//! - Non-finite scores
//!
//! Advisory findings ([`advisory_findings`]) never block evaluation:
//! - Busy windows for sections with no students
//! - Teacher free slots or busy slots outside the slot table

use std::collections::HashSet;
use std::fmt;

use crate::models::{ReferenceData, SlotId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rows share the same key.
    DuplicateKey,
    /// A key field is empty.
    EmptyField,
    /// A required table has no rows.
    EmptyTable,
    /// A score is NaN or infinite.
    InvalidScore,
    /// A busy window names a section no student belongs to (advisory).
    UnknownSection,
    /// A free or busy slot is missing from the slot table (advisory).
    UnknownSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates reference tables.
///
/// Checks:
/// 1. Students, teachers and slots tables are non-empty
/// 2. No duplicate student names, teacher names, slot ids, busy sections
/// 3. Student name/section, teacher name, slot id and busy section are non-empty
/// 4. Every score is finite
///
/// An empty busy table is allowed: a school may have no section-wide
/// busy periods.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_reference(data: &ReferenceData) -> ValidationResult {
    let mut errors = Vec::new();

    for (table, len) in [
        ("students", data.students.len()),
        ("teachers", data.teachers.len()),
        ("slots", data.slots.len()),
    ] {
        if len == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTable,
                format!("The {table} table has no rows"),
            ));
        }
    }

    let mut student_names = HashSet::new();
    for (row, s) in data.students.iter().enumerate() {
        if s.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!("Student row {row} has an empty name"),
            ));
        } else if !student_names.insert(s.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate student name: {}", s.name),
            ));
        }
        if s.section.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!("Student '{}' has an empty section", s.name),
            ));
        }
        if !s.score.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidScore,
                format!("Student '{}' has a non-finite score", s.name),
            ));
        }
    }

    let mut teacher_names = HashSet::new();
    for (row, t) in data.teachers.iter().enumerate() {
        if t.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!("Teacher row {row} has an empty name"),
            ));
        } else if !teacher_names.insert(t.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate teacher name: {}", t.name),
            ));
        }
    }

    let mut slot_ids = HashSet::new();
    for (row, slot) in data.slots.iter().enumerate() {
        if slot.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!("Slot row {row} has an empty id"),
            ));
        } else if !slot_ids.insert(&slot.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate slot id: {}", slot.id),
            ));
        }
    }

    let mut sections = HashSet::new();
    for (row, w) in data.busy_windows.iter().enumerate() {
        if w.section.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!("Busy row {row} has an empty section"),
            ));
        } else if !sections.insert(w.section.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate busy section: {}", w.section),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects non-fatal inconsistencies between reference tables.
pub fn advisory_findings(data: &ReferenceData) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let student_sections: HashSet<&str> =
        data.students.iter().map(|s| s.section.as_str()).collect();
    let slot_ids: HashSet<&SlotId> = data.slots.iter().map(|s| &s.id).collect();

    for w in &data.busy_windows {
        if !student_sections.contains(w.section.as_str()) {
            findings.push(ValidationError::new(
                ValidationErrorKind::UnknownSection,
                format!("Busy window for section '{}' matches no student", w.section),
            ));
        }
        for slot in w.busy_slots.iter().filter(|s| !slot_ids.contains(s)) {
            findings.push(ValidationError::new(
                ValidationErrorKind::UnknownSlot,
                format!("Section '{}' is busy at unknown slot '{slot}'", w.section),
            ));
        }
    }

    for t in &data.teachers {
        for slot in t.free_slots.iter().filter(|s| !slot_ids.contains(s)) {
            findings.push(ValidationError::new(
                ValidationErrorKind::UnknownSlot,
                format!("Teacher '{}' is free at unknown slot '{slot}'", t.name),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusyWindow, Slot, Student, Teacher};

    fn sample_reference() -> ReferenceData {
        ReferenceData::new()
            .with_student(Student::new("Asha", "10A", 32.0, "Math"))
            .with_student(Student::new("Ben", "10B", 55.0, "Physics"))
            .with_teacher(Teacher::new("Mr. Rao", "Math").with_free_slots(["S1", "S2"]))
            .with_slot(Slot::new("S1"))
            .with_slot(Slot::new("S2"))
            .with_busy_window(BusyWindow::new("10A").with_busy_slot("S2"))
    }

    #[test]
    fn test_valid_reference() {
        assert!(validate_reference(&sample_reference()).is_ok());
        assert!(advisory_findings(&sample_reference()).is_empty());
    }

    #[test]
    fn test_empty_busy_table_is_valid() {
        let mut data = sample_reference();
        data.busy_windows.clear();
        assert!(validate_reference(&data).is_ok());
    }

    #[test]
    fn test_empty_tables() {
        let errors = validate_reference(&ReferenceData::new()).unwrap_err();
        let empty = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::EmptyTable)
            .count();
        assert_eq!(empty, 3);
    }

    #[test]
    fn test_duplicate_student() {
        let data = sample_reference().with_student(Student::new("Asha", "10C", 20.0, "Math"));
        let errors = validate_reference(&data).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateKey && e.message.contains("student")));
    }

    #[test]
    fn test_duplicate_slot_after_canonicalization() {
        let data = sample_reference()
            .with_slot(Slot::new(7_i64))
            .with_slot(Slot::new(" 7 "));
        let errors = validate_reference(&data).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateKey && e.message.contains("slot")));
    }

    #[test]
    fn test_duplicate_teacher_and_section() {
        let data = sample_reference()
            .with_teacher(Teacher::new("Mr. Rao", "Physics"))
            .with_busy_window(BusyWindow::new("10A"));
        let errors = validate_reference(&data).unwrap_err();
        let dups = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateKey)
            .count();
        assert_eq!(dups, 2);
    }

    #[test]
    fn test_empty_fields() {
        let data = sample_reference()
            .with_student(Student::new("", "10A", 10.0, "Math"))
            .with_student(Student::new("Cleo", " ", 10.0, "Math"))
            .with_teacher(Teacher::new("", "Math"))
            .with_slot(Slot::new(""))
            .with_busy_window(BusyWindow::new(""));
        let errors = validate_reference(&data).unwrap_err();
        let empty = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::EmptyField)
            .count();
        assert_eq!(empty, 5);
    }

    #[test]
    fn test_invalid_score() {
        let data = sample_reference().with_student(Student::new("Dev", "10A", f64::NAN, "Math"));
        let errors = validate_reference(&data).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidScore));
    }

    #[test]
    fn test_multiple_errors() {
        let data = ReferenceData::new()
            .with_student(Student::new("Asha", "10A", 32.0, "Math"))
            .with_student(Student::new("Asha", "10A", 32.0, "Math"));
        let errors = validate_reference(&data).unwrap_err();
        // duplicate student + empty teachers + empty slots
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_advisory_unknown_section_and_slots() {
        let data = sample_reference()
            .with_busy_window(BusyWindow::new("12Z").with_busy_slot("S9"))
            .with_teacher(Teacher::new("Ms. Iyer", "Physics").with_free_slot("S8"));
        let findings = advisory_findings(&data);
        assert!(findings
            .iter()
            .any(|f| f.kind == ValidationErrorKind::UnknownSection && f.message.contains("12Z")));
        let unknown_slots = findings
            .iter()
            .filter(|f| f.kind == ValidationErrorKind::UnknownSlot)
            .count();
        assert_eq!(unknown_slots, 2);
        // advisory findings never make the reference invalid
        assert!(validate_reference(&data).is_ok());
    }

    #[test]
    fn test_display() {
        let e = ValidationError::new(ValidationErrorKind::EmptyTable, "The slots table has no rows");
        assert_eq!(e.to_string(), "EmptyTable: The slots table has no rows");
    }
}
