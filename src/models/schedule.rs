//! Candidate schedule model.
//!
//! A candidate schedule is the untrusted output of an external generator.
//! Nothing about it is assumed: any field may be missing, names may be
//! invented, students may appear more than once, and slot identifiers may
//! arrive as numbers. Entries are kept exactly as received so that every
//! defect can be measured instead of rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SlotId;

/// Wire key for the student name.
pub const STUDENT_KEY: &str = "Student Name";
/// Wire key for the subject.
pub const SUBJECT_KEY: &str = "Subject";
/// Wire key for the teacher name.
pub const TEACHER_KEY: &str = "Teacher Name";
/// Wire key for the slot identifier.
pub const SLOT_KEY: &str = "Slot_ID";

/// One assignment proposed by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Student being scheduled.
    #[serde(rename = "Student Name", default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Subject of the remedial class.
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Teacher taking the class.
    #[serde(rename = "Teacher Name", default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    /// Slot of the class.
    #[serde(rename = "Slot_ID", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<SlotId>,
}

impl ScheduleEntry {
    /// Creates a fully populated entry.
    pub fn new(
        student_name: impl Into<String>,
        subject: impl Into<String>,
        teacher_name: impl Into<String>,
        slot_id: impl Into<SlotId>,
    ) -> Self {
        Self {
            student_name: Some(student_name.into()),
            subject: Some(subject.into()),
            teacher_name: Some(teacher_name.into()),
            slot_id: Some(slot_id.into()),
        }
    }

    /// Builds an entry from an arbitrary JSON value without failing.
    ///
    /// Strings and numbers are accepted for every field; any other shape
    /// (null, arrays, nested objects) leaves the field empty. A value that is
    /// not an object yields an entry with every field empty.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            student_name: obj.get(STUDENT_KEY).and_then(lenient_text),
            subject: obj.get(SUBJECT_KEY).and_then(lenient_text),
            teacher_name: obj.get(TEACHER_KEY).and_then(lenient_text),
            slot_id: obj.get(SLOT_KEY).and_then(lenient_slot),
        }
    }

    /// Student name, or `""` when absent.
    #[inline]
    pub fn student(&self) -> &str {
        self.student_name.as_deref().unwrap_or("")
    }

    /// Teacher name, or `""` when absent.
    #[inline]
    pub fn teacher(&self) -> &str {
        self.teacher_name.as_deref().unwrap_or("")
    }

    /// Whether every field is present.
    pub fn is_complete(&self) -> bool {
        self.student_name.is_some()
            && self.subject.is_some()
            && self.teacher_name.is_some()
            && self.slot_id.is_some()
    }
}

fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_slot(value: &Value) -> Option<SlotId> {
    match value {
        Value::String(s) => Some(SlotId::new(s)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(SlotId::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(SlotId::from(u))
            } else {
                n.as_f64().map(SlotId::from_f64)
            }
        }
        Value::Bool(b) => Some(SlotId::new(b.to_string())),
        _ => None,
    }
}

/// Renders an optional field for log and finding messages.
pub(crate) fn display_or_missing(value: Option<&str>) -> &str {
    value.unwrap_or("<missing>")
}
