//! Student model.
//!
//! A student belongs to one class section and carries the score of the
//! subject they are failing. Students scoring below the configured
//! threshold are the demand a remedial schedule must cover.

use serde::{Deserialize, Serialize};

/// A student from the reference roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student name.
    pub name: String,
    /// Class section (joins against busy windows).
    pub section: String,
    /// Score in the failing subject.
    pub score: f64,
    /// Subject the student needs remediation in.
    pub subject: String,
}

impl Student {
    /// Creates a new student.
    pub fn new(
        name: impl Into<String>,
        section: impl Into<String>,
        score: f64,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            score,
            subject: subject.into(),
        }
    }

    /// Whether the score is strictly below `threshold`.
    #[inline]
    pub fn is_failing(&self, threshold: f64) -> bool {
        self.score < threshold
    }
}
