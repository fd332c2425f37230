//! Demand coverage (intent recall).
//!
//! Measures how many of the students who need remediation appear anywhere
//! in the candidate schedule. A student scheduled several times counts once.
//! Scheduling a student who is not failing is not penalized here.

use std::collections::HashSet;

use crate::models::{ScheduleEntry, Student};

/// Result of the demand coverage pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallOutcome {
    /// Covered failing students as a percentage (0..=100).
    pub recall: f64,
    /// Number of students below the failing threshold.
    pub total_failing: usize,
    /// Failing students appearing at least once in the schedule.
    pub unique_scheduled: usize,
}

/// Computes intent recall.
///
/// recall = |scheduled ∩ failing| / |failing| × 100, with 0 when no student
/// is failing.
///
/// # Arguments
/// * `students` - Reference roster.
/// * `failing_score_threshold` - Scores strictly below this are failing.
/// * `schedule` - Candidate schedule.
pub fn compute_recall(
    students: &[Student],
    failing_score_threshold: f64,
    schedule: &[ScheduleEntry],
) -> RecallOutcome {
    let failing: HashSet<&str> = students
        .iter()
        .filter(|s| s.is_failing(failing_score_threshold))
        .map(|s| s.name.as_str())
        .collect();

    let scheduled: HashSet<&str> = schedule
        .iter()
        .filter_map(|e| e.student_name.as_deref())
        .collect();

    let total_failing = failing.len();
    let unique_scheduled = scheduled.intersection(&failing).count();

    let recall = if total_failing == 0 {
        0.0
    } else {
        (unique_scheduled as f64 / total_failing as f64) * 100.0
    };

    RecallOutcome {
        recall,
        total_failing,
        unique_scheduled,
    }
}
