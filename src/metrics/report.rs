//! Metrics report and verdict.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | CSR | Entries breaking no availability rule / entries |
//! | Hallucination Rate | Fabricated identifiers / identifiers checked |
//! | Intent Recall | Failing students scheduled / failing students |
//!
//! All three are percentages in 0..=100 and are 0 when their denominator
//! is 0.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::VerdictThresholds;

/// Correctness metrics of one candidate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Constraint satisfaction rate (%).
    pub constraint_satisfaction_rate: f64,
    /// Hallucination rate (%).
    pub hallucination_rate: f64,
    /// Intent recall (%).
    pub intent_recall: f64,
    /// Number of schedule entries.
    pub total_assignments: usize,
    /// Number of students below the failing threshold.
    pub total_failing_students: usize,
    /// Failing students scheduled at least once.
    pub unique_students_scheduled: usize,
    /// Entries breaking at least one availability rule.
    pub violation_count: usize,
    /// Identifiers absent from the reference tables.
    pub fake_reference_count: usize,
}

/// Advisory classification of a report. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Perfect constraints, no fabrication, high recall.
    Excellent,
    /// Mostly satisfies constraints.
    Good,
    /// Anything else.
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "EXCELLENT (Production Ready)",
            Self::Good => "GOOD (Minor Tuning Needed)",
            Self::Fail => "FAIL (Prompt/Model Logic Failed)",
        })
    }
}

impl MetricsReport {
    /// Entries breaking no availability rule.
    #[inline]
    pub fn valid_assignments(&self) -> usize {
        self.total_assignments.saturating_sub(self.violation_count)
    }

    /// Classifies the report.
    ///
    /// Excellent: CSR = 100, hallucination = 0, recall ≥ `excellent_min_recall`.
    /// Good: CSR ≥ `good_min_csr`. Fail otherwise.
    pub fn verdict(&self, thresholds: &VerdictThresholds) -> Verdict {
        if self.constraint_satisfaction_rate == 100.0
            && self.hallucination_rate == 0.0
            && self.intent_recall >= thresholds.excellent_min_recall
        {
            Verdict::Excellent
        } else if self.constraint_satisfaction_rate >= thresholds.good_min_csr {
            Verdict::Good
        } else {
            Verdict::Fail
        }
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "1. CONSTRAINT SATISFACTION RATE (CSR)")?;
        writeln!(f, "   Score: {:.2}%", self.constraint_satisfaction_rate)?;
        writeln!(
            f,
            "   (Valid Assignments: {}/{})",
            self.valid_assignments(),
            self.total_assignments
        )?;
        writeln!(f)?;
        writeln!(f, "2. HALLUCINATION RATE")?;
        writeln!(f, "   Score: {:.2}%", self.hallucination_rate)?;
        writeln!(f, "   (Fake Data Points: {})", self.fake_reference_count)?;
        writeln!(f)?;
        writeln!(f, "3. INTENT RECALL (Demand Coverage)")?;
        writeln!(f, "   Score: {:.2}%", self.intent_recall)?;
        write!(
            f,
            "   (Students Scheduled: {}/{})",
            self.unique_students_scheduled, self.total_failing_students
        )
    }
}
