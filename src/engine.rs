//! Evaluation engine.
//!
//! [`Evaluator`] validates reference data once, derives its lookup index,
//! and then measures any number of candidate schedules against it. Each
//! evaluation is a synchronous pure computation: identical inputs always
//! produce an identical [`MetricsReport`].

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::metrics::{
    compute_csr, compute_hallucination_rate, compute_recall, Fabrication, MetricsReport, Verdict,
    Violation,
};
use crate::models::{ReferenceData, ReferenceIndex, ScheduleEntry};
use crate::validation::{advisory_findings, validate_reference};

/// Width of the report banner.
const BANNER_WIDTH: usize = 40;

/// Full result of one evaluation, for debugging and reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The metrics.
    pub report: MetricsReport,
    /// Advisory classification of the metrics.
    pub verdict: Verdict,
    /// Fabricated identifiers, in schedule order.
    pub fabrications: Vec<Fabrication>,
    /// Violating entries, in schedule order.
    pub violations: Vec<Violation>,
}

impl Evaluation {
    /// Wraps the evaluation with a dataset name for display.
    pub fn labeled<'a>(&'a self, label: &'a str) -> LabeledEvaluation<'a> {
        LabeledEvaluation {
            label,
            evaluation: self,
        }
    }

    /// Renders the human-readable evaluation report for a named dataset.
    pub fn render(&self, label: &str) -> String {
        self.labeled(label).to_string()
    }
}

/// An [`Evaluation`] displayed as a bannered report for one dataset.
#[derive(Debug, Clone, Copy)]
pub struct LabeledEvaluation<'a> {
    label: &'a str,
    evaluation: &'a Evaluation,
}

impl fmt::Display for LabeledEvaluation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "      EVALUATION REPORT FOR {}      ", self.label.to_uppercase())?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.evaluation.report)?;
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "RESULT: {}", self.evaluation.verdict)?;
        writeln!(f, "{rule}")
    }
}

/// Measures candidate schedules against validated reference data.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvalConfig,
    reference: ReferenceData,
    index: ReferenceIndex,
}

impl Evaluator {
    /// Creates an evaluator.
    ///
    /// # Errors
    /// [`EvalError::InvalidReference`] if the reference tables fail
    /// validation. Advisory findings are logged and do not fail.
    pub fn new(reference: ReferenceData, config: EvalConfig) -> EvalResult<Self> {
        validate_reference(&reference).map_err(EvalError::InvalidReference)?;
        for finding in advisory_findings(&reference) {
            warn!(kind = ?finding.kind, "{}", finding.message);
        }

        let index = ReferenceIndex::build(&reference);
        debug!(
            students = reference.students.len(),
            teachers = reference.teachers.len(),
            slots = reference.slots.len(),
            busy_windows = reference.busy_windows.len(),
            "reference index built"
        );

        Ok(Self {
            config,
            reference,
            index,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// The reference data in use.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Computes the metrics of a candidate schedule.
    pub fn evaluate(&self, schedule: &[ScheduleEntry]) -> MetricsReport {
        self.evaluate_detailed(schedule).report
    }

    /// Computes the metrics together with every finding behind them.
    pub fn evaluate_detailed(&self, schedule: &[ScheduleEntry]) -> Evaluation {
        info!(entries = schedule.len(), "evaluating candidate schedule");

        let recall = compute_recall(
            &self.reference.students,
            self.config.failing_score_threshold,
            schedule,
        );
        let hallucination = compute_hallucination_rate(
            schedule,
            &self.index.student_names,
            &self.index.teacher_names,
            &self.index.slot_ids,
        );
        let csr = compute_csr(
            schedule,
            &self.index.student_sections,
            &self.index.busy_windows,
            &self.index.teacher_free_slots,
        );

        let report = MetricsReport {
            constraint_satisfaction_rate: csr.csr,
            hallucination_rate: hallucination.rate,
            intent_recall: recall.recall,
            total_assignments: csr.total_assignments,
            total_failing_students: recall.total_failing,
            unique_students_scheduled: recall.unique_scheduled,
            violation_count: csr.violation_count,
            fake_reference_count: hallucination.fabricated_count,
        };
        let verdict = report.verdict(&self.config.verdict);

        info!(
            csr = report.constraint_satisfaction_rate,
            hallucination_rate = report.hallucination_rate,
            intent_recall = report.intent_recall,
            ?verdict,
            "evaluation complete"
        );

        Evaluation {
            report,
            verdict,
            fabrications: hallucination.fabrications,
            violations: csr.violations,
        }
    }
}

/// Validates `reference` and evaluates one schedule against it.
pub fn evaluate(
    reference: ReferenceData,
    schedule: &[ScheduleEntry],
    config: EvalConfig,
) -> EvalResult<MetricsReport> {
    Ok(Evaluator::new(reference, config)?.evaluate(schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FabricationKind, ViolationType};
    use crate::models::{BusyWindow, Slot, Student, Teacher};

    /// Two failing students A (Section X) and B (Section Y), teacher T free
    /// at S1, Section X busy at S2.
    fn reference() -> ReferenceData {
        ReferenceData::new()
            .with_student(Student::new("A", "X", 20.0, "Math"))
            .with_student(Student::new("B", "Y", 35.0, "Math"))
            .with_student(Student::new("C", "Y", 88.0, "Math"))
            .with_teacher(Teacher::new("T", "Math").with_free_slots(["S1", "S2"]))
            .with_slot(Slot::new("S1"))
            .with_slot(Slot::new("S2"))
            .with_busy_window(BusyWindow::new("X").with_busy_slot("S2"))
    }

    fn evaluator() -> Evaluator {
        Evaluator::new(reference(), EvalConfig::default()).unwrap()
    }

    #[test]
    fn test_perfect_schedule() {
        let eval = evaluator().evaluate_detailed(&[
            ScheduleEntry::new("A", "Math", "T", "S1"),
            ScheduleEntry::new("B", "Math", "T", "S1"),
        ]);
        let r = &eval.report;
        assert_eq!(r.intent_recall, 100.0);
        assert_eq!(r.hallucination_rate, 0.0);
        assert_eq!(r.constraint_satisfaction_rate, 100.0);
        assert_eq!(r.total_assignments, 2);
        assert_eq!(r.total_failing_students, 2);
        assert_eq!(r.unique_students_scheduled, 2);
        assert_eq!(eval.verdict, Verdict::Excellent);
        assert!(eval.fabrications.is_empty());
        assert!(eval.violations.is_empty());
    }

    #[test]
    fn test_fabricated_teacher() {
        let eval = evaluator().evaluate_detailed(&[ScheduleEntry::new(
            "A",
            "Math",
            "Ghost Teacher",
            "S1",
        )]);
        assert!((eval.report.hallucination_rate - 100.0 / 3.0).abs() < 1e-10);
        assert_eq!(eval.report.fake_reference_count, 1);
        assert_eq!(eval.report.constraint_satisfaction_rate, 100.0);
        assert_eq!(eval.fabrications[0].kind, FabricationKind::Teacher);
        assert_eq!(eval.verdict, Verdict::Good);
    }

    #[test]
    fn test_busy_section_conflict() {
        let eval = evaluator().evaluate_detailed(&[ScheduleEntry::new("A", "Math", "T", "S2")]);
        assert_eq!(eval.report.constraint_satisfaction_rate, 0.0);
        assert_eq!(eval.report.violation_count, 1);
        assert!(matches!(
            eval.violations[0].rules[0],
            ViolationType::StudentBusy { .. }
        ));
        assert_eq!(eval.verdict, Verdict::Fail);
    }

    #[test]
    fn test_empty_schedule() {
        let r = evaluator().evaluate(&[]);
        assert_eq!(r.constraint_satisfaction_rate, 0.0);
        assert_eq!(r.hallucination_rate, 0.0);
        assert_eq!(r.intent_recall, 0.0);
        assert_eq!(r.total_assignments, 0);
        assert_eq!(r.total_failing_students, 2);
    }

    #[test]
    fn test_idempotent() {
        let e = evaluator();
        let schedule = vec![
            ScheduleEntry::new("A", "Math", "T", "S2"),
            ScheduleEntry::new("Zed", "Math", "T", 9_i64),
            ScheduleEntry::default(),
        ];
        assert_eq!(e.evaluate(&schedule), e.evaluate(&schedule));
    }

    #[test]
    fn test_invalid_reference_rejected() {
        let mut data = reference();
        data.slots.clear();
        let err = Evaluator::new(data, EvalConfig::default()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidReference(_)));
    }

    #[test]
    fn test_threshold_from_config() {
        let config = EvalConfig::default().with_failing_score_threshold(90.0);
        let r = evaluate(reference(), &[ScheduleEntry::new("C", "Math", "T", "S1")], config)
            .unwrap();
        assert_eq!(r.total_failing_students, 3);
        assert!((r.intent_recall - 100.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_render() {
        let eval = evaluator().evaluate_detailed(&[ScheduleEntry::new("A", "Math", "T", "S1")]);
        let text = eval.render("test_data");
        assert!(text.contains("EVALUATION REPORT FOR TEST_DATA"));
        assert!(text.contains("(Students Scheduled: 1/2)"));
        assert!(text.contains("RESULT: GOOD (Minor Tuning Needed)"));
    }

    #[test]
    fn test_labeled_display_matches_render() {
        let eval = evaluator().evaluate_detailed(&[]);
        let text = format!("{}", eval.labeled("empty"));
        assert_eq!(text, eval.render("empty"));
        let rule = "=".repeat(BANNER_WIDTH);
        assert!(text.starts_with(&rule));
        assert!(text.trim_end().ends_with(&rule));
        assert!(text.contains("RESULT: FAIL (Prompt/Model Logic Failed)"));
    }
}
