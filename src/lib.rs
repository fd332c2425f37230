//! Correctness metrics for externally generated remedial class schedules.
//!
//! Given ground-truth reference tables (students, teachers, slots, section
//! busy windows) and a candidate schedule from an untrusted generator, the
//! engine measures how far the schedule can be trusted. It never builds or
//! repairs a schedule.
//!
//! # Modules
//!
//! - **`models`**: Typed reference rows, `SlotId` canonicalization, `ScheduleEntry`
//! - **`validation`**: Reference integrity checks (duplicate keys, empty tables)
//! - **`metrics`**: Intent recall, hallucination rate, constraint satisfaction
//! - **`engine`**: `Evaluator`, combining the metrics into a `MetricsReport`
//! - **`loader`**: CSV reference tables and JSON candidate schedules
//! - **`config`**: `EvalConfig` (failing threshold, slot delimiter, verdict)
//!
//! # Example
//!
//! ```
//! use u_schedule_eval::models::{BusyWindow, ReferenceData, ScheduleEntry, Slot, Student, Teacher};
//! use u_schedule_eval::{EvalConfig, Evaluator};
//!
//! let reference = ReferenceData::new()
//!     .with_student(Student::new("A", "X", 25.0, "Math"))
//!     .with_teacher(Teacher::new("T", "Math").with_free_slot("S1"))
//!     .with_slot(Slot::new("S1"))
//!     .with_busy_window(BusyWindow::new("X").with_busy_slot("S2"));
//!
//! let evaluator = Evaluator::new(reference, EvalConfig::default()).unwrap();
//! let report = evaluator.evaluate(&[ScheduleEntry::new("A", "Math", "T", "S1")]);
//! assert_eq!(report.constraint_satisfaction_rate, 100.0);
//! assert_eq!(report.intent_recall, 100.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod validation;

pub use config::{EvalConfig, VerdictThresholds};
pub use engine::{evaluate, Evaluation, Evaluator, LabeledEvaluation};
pub use error::{EvalError, EvalResult};
pub use metrics::{MetricsReport, Verdict};
