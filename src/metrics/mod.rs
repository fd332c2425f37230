//! Schedule correctness metrics.
//!
//! Three independent passes over the same inputs, each a pure function of
//! (reference lookups, candidate schedule):
//!
//! - **Demand coverage**: `compute_recall`
//! - **Fabrication detection**: `compute_hallucination_rate`
//! - **Constraint satisfaction**: `compute_csr`
//!
//! No pass reads another's output, so they may run in any order. Each pass
//! emits `tracing` events for the defects it finds; the numbers never depend
//! on them.

mod constraint;
mod hallucination;
mod recall;
mod report;

pub use constraint::{compute_csr, CsrOutcome, Violation, ViolationType};
pub use hallucination::{
    compute_hallucination_rate, Fabrication, FabricationKind, HallucinationOutcome,
    CHECKS_PER_ENTRY,
};
pub use recall::{compute_recall, RecallOutcome};
pub use report::{MetricsReport, Verdict};
