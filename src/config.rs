//! Evaluation configuration.
//!
//! Everything the engine would otherwise read from process-wide state is
//! carried here and handed to [`Evaluator::new`](crate::Evaluator::new).
//!
//! ```toml
//! failing_score_threshold = 40.0
//! slot_delimiter = ";"
//!
//! [verdict]
//! excellent_min_recall = 90.0
//! good_min_csr = 90.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{EvalError, EvalResult};

/// Default failing score threshold (strictly below fails).
pub const DEFAULT_FAILING_SCORE_THRESHOLD: f64 = 40.0;
/// Default separator of slot lists in reference tables.
pub const DEFAULT_SLOT_DELIMITER: char = ';';

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Students scoring strictly below this need remediation.
    pub failing_score_threshold: f64,
    /// Separator of `Slot_IDs` / `Busy_Slot_IDs` lists.
    pub slot_delimiter: char,
    /// Verdict classification thresholds.
    pub verdict: VerdictThresholds,
}

/// Thresholds of the advisory verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerdictThresholds {
    /// Minimum recall (%) for an excellent verdict.
    pub excellent_min_recall: f64,
    /// Minimum CSR (%) for a good verdict.
    pub good_min_csr: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            failing_score_threshold: DEFAULT_FAILING_SCORE_THRESHOLD,
            slot_delimiter: DEFAULT_SLOT_DELIMITER,
            verdict: VerdictThresholds::default(),
        }
    }
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            excellent_min_recall: 90.0,
            good_min_csr: 90.0,
        }
    }
}

impl EvalConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> EvalResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Sets the failing score threshold.
    pub fn with_failing_score_threshold(mut self, threshold: f64) -> Self {
        self.failing_score_threshold = threshold;
        self
    }

    /// Sets the slot list delimiter.
    pub fn with_slot_delimiter(mut self, delimiter: char) -> Self {
        self.slot_delimiter = delimiter;
        self
    }
}
