//! Slot model and slot identifier canonicalization.
//!
//! Reference tables store slot identifiers as text, while generated
//! schedules frequently encode the same identifier as a JSON number
//! (`3` instead of `"3"`). Every slot identifier in the crate passes
//! through [`SlotId`], so membership checks compare one canonical
//! string form no matter where the value came from.
//!
//! # Canonical form
//!
//! | Source | Canonical |
//! |--------|-----------|
//! | `" S1 "` | `"S1"` (trimmed) |
//! | `3`, `"3"` | `"3"` |
//! | `3.0`, `"3.0"` | `"3"` (integral values drop the fraction) |
//! | `2.5`, `"2.50"` | `"2.5"` |
//! | `true` | `"true"` |
//!
//! Text that reads as a finite number is canonicalized exactly like the
//! number itself, so the same value gives the same id whether it arrives
//! as a JSON number, a JSON string or a CSV cell.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Largest magnitude at which an `f64` still represents every integer exactly.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// A canonical slot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Creates a slot identifier from text.
    ///
    /// Surrounding whitespace is dropped; numeric text goes through the
    /// same rule as [`SlotId::from_f64`].
    pub fn new(id: impl AsRef<str>) -> Self {
        let text = id.as_ref().trim();
        if let Ok(i) = text.parse::<i64>() {
            return Self::from(i);
        }
        if let Ok(u) = text.parse::<u64>() {
            return Self::from(u);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::from_f64(value),
            _ => Self(text.to_string()),
        }
    }

    /// Creates a slot identifier from a floating point value.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_F64 {
            Self((value as i64).to_string())
        } else {
            Self(value.to_string())
        }
    }

    /// The canonical string form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the canonical form is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for SlotId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for SlotId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<f64> for SlotId {
    fn from(id: f64) -> Self {
        Self::from_f64(id)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSlotId {
            Text(String),
            Int(i64),
            Uint(u64),
            Float(f64),
            Bool(bool),
        }

        Ok(match RawSlotId::deserialize(deserializer)? {
            RawSlotId::Text(s) => SlotId::new(s),
            RawSlotId::Int(i) => SlotId::from(i),
            RawSlotId::Uint(u) => SlotId::from(u),
            RawSlotId::Float(f) => SlotId::from_f64(f),
            RawSlotId::Bool(b) => SlotId(b.to_string()),
        })
    }
}

/// Splits a delimited slot list (`"S1;S2;S3"`) into a set of identifiers.
///
/// Tokens are trimmed and empty tokens are dropped, so an empty or
/// whitespace-only field yields an empty set.
pub fn split_slot_list(raw: &str, delimiter: char) -> BTreeSet<SlotId> {
    raw.split(delimiter)
        .map(SlotId::new)
        .filter(|id| !id.is_empty())
        .collect()
}

/// A schedulable time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique slot identifier.
    pub id: SlotId,
    /// Day label, display only (e.g. "Monday").
    pub day: Option<String>,
    /// Time label, display only (e.g. "09:00-10:00").
    pub time: Option<String>,
}

impl Slot {
    /// Creates a slot with the given identifier.
    pub fn new(id: impl Into<SlotId>) -> Self {
        Self {
            id: id.into(),
            day: None,
            time: None,
        }
    }

    /// Sets the day label.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }

    /// Sets the time label.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}
