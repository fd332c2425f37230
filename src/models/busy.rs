//! Section busy-window model.
//!
//! A busy window lists the slots in which a whole class section is
//! occupied (regular lessons, exams). No student of that section can
//! attend a remedial class in those slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SlotId;

/// Slots in which a section is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyWindow {
    /// Unique section name.
    pub section: String,
    /// Slots in which the section is busy.
    pub busy_slots: BTreeSet<SlotId>,
}

impl BusyWindow {
    /// Creates a busy window with no busy slots.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            busy_slots: BTreeSet::new(),
        }
    }

    /// Adds a busy slot.
    pub fn with_busy_slot(mut self, slot: impl Into<SlotId>) -> Self {
        self.busy_slots.insert(slot.into());
        self
    }

    /// Replaces the busy slot set.
    pub fn with_busy_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SlotId>,
    {
        self.busy_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the section is busy at `slot`.
    #[inline]
    pub fn is_busy_at(&self, slot: &SlotId) -> bool {
        self.busy_slots.contains(slot)
    }
}
