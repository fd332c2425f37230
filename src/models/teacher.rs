//! Teacher model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SlotId;

/// A teacher and the slots in which they are free to take a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher name.
    pub name: String,
    /// Subject taught.
    pub subject: String,
    /// Slots in which the teacher is available. Empty = never available.
    pub free_slots: BTreeSet<SlotId>,
}

impl Teacher {
    /// Creates a teacher with no free slots.
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            free_slots: BTreeSet::new(),
        }
    }

    /// Adds a free slot.
    pub fn with_free_slot(mut self, slot: impl Into<SlotId>) -> Self {
        self.free_slots.insert(slot.into());
        self
    }

    /// Replaces the free slot set.
    pub fn with_free_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SlotId>,
    {
        self.free_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the teacher is free at `slot`.
    #[inline]
    pub fn is_free_at(&self, slot: &SlotId) -> bool {
        self.free_slots.contains(slot)
    }
}
