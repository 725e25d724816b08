//! Team member model.
//!
//! A team member is a worker who can be placed into slots. Each member
//! carries the externally supplied sets that drive eligibility and
//! preference: unavailable slots, desired slots, undesired slots and
//! vacation days. These sets are immutable during a run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ShiftType, SlotKey};

/// Preference tier of a member for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Slot is in the member's desired set.
    Desired,
    /// No stated preference.
    Neutral,
    /// Slot is in the member's undesired set.
    Undesired,
}

/// A team member and their availability and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique member identifier.
    pub id: String,
    /// Slots the member cannot work (hard rule).
    #[serde(default)]
    pub unavailable: HashSet<SlotKey>,
    /// Slots the member would like to work.
    #[serde(default)]
    pub desired: HashSet<SlotKey>,
    /// Slots the member would rather not work.
    #[serde(default)]
    pub undesired: HashSet<SlotKey>,
    /// Days the member is on vacation (hard rule).
    #[serde(default)]
    pub vacation: HashSet<String>,
}

impl TeamMember {
    /// Creates a member with no restrictions or preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unavailable: HashSet::new(),
            desired: HashSet::new(),
            undesired: HashSet::new(),
            vacation: HashSet::new(),
        }
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable(mut self, day: impl Into<String>, shift: ShiftType) -> Self {
        self.unavailable.insert(SlotKey::new(day, shift));
        self
    }

    /// Marks a slot as desired.
    pub fn with_desired(mut self, day: impl Into<String>, shift: ShiftType) -> Self {
        self.desired.insert(SlotKey::new(day, shift));
        self
    }

    /// Marks a slot as undesired.
    pub fn with_undesired(mut self, day: impl Into<String>, shift: ShiftType) -> Self {
        self.undesired.insert(SlotKey::new(day, shift));
        self
    }

    /// Adds a vacation day.
    pub fn with_vacation(mut self, day: impl Into<String>) -> Self {
        self.vacation.insert(day.into());
        self
    }

    /// Whether the member is on vacation on `day`.
    #[inline]
    pub fn is_on_vacation(&self, day: &str) -> bool {
        self.vacation.contains(day)
    }

    /// Whether the member marked `key` as unavailable.
    #[inline]
    pub fn is_unavailable(&self, key: &SlotKey) -> bool {
        self.unavailable.contains(key)
    }

    /// Preference tier for a slot. Desired wins over undesired.
    pub fn tier_for(&self, key: &SlotKey) -> Tier {
        if self.desired.contains(key) {
            Tier::Desired
        } else if self.undesired.contains(key) {
            Tier::Undesired
        } else {
            Tier::Neutral
        }
    }

    /// Number of working days out of `day_count` (days minus vacation).
    pub fn available_days(&self, day_count: usize) -> usize {
        day_count.saturating_sub(self.vacation.len())
    }
}
