//! Mutable run state and the commit/uncommit pairing.
//!
//! A run mutates three structures in lockstep: the roster grid, the
//! per-member running count and the per-member history. Every change
//! goes through [`RosterState::commit`], which hands back a [`Commit`]
//! token. The token is not `Clone`, and [`RosterState::uncommit`]
//! consumes it, so a commit can be rolled back at most once and only
//! with the exact inverse mutation.

use std::collections::HashMap;

use crate::models::{Roster, ScheduleConfig, ShiftType};

/// One committed `(day, shift)` in a member's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    /// Index into the configured day sequence.
    pub day_index: usize,
    /// Shift held on that day.
    pub shift: ShiftType,
}

/// Proof of a committed assignment, redeemable by one uncommit.
#[must_use = "a commit must either be kept or passed to `RosterState::uncommit`"]
#[derive(Debug, PartialEq, Eq)]
pub struct Commit {
    member: String,
    day_index: usize,
    shift: ShiftType,
}

impl Commit {
    /// Member that was placed.
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Day index of the placed slot.
    pub fn day_index(&self) -> usize {
        self.day_index
    }

    /// Shift of the placed slot.
    pub fn shift(&self) -> ShiftType {
        self.shift
    }
}

/// Grid, running counts and history of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterState {
    roster: Roster,
    counts: HashMap<String, u32>,
    history: HashMap<String, Vec<HistoryEntry>>,
}

impl RosterState {
    /// Creates an empty state for a configuration: blank grid, zero counts.
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            roster: Roster::new(&config.days),
            counts: config.member_ids().map(|m| (m.to_string(), 0)).collect(),
            history: config
                .member_ids()
                .map(|m| (m.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Places `member` into `(day_index, shift)`.
    ///
    /// Writes the grid cell, increments the running count and appends
    /// a history entry. `day_index` must lie within the roster.
    pub fn commit(&mut self, member: &str, day_index: usize, shift: ShiftType) -> Commit {
        debug_assert!(
            day_index < self.roster.day_count(),
            "day index {day_index} outside a {}-day roster",
            self.roster.day_count()
        );
        self.roster.assign(day_index, shift, member);
        *self.counts.entry(member.to_string()).or_insert(0) += 1;
        self.history
            .entry(member.to_string())
            .or_default()
            .push(HistoryEntry { day_index, shift });

        Commit {
            member: member.to_string(),
            day_index,
            shift,
        }
    }

    /// Reverses a commit: clears the cell, decrements the count and
    /// removes the history entry the commit appended.
    pub fn uncommit(&mut self, commit: Commit) {
        let Commit {
            member,
            day_index,
            shift,
        } = commit;

        self.roster.unassign(day_index, shift);
        if let Some(count) = self.counts.get_mut(&member) {
            *count = count.saturating_sub(1);
        }
        if let Some(entries) = self.history.get_mut(&member) {
            // Rollback is LIFO, so the entry is always the member's last one.
            let popped = entries.pop();
            debug_assert_eq!(popped, Some(HistoryEntry { day_index, shift }));
        }
    }

    /// The grid built so far.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Running count for a member (0 if unknown).
    #[inline]
    pub fn count(&self, member: &str) -> u32 {
        self.counts.get(member).copied().unwrap_or(0)
    }

    /// All running counts.
    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }

    /// History of a member in commit order.
    pub fn history(&self, member: &str) -> &[HistoryEntry] {
        self.history.get(member).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a member holds any shift on `day_index`.
    pub fn works_on(&self, member: &str, day_index: usize) -> bool {
        self.history(member).iter().any(|h| h.day_index == day_index)
    }

    /// Whether a member holds `shift` on `day_index`.
    pub fn holds(&self, member: &str, day_index: usize, shift: ShiftType) -> bool {
        self.history(member)
            .iter()
            .any(|h| h.day_index == day_index && h.shift == shift)
    }

    /// Splits the state into the finished grid and the running counts.
    pub fn into_parts(self) -> (Roster, HashMap<String, u32>) {
        (self.roster, self.counts)
    }
}
