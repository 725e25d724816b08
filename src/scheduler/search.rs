//! Depth-first backtracking search over the slot sequence.
//!
//! # Algorithm
//!
//! Slots are visited in a fixed order: shift types within a day, days in
//! sequence. For each open slot:
//! 1. Ask the coordinator for the eligible members, tiered by preference.
//! 2. Try candidates desired → neutral → undesired.
//! 3. Commit the candidate and recurse into the next slot.
//! 4. If the recursion fails, uncommit and try the next candidate.
//!
//! A subtree that fails leaves the state exactly as it found it: every
//! commit is paired with one uncommit on the failing path.
//!
//! Cells that are already filled (the first-day pre-assignment) are
//! skipped without consulting the coordinator.
//!
//! # Complexity
//! Worst case exponential in the number of open slots; recursion depth
//! is at most `days × shifts`.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6.3

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{Coordinator, RosterState, SearchReporter};
use crate::models::{ShiftType, SlotKey};

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidates committed.
    pub nodes: u64,
    /// Commits rolled back.
    pub backtracks: u64,
    /// Deepest placement reached (number of placements on the path).
    pub max_depth: usize,
}

/// Backtracking assignment engine.
pub struct SearchEngine<'c, 'a> {
    coordinator: &'c Coordinator<'a>,
    days: &'a [String],
    shifts: &'a [ShiftType],
    reporter: &'c dyn SearchReporter,
    stats: SearchStats,
}

impl<'c, 'a> SearchEngine<'c, 'a> {
    /// Creates an engine over a day and shift sequence.
    pub fn new(
        coordinator: &'c Coordinator<'a>,
        days: &'a [String],
        shifts: &'a [ShiftType],
        reporter: &'c dyn SearchReporter,
    ) -> Self {
        Self {
            coordinator,
            days,
            shifts,
            reporter,
            stats: SearchStats::default(),
        }
    }

    /// Statistics accumulated since construction.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Fills every open slot from `(day_index, shift_index)` onward.
    ///
    /// Returns `true` once the last day is passed with all slots filled.
    /// On `false`, `state` is identical to what it was on entry. A
    /// `shift_index` outside the shift sequence returns `false`.
    pub fn assign(
        &mut self,
        state: &mut RosterState,
        day_index: usize,
        shift_index: usize,
        rng: &mut dyn RngCore,
    ) -> bool {
        if self.shifts.is_empty() {
            return true;
        }
        if shift_index >= self.shifts.len() {
            return false;
        }
        self.place(state, day_index, shift_index, 0, rng)
    }

    /// Position of the first unfilled slot, or `(days, 0)` if none.
    pub fn first_open_slot(&self, state: &RosterState) -> (usize, usize) {
        if self.shifts.is_empty() {
            return (self.days.len(), 0);
        }
        let (mut day, mut shift) = (0, 0);
        while day < self.days.len() && state.roster().is_filled(day, self.shifts[shift]) {
            (day, shift) = self.advance(day, shift);
        }
        (day, shift)
    }

    fn place(
        &mut self,
        state: &mut RosterState,
        day_index: usize,
        shift_index: usize,
        depth: usize,
        rng: &mut dyn RngCore,
    ) -> bool {
        if day_index >= self.days.len() {
            return true;
        }

        let shift = self.shifts[shift_index];
        let (next_day, next_shift) = self.advance(day_index, shift_index);

        if state.roster().is_filled(day_index, shift) {
            return self.place(state, next_day, next_shift, depth, rng);
        }

        let tiers = self
            .coordinator
            .members_by_preference(state, day_index, shift, rng);
        if tiers.is_empty() {
            return false;
        }

        let key = SlotKey::new(self.days[day_index].as_str(), shift);
        for member in tiers.into_ordered() {
            let commit = state.commit(&member, day_index, shift);
            self.stats.nodes += 1;
            self.stats.max_depth = self.stats.max_depth.max(depth + 1);
            self.reporter.committed(&member, &key, depth);

            if self.place(state, next_day, next_shift, depth + 1, rng) {
                return true;
            }

            state.uncommit(commit);
            self.stats.backtracks += 1;
            self.reporter.backtracked(&member, &key, depth);
        }

        false
    }

    /// Next slot: shift index wraps, and the day advances on wrap.
    #[inline]
    fn advance(&self, day_index: usize, shift_index: usize) -> (usize, usize) {
        let next_shift = (shift_index + 1) % self.shifts.len();
        let next_day = if next_shift == 0 { day_index + 1 } else { day_index };
        (next_day, next_shift)
    }
}
