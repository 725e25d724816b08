//! Roster (assignment grid) model.
//!
//! A roster maps each day to a set of filled shifts, at most one
//! member per `(day, shift)` cell. It is built incrementally by the
//! search and is fully populated when a run succeeds.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::{ShiftType, SlotKey};

/// The assignment grid: day → shift → member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Per-day assignments, in configured day order.
    pub days: Vec<DayRoster>,
}

/// Assignments for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRoster {
    /// Day label.
    pub day: String,
    /// Filled shifts (shift → member id).
    pub shifts: BTreeMap<ShiftType, String>,
}

impl DayRoster {
    fn new(day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            shifts: BTreeMap::new(),
        }
    }
}

impl Roster {
    /// Creates an empty roster over the given day sequence.
    pub fn new<S: AsRef<str>>(days: &[S]) -> Self {
        Self {
            days: days.iter().map(|d| DayRoster::new(d.as_ref())).collect(),
        }
    }

    /// Places `member` into a cell, returning the previous occupant.
    ///
    /// Out-of-range day indices are ignored.
    pub fn assign(
        &mut self,
        day_index: usize,
        shift: ShiftType,
        member: impl Into<String>,
    ) -> Option<String> {
        self.days
            .get_mut(day_index)
            .and_then(|d| d.shifts.insert(shift, member.into()))
    }

    /// Clears a cell, returning its occupant.
    pub fn unassign(&mut self, day_index: usize, shift: ShiftType) -> Option<String> {
        self.days
            .get_mut(day_index)
            .and_then(|d| d.shifts.remove(&shift))
    }

    /// Member in a cell, by day index.
    pub fn member_at(&self, day_index: usize, shift: ShiftType) -> Option<&str> {
        self.days
            .get(day_index)
            .and_then(|d| d.shifts.get(&shift))
            .map(String::as_str)
    }

    /// Member in a cell, by day label.
    pub fn get(&self, day: &str, shift: ShiftType) -> Option<&str> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .and_then(|d| d.shifts.get(&shift))
            .map(String::as_str)
    }

    /// Whether a cell is occupied.
    #[inline]
    pub fn is_filled(&self, day_index: usize, shift: ShiftType) -> bool {
        self.member_at(day_index, shift).is_some()
    }

    /// Number of days in the roster.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.days.iter().map(|d| d.shifts.len()).sum()
    }

    /// Whether every `(day, shift)` cell for the given shift set is occupied.
    pub fn is_complete(&self, shifts: &[ShiftType]) -> bool {
        self.days
            .iter()
            .all(|d| shifts.iter().all(|s| d.shifts.contains_key(s)))
    }

    /// Iterates `(day, shift, member)` in day order, then shift order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, ShiftType, &str)> {
        self.days.iter().flat_map(|d| {
            d.shifts
                .iter()
                .map(move |(s, m)| (d.day.as_str(), *s, m.as_str()))
        })
    }

    /// Slots held by a member, in roster order.
    pub fn slots_for_member(&self, member: &str) -> Vec<SlotKey> {
        self.assignments()
            .filter(|(_, _, m)| *m == member)
            .map(|(d, s, _)| SlotKey::new(d, s))
            .collect()
    }

    /// Number of cells held by each member that appears in the roster.
    pub fn shift_counts(&self) -> HashMap<String, u32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for (_, _, member) in self.assignments() {
            *counts.entry(member.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in &self.days {
            writeln!(f, "{}:", day.day)?;
            for (shift, member) in &day.shifts {
                writeln!(f, "  {shift}: {member}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        let mut r = Roster::new(&["Sunday", "Monday"]);
        r.assign(0, ShiftType::Morning, "Ana");
        r.assign(0, ShiftType::Evening, "Ana");
        r.assign(0, ShiftType::Night, "Bob");
        r.assign(1, ShiftType::Morning, "Bob");
        r
    }

    #[test]
    fn test_assign_and_lookup() {
        let r = sample_roster();
        assert_eq!(r.member_at(0, ShiftType::Night), Some("Bob"));
        assert_eq!(r.get("Monday", ShiftType::Morning), Some("Bob"));
        assert_eq!(r.get("Monday", ShiftType::Night), None);
        assert_eq!(r.get("Friday", ShiftType::Night), None);
        assert_eq!(r.filled_count(), 4);
    }

    #[test]
    fn test_assign_replaces_and_unassign() {
        let mut r = sample_roster();
        assert_eq!(r.assign(1, ShiftType::Morning, "Cid"), Some("Bob".to_string()));
        assert_eq!(r.unassign(1, ShiftType::Morning), Some("Cid".to_string()));
        assert!(!r.is_filled(1, ShiftType::Morning));
        assert_eq!(r.unassign(1, ShiftType::Morning), None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut r = Roster::new(&["Sunday"]);
        assert_eq!(r.assign(5, ShiftType::Night, "Ana"), None);
        assert_eq!(r.filled_count(), 0);
    }

    #[test]
    fn test_is_complete() {
        let mut r = sample_roster();
        assert!(!r.is_complete(&ShiftType::ALL));
        r.assign(1, ShiftType::Evening, "Ana");
        r.assign(1, ShiftType::Night, "Cid");
        assert!(r.is_complete(&ShiftType::ALL));
    }

    #[test]
    fn test_assignments_order() {
        let r = sample_roster();
        let order: Vec<_> = r.assignments().collect();
        assert_eq!(order[0], ("Sunday", ShiftType::Morning, "Ana"));
        assert_eq!(order[2], ("Sunday", ShiftType::Night, "Bob"));
        assert_eq!(order[3], ("Monday", ShiftType::Morning, "Bob"));
    }

    #[test]
    fn test_member_queries() {
        let r = sample_roster();
        let bob = r.slots_for_member("Bob");
        assert_eq!(bob.len(), 2);
        assert_eq!(bob[0].to_string(), "Sunday-Night");

        let counts = r.shift_counts();
        assert_eq!(counts["Ana"], 2);
        assert_eq!(counts["Bob"], 2);
    }

    #[test]
    fn test_display() {
        let r = sample_roster();
        let text = r.to_string();
        assert!(text.starts_with("Sunday:\n  Morning: Ana\n"));
        assert!(text.contains("Monday:\n  Morning: Bob\n"));
    }
}
