//! Eligibility evaluation.
//!
//! Decides whether a member may take a slot given the current partial
//! roster. The check is read-only and may be repeated freely.
//!
//! # Rules
//!
//! A member is ineligible for `(day, shift)` if any of:
//! 1. they are on vacation that day;
//! 2. the slot is in their unavailable set;
//! 3. they already hold a shift that day;
//! 4. the shift is Night and it would be their fourth consecutive Night;
//! 5. the shift is Morning or Evening and they held Night the day before;
//! 6. their running count has reached their quota.

use std::collections::HashMap;

use super::RosterState;
use crate::models::{Quotas, ScheduleConfig, ShiftType, SlotKey, TeamMember};

/// Longest allowed run of consecutive Night shifts.
pub const MAX_CONSECUTIVE_NIGHTS: usize = 3;

/// Why a member cannot take a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// Member is not part of the team.
    UnknownMember,
    /// Day index is outside the configured days.
    UnknownDay,
    /// Member is on vacation that day.
    OnVacation,
    /// Slot is in the member's unavailable set.
    Unavailable,
    /// Member already holds a shift that day.
    AlreadyBooked,
    /// Would exceed [`MAX_CONSECUTIVE_NIGHTS`].
    NightStreak,
    /// Daytime shift right after a Night.
    RestAfterNight,
    /// Running count has reached the quota.
    QuotaReached,
}

/// Eligibility predicate consulted by the coordinator.
pub trait EligibilityEvaluator {
    /// Whether `member` may take `(day_index, shift)` in `state`.
    fn is_eligible(
        &self,
        state: &RosterState,
        member: &str,
        day_index: usize,
        shift: ShiftType,
    ) -> bool;
}

/// Hard-rule evaluator over a configuration and its quotas.
#[derive(Debug)]
pub struct ShiftEligibility<'a> {
    days: &'a [String],
    members: HashMap<&'a str, &'a TeamMember>,
    quotas: &'a Quotas,
}

impl<'a> ShiftEligibility<'a> {
    /// Creates an evaluator.
    pub fn new(config: &'a ScheduleConfig, quotas: &'a Quotas) -> Self {
        Self {
            days: &config.days,
            members: config.team.iter().map(|m| (m.id.as_str(), m)).collect(),
            quotas,
        }
    }

    /// First rule that blocks the assignment, or `None` if eligible.
    ///
    /// Rules are checked in the order listed in the module docs.
    pub fn ineligibility(
        &self,
        state: &RosterState,
        member: &str,
        day_index: usize,
        shift: ShiftType,
    ) -> Option<Ineligibility> {
        let Some(profile) = self.members.get(member) else {
            return Some(Ineligibility::UnknownMember);
        };
        let Some(day) = self.days.get(day_index) else {
            return Some(Ineligibility::UnknownDay);
        };

        if profile.is_on_vacation(day) {
            return Some(Ineligibility::OnVacation);
        }
        if profile.is_unavailable(&SlotKey::new(day.as_str(), shift)) {
            return Some(Ineligibility::Unavailable);
        }
        if state.works_on(member, day_index) {
            return Some(Ineligibility::AlreadyBooked);
        }
        if shift.is_night()
            && Self::night_streak_before(state, member, day_index) >= MAX_CONSECUTIVE_NIGHTS
        {
            return Some(Ineligibility::NightStreak);
        }
        if shift.is_daytime()
            && day_index > 0
            && state.holds(member, day_index - 1, ShiftType::Night)
        {
            return Some(Ineligibility::RestAfterNight);
        }
        if state.count(member) >= self.quotas.get(member) {
            return Some(Ineligibility::QuotaReached);
        }
        None
    }

    /// Consecutive Night shifts ending on the day before `day_index`.
    ///
    /// The walk stops at [`MAX_CONSECUTIVE_NIGHTS`]; longer runs are not
    /// distinguished.
    fn night_streak_before(state: &RosterState, member: &str, day_index: usize) -> usize {
        (0..day_index)
            .rev()
            .take(MAX_CONSECUTIVE_NIGHTS)
            .take_while(|&d| state.holds(member, d, ShiftType::Night))
            .count()
    }
}

impl EligibilityEvaluator for ShiftEligibility<'_> {
    fn is_eligible(
        &self,
        state: &RosterState,
        member: &str,
        day_index: usize,
        shift: ShiftType,
    ) -> bool {
        self.ineligibility(state, member, day_index, shift).is_none()
    }
}
