//! Run controller: pre-assignment, search and the fairness retry loop.
//!
//! # Algorithm
//!
//! 1. Check that the Sunday worker can take first-day Morning and Evening.
//!    If not, abort with [`RosterError::InfeasibleInitialAssignment`].
//! 2. Start from a blank state and place the Sunday worker.
//! 3. Search the remaining slots. Exhaustion is final:
//!    [`RosterError::NoSolution`].
//! 4. If every member reached their quota, accept. Otherwise discard the
//!    state and go back to 2, up to `max_attempts` times, then fail with
//!    [`RosterError::FairnessUnreachable`].
//!
//! Retrying only helps because tie-breaks inside a preference tier are
//! random; identical inputs otherwise produce identical searches.

use rand::RngCore;
use serde::Serialize;
use std::collections::HashMap;

use super::{
    Coordinator, RosterState, RunPhase, SearchEngine, SearchReporter, SearchStats,
    ShiftEligibility, TieredPreferences,
};
use crate::error::{Result, RosterError, Shortfall};
use crate::models::{Quotas, Roster, ScheduleConfig, ShiftType, SlotKey};

/// Default cap on fairness retries.
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// First-day shifts held by the Sunday worker.
pub const PREASSIGNED_SHIFTS: [ShiftType; 2] = [ShiftType::Morning, ShiftType::Evening];

/// A completed, accepted roster.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedRoster {
    /// The filled grid.
    pub roster: Roster,
    /// Final running count per member.
    pub counts: HashMap<String, u32>,
    /// Attempts used, including the accepted one.
    pub attempts: usize,
    /// Statistics of the accepted search.
    pub stats: SearchStats,
}

impl GeneratedRoster {
    /// Shifts held by a member.
    pub fn count(&self, member: &str) -> u32 {
        self.counts.get(member).copied().unwrap_or(0)
    }

    /// `(member, shifts)` in team order.
    pub fn distribution(&self, config: &ScheduleConfig) -> Vec<(String, u32)> {
        config
            .member_ids()
            .map(|m| (m.to_string(), self.count(m)))
            .collect()
    }
}

/// Drives one rostering run over a configuration and its quotas.
#[derive(Debug, Clone)]
pub struct RunController<'a> {
    config: &'a ScheduleConfig,
    quotas: &'a Quotas,
    max_attempts: usize,
}

impl<'a> RunController<'a> {
    /// Creates a controller with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(config: &'a ScheduleConfig, quotas: &'a Quotas) -> Self {
        Self {
            config,
            quotas,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the retry cap (at least one attempt is always made).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Retry cap.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates a roster.
    ///
    /// # Errors
    /// - [`RosterError::InfeasibleInitialAssignment`] before any search.
    /// - [`RosterError::NoSolution`] when the search is exhausted.
    /// - [`RosterError::FairnessUnreachable`] after `max_attempts` short rosters.
    pub fn generate(
        &self,
        rng: &mut dyn RngCore,
        reporter: &dyn SearchReporter,
    ) -> Result<GeneratedRoster> {
        reporter.phase(1, RunPhase::Idle);
        self.check_preassignment()?;

        let evaluator = ShiftEligibility::new(self.config, self.quotas);
        let classifier = TieredPreferences::new(&self.config.team);
        let coordinator = Coordinator::builder(&self.config.days)
            .register_evaluator(&evaluator)
            .register_classifier(&classifier)
            .build()?;

        let mut shortfalls = Vec::new();
        for attempt in 1..=self.max_attempts {
            let mut state = RosterState::new(self.config);
            self.preassign(&mut state);
            reporter.phase(attempt, RunPhase::SundayPreassigned);

            let mut engine =
                SearchEngine::new(&coordinator, &self.config.days, &self.config.shifts, reporter);
            let (day, shift) = engine.first_open_slot(&state);
            reporter.phase(attempt, RunPhase::Searching);
            let solved = engine.assign(&mut state, day, shift, rng);
            let stats = engine.stats();
            reporter.search_finished(attempt, solved, &stats);

            if !solved {
                reporter.phase(attempt, RunPhase::Exhausted);
                return Err(RosterError::NoSolution { stats });
            }
            reporter.phase(attempt, RunPhase::Complete);

            shortfalls = self.shortfalls(&state);
            if shortfalls.is_empty() {
                reporter.phase(attempt, RunPhase::Accepted);
                let (roster, counts) = state.into_parts();
                return Ok(GeneratedRoster {
                    roster,
                    counts,
                    attempts: attempt,
                    stats,
                });
            }

            reporter.shortfall(attempt, &shortfalls);
            reporter.phase(attempt, RunPhase::Retrying);
        }

        Err(RosterError::FairnessUnreachable {
            attempts: self.max_attempts,
            shortfalls,
        })
    }

    /// Verifies the Sunday worker can hold both pre-assigned slots.
    fn check_preassignment(&self) -> Result<()> {
        let worker = self.config.sunday_worker.as_str();
        let infeasible = |reason: String| RosterError::InfeasibleInitialAssignment {
            worker: worker.to_string(),
            reason,
        };

        let Some(first_day) = self.config.first_day() else {
            return Err(infeasible("no days are configured".into()));
        };
        let Some(member) = self.config.member(worker) else {
            return Err(infeasible("not a team member".into()));
        };
        for shift in PREASSIGNED_SHIFTS {
            if !self.config.shifts.contains(&shift) {
                return Err(infeasible(format!("shift sequence lacks {shift}")));
            }
            let key = SlotKey::new(first_day, shift);
            if member.is_unavailable(&key) {
                return Err(infeasible(format!("unavailable for {key}")));
            }
        }
        let quota = self.quotas.get(worker);
        if (quota as usize) < PREASSIGNED_SHIFTS.len() {
            return Err(infeasible(format!(
                "quota {quota} is below the {} fixed slots",
                PREASSIGNED_SHIFTS.len()
            )));
        }
        Ok(())
    }

    /// Places the Sunday worker on the first day, bypassing the search.
    fn preassign(&self, state: &mut RosterState) {
        for shift in PREASSIGNED_SHIFTS {
            // Fixed placements are never rolled back; a retry rebuilds the state.
            let _fixed = state.commit(&self.config.sunday_worker, 0, shift);
        }
    }

    fn shortfalls(&self, state: &RosterState) -> Vec<Shortfall> {
        self.config
            .member_ids()
            .filter_map(|member| {
                let assigned = state.count(member);
                let quota = self.quotas.get(member);
                (assigned < quota).then(|| Shortfall {
                    member: member.to_string(),
                    assigned,
                    quota,
                })
            })
            .collect()
    }
}
