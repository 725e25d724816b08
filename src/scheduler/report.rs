//! Progress reporting for runs and searches.
//!
//! The controller and the search engine receive a `&dyn SearchReporter`
//! instead of reaching for a global logger. [`TracingReporter`] forwards
//! to `tracing`; subscriber setup stays with the host application.

use crate::error::Shortfall;
use crate::models::SlotKey;

use super::SearchStats;

/// Phase of a run, following the controller's state machine.
///
/// `Idle → SundayPreassigned → Searching → {Complete, Exhausted}`;
/// a complete search is then either `Accepted` or `Retrying`, and a
/// retry re-enters `SundayPreassigned` from a clean state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Nothing has happened yet.
    Idle,
    /// First-day Morning and Evening have been placed.
    SundayPreassigned,
    /// Depth-first search is running.
    Searching,
    /// Search placed every slot.
    Complete,
    /// Search ran out of candidates.
    Exhausted,
    /// Every member reached their quota.
    Accepted,
    /// Some member fell short; state is discarded and the run restarts.
    Retrying,
}

/// Receives run and search progress.
///
/// All methods default to doing nothing.
pub trait SearchReporter {
    /// The run entered `phase` during `attempt` (1-based).
    fn phase(&self, _attempt: usize, _phase: RunPhase) {}

    /// A member was placed into a slot.
    fn committed(&self, _member: &str, _slot: &SlotKey, _depth: usize) {}

    /// A placement was rolled back.
    fn backtracked(&self, _member: &str, _slot: &SlotKey, _depth: usize) {}

    /// A completed attempt left members below quota.
    fn shortfall(&self, _attempt: usize, _shortfalls: &[Shortfall]) {}

    /// A search finished, successfully or not.
    fn search_finished(&self, _attempt: usize, _solved: bool, _stats: &SearchStats) {}
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl SearchReporter for SilentReporter {}

/// Reporter that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SearchReporter for TracingReporter {
    fn phase(&self, attempt: usize, phase: RunPhase) {
        tracing::debug!(attempt, ?phase, "run phase");
    }

    fn committed(&self, member: &str, slot: &SlotKey, depth: usize) {
        tracing::trace!(member, %slot, depth, "commit");
    }

    fn backtracked(&self, member: &str, slot: &SlotKey, depth: usize) {
        tracing::trace!(member, %slot, depth, "backtrack");
    }

    fn shortfall(&self, attempt: usize, shortfalls: &[Shortfall]) {
        let members: Vec<String> = shortfalls
            .iter()
            .map(|s| format!("{} {}/{}", s.member, s.assigned, s.quota))
            .collect();
        tracing::warn!(attempt, below_quota = ?members, "members below quota, regenerating");
    }

    fn search_finished(&self, attempt: usize, solved: bool, stats: &SearchStats) {
        if solved {
            tracing::info!(
                attempt,
                nodes = stats.nodes,
                backtracks = stats.backtracks,
                "search placed every slot"
            );
        } else {
            tracing::info!(
                attempt,
                nodes = stats.nodes,
                backtracks = stats.backtracks,
                "search exhausted"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;

    #[test]
    fn test_reporters_accept_all_callbacks() {
        crate::logging::init_test();
        let slot = SlotKey::new("Sunday", ShiftType::Night);
        let stats = SearchStats::default();
        let shortfalls = vec![Shortfall {
            member: "Bob".into(),
            assigned: 1,
            quota: 2,
        }];

        let reporters: [&dyn SearchReporter; 2] = [&SilentReporter, &TracingReporter];
        for r in reporters {
            r.phase(1, RunPhase::Searching);
            r.committed("Ana", &slot, 0);
            r.backtracked("Ana", &slot, 0);
            r.shortfall(1, &shortfalls);
            r.search_finished(1, true, &stats);
            r.search_finished(1, false, &stats);
        }
    }
}
