//! Backtracking roster search.
//!
//! Fills a week of `(day, shift)` slots with team members under hard
//! eligibility rules, trying preferred members first.
//!
//! # Components
//!
//! - [`ShiftEligibility`]: hard rules (vacation, availability, one shift
//!   per day, night streaks, rest after night, quota).
//! - [`TieredPreferences`]: splits eligible members into desired /
//!   neutral / undesired tiers.
//! - [`Coordinator`]: the only surface the search talks to.
//! - [`SearchEngine`]: depth-first search with exact rollback.
//! - [`RunController`]: first-day pre-assignment and the bounded
//!   fairness retry loop.
//! - [`RosterKpi`]: quality metrics of a finished roster.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod controller;
mod coordinator;
mod eligibility;
mod kpi;
mod preference;
mod report;
mod search;
mod state;

pub use controller::{GeneratedRoster, RunController, DEFAULT_MAX_ATTEMPTS, PREASSIGNED_SHIFTS};
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use eligibility::{
    EligibilityEvaluator, Ineligibility, ShiftEligibility, MAX_CONSECUTIVE_NIGHTS,
};
pub use kpi::RosterKpi;
pub use preference::{PreferenceClassifier, PreferenceTiers, TieredPreferences};
pub use report::{RunPhase, SearchReporter, SilentReporter, TracingReporter};
pub use search::{SearchEngine, SearchStats};
pub use state::{Commit, HistoryEntry, RosterState};
