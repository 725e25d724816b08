//! Shift rostering for the U-Engine ecosystem.
//!
//! Assigns team members to every `(day, shift)` slot of a week under hard
//! eligibility rules (vacation, availability, one shift per day, night
//! streaks, rest after night, quotas), trying members who want a slot
//! before those who don't, and retrying until every member meets their
//! quota.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ShiftType`, `SlotKey`, `TeamMember`,
//!   `Quotas`, `ScheduleConfig`, `Roster`
//! - **`scheduler`**: Backtracking search: `RosterState`, `ShiftEligibility`,
//!   `TieredPreferences`, `Coordinator`, `SearchEngine`, `RunController`,
//!   `RosterKpi`
//! - **`quota`**: Quota derivation from team availability
//! - **`validation`**: Configuration integrity checks
//! - **`events`**: Observer notification of configure/generate outcomes
//! - **`export`**: CSV and xlsx export of rosters
//! - **`facade`**: `RosterFacade`, the single entry point for applications
//! - **`error`**: `RosterError`
//! - **`logging`**: `tracing` subscriber setup for hosts and tests
//!
//! # Architecture
//!
//! The search core (`scheduler`) depends only on `models` and receives its
//! randomness (`&mut dyn RngCore`) and its progress sink
//! (`&dyn SearchReporter`) from the caller. Validation, quota derivation,
//! events and export wrap around it in the facade.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod error;
pub mod events;
pub mod export;
pub mod facade;
pub mod logging;
pub mod models;
pub mod quota;
pub mod scheduler;
pub mod validation;
