//! Schedule configuration.
//!
//! The configuration is the full input to a rostering run: the day
//! sequence, the shift sequence, the team with its availability and
//! preference sets, the designated first-day worker and, optionally,
//! precomputed quotas.
//!
//! # Day order
//! The first configured day is treated as "Sunday": its Morning and
//! Evening slots are pre-assigned to the designated Sunday worker.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Quotas, ShiftType, TeamMember};
use crate::error::Result;

/// The seven days of a week starting on Sunday.
pub const WEEK_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

fn default_shifts() -> Vec<ShiftType> {
    ShiftType::ALL.to_vec()
}

/// Input of a rostering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Ordered day labels. The first one is the Sunday.
    pub days: Vec<String>,
    /// Ordered shift types within each day.
    #[serde(default = "default_shifts")]
    pub shifts: Vec<ShiftType>,
    /// Team members. Order is stable and used for iteration.
    pub team: Vec<TeamMember>,
    /// Member who works first-day Morning and Evening.
    pub sunday_worker: String,
    /// Precomputed quotas. Derived by [`crate::quota::compute_quotas`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotas: Option<Quotas>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleConfig {
    /// Creates an empty configuration with the default shift sequence.
    pub fn new() -> Self {
        Self {
            days: Vec::new(),
            shifts: default_shifts(),
            team: Vec::new(),
            sunday_worker: String::new(),
            quotas: None,
        }
    }

    /// Creates a configuration over a Sunday-to-Saturday week.
    pub fn weekly() -> Self {
        Self::new().with_days(WEEK_DAYS)
    }

    /// Sets the day sequence.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the shift sequence.
    pub fn with_shifts(mut self, shifts: Vec<ShiftType>) -> Self {
        self.shifts = shifts;
        self
    }

    /// Adds a team member.
    pub fn with_member(mut self, member: TeamMember) -> Self {
        self.team.push(member);
        self
    }

    /// Sets the Sunday worker.
    pub fn with_sunday_worker(mut self, member: impl Into<String>) -> Self {
        self.sunday_worker = member.into();
        self
    }

    /// Supplies precomputed quotas.
    pub fn with_quotas(mut self, quotas: Quotas) -> Self {
        self.quotas = Some(quotas);
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Looks up a member by id.
    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }

    /// Member ids in team order.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.team.iter().map(|m| m.id.as_str())
    }

    /// Index of a day label.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// The first day (treated as Sunday).
    pub fn first_day(&self) -> Option<&str> {
        self.days.first().map(String::as_str)
    }

    /// Total number of slots (days × shifts).
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.shifts.len()
    }
}
