//! Roster quality metrics (KPIs).
//!
//! Computes preference and fairness indicators from a finished roster.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Filled slots / total slots |
//! | Desired / Neutral / Undesired Hits | Slots landing in each preference tier |
//! | Desired Rate | Desired hits / filled slots |
//! | Quota Fill Rate | Members at quota / team size |

use std::collections::HashMap;

use crate::models::{Quotas, Roster, ScheduleConfig, SlotKey, Tier};

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    /// Slots held per member.
    pub shifts_by_member: HashMap<String, u32>,
    /// Slots given to a member who desired them.
    pub desired_hits: usize,
    /// Slots given to a member without a preference.
    pub neutral_hits: usize,
    /// Slots given to a member who did not want them.
    pub undesired_hits: usize,
    /// Fraction of filled slots that were desired (0.0..1.0).
    pub desired_rate: f64,
    /// Fraction of members whose count equals their quota (0.0..1.0).
    pub quota_fill_rate: f64,
    /// Fraction of slots filled (0.0..1.0).
    pub fill_rate: f64,
}

impl RosterKpi {
    /// Computes KPIs for a roster.
    ///
    /// # Arguments
    /// * `roster` - The roster to measure.
    /// * `config` - Team preferences and slot dimensions.
    /// * `quotas` - Quotas to compare final counts against.
    pub fn calculate(roster: &Roster, config: &ScheduleConfig, quotas: &Quotas) -> Self {
        let mut desired_hits = 0;
        let mut neutral_hits = 0;
        let mut undesired_hits = 0;

        for (day, shift, member) in roster.assignments() {
            let tier = config
                .member(member)
                .map(|m| m.tier_for(&SlotKey::new(day, shift)))
                .unwrap_or(Tier::Neutral);
            match tier {
                Tier::Desired => desired_hits += 1,
                Tier::Neutral => neutral_hits += 1,
                Tier::Undesired => undesired_hits += 1,
            }
        }

        let shifts_by_member: HashMap<String, u32> = config
            .member_ids()
            .map(|m| (m.to_string(), 0))
            .chain(roster.shift_counts())
            .collect();

        let filled = roster.filled_count();
        let desired_rate = if filled == 0 {
            0.0
        } else {
            desired_hits as f64 / filled as f64
        };

        let at_quota = config
            .member_ids()
            .filter(|m| shifts_by_member.get(*m).copied().unwrap_or(0) == quotas.get(m))
            .count();
        let quota_fill_rate = if config.team.is_empty() {
            1.0
        } else {
            at_quota as f64 / config.team.len() as f64
        };

        let total = config.slot_count();
        let fill_rate = if total == 0 {
            1.0
        } else {
            filled as f64 / total as f64
        };

        Self {
            shifts_by_member,
            desired_hits,
            neutral_hits,
            undesired_hits,
            desired_rate,
            quota_fill_rate,
            fill_rate,
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_undesired: usize, min_quota_fill: f64) -> bool {
        self.undesired_hits <= max_undesired && self.quota_fill_rate >= min_quota_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftType, TeamMember};

    fn config() -> ScheduleConfig {
        ScheduleConfig::new()
            .with_days(["Sunday"])
            .with_member(TeamMember::new("Ana").with_desired("Sunday", ShiftType::Morning))
            .with_member(TeamMember::new("Bob").with_undesired("Sunday", ShiftType::Night))
            .with_sunday_worker("Ana")
    }

    fn full_roster() -> Roster {
        let mut r = Roster::new(&["Sunday"]);
        r.assign(0, ShiftType::Morning, "Ana");
        r.assign(0, ShiftType::Evening, "Ana");
        r.assign(0, ShiftType::Night, "Bob");
        r
    }

    #[test]
    fn test_kpi_basic() {
        let cfg = config();
        let quotas = Quotas::new().with_quota("Ana", 2).with_quota("Bob", 1);
        let kpi = RosterKpi::calculate(&full_roster(), &cfg, &quotas);

        assert_eq!(kpi.desired_hits, 1);
        assert_eq!(kpi.neutral_hits, 1);
        assert_eq!(kpi.undesired_hits, 1);
        assert!((kpi.desired_rate - 1.0 / 3.0).abs() < 1e-10);
        assert!((kpi.quota_fill_rate - 1.0).abs() < 1e-10);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.shifts_by_member["Ana"], 2);
    }

    #[test]
    fn test_kpi_partial_roster() {
        let cfg = config();
        let quotas = Quotas::new().with_quota("Ana", 2).with_quota("Bob", 1);
        let mut r = Roster::new(&["Sunday"]);
        r.assign(0, ShiftType::Morning, "Ana");

        let kpi = RosterKpi::calculate(&r, &cfg, &quotas);
        assert!((kpi.fill_rate - 1.0 / 3.0).abs() < 1e-10);
        assert!((kpi.quota_fill_rate - 0.0).abs() < 1e-10);
        assert_eq!(kpi.shifts_by_member["Bob"], 0);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = RosterKpi::calculate(&Roster::default(), &ScheduleConfig::new(), &Quotas::new());
        assert_eq!(kpi.desired_hits, 0);
        assert!((kpi.desired_rate - 0.0).abs() < 1e-10);
        assert!((kpi.quota_fill_rate - 1.0).abs() < 1e-10);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let cfg = config();
        let quotas = Quotas::new().with_quota("Ana", 2).with_quota("Bob", 1);
        let kpi = RosterKpi::calculate(&full_roster(), &cfg, &quotas);
        assert!(kpi.meets_thresholds(1, 1.0));
        assert!(!kpi.meets_thresholds(0, 1.0));
    }
}
