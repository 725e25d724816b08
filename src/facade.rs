//! Single entry point for configuring and generating rosters.
//!
//! [`RosterFacade`] validates a configuration, derives quotas when none
//! are given, runs the [`RunController`] and publishes every outcome on
//! its [`EventBus`].
//!
//! # Example
//! ```no_run
//! use u_roster::facade::{RosterFacade, RunOptions};
//! use u_roster::models::{ScheduleConfig, TeamMember};
//!
//! let config = ScheduleConfig::weekly()
//!     .with_member(TeamMember::new("Ana"))
//!     .with_member(TeamMember::new("Bob"))
//!     .with_member(TeamMember::new("Cid"))
//!     .with_sunday_worker("Ana");
//!
//! let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(7));
//! facade.configure(config)?;
//! let generated = facade.generate()?;
//! println!("{}", generated.roster);
//! # Ok::<(), u_roster::error::RosterError>(())
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Result, RosterError};
use crate::events::{EventBus, ScheduleEvent, ScheduleObserver};
use crate::models::{Quotas, ScheduleConfig};
use crate::quota::compute_quotas;
use crate::scheduler::{
    GeneratedRoster, RosterKpi, RunController, TracingReporter, DEFAULT_MAX_ATTEMPTS,
};
use crate::validation::validate_config;

/// Run-level knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Cap on fairness retries.
    pub max_attempts: usize,
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl RunOptions {
    /// Sets the retry cap.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configures, validates and generates rosters.
#[derive(Debug)]
pub struct RosterFacade {
    options: RunOptions,
    rng: StdRng,
    config: Option<ScheduleConfig>,
    quotas: Option<Quotas>,
    bus: EventBus,
}

impl Default for RosterFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterFacade {
    /// Creates a facade with default options.
    pub fn new() -> Self {
        Self::with_options(RunOptions::default())
    }

    /// Creates a facade with the given options.
    pub fn with_options(options: RunOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            options,
            rng,
            config: None,
            quotas: None,
            bus: EventBus::new(),
        }
    }

    /// Adds an observer for schedule events.
    pub fn subscribe(&mut self, observer: Box<dyn ScheduleObserver>) {
        self.bus.subscribe(observer);
    }

    /// Validates and stores a configuration.
    ///
    /// Quotas are derived when the configuration carries none. A rejected
    /// configuration leaves any previously accepted one in place.
    ///
    /// # Errors
    /// [`RosterError::Validation`] with every problem found.
    pub fn configure(&mut self, config: ScheduleConfig) -> Result<()> {
        if let Err(errors) = validate_config(&config) {
            let err = RosterError::Validation(errors);
            tracing::error!(error = %err, "configuration rejected");
            self.bus.notify(&ScheduleEvent::Failed(&err));
            return Err(err);
        }

        let quotas = match &config.quotas {
            Some(quotas) => quotas.clone(),
            None => compute_quotas(&config, &mut self.rng),
        };
        tracing::info!(
            days = config.days.len(),
            members = config.team.len(),
            quota_total = quotas.total(),
            "schedule configured"
        );

        self.quotas = Some(quotas);
        let config = self.config.insert(config);
        self.bus.notify(&ScheduleEvent::Configured(config));
        Ok(())
    }

    /// Generates a roster from the stored configuration.
    ///
    /// # Errors
    /// - [`RosterError::NotConfigured`] before a successful [`configure`](Self::configure).
    /// - Any error of [`RunController::generate`].
    pub fn generate(&mut self) -> Result<GeneratedRoster> {
        let (Some(config), Some(quotas)) = (&self.config, &self.quotas) else {
            let err = RosterError::NotConfigured;
            tracing::error!(error = %err, "generate called before configure");
            self.bus.notify(&ScheduleEvent::Failed(&err));
            return Err(err);
        };

        let controller =
            RunController::new(config, quotas).with_max_attempts(self.options.max_attempts);
        match controller.generate(&mut self.rng, &TracingReporter) {
            Ok(generated) => {
                tracing::info!(
                    attempts = generated.attempts,
                    nodes = generated.stats.nodes,
                    "roster generated"
                );
                self.bus.notify(&ScheduleEvent::Generated(&generated));
                Ok(generated)
            }
            Err(err) => {
                tracing::error!(error = %err, "roster generation failed");
                self.bus.notify(&ScheduleEvent::Failed(&err));
                Err(err)
            }
        }
    }

    /// Quality metrics of a generated roster against the stored quotas.
    pub fn kpi(&self, generated: &GeneratedRoster) -> Option<RosterKpi> {
        let config = self.config.as_ref()?;
        let quotas = self.quotas.as_ref()?;
        Some(RosterKpi::calculate(&generated.roster, config, quotas))
    }

    /// The accepted configuration.
    pub fn config(&self) -> Option<&ScheduleConfig> {
        self.config.as_ref()
    }

    /// Quotas in effect for the accepted configuration.
    pub fn quotas(&self) -> Option<&Quotas> {
        self.quotas.as_ref()
    }

    /// Run options.
    pub fn options(&self) -> RunOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Roster, ShiftType, SlotKey, TeamMember};
    use crate::scheduler::{MAX_CONSECUTIVE_NIGHTS, PREASSIGNED_SHIFTS};
    use crate::validation::ValidationErrorKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    struct Names(Rc<RefCell<Vec<&'static str>>>);

    impl ScheduleObserver for Names {
        fn on_event(&self, event: &ScheduleEvent<'_>) {
            self.0.borrow_mut().push(event.name());
        }
    }

    /// Seven members over a seven-day week: three slots each.
    fn week_config() -> ScheduleConfig {
        ScheduleConfig::weekly()
            .with_member(TeamMember::new("Ana").with_desired("Sunday", ShiftType::Night))
            .with_member(TeamMember::new("Bob").with_unavailable("Sunday", ShiftType::Night))
            .with_member(TeamMember::new("Cid").with_vacation("Wednesday"))
            .with_member(TeamMember::new("Dee").with_undesired("Friday", ShiftType::Morning))
            .with_member(TeamMember::new("Eve"))
            .with_member(TeamMember::new("Fay").with_desired("Saturday", ShiftType::Evening))
            .with_member(TeamMember::new("Gus"))
            .with_sunday_worker("Eve")
    }

    /// Checks every hard rule a generated roster must satisfy.
    fn assert_roster_invariants(cfg: &ScheduleConfig, quotas: &Quotas, roster: &Roster) {
        assert!(roster.is_complete(&cfg.shifts), "roster has empty slots");

        let first = cfg.first_day().unwrap();
        for shift in PREASSIGNED_SHIFTS {
            assert_eq!(roster.get(first, shift), Some(cfg.sunday_worker.as_str()));
        }

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for (day_index, day) in roster.days.iter().enumerate() {
            let mut seen = std::collections::HashSet::new();
            // The first day's fixed pair counts as the Sunday worker's one booking.
            if day_index == 0 {
                seen.insert(cfg.sunday_worker.as_str());
            }
            for (&shift, member) in &day.shifts {
                let m = cfg.member(member).unwrap();
                let key = SlotKey::new(day.day.as_str(), shift);
                assert!(!m.is_on_vacation(&day.day), "{member} works on vacation");
                assert!(!m.is_unavailable(&key), "{member} works unavailable {key}");
                if day_index == 0 && PREASSIGNED_SHIFTS.contains(&shift) {
                    assert_eq!(member, &cfg.sunday_worker);
                } else {
                    assert!(seen.insert(member.as_str()), "{member} twice on {}", day.day);
                }
                *counts.entry(member.as_str()).or_insert(0) += 1;

                if day_index > 0 && shift.is_daytime() {
                    let prev = &roster.days[day_index - 1];
                    assert_ne!(
                        prev.shifts.get(&ShiftType::Night),
                        Some(member),
                        "{member} works {key} after a night"
                    );
                }
            }
        }

        for m in cfg.member_ids() {
            assert_eq!(counts.get(m).copied().unwrap_or(0), quotas.get(m), "{m} off quota");

            let mut streak = 0;
            for day in &roster.days {
                if day.shifts.get(&ShiftType::Night).map(String::as_str) == Some(m) {
                    streak += 1;
                    assert!(streak <= MAX_CONSECUTIVE_NIGHTS, "{m} night streak too long");
                } else {
                    streak = 0;
                }
            }
        }
    }

    #[test]
    fn test_generated_rosters_satisfy_all_rules() {
        crate::logging::init_test();
        for seed in 0..5 {
            let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(seed));
            facade.configure(week_config()).unwrap();
            let out = facade.generate().unwrap();

            let cfg = facade.config().unwrap();
            let quotas = facade.quotas().unwrap();
            assert_eq!(quotas.total(), 21);
            assert_roster_invariants(cfg, quotas, &out.roster);

            let kpi = facade.kpi(&out).unwrap();
            assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
            assert!((kpi.quota_fill_rate - 1.0).abs() < 1e-10);
        }
    }

    fn single_day_config() -> ScheduleConfig {
        ScheduleConfig::new()
            .with_days(["Sunday"])
            .with_member(TeamMember::new("Ana"))
            .with_member(TeamMember::new("Bob"))
            .with_member(TeamMember::new("Cid"))
            .with_sunday_worker("Ana")
    }

    #[test]
    fn test_invariant_checker_accepts_fixed_pair() {
        let cfg = single_day_config();
        let quotas = Quotas::new()
            .with_quota("Ana", 2)
            .with_quota("Bob", 1)
            .with_quota("Cid", 0);
        let mut roster = Roster::new(&cfg.days);
        roster.assign(0, ShiftType::Morning, "Ana");
        roster.assign(0, ShiftType::Evening, "Ana");
        roster.assign(0, ShiftType::Night, "Bob");
        assert_roster_invariants(&cfg, &quotas, &roster);
    }

    #[test]
    #[should_panic(expected = "Ana twice on Sunday")]
    fn test_invariant_checker_rejects_third_first_day_shift() {
        let cfg = single_day_config();
        let quotas = Quotas::new()
            .with_quota("Ana", 3)
            .with_quota("Bob", 0)
            .with_quota("Cid", 0);
        let mut roster = Roster::new(&cfg.days);
        for shift in ShiftType::ALL {
            roster.assign(0, shift, "Ana");
        }
        assert_roster_invariants(&cfg, &quotas, &roster);
    }

    #[test]
    fn test_single_day_team_with_derived_quotas() {
        for seed in 0..5 {
            let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(seed));
            facade.configure(single_day_config()).unwrap();
            let out = facade.generate().unwrap();

            let cfg = facade.config().unwrap();
            let quotas = facade.quotas().unwrap();
            assert_eq!(quotas.get("Ana"), 2);
            assert_roster_invariants(cfg, quotas, &out.roster);
        }
    }

    #[test]
    fn test_same_seed_same_roster() {
        let run = |seed| {
            let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(seed));
            facade.configure(week_config()).unwrap();
            facade.generate().unwrap().roster
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_desired_slot_is_honoured_when_free() {
        // Sunday night is the first open slot and only Ana desires it.
        for seed in 0..3 {
            let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(seed));
            facade.configure(week_config()).unwrap();
            let out = facade.generate().unwrap();
            assert_eq!(out.roster.get("Sunday", ShiftType::Night), Some("Ana"));
        }
    }

    #[test]
    fn test_supplied_quotas_are_kept() {
        let quotas: Quotas = ["Ana", "Bob", "Cid", "Dee", "Eve", "Fay", "Gus"]
            .into_iter()
            .map(|m| (m.to_string(), 3))
            .collect();
        let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(1));
        facade
            .configure(week_config().with_quotas(quotas.clone()))
            .unwrap();
        assert_eq!(facade.quotas(), Some(&quotas));
    }

    #[test]
    fn test_generate_before_configure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut facade = RosterFacade::new();
        facade.subscribe(Box::new(Names(Rc::clone(&log))));

        assert!(matches!(facade.generate(), Err(RosterError::NotConfigured)));
        assert_eq!(*log.borrow(), vec!["failed"]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(1));
        facade.subscribe(Box::new(Names(Rc::clone(&log))));

        let err = facade
            .configure(ScheduleConfig::weekly().with_sunday_worker("Ana"))
            .unwrap_err();
        match err {
            RosterError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyTeam));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(facade.config().is_none());
        assert_eq!(*log.borrow(), vec!["failed"]);
    }

    #[test]
    fn test_events_on_success() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(5));
        facade.subscribe(Box::new(Names(Rc::clone(&log))));

        facade.configure(week_config()).unwrap();
        facade.generate().unwrap();
        assert_eq!(*log.borrow(), vec!["configured", "generated"]);
    }

    #[test]
    fn test_generation_failure_is_published() {
        // One member cannot cover Monday's three slots.
        let cfg = ScheduleConfig::new()
            .with_days(["Sunday", "Monday"])
            .with_member(TeamMember::new("Ana"))
            .with_sunday_worker("Ana");
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut facade = RosterFacade::with_options(RunOptions::default().with_seed(5));
        facade.subscribe(Box::new(Names(Rc::clone(&log))));

        facade.configure(cfg).unwrap();
        assert!(matches!(
            facade.generate(),
            Err(RosterError::NoSolution { .. })
        ));
        assert_eq!(*log.borrow(), vec!["configured", "failed"]);
    }

    #[test]
    fn test_default_options() {
        let opts = RunOptions::default();
        assert_eq!(opts.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(opts.seed, None);
        assert_eq!(RosterFacade::new().options(), opts);
    }
}
