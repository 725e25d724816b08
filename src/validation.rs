//! Input validation for rostering configurations.
//!
//! Checks structural integrity of a [`ScheduleConfig`] before any quota
//! derivation or search. Detects:
//! - Empty or duplicate team members, days and shifts
//! - A Sunday worker who is not on the team or cannot take the first day
//! - Members who cannot work any slot
//! - Slot keys and vacation days that name no configured slot
//! - Slots that are both desired and undesired
//! - Missing or oversized quotas
//!
//! Validators run in a fixed order and every one of them runs; the
//! errors of all validators are returned together.

use std::collections::HashSet;

use crate::models::{ScheduleConfig, ShiftType, SlotKey, TeamMember};
use crate::scheduler::PREASSIGNED_SHIFTS;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The team has no members.
    EmptyTeam,
    /// Two members or two days share the same id, or an id is empty.
    DuplicateId,
    /// The Sunday worker is not a team member.
    UnknownSundayWorker,
    /// No days are configured.
    EmptyDays,
    /// No shifts are configured.
    EmptyShifts,
    /// A shift type appears twice in the shift sequence.
    DuplicateShift,
    /// The shift sequence lacks a shift the first-day pre-assignment needs.
    MissingRequiredShift,
    /// A member cannot work any configured slot.
    FullyUnavailable,
    /// The Sunday worker cannot take the fixed first-day slots.
    SundayWorkerUnavailable,
    /// A slot key or vacation day names no configured slot.
    UnknownSlotReference,
    /// A slot is both desired and undesired by the same member.
    ConflictingPreference,
    /// A quota is missing, unknown or exceeds the slot count.
    InvalidQuota,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

type Validator = fn(&ScheduleConfig, &mut Vec<ValidationError>);

/// Validators in the order they run.
const VALIDATORS: [Validator; 5] = [
    validate_team,
    validate_days,
    validate_shifts,
    validate_constraints,
    validate_quotas,
];

/// Validates a rostering configuration.
///
/// Checks:
/// 1. Team: non-empty, unique non-empty ids, Sunday worker on the team
/// 2. Days: non-empty, unique labels
/// 3. Shifts: non-empty, no duplicates, Morning and Evening present
/// 4. Constraints: every member can work some slot, the Sunday worker
///    can take first-day Morning and Evening, every slot reference is
///    known, no slot is both desired and undesired
/// 5. Quotas (when supplied): one per member, none above the slot count
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &ScheduleConfig) -> ValidationResult {
    let mut errors = Vec::new();
    for validator in VALIDATORS {
        validator(config, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_team(config: &ScheduleConfig, errors: &mut Vec<ValidationError>) {
    if config.team.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTeam,
            "Team has no members",
        ));
    }

    let mut ids = HashSet::new();
    for member in &config.team {
        if member.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                "Team member has an empty ID",
            ));
        } else if !ids.insert(member.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate member ID: {}", member.id),
            ));
        }
    }

    if config.member(&config.sunday_worker).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownSundayWorker,
            format!("Sunday worker '{}' is not a team member", config.sunday_worker),
        ));
    }
}

fn validate_days(config: &ScheduleConfig, errors: &mut Vec<ValidationError>) {
    if config.days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDays,
            "No days are configured",
        ));
    }

    let mut seen = HashSet::new();
    for day in &config.days {
        if !seen.insert(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day: {day}"),
            ));
        }
    }
}

fn validate_shifts(config: &ScheduleConfig, errors: &mut Vec<ValidationError>) {
    if config.shifts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyShifts,
            "No shifts are configured",
        ));
        return;
    }

    let mut seen = HashSet::new();
    for shift in &config.shifts {
        if !seen.insert(*shift) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateShift,
                format!("Duplicate shift: {shift}"),
            ));
        }
    }

    for shift in PREASSIGNED_SHIFTS {
        if !seen.contains(&shift) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRequiredShift,
                format!("Shift sequence lacks {shift}, which the Sunday worker must hold"),
            ));
        }
    }
}

fn validate_constraints(config: &ScheduleConfig, errors: &mut Vec<ValidationError>) {
    let days: HashSet<&str> = config.days.iter().map(String::as_str).collect();
    let shifts: HashSet<ShiftType> = config.shifts.iter().copied().collect();
    let known = |key: &SlotKey| days.contains(key.day.as_str()) && shifts.contains(&key.shift);

    for member in &config.team {
        if !config.days.is_empty() && !config.shifts.is_empty() && !can_work_any(config, member)
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::FullyUnavailable,
                format!("Member '{}' cannot work any slot", member.id),
            ));
        }

        let sets = [
            ("unavailable", &member.unavailable),
            ("desired", &member.desired),
            ("undesired", &member.undesired),
        ];
        for (label, set) in sets {
            for key in sorted(set.iter().filter(|k| !known(*k))) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSlotReference,
                    format!("Member '{}' has {label} slot '{key}' outside the week", member.id),
                ));
            }
        }

        for day in sorted(member.vacation.iter().filter(|d| !days.contains(d.as_str()))) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSlotReference,
                format!("Member '{}' has vacation on unknown day '{day}'", member.id),
            ));
        }

        for key in sorted(member.desired.intersection(&member.undesired)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPreference,
                format!(
                    "Member '{}' both desires and does not desire '{key}'",
                    member.id
                ),
            ));
        }
    }

    if let (Some(worker), Some(first_day)) =
        (config.member(&config.sunday_worker), config.first_day())
    {
        if worker.is_on_vacation(first_day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SundayWorkerUnavailable,
                format!("Sunday worker '{}' is on vacation on {first_day}", worker.id),
            ));
        }
        for shift in PREASSIGNED_SHIFTS {
            let key = SlotKey::new(first_day, shift);
            if worker.is_unavailable(&key) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SundayWorkerUnavailable,
                    format!("Sunday worker '{}' is unavailable for {key}", worker.id),
                ));
            }
        }
    }
}

fn validate_quotas(config: &ScheduleConfig, errors: &mut Vec<ValidationError>) {
    let Some(quotas) = &config.quotas else {
        return;
    };
    let slots = config.slot_count();

    for member in &config.team {
        if !quotas.contains(&member.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!("Member '{}' has no quota", member.id),
            ));
        }
    }

    let mut entries: Vec<(&str, u32)> = quotas.iter().collect();
    entries.sort_unstable();
    for (member, quota) in entries {
        if config.member(member).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!("Quota given for unknown member '{member}'"),
            ));
        }
        if quota as usize > slots {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!("Quota {quota} for '{member}' exceeds the {slots} slots of the week"),
            ));
        }
    }
}

/// Whether some configured slot is neither on vacation nor unavailable.
fn can_work_any(config: &ScheduleConfig, member: &TeamMember) -> bool {
    config
        .days
        .iter()
        .filter(|day| !member.is_on_vacation(day))
        .any(|day| {
            config
                .shifts
                .iter()
                .any(|&shift| !member.is_unavailable(&SlotKey::new(day.as_str(), shift)))
        })
}

/// Set contents in a stable order, for reproducible messages.
fn sorted<'a, T: Ord + 'a>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut items: Vec<&T> = items.collect();
    items.sort();
    items
}
