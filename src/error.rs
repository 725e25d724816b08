//! Error types.
//!
//! The four run outcomes that are not a roster are distinct variants so
//! a caller can tell an input problem (infeasible first-day assignment)
//! from an exhausted search or an unreachable fairness target.

use thiserror::Error;

use crate::scheduler::SearchStats;
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RosterError>;

/// A member whose final shift count stayed below their quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// Member id.
    pub member: String,
    /// Slots held at the end of the attempt.
    pub assigned: u32,
    /// Quota for the member.
    pub quota: u32,
}

/// Errors surfaced by configuration, generation and export.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The Sunday worker cannot take the two fixed first-day slots.
    #[error("sunday worker '{worker}' cannot take the first-day slots: {reason}")]
    InfeasibleInitialAssignment {
        /// Designated Sunday worker.
        worker: String,
        /// Why the pre-assignment is impossible.
        reason: String,
    },

    /// The search exhausted every candidate for the remaining slots.
    #[error("no valid roster exists for the remaining slots ({} nodes, {} backtracks)", .stats.nodes, .stats.backtracks)]
    NoSolution {
        /// Statistics of the exhausted search.
        stats: SearchStats,
    },

    /// The coordinator was built before all components were registered.
    #[error("component not registered: {0}")]
    ComponentNotRegistered(&'static str),

    /// Every attempt left some member below quota.
    #[error("fairness target not reached after {attempts} attempt(s); {} member(s) below quota", .shortfalls.len())]
    FairnessUnreachable {
        /// Attempts made.
        attempts: usize,
        /// Members below quota in the last attempt.
        shortfalls: Vec<Shortfall>,
    },

    /// Configuration failed validation.
    #[error("configuration is invalid: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// Generation was requested before a configuration was accepted.
    #[error("schedule is not configured")]
    NotConfigured,

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// File system error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook export error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        let err = RosterError::InfeasibleInitialAssignment {
            worker: "Ana".into(),
            reason: "unavailable for Sunday-Morning".into(),
        };
        assert_eq!(
            err.to_string(),
            "sunday worker 'Ana' cannot take the first-day slots: unavailable for Sunday-Morning"
        );

        let err = RosterError::FairnessUnreachable {
            attempts: 3,
            shortfalls: vec![Shortfall {
                member: "Bob".into(),
                assigned: 1,
                quota: 2,
            }],
        };
        assert!(err.to_string().contains("after 3 attempt(s)"));
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = RosterError::Validation(vec![
            ValidationError::new(ValidationErrorKind::EmptyTeam, "team is empty"),
            ValidationError::new(ValidationErrorKind::EmptyDays, "day list is empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "configuration is invalid: team is empty; day list is empty"
        );
    }
}
