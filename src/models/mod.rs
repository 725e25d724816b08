//! Rostering domain models.
//!
//! Provides the data types for describing a rostering problem and its
//! solution: the shift vocabulary, team members with their availability
//! and preferences, quotas, the input configuration and the filled grid.
//!
//! # Domain Mappings
//!
//! | u-roster | Support desk | Healthcare | Security |
//! |----------|--------------|------------|----------|
//! | TeamMember | Agent | Nurse | Guard |
//! | ShiftType | Rotation | Ward shift | Watch |
//! | SlotKey | On-call slot | Duty slot | Post slot |
//! | Roster | On-call calendar | Duty roster | Watch bill |

mod config;
mod member;
mod quota;
mod roster;
mod shift;

pub use config::{ScheduleConfig, WEEK_DAYS};
pub use member::{TeamMember, Tier};
pub use quota::Quotas;
pub use roster::{DayRoster, Roster};
pub use shift::{ParseSlotError, ShiftType, SlotKey};
