//! Shift types and slot keys.
//!
//! A week is a grid of slots: every configured day crossed with every
//! configured shift type. The search addresses slots by
//! `(day_index, shift)`; availability and preference sets use the
//! labelled [`SlotKey`], written `"Day-Shift"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a [`ShiftType`] or [`SlotKey`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSlotError {
    /// Shift name is not one of Morning, Evening, Night.
    #[error("unknown shift type '{0}'")]
    UnknownShift(String),
    /// Slot key lacks the `Day-Shift` separator.
    #[error("slot key '{0}' is not of the form 'Day-Shift'")]
    MissingSeparator(String),
    /// Day part of the slot key is empty.
    #[error("slot key '{0}' has an empty day")]
    EmptyDay(String),
}

/// One of the three shift types of a day.
///
/// Ordering follows the time of day, so a `BTreeMap<ShiftType, _>`
/// iterates Morning → Evening → Night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftType {
    /// Early shift.
    Morning,
    /// Late shift.
    Evening,
    /// Overnight shift. Subject to streak and rest rules.
    Night,
}

impl ShiftType {
    /// All shift types in time-of-day order.
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Evening, ShiftType::Night];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "Morning",
            ShiftType::Evening => "Evening",
            ShiftType::Night => "Night",
        }
    }

    /// Whether this is a daytime shift (Morning or Evening).
    #[inline]
    pub fn is_daytime(&self) -> bool {
        matches!(self, ShiftType::Morning | ShiftType::Evening)
    }

    /// Whether this is the Night shift.
    #[inline]
    pub fn is_night(&self) -> bool {
        matches!(self, ShiftType::Night)
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(ShiftType::Morning),
            "Evening" => Ok(ShiftType::Evening),
            "Night" => Ok(ShiftType::Night),
            other => Err(ParseSlotError::UnknownShift(other.to_string())),
        }
    }
}

/// Labelled slot key, serialized as `"Day-Shift"`.
///
/// The day label may itself contain `-`; parsing splits on the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotKey {
    /// Day label.
    pub day: String,
    /// Shift type.
    pub shift: ShiftType,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(day: impl Into<String>, shift: ShiftType) -> Self {
        Self {
            day: day.into(),
            shift,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.shift)
    }
}

impl FromStr for SlotKey {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, shift) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseSlotError::MissingSeparator(s.to_string()))?;
        if day.is_empty() {
            return Err(ParseSlotError::EmptyDay(s.to_string()));
        }
        Ok(Self::new(day, shift.parse()?))
    }
}

impl TryFrom<String> for SlotKey {
    type Error = ParseSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotKey> for String {
    fn from(key: SlotKey) -> Self {
        key.to_string()
    }
}
