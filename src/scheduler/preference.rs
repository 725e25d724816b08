//! Preference classification.
//!
//! Splits the members eligible for one slot into three tiers by their
//! stated preferences. Tier membership is deterministic; order within a
//! tier is shuffled with the injected RNG, so different seeds explore
//! different but equally valid rosters.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::models::{SlotKey, TeamMember, Tier};

/// Eligible members of one slot, split by preference tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceTiers {
    /// Members who desire the slot.
    pub desired: Vec<String>,
    /// Members with no preference.
    pub neutral: Vec<String>,
    /// Members who would rather not take the slot.
    pub undesired: Vec<String>,
}

impl PreferenceTiers {
    /// Adds a member to a tier.
    pub fn push(&mut self, tier: Tier, member: impl Into<String>) {
        match tier {
            Tier::Desired => self.desired.push(member.into()),
            Tier::Neutral => self.neutral.push(member.into()),
            Tier::Undesired => self.undesired.push(member.into()),
        }
    }

    /// Candidates in try order: desired, then neutral, then undesired.
    pub fn into_ordered(self) -> impl Iterator<Item = String> {
        self.desired
            .into_iter()
            .chain(self.neutral)
            .chain(self.undesired)
    }

    /// Total number of candidates.
    pub fn len(&self) -> usize {
        self.desired.len() + self.neutral.len() + self.undesired.len()
    }

    /// Whether no member is eligible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.desired.shuffle(rng);
        self.neutral.shuffle(rng);
        self.undesired.shuffle(rng);
    }
}

/// Classifier consulted by the coordinator.
pub trait PreferenceClassifier {
    /// Tiers the members for `key`, skipping those `is_eligible` rejects.
    fn classify(
        &self,
        key: &SlotKey,
        is_eligible: &dyn Fn(&str) -> bool,
        rng: &mut dyn RngCore,
    ) -> PreferenceTiers;
}

/// Classifier over the team's desired/undesired sets.
#[derive(Debug, Clone, Copy)]
pub struct TieredPreferences<'a> {
    team: &'a [TeamMember],
}

impl<'a> TieredPreferences<'a> {
    /// Creates a classifier over a team.
    pub fn new(team: &'a [TeamMember]) -> Self {
        Self { team }
    }
}

impl PreferenceClassifier for TieredPreferences<'_> {
    fn classify(
        &self,
        key: &SlotKey,
        is_eligible: &dyn Fn(&str) -> bool,
        rng: &mut dyn RngCore,
    ) -> PreferenceTiers {
        let mut tiers = PreferenceTiers::default();
        for member in self.team {
            if !is_eligible(&member.id) {
                continue;
            }
            tiers.push(member.tier_for(key), member.id.as_str());
        }
        tiers.shuffle(rng);
        tiers
    }
}
