//! Query surface between the search engine and its rule components.
//!
//! The search engine only talks to a [`Coordinator`]; the coordinator
//! forwards to whatever [`EligibilityEvaluator`] and
//! [`PreferenceClassifier`] were registered with it. Registration
//! happens on a [`CoordinatorBuilder`], and building without both
//! components fails with [`RosterError::ComponentNotRegistered`], so a
//! built coordinator can never be queried half-wired.

use rand::RngCore;

use super::{EligibilityEvaluator, PreferenceClassifier, PreferenceTiers, RosterState};
use crate::error::{Result, RosterError};
use crate::models::{ShiftType, SlotKey};

/// Collects components before a [`Coordinator`] is built.
pub struct CoordinatorBuilder<'a> {
    days: &'a [String],
    evaluator: Option<&'a dyn EligibilityEvaluator>,
    classifier: Option<&'a dyn PreferenceClassifier>,
}

impl<'a> CoordinatorBuilder<'a> {
    /// Starts a builder over the configured day sequence.
    pub fn new(days: &'a [String]) -> Self {
        Self {
            days,
            evaluator: None,
            classifier: None,
        }
    }

    /// Registers the eligibility evaluator.
    pub fn register_evaluator(mut self, evaluator: &'a dyn EligibilityEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Registers the preference classifier.
    pub fn register_classifier(mut self, classifier: &'a dyn PreferenceClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Builds the coordinator.
    ///
    /// # Errors
    /// [`RosterError::ComponentNotRegistered`] naming the first missing component.
    pub fn build(self) -> Result<Coordinator<'a>> {
        let evaluator = self
            .evaluator
            .ok_or(RosterError::ComponentNotRegistered("eligibility evaluator"))?;
        let classifier = self
            .classifier
            .ok_or(RosterError::ComponentNotRegistered("preference classifier"))?;
        Ok(Coordinator {
            days: self.days,
            evaluator,
            classifier,
        })
    }
}

/// Single query surface for the search engine.
pub struct Coordinator<'a> {
    days: &'a [String],
    evaluator: &'a dyn EligibilityEvaluator,
    classifier: &'a dyn PreferenceClassifier,
}

impl<'a> Coordinator<'a> {
    /// Starts a builder.
    pub fn builder(days: &'a [String]) -> CoordinatorBuilder<'a> {
        CoordinatorBuilder::new(days)
    }

    /// Whether `member` may take `(day_index, shift)`.
    pub fn is_eligible(
        &self,
        state: &RosterState,
        member: &str,
        day_index: usize,
        shift: ShiftType,
    ) -> bool {
        self.evaluator.is_eligible(state, member, day_index, shift)
    }

    /// Eligible members for `(day_index, shift)`, tiered by preference.
    ///
    /// Returns empty tiers for a day index outside the configured days.
    pub fn members_by_preference(
        &self,
        state: &RosterState,
        day_index: usize,
        shift: ShiftType,
        rng: &mut dyn RngCore,
    ) -> PreferenceTiers {
        let Some(day) = self.days.get(day_index) else {
            return PreferenceTiers::default();
        };
        let key = SlotKey::new(day.as_str(), shift);
        let eligible = |member: &str| self.evaluator.is_eligible(state, member, day_index, shift);
        self.classifier.classify(&key, &eligible, rng)
    }
}
