//! Schedule lifecycle events.
//!
//! Observers subscribe to an [`EventBus`] and are told when a
//! configuration is accepted, when a roster is generated and when
//! anything fails. Notification is synchronous and in subscription order.

use crate::error::RosterError;
use crate::models::ScheduleConfig;
use crate::scheduler::GeneratedRoster;

/// Something that happened to a schedule.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleEvent<'a> {
    /// A configuration passed validation and was stored.
    Configured(&'a ScheduleConfig),
    /// A roster was generated and accepted.
    Generated(&'a GeneratedRoster),
    /// Configuration or generation failed.
    Failed(&'a RosterError),
}

impl ScheduleEvent<'_> {
    /// Short event name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleEvent::Configured(_) => "configured",
            ScheduleEvent::Generated(_) => "generated",
            ScheduleEvent::Failed(_) => "failed",
        }
    }
}

/// Receives schedule events.
pub trait ScheduleObserver {
    /// Called once per event.
    fn on_event(&self, event: &ScheduleEvent<'_>);
}

/// Ordered list of observers.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn ScheduleObserver>>,
}

impl EventBus {
    /// Creates a bus with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer. It is notified after all earlier subscribers.
    pub fn subscribe(&mut self, observer: Box<dyn ScheduleObserver>) {
        self.observers.push(observer);
    }

    /// Delivers an event to every observer.
    pub fn notify(&self, event: &ScheduleEvent<'_>) {
        tracing::debug!(event = event.name(), observers = self.observers.len(), "notify");
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
