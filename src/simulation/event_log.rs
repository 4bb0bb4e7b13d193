//! Event logging system for displaying recent simulation events.

use std::collections::VecDeque;

/// A logged event for display in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    /// Seconds since the field was created
    pub time: f32,
    /// Human-readable description of the event
    pub description: String,
    /// Category, used for coloring
    pub kind: EventKind,
}

/// Event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A human was bitten and turned (red)
    Bite,
    /// A human ran out of lifetime (gray)
    Starvation,
    /// A human ate (green)
    Meal,
    /// No humans remain (yellow)
    Extinction,
}

/// Event log that tracks recent simulation events
#[derive(Debug, Clone)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f32, description: String, kind: EventKind) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            kind,
        });

        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }
}
