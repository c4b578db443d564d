// SPDX-License-Identifier: MPL-2.0
//! Bounded in-memory diagnostics log.
//!
//! Usage errors inside the feedback layer (an unknown banner region)
//! and persistence warnings are recorded here instead of being raised
//! to callers: feedback UI must never crash the screen it decorates.
//! Events are mirrored to stderr and kept in a ring buffer that evicts
//! the oldest entry once full.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of retained events.
const CAPACITY: usize = 256;

/// Category of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A feedback operation referenced a banner region that does not exist.
    UnknownRegion,
    /// Loading or saving persisted state produced a warning.
    Persistence,
    /// Anything else worth keeping around for a bug report.
    Other,
}

/// One diagnostic event.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub detail: String,
}

impl Event {
    pub fn new(kind: EventKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Log {
    events: VecDeque<Event>,
}

impl Log {
    fn record(&mut self, event: Event) {
        if self.events.len() == CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Cheaply cloneable handle to the shared event log.
#[derive(Debug, Clone, Default)]
pub struct Handle {
    log: Arc<Mutex<Log>>,
}

impl Handle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event and mirrors it to stderr.
    pub fn record(&self, kind: EventKind, detail: impl Into<String>) {
        let event = Event::new(kind, detail);
        eprintln!("[roomdesk] {:?}: {}", event.kind, event.detail);
        if let Ok(mut log) = self.log.lock() {
            log.record(event);
        }
    }

    /// Returns a snapshot of the retained events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.log
            .lock()
            .map(|log| log.events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().map(|log| log.events.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_is_empty() {
        let handle = Handle::new();
        assert!(handle.is_empty());
    }

    #[test]
    fn record_retains_event() {
        let handle = Handle::new();
        handle.record(EventKind::UnknownRegion, "region \"sidebar\" not found");

        let events = handle.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::UnknownRegion);
        assert!(events[0].detail.contains("sidebar"));
    }

    #[test]
    fn clones_share_the_same_log() {
        let handle = Handle::new();
        let clone = handle.clone();
        clone.record(EventKind::Other, "via clone");

        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let handle = Handle::new();
        for i in 0..CAPACITY + 3 {
            handle.record(EventKind::Other, format!("event-{i}"));
        }

        let events = handle.snapshot();
        assert_eq!(events.len(), CAPACITY);
        assert_eq!(events[0].detail, "event-3");
        assert_eq!(events.last().unwrap().detail, format!("event-{}", CAPACITY + 2));
    }
}
