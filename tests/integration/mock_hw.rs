//! Mock adapters for integration tests.
//!
//! Records every output write, publish, and event so tests can assert on
//! the full history without touching real GPIO or a broker.

use relaylight::app::events::AppEvent;
use relaylight::app::ports::{EventSink, OutputPort, TelemetryPort};
use relaylight::error::PublishError;

// ── MockLine ──────────────────────────────────────────────────

/// Relay output line that remembers every level it was driven to.
pub struct MockLine {
    pub writes: Vec<bool>,
}

#[allow(dead_code)]
impl MockLine {
    pub fn new() -> Self {
        Self { writes: Vec::new() }
    }

    /// Current level; LOW before the first write.
    pub fn level(&self) -> bool {
        self.writes.last().copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl Default for MockLine {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPort for MockLine {
    fn drive(&mut self, high: bool) {
        self.writes.push(high);
    }
}

// ── MockBus ───────────────────────────────────────────────────

/// Message bus that records publishes and can be told to fail.
pub struct MockBus {
    pub sent: Vec<(String, String)>,
    pub attempts: usize,
    pub fail_with: Option<PublishError>,
}

#[allow(dead_code)]
impl MockBus {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            attempts: 0,
            fail_with: None,
        }
    }

    pub fn payloads(&self) -> Vec<&str> {
        self.sent.iter().map(|(_, p)| p.as_str()).collect()
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryPort for MockBus {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        self.attempts += 1;
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.sent.push((topic.into(), payload.into()));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
