//! Port traits: the hexagonal boundary between the light core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (relay GPIO, message bus, parameter store, event log)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! takes them as generics at each call site, so the domain core never
//! touches hardware directly and every test can substitute a recorder.
//!
//! ## Reentrancy
//!
//! Port implementations run on the caller's thread, inside a tick or a
//! command.  They must return promptly and must not call back into the
//! service.

use crate::error::PublishError;

// ───────────────────────────────────────────────────────────────
// Output port (domain → relay line)
// ───────────────────────────────────────────────────────────────

/// The single digital output line: HIGH = light on, LOW = light off.
pub trait OutputPort {
    /// Drive the line.  Failures are the adapter's to log; the domain
    /// keeps its own notion of state regardless.
    fn drive(&mut self, high: bool);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (domain → message bus)
// ───────────────────────────────────────────────────────────────

/// Outbound publish on a named message-bus topic.
pub trait TelemetryPort {
    /// Publish `payload` on `topic`.  Must not block.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError>;
}

// ───────────────────────────────────────────────────────────────
// Parameter port (external store → domain)
// ───────────────────────────────────────────────────────────────

/// Read access to the externally edited parameter store.
///
/// Values are raw strings exactly as the user typed them; the domain
/// validates and clamps.  `None` means the parameter is not set.
pub trait ParamPort {
    fn param(&self, id: &str) -> Option<&str>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps at `u32::MAX`; consumers must
/// compare with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
