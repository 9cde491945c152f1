//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, mirror to a status
//! LED, count them, etc.

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial state).
    Started(LightSnapshot),

    /// The light was switched on by a command.
    SwitchedOn { hold: bool },

    /// The light was switched off by a command.
    SwitchedOff,

    /// The auto-off timer switched the light off.
    AutoOff { after_secs: u16 },

    /// A blink session began.
    BlinkStarted { phases: u8, session_secs: u16 },

    /// A blink session ended; `expired` when it ran out of time.
    BlinkStopped { expired: bool },

    /// A new brightness level reached the message bus.
    BrightnessPublished(u8),

    /// Parameters were re-read from the store.
    ParamsUpdated(LightSnapshot),
}

/// A point-in-time view of the light state, suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSnapshot {
    pub brightness: u8,
    pub min_brightness: u8,
    pub max_brightness: u8,
    pub auto_off_secs: u16,
    pub auto_off_armed: bool,
    pub blinking: bool,
}
