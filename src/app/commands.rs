//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (message-bus
//! topics, a wall switch, the web UI) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use log::debug;

use crate::config;
use crate::light::BlinkPreset;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch on.  `hold` = stay on, auto-off timer not armed.
    TurnOn { hold: bool },

    /// Switch off.
    TurnOff,

    /// Flip between on and off.
    Toggle { hold: bool },

    /// Replace the blink pattern and start a session with it.
    SetBlinkPattern(String),

    /// Set the blink session duration (raw decimal seconds).
    SetBlinkDuration(String),

    /// Load a canned pattern and start a session with it.
    StartBlinkPreset(BlinkPreset),

    /// Stop a running blink session.
    StopBlink,
}

impl AppCommand {
    /// Map a message-bus topic and its payload to a command.
    ///
    /// Returns `None` for topics this device does not handle.
    pub fn from_topic(topic: &str, payload: &str) -> Option<Self> {
        let cmd = match topic {
            config::TOPIC_LIGHT_ON | config::TOPIC_LIGHT_ON_ALL => Self::TurnOn { hold: false },
            config::TOPIC_LIGHT_STAY_ON => Self::TurnOn { hold: true },
            config::TOPIC_LIGHT_TOGGLE => Self::Toggle { hold: false },
            config::TOPIC_LIGHT_OFF | config::TOPIC_LIGHT_OFF_ALL => Self::TurnOff,
            config::TOPIC_SET_BLINK_PATTERN => Self::SetBlinkPattern(payload.into()),
            config::TOPIC_SET_BLINK_DURATION => Self::SetBlinkDuration(payload.into()),
            config::TOPIC_BLINK_START => Self::StartBlinkPreset(BlinkPreset::Slow),
            config::TOPIC_BLINK_START_FAST => Self::StartBlinkPreset(BlinkPreset::Fast),
            config::TOPIC_BLINK_STOP => Self::StopBlink,
            _ => {
                debug!("commands: unhandled topic '{}'", topic);
                return None;
            }
        };
        Some(cmd)
    }
}
