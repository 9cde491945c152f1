//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART in production, stderr on the host).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(s) | AppEvent::ParamsUpdated(s) => {
                let tag = if matches!(event, AppEvent::Started(_)) {
                    "START"
                } else {
                    "PARAM"
                };
                info!(
                    "{} | brightness={} bounds={}..{} | auto_off={}s armed={} | blinking={}",
                    tag,
                    s.brightness,
                    s.min_brightness,
                    s.max_brightness,
                    s.auto_off_secs,
                    s.auto_off_armed,
                    s.blinking,
                );
            }
            AppEvent::SwitchedOn { hold } => info!("LIGHT | on hold={}", hold),
            AppEvent::SwitchedOff => info!("LIGHT | off"),
            AppEvent::AutoOff { after_secs } => info!("LIGHT | auto-off after {}s", after_secs),
            AppEvent::BlinkStarted { phases, session_secs } => {
                info!("BLINK | started phases={} session={}s", phases, session_secs);
            }
            AppEvent::BlinkStopped { expired } => {
                info!("BLINK | stopped{}", if *expired { " (timeout)" } else { "" });
            }
            AppEvent::BrightnessPublished(level) => info!("TELEM | brightness={}", level),
        }
    }
}
