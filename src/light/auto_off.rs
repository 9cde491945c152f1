//! Auto-off safety timer.
//!
//! Expires the output a configurable number of seconds after it was last
//! switched on.  The "stay on" override is not a separate check: switching
//! on with the override simply never arms the timer, so expiry cannot
//! fire until the next plain switch-on.

use log::debug;

use super::parse::{SHORT_FIELD_DIGITS, parse_bounded_decimal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoOffTimer {
    /// Seconds; 0 disables expiry.
    duration_secs: u16,
    /// Switch-on timestamp; `None` while the timer is inactive.
    last_on_ms: Option<u32>,
    /// Set by a "stay on" switch-on, cleared by switch-off.
    disabled: bool,
}

impl AutoOffTimer {
    pub fn new(duration_secs: u16) -> Self {
        Self {
            duration_secs,
            last_on_ms: None,
            disabled: false,
        }
    }

    /// Apply a raw duration parameter.  Anything unparsable disables the
    /// feature rather than keeping the previous value.
    pub fn set_duration(&mut self, raw: Option<&str>) {
        self.duration_secs = match parse_bounded_decimal(raw, SHORT_FIELD_DIGITS) {
            Ok(secs) => secs,
            Err(e) => {
                debug!("auto-off: rejecting {:?} ({}), timer disabled", raw, e);
                0
            }
        };
    }

    /// Start timing from `now_ms`.  Leaves any "stay on" override.
    pub fn arm(&mut self, now_ms: u32) {
        self.last_on_ms = Some(now_ms);
        self.disabled = false;
    }

    /// Enter the "stay on" override: timer inactive until the next `arm`.
    pub fn hold(&mut self) {
        self.disabled = true;
        self.last_on_ms = None;
    }

    /// Back to inactive, override cleared.
    pub fn reset(&mut self) {
        self.last_on_ms = None;
        self.disabled = false;
    }

    /// Whether the output has been on for longer than the duration.
    pub fn is_expired(&self, now_ms: u32) -> bool {
        match self.last_on_ms {
            Some(on_at) if self.duration_secs > 0 => {
                now_ms.wrapping_sub(on_at) > u32::from(self.duration_secs) * 1000
            }
            _ => false,
        }
    }

    pub fn duration_secs(&self) -> u16 {
        self.duration_secs
    }

    pub fn last_on_ms(&self) -> Option<u32> {
        self.last_on_ms
    }

    pub fn is_held(&self) -> bool {
        self.disabled
    }

    pub fn is_armed(&self) -> bool {
        self.last_on_ms.is_some()
    }
}
