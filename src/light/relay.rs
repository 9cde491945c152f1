//! Relay / brightness controller.
//!
//! The hardware is a plain relay, so "brightness" only ever takes one of
//! two values: the configured minimum (off) or maximum (on).  The bounds
//! are still percent-like so the reported level matches what a dimmer
//! variant of the same firmware would publish.
//!
//! ## Bounds
//!
//! | Field | Range           |
//! |-------|-----------------|
//! | min   | 0 – 20          |
//! | max   | min – 100       |
//!
//! Setters clamp, never reject.  `set_max` clamps against the *current*
//! minimum, so when both change the minimum must be applied first.

use log::{debug, info};

use super::auto_off::AutoOffTimer;
use super::parse::{SHORT_FIELD_DIGITS, parse_bounded_decimal};
use crate::app::ports::OutputPort;

/// Highest value the minimum brightness may take.
pub const MIN_BRIGHTNESS_CEILING: u8 = 20;
/// Highest value the maximum brightness may take.
pub const MAX_BRIGHTNESS_CEILING: u8 = 100;

/// Validated brightness bounds.  Invariant: `min <= 20`, `min <= max <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessBounds {
    min: u8,
    max: u8,
}

impl BrightnessBounds {
    /// Build clamped bounds; `min` is applied before `max`.
    pub fn new(min: u16, max: u16) -> Self {
        let min = Self::clamp_min(min);
        Self {
            min,
            max: Self::clamp_max(max, min),
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    fn clamp_min(value: u16) -> u8 {
        value.min(u16::from(MIN_BRIGHTNESS_CEILING)) as u8
    }

    fn clamp_max(value: u16, min: u8) -> u8 {
        value.clamp(u16::from(min), u16::from(MAX_BRIGHTNESS_CEILING)) as u8
    }
}

/// On/off state plus the auto-off timer it arms.
#[derive(Debug, Clone)]
pub struct Relay {
    bounds: BrightnessBounds,
    brightness: u8,
    auto_off: AutoOffTimer,
}

impl Relay {
    /// A relay that starts off, at `bounds.min()`.
    pub fn new(bounds: BrightnessBounds, auto_off: AutoOffTimer) -> Self {
        Self {
            brightness: bounds.min(),
            bounds,
            auto_off,
        }
    }

    // ── Switching ─────────────────────────────────────────────

    /// Switch on.  With `hold_indefinitely` the auto-off timer stays
    /// inactive ("stay on"); otherwise it restarts from `now_ms`.
    pub fn turn_on(&mut self, hold_indefinitely: bool, now_ms: u32, out: &mut impl OutputPort) {
        info!("light: switch on (hold={})", hold_indefinitely);
        out.drive(true);
        self.brightness = self.bounds.max();
        if hold_indefinitely {
            self.auto_off.hold();
        } else {
            self.auto_off.arm(now_ms);
        }
    }

    /// Switch off and disarm the auto-off timer.
    pub fn turn_off(&mut self, out: &mut impl OutputPort) {
        info!("light: switch off");
        out.drive(false);
        self.brightness = self.bounds.min();
        self.auto_off.reset();
    }

    /// Off → on, anything else → off.  Decided by exact equality with the
    /// minimum, not by which bound is closer, so equal bounds always
    /// switch on.  Returns `true` when it switched on.
    pub fn toggle(&mut self, hold_indefinitely: bool, now_ms: u32, out: &mut impl OutputPort) -> bool {
        if self.brightness == self.bounds.min() {
            self.turn_on(hold_indefinitely, now_ms, out);
            true
        } else {
            self.turn_off(out);
            false
        }
    }

    /// Run the auto-off check; switches off and returns `true` on expiry.
    pub fn expire_if_due(&mut self, now_ms: u32, out: &mut impl OutputPort) -> bool {
        if !self.auto_off.is_expired(now_ms) {
            return false;
        }
        info!("light: auto-off after {}s", self.auto_off.duration_secs());
        self.turn_off(out);
        true
    }

    // ── Parameters ────────────────────────────────────────────

    /// Apply a raw minimum-brightness parameter.  Unparsable input is
    /// ignored and the previous bound kept.
    pub fn set_min_brightness(&mut self, raw: Option<&str>) {
        match parse_bounded_decimal(raw, SHORT_FIELD_DIGITS) {
            Ok(value) => {
                let was_on = self.is_on();
                let min = BrightnessBounds::clamp_min(value);
                // An existing max below the new min follows it up.
                let max = self.bounds.max().max(min);
                self.bounds = BrightnessBounds { min, max };
                self.resnap(was_on);
            }
            Err(e) => debug!("light: ignoring minBrightness {:?} ({})", raw, e),
        }
    }

    /// Apply a raw maximum-brightness parameter, clamped against the
    /// current minimum.  Unparsable input is ignored.
    pub fn set_max_brightness(&mut self, raw: Option<&str>) {
        match parse_bounded_decimal(raw, SHORT_FIELD_DIGITS) {
            Ok(value) => {
                let was_on = self.is_on();
                self.bounds.max = BrightnessBounds::clamp_max(value, self.bounds.min());
                self.resnap(was_on);
            }
            Err(e) => debug!("light: ignoring maxBrightness {:?} ({})", raw, e),
        }
    }

    /// Keep `brightness` on the same side after the bounds moved.
    fn resnap(&mut self, was_on: bool) {
        self.brightness = if was_on {
            self.bounds.max()
        } else {
            self.bounds.min()
        };
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_on(&self) -> bool {
        self.brightness != self.bounds.min()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn bounds(&self) -> BrightnessBounds {
        self.bounds
    }

    pub fn auto_off(&self) -> &AutoOffTimer {
        &self.auto_off
    }

    pub fn auto_off_mut(&mut self) -> &mut AutoOffTimer {
        &mut self.auto_off
    }
}
