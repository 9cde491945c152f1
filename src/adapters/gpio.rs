//! Relay output adapter.
//!
//! Implements [`OutputPort`] on top of any `embedded-hal` 1.0
//! [`OutputPin`], so the same adapter drives an `esp-idf-hal`
//! `PinDriver` on the device and a recording pin in host tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::OutputPort;
use crate::error::{OutputError, Result};

/// Relay line: HIGH closes the relay (light on).
pub struct RelayOutput<P> {
    pin: P,
    level: Option<bool>,
}

impl<P: OutputPin> RelayOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, level: None }
    }

    /// Drive the pin, reporting a failed write.
    pub fn try_drive(&mut self, high: bool) -> Result<()> {
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| OutputError::PinWriteFailed)?;
        self.level = Some(high);
        Ok(())
    }

    /// Last level successfully written; `None` before the first write.
    pub fn level(&self) -> Option<bool> {
        self.level
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputPort for RelayOutput<P> {
    fn drive(&mut self, high: bool) {
        if let Err(e) = self.try_drive(high) {
            warn!("relay: {}", e);
        }
    }
}
