//! Log-backed telemetry adapter.
//!
//! Implements [`TelemetryPort`] by logging each publish.  The device's
//! real MQTT client lives outside this crate; this adapter stands in for
//! it on the host and until the transport reports a connection.

use log::info;

use crate::app::ports::TelemetryPort;
use crate::error::PublishError;

pub struct LogTelemetry {
    connected: bool,
    published: u32,
}

impl LogTelemetry {
    pub fn new() -> Self {
        Self {
            connected: true,
            published: 0,
        }
    }

    /// Mirror the transport's connection state.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Publishes accepted so far.
    pub fn published(&self) -> u32 {
        self.published
    }
}

impl Default for LogTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryPort for LogTelemetry {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        if !self.connected {
            return Err(PublishError::NotConnected);
        }
        if topic.is_empty() {
            return Err(PublishError::Rejected);
        }
        info!("PUB | {} <- {}", topic, payload);
        self.published = self.published.wrapping_add(1);
        Ok(())
    }
}
