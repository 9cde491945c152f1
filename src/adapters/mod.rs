//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                  |
//! |------------|---------------|------------------------------|
//! | `bus`      | TelemetryPort | Serial log (MQTT stand-in)   |
//! | `gpio`     | OutputPort    | embedded-hal output pin      |
//! | `log_sink` | EventSink     | Serial log output            |
//! | `params`   | ParamPort     | Web UI parameter blob (JSON) |
//! | `time`     | ClockPort     | ESP32 system timer           |

pub mod bus;
pub mod gpio;
pub mod log_sink;
pub mod params;
pub mod time;
