//! Light control core: relay state, auto-off timer and blink patterns.
//!
//! Pure state machines driven by an explicit millisecond timestamp.  The
//! only side effect is [`OutputPort::drive`](crate::app::ports::OutputPort::drive),
//! so everything here runs unchanged on the host.

pub mod auto_off;
pub mod blink;
pub mod parse;
pub mod relay;

pub use auto_off::AutoOffTimer;
pub use blink::{BlinkEngine, BlinkPattern, BlinkPreset, BlinkStep};
pub use relay::{BrightnessBounds, Relay};
