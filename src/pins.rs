//! GPIO pin assignments (Shelly 1PM).
//!
//! Single source of truth: the entry point references this module rather
//! than hard-coding pin numbers.

/// Digital output: relay coil, HIGH = light on.
pub const LIGHT_RELAY_GPIO: i32 = 15;
/// Wall switch input SW1.
pub const SW1_GPIO: i32 = 4;
