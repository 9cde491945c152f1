//! Light configuration parameters
//!
//! Compiled-in defaults for every tunable of the light core, plus the
//! names under which the web UI stores parameters and the message-bus
//! topics the device listens on.  Nothing is persisted by this crate.

use serde::{Deserialize, Serialize};

// --- Parameter IDs (external parameter store) ---

pub const PARAM_MIN_BRIGHTNESS: &str = "minBrightness";
pub const PARAM_MAX_BRIGHTNESS: &str = "maxBrightness";
pub const PARAM_AUTO_OFF: &str = "autoOffTimer";
pub const PARAM_BLINK_DURATION: &str = "blinkTimer";
pub const PARAM_BRIGHTNESS_TOPIC: &str = "pubBrightnessLevel";

// --- Inbound topics (message bus) ---

pub const TOPIC_LIGHT_ON: &str = "light-on";
pub const TOPIC_LIGHT_ON_ALL: &str = "light-on-all";
pub const TOPIC_LIGHT_STAY_ON: &str = "light-stay-on";
pub const TOPIC_LIGHT_TOGGLE: &str = "light-toggle";
pub const TOPIC_LIGHT_OFF: &str = "light-off";
pub const TOPIC_LIGHT_OFF_ALL: &str = "light-off-all";
pub const TOPIC_SET_BLINK_PATTERN: &str = "set-blink-pattern";
pub const TOPIC_SET_BLINK_DURATION: &str = "set-blink-duration";
pub const TOPIC_BLINK_START: &str = "blink-start";
pub const TOPIC_BLINK_START_FAST: &str = "blink-start-fast";
pub const TOPIC_BLINK_STOP: &str = "blink-stop";

/// Hardware variant the firmware is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceVariant {
    /// Single relay (Shelly 1PM class).
    Relay,
    /// Dimmer module (Shelly Dimmer 2 class), driven as on/off.
    Dimmer,
}

impl DeviceVariant {
    /// Default maximum brightness for the variant.
    pub fn default_max_brightness(self) -> u8 {
        match self {
            Self::Relay => 100,
            Self::Dimmer => 50,
        }
    }
}

/// Core light configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    // --- Brightness bounds ---
    /// Level reported while off (0-20)
    pub min_brightness: u8,
    /// Level reported while on (min-100)
    pub max_brightness: u8,

    // --- Auto-off ---
    /// Seconds before the light switches itself off; 0 = never
    pub auto_off_secs: u16,

    // --- Blinking ---
    /// Pattern text, tenths of a second per phase
    pub blink_pattern: String,
    /// Maximum length of a blink session (seconds)
    pub blink_session_secs: u16,

    // --- Telemetry ---
    /// Topic for brightness publications; `None` disables them
    pub brightness_topic: Option<String>,
}

impl LightConfig {
    /// Defaults for a specific hardware variant.
    pub fn for_variant(variant: DeviceVariant) -> Self {
        Self {
            min_brightness: 0,
            max_brightness: variant.default_max_brightness(),
            auto_off_secs: 0,
            blink_pattern: "5 5".into(),
            blink_session_secs: 60,
            brightness_topic: None,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self::for_variant(DeviceVariant::Relay)
    }
}
