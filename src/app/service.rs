//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the relay, its auto-off timer, and the blink
//! engine.  It exposes a hardware-agnostic API; all I/O flows through
//! port traits injected at call sites, so the whole service runs
//! against mock adapters on the host.
//!
//! ```text
//!  ParamPort ──▶ ┌────────────────────────┐ ──▶ TelemetryPort
//!                │       AppService        │
//!  AppCommand ──▶│ Relay · AutoOff · Blink │ ──▶ EventSink
//!                └───────────┬────────────┘
//!                            ▼
//!                       OutputPort
//! ```
//!
//! ## Threading
//!
//! Single-threaded and cooperative.  Commands, parameter updates and
//! ticks must all come from the same loop and must never nest: no port
//! implementation may call back into the service.  `&mut self` on every
//! entry point makes overlapping calls impossible from safe code.

use core::fmt::Write as _;

use log::{info, warn};

use crate::config::{self, LightConfig};
use crate::light::{AutoOffTimer, BlinkEngine, BlinkPattern, BlinkStep, BrightnessBounds, Relay};

use super::commands::AppCommand;
use super::events::{AppEvent, LightSnapshot};
use super::ports::{EventSink, OutputPort, ParamPort, TelemetryPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all light logic.
pub struct AppService {
    relay: Relay,
    blink: BlinkEngine,
    /// Last brightness the bus accepted.
    published_brightness: u8,
    /// Brightness whose publish failed; not re-attempted until it changes.
    failed_brightness: Option<u8>,
    brightness_topic: Option<String>,
}

impl AppService {
    /// Construct the service from configuration.  The light starts off.
    pub fn new(config: LightConfig) -> Self {
        let bounds = BrightnessBounds::new(
            u16::from(config.min_brightness),
            u16::from(config.max_brightness),
        );
        let relay = Relay::new(bounds, AutoOffTimer::new(config.auto_off_secs));
        let blink = BlinkEngine::new(
            BlinkPattern::parse(&config.blink_pattern),
            config.blink_session_secs,
        );

        Self {
            relay,
            blink,
            published_brightness: 0,
            failed_brightness: None,
            brightness_topic: config.brightness_topic.filter(|t| !t.is_empty()),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let snap = self.snapshot();
        sink.emit(&AppEvent::Started(snap));
        info!("AppService started (brightness={})", snap.brightness);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one scheduler pass: publish → blink → auto-off.
    ///
    /// Safe to call at any rate; all timing is reconciled against
    /// `now_ms`, a wrapping millisecond counter.
    pub fn tick(
        &mut self,
        now_ms: u32,
        out: &mut impl OutputPort,
        bus: &mut impl TelemetryPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Brightness telemetry
        self.publish_brightness(bus, sink);

        // 2. Blink pattern
        if self.blink.is_active() && self.blink.advance(now_ms, &self.relay, out) == BlinkStep::Finished {
            sink.emit(&AppEvent::BlinkStopped { expired: true });
        }

        // 3. Auto-off
        if self.relay.expire_if_due(now_ms, out) {
            sink.emit(&AppEvent::AutoOff {
                after_secs: self.relay.auto_off().duration_secs(),
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (message bus, wall switch, etc.).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u32,
        out: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::TurnOn { hold } => {
                self.relay.turn_on(hold, now_ms, out);
                sink.emit(&AppEvent::SwitchedOn { hold });
            }
            AppCommand::TurnOff => {
                self.relay.turn_off(out);
                sink.emit(&AppEvent::SwitchedOff);
            }
            AppCommand::Toggle { hold } => {
                if self.relay.toggle(hold, now_ms, out) {
                    sink.emit(&AppEvent::SwitchedOn { hold });
                } else {
                    sink.emit(&AppEvent::SwitchedOff);
                }
            }
            AppCommand::SetBlinkPattern(text) => {
                self.blink.set_pattern(&text);
                self.start_blink(now_ms, sink);
            }
            AppCommand::SetBlinkDuration(raw) => {
                self.blink.set_session_duration(Some(raw.as_str()));
            }
            AppCommand::StartBlinkPreset(preset) => {
                self.blink.load_pattern(preset.pattern());
                self.start_blink(now_ms, sink);
            }
            AppCommand::StopBlink => {
                if self.blink.stop(&self.relay, out) {
                    sink.emit(&AppEvent::BlinkStopped { expired: false });
                }
            }
        }
    }

    /// Re-read every light parameter from the store.
    ///
    /// The minimum is applied before the maximum so the maximum is
    /// clamped against the new minimum.
    pub fn update_params(&mut self, params: &impl ParamPort, sink: &mut impl EventSink) {
        info!("light: updateParams");
        self.relay
            .set_min_brightness(params.param(config::PARAM_MIN_BRIGHTNESS));
        self.relay
            .set_max_brightness(params.param(config::PARAM_MAX_BRIGHTNESS));
        self.relay
            .auto_off_mut()
            .set_duration(params.param(config::PARAM_AUTO_OFF));
        self.blink
            .set_session_duration(params.param(config::PARAM_BLINK_DURATION));

        self.brightness_topic = params
            .param(config::PARAM_BRIGHTNESS_TOPIC)
            .filter(|t| !t.is_empty())
            .map(Into::into);
        self.failed_brightness = None;

        sink.emit(&AppEvent::ParamsUpdated(self.snapshot()));
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> LightSnapshot {
        let bounds = self.relay.bounds();
        LightSnapshot {
            brightness: self.relay.brightness(),
            min_brightness: bounds.min(),
            max_brightness: bounds.max(),
            auto_off_secs: self.relay.auto_off().duration_secs(),
            auto_off_armed: self.relay.auto_off().is_armed(),
            blinking: self.blink.is_active(),
        }
    }

    pub fn is_on(&self) -> bool {
        self.relay.is_on()
    }

    pub fn brightness(&self) -> u8 {
        self.relay.brightness()
    }

    pub fn published_brightness(&self) -> u8 {
        self.published_brightness
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_active()
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    pub fn blink(&self) -> &BlinkEngine {
        &self.blink
    }

    pub fn brightness_topic(&self) -> Option<&str> {
        self.brightness_topic.as_deref()
    }

    // ── Internal ──────────────────────────────────────────────

    fn start_blink(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        self.blink.start(now_ms);
        sink.emit(&AppEvent::BlinkStarted {
            phases: self.blink.pattern().phases().len() as u8,
            session_secs: self.blink.session_secs(),
        });
    }

    /// Publish the brightness if it changed since the last accepted
    /// publish.  A failed value is dropped, not retried.
    fn publish_brightness(&mut self, bus: &mut impl TelemetryPort, sink: &mut impl EventSink) {
        let brightness = self.relay.brightness();
        if brightness == self.published_brightness {
            self.failed_brightness = None;
            return;
        }
        if self.failed_brightness == Some(brightness) {
            return;
        }
        let Some(topic) = self.brightness_topic.as_deref() else {
            return;
        };

        let mut payload: heapless::String<4> = heapless::String::new();
        // A u8 is at most three digits.
        let _ = write!(payload, "{}", brightness);

        match bus.publish(topic, &payload) {
            Ok(()) => {
                self.published_brightness = brightness;
                self.failed_brightness = None;
                sink.emit(&AppEvent::BrightnessPublished(brightness));
            }
            Err(e) => {
                warn!("light: publish of brightness {} failed: {}", brightness, e);
                self.failed_brightness = Some(brightness);
            }
        }
    }
}
