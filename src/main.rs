//! Relay light firmware main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                    │
//! │                                                           │
//! │  RelayOutput   LogTelemetry    MemoryParams  LogEventSink │
//! │  (OutputPort)  (TelemetryPort) (ParamPort)   (EventSink)  │
//! │                                                           │
//! │  ──────────────── Port Trait Boundary ──────────────      │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────┐      │
//! │  │           AppService (pure logic)               │      │
//! │  │     Relay · AutoOff · Blink · Telemetry         │      │
//! │  └─────────────────────────────────────────────────┘      │
//! │                                                           │
//! │  Poll loop (≈10 ms) · SW1 wall switch                     │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::info;

use relaylight::adapters::bus::LogTelemetry;
use relaylight::adapters::gpio::RelayOutput;
use relaylight::adapters::log_sink::LogEventSink;
use relaylight::adapters::params::MemoryParams;
use relaylight::adapters::time::MonotonicClock;
use relaylight::app::commands::AppCommand;
use relaylight::app::ports::ClockPort;
use relaylight::app::service::AppService;
use relaylight::config::LightConfig;
use relaylight::pins;

/// Poll period of the main loop.
const LOOP_PERIOD_MS: u32 = 10;

/// Parameter blob used until the web UI store is wired in.
const DEFAULT_PARAMS: &str = r#"{"minBrightness":"0","maxBrightness":"100","autoOffTimer":"0"}"#;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RelayLight v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. GPIO ───────────────────────────────────────────────
    // SAFETY: each pin number is claimed exactly once, here.
    let relay_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::LIGHT_RELAY_GPIO) })?;
    let mut switch = PinDriver::input(unsafe { AnyIOPin::new(pins::SW1_GPIO) })?;
    switch.set_pull(Pull::Up)?;

    let mut out = RelayOutput::new(relay_pin);
    let mut bus = LogTelemetry::new();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 3. Application core ───────────────────────────────────
    let params = MemoryParams::from_json_or_empty(DEFAULT_PARAMS);
    let mut app = AppService::new(LightConfig::default());
    app.update_params(&params, &mut sink);
    app.start(&mut sink);

    info!("System ready. Entering poll loop.");

    // ── 4. Poll loop ──────────────────────────────────────────
    let mut switch_was_low = switch.is_low();
    loop {
        let now = clock.now_ms();

        // Wall switch: every edge toggles.
        let switch_low = switch.is_low();
        if switch_low != switch_was_low {
            switch_was_low = switch_low;
            app.handle_command(AppCommand::Toggle { hold: false }, now, &mut out, &mut sink);
        }

        app.tick(now, &mut out, &mut bus, &mut sink);

        esp_idf_hal::delay::FreeRtos::delay_ms(LOOP_PERIOD_MS);
    }
}
