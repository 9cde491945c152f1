//! Parameter store → service flows.

use relaylight::adapters::params::MemoryParams;
use relaylight::app::commands::AppCommand;
use relaylight::app::events::AppEvent;
use relaylight::app::service::AppService;
use relaylight::config::{self, LightConfig};

use crate::mock_hw::{MockBus, MockLine, RecordingSink};

#[test]
fn params_from_json_apply_bounds_and_timer() {
    let params = MemoryParams::from_json(
        r#"{"minBrightness":"5","maxBrightness":"80","autoOffTimer":"30","pubBrightnessLevel":"lvl"}"#,
    )
    .unwrap();
    let mut app = AppService::new(LightConfig::default());
    let mut sink = RecordingSink::new();

    app.update_params(&params, &mut sink);

    let snap = app.snapshot();
    assert_eq!((snap.min_brightness, snap.max_brightness), (5, 80));
    assert_eq!(snap.auto_off_secs, 30);
    assert_eq!(snap.brightness, 5);
    assert_eq!(app.brightness_topic(), Some("lvl"));
    assert!(matches!(sink.last(), Some(AppEvent::ParamsUpdated(_))));
}

#[test]
fn out_of_range_bounds_are_clamped() {
    let mut params = MemoryParams::new();
    params.set(config::PARAM_MIN_BRIGHTNESS, "90");
    params.set(config::PARAM_MAX_BRIGHTNESS, "250");
    let mut app = AppService::new(LightConfig::default());
    let mut sink = RecordingSink::new();

    app.update_params(&params, &mut sink);

    let snap = app.snapshot();
    assert_eq!(snap.min_brightness, 20);
    assert_eq!(snap.max_brightness, 100);
}

#[test]
fn max_below_min_is_raised_to_min() {
    let mut params = MemoryParams::new();
    params.set(config::PARAM_MIN_BRIGHTNESS, "10");
    params.set(config::PARAM_MAX_BRIGHTNESS, "5");
    let mut app = AppService::new(LightConfig::default());
    let mut sink = RecordingSink::new();

    app.update_params(&params, &mut sink);

    let snap = app.snapshot();
    assert_eq!((snap.min_brightness, snap.max_brightness), (10, 10));
}

#[test]
fn invalid_values_keep_bounds_but_disable_auto_off() {
    let mut cfg = LightConfig::default();
    cfg.auto_off_secs = 60;
    let mut app = AppService::new(cfg);
    let mut params = MemoryParams::new();
    params.set(config::PARAM_MIN_BRIGHTNESS, "abc");
    params.set(config::PARAM_MAX_BRIGHTNESS, "");
    params.set(config::PARAM_AUTO_OFF, "1000");
    let mut sink = RecordingSink::new();

    app.update_params(&params, &mut sink);

    let snap = app.snapshot();
    assert_eq!((snap.min_brightness, snap.max_brightness), (0, 100));
    assert_eq!(snap.auto_off_secs, 0, "a four-digit timer is rejected");
}

#[test]
fn bounds_change_moves_brightness_with_it() {
    let mut app = AppService::new(LightConfig::default());
    let (mut line, mut bus, mut sink) = (MockLine::new(), MockBus::new(), RecordingSink::new());
    let mut params = MemoryParams::new();
    params.set(config::PARAM_BRIGHTNESS_TOPIC, "lvl");
    app.update_params(&params, &mut sink);

    app.handle_command(AppCommand::TurnOn { hold: false }, 0, &mut line, &mut sink);
    app.tick(1, &mut line, &mut bus, &mut sink);

    params.set(config::PARAM_MAX_BRIGHTNESS, "60");
    app.update_params(&params, &mut sink);
    assert!(app.is_on());
    assert_eq!(app.brightness(), 60);

    app.tick(2, &mut line, &mut bus, &mut sink);
    assert_eq!(bus.payloads(), vec!["100", "60"]);
}

#[test]
fn param_update_allows_a_failed_value_to_be_retried() {
    let mut app = AppService::new(LightConfig::default());
    let (mut line, mut bus, mut sink) = (MockLine::new(), MockBus::new(), RecordingSink::new());
    let mut params = MemoryParams::new();
    params.set(config::PARAM_BRIGHTNESS_TOPIC, "lvl");
    app.update_params(&params, &mut sink);

    bus.fail_with = Some(relaylight::error::PublishError::QueueFull);
    app.handle_command(AppCommand::TurnOn { hold: false }, 0, &mut line, &mut sink);
    app.tick(1, &mut line, &mut bus, &mut sink);
    app.tick(2, &mut line, &mut bus, &mut sink);
    assert_eq!(bus.attempts, 1);

    bus.fail_with = None;
    app.update_params(&params, &mut sink);
    app.tick(3, &mut line, &mut bus, &mut sink);
    assert_eq!(bus.payloads(), vec!["100"]);
}
