//! Blink sessions driven through the service, tick by tick.

use relaylight::app::commands::AppCommand;
use relaylight::app::events::AppEvent;
use relaylight::app::service::AppService;
use relaylight::config::{self, LightConfig};
use relaylight::light::BlinkPreset;

use crate::mock_hw::{MockBus, MockLine, RecordingSink};

fn make_app(session_secs: u16) -> (AppService, MockLine, MockBus, RecordingSink) {
    let mut config = LightConfig::default();
    config.blink_session_secs = session_secs;
    (AppService::new(config), MockLine::new(), MockBus::new(), RecordingSink::new())
}

#[test]
fn set_pattern_starts_session_and_follows_phases() {
    let (mut app, mut line, mut bus, mut sink) = make_app(60);

    // 0.5 s on, 0.5 s off.
    app.handle_command(AppCommand::SetBlinkPattern("5,5".into()), 0, &mut line, &mut sink);
    assert!(app.is_blinking());

    app.tick(0, &mut line, &mut bus, &mut sink);
    assert!(line.level(), "first phase is on");
    app.tick(600, &mut line, &mut bus, &mut sink);
    assert!(!line.level());
    app.tick(1100, &mut line, &mut bus, &mut sink);
    assert!(line.level());
    assert_eq!(line.writes, vec![true, false, true]);
}

#[test]
fn late_ticks_stay_on_the_original_grid() {
    let (mut app, mut line, mut bus, mut sink) = make_app(60);

    app.handle_command(AppCommand::SetBlinkPattern("5 5".into()), 0, &mut line, &mut sink);
    app.tick(0, &mut line, &mut bus, &mut sink);

    // 37 laps and 700 ms later: second phase of the 38th lap.
    app.tick(37 * 1000 + 700, &mut line, &mut bus, &mut sink);
    assert!(!line.level());
    assert_eq!(app.blink().phase_reference_ms(), Some(37_000));
}

#[test]
fn session_times_out_and_restores_relay_state() {
    let (mut app, mut line, mut bus, mut sink) = make_app(2);

    app.handle_command(AppCommand::TurnOn { hold: true }, 0, &mut line, &mut sink);
    app.handle_command(AppCommand::StartBlinkPreset(BlinkPreset::Slow), 0, &mut line, &mut sink);

    let mut now = 0;
    while now <= 2000 {
        app.tick(now, &mut line, &mut bus, &mut sink);
        now += 50;
    }
    assert!(app.is_blinking(), "exactly the session length is still running");

    app.tick(2001, &mut line, &mut bus, &mut sink);
    assert!(!app.is_blinking());
    assert!(line.level(), "relay was on, so the line is restored high");
    assert_eq!(sink.last(), Some(&AppEvent::BlinkStopped { expired: true }));
}

#[test]
fn stop_restores_low_for_an_off_relay() {
    let (mut app, mut line, mut bus, mut sink) = make_app(60);

    app.handle_command(AppCommand::StartBlinkPreset(BlinkPreset::Slow), 0, &mut line, &mut sink);
    app.tick(0, &mut line, &mut bus, &mut sink);
    assert!(line.level());

    app.handle_command(AppCommand::StopBlink, 100, &mut line, &mut sink);
    assert!(!app.is_blinking());
    assert!(!line.level());
    assert_eq!(sink.last(), Some(&AppEvent::BlinkStopped { expired: false }));
}

#[test]
fn stop_while_idle_does_nothing() {
    let (mut app, mut line, _, mut sink) = make_app(60);

    app.handle_command(AppCommand::StopBlink, 0, &mut line, &mut sink);
    assert!(line.writes.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn blink_duration_command_sets_session_length() {
    let (mut app, mut line, _, mut sink) = make_app(60);

    app.handle_command(AppCommand::SetBlinkDuration("15".into()), 0, &mut line, &mut sink);
    assert_eq!(app.blink().session_secs(), 15);

    // Garbage keeps the previous value.
    app.handle_command(AppCommand::SetBlinkDuration("soon".into()), 0, &mut line, &mut sink);
    assert_eq!(app.blink().session_secs(), 15);
}

#[test]
fn short_or_empty_patterns_fall_back_to_default() {
    let (mut app, mut line, _, mut sink) = make_app(60);

    app.handle_command(AppCommand::SetBlinkPattern("7".into()), 0, &mut line, &mut sink);
    assert_eq!(app.blink().pattern().phases(), &[500, 500]);

    app.handle_command(AppCommand::SetBlinkPattern("1 1 1".into()), 0, &mut line, &mut sink);
    assert_eq!(app.blink().pattern().phases(), &[200, 200, 200]);
}

#[test]
fn blink_start_topic_runs_one_second_phases() {
    let (mut app, mut line, mut bus, mut sink) = make_app(60);

    app.handle_command(AppCommand::SetBlinkPattern("2 2 2".into()), 0, &mut line, &mut sink);
    let cmd = AppCommand::from_topic(config::TOPIC_BLINK_START, "").unwrap();
    app.handle_command(cmd, 0, &mut line, &mut sink);
    assert_eq!(app.blink().pattern().phases(), &[1000, 1000]);

    app.tick(0, &mut line, &mut bus, &mut sink);
    app.tick(999, &mut line, &mut bus, &mut sink);
    assert!(line.level());
    app.tick(1000, &mut line, &mut bus, &mut sink);
    assert!(!line.level());
    app.tick(2000, &mut line, &mut bus, &mut sink);
    assert!(line.level());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::BlinkStarted { phases: 2, .. })), 1);
}

#[test]
fn blink_start_fast_topic_runs_half_second_phases() {
    let (mut app, mut line, mut bus, mut sink) = make_app(60);

    let cmd = AppCommand::from_topic(config::TOPIC_BLINK_START_FAST, "").unwrap();
    app.handle_command(cmd, 0, &mut line, &mut sink);
    assert!(app.is_blinking());
    assert_eq!(app.blink().pattern().phases(), &[500, 500]);

    app.tick(0, &mut line, &mut bus, &mut sink);
    app.tick(500, &mut line, &mut bus, &mut sink);
    app.tick(1000, &mut line, &mut bus, &mut sink);
    assert_eq!(line.writes, vec![true, false, true]);
}
