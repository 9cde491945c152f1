//! Fuzz target: `BlinkPattern::parse` + `BlinkEngine::advance`
//!
//! Parses arbitrary text as a blink pattern, then replays a session with
//! tick timestamps taken from the remaining bytes.  The pattern must
//! always be usable and the engine must never panic, even across a clock
//! wrap.
//!
//! cargo fuzz run fuzz_blink_pattern

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaylight::app::ports::OutputPort;
use relaylight::light::blink::{MAX_PHASES, MIN_PHASE_MS};
use relaylight::light::{AutoOffTimer, BlinkEngine, BlinkPattern, BrightnessBounds, Relay};

struct NullLine;

impl OutputPort for NullLine {
    fn drive(&mut self, _high: bool) {}
}

fuzz_target!(|data: &[u8]| {
    let split = data.len().min(64);
    let (text, ticks) = data.split_at(split);
    let Ok(text) = core::str::from_utf8(text) else {
        return;
    };

    let pattern = BlinkPattern::parse(text);
    assert!(pattern.phases().len() >= 2);
    assert!(pattern.phases().len() <= MAX_PHASES);
    assert!(pattern.phases().iter().all(|&p| p >= MIN_PHASE_MS));

    let relay = Relay::new(BrightnessBounds::new(0, 100), AutoOffTimer::new(0));
    let mut engine = BlinkEngine::new(pattern, u16::MAX);
    let mut now = u32::MAX - 10_000;
    engine.start(now);
    for chunk in ticks.chunks_exact(4) {
        let step = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) % 100_000;
        now = now.wrapping_add(step);
        engine.advance(now, &relay, &mut NullLine);
    }
});
