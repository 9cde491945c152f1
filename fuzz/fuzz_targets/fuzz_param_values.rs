//! Fuzz target: parameter strings into `Relay` and `AutoOffTimer`
//!
//! Feeds arbitrary strings to the brightness and timer setters.  Whatever
//! arrives, the bounds invariant must hold and nothing may panic.
//!
//! cargo fuzz run fuzz_param_values

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaylight::light::parse::{LONG_FIELD_DIGITS, parse_bounded_decimal};
use relaylight::light::{AutoOffTimer, BrightnessBounds, Relay};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut relay = Relay::new(BrightnessBounds::new(0, 100), AutoOffTimer::new(0));
    for (i, raw) in text.split('\n').enumerate() {
        match i % 3 {
            0 => relay.set_min_brightness(Some(raw)),
            1 => relay.set_max_brightness(Some(raw)),
            _ => relay.auto_off_mut().set_duration(Some(raw)),
        }
        let b = relay.bounds();
        assert!(b.min() <= 20 && b.min() <= b.max() && b.max() <= 100);
        assert!(relay.auto_off().duration_secs() <= 999);
    }

    if let Ok(v) = parse_bounded_decimal(Some(text), LONG_FIELD_DIGITS) {
        assert!(text.len() <= LONG_FIELD_DIGITS);
        let _ = v;
    }
});
