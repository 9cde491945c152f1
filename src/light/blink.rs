//! Blink pattern engine.
//!
//! Replays a user-supplied on/off pattern on the relay line for a bounded
//! session.  The main loop calls [`BlinkEngine::advance`] every tick with
//! the current millisecond counter; ticks may arrive at any interval.
//!
//! ## Pattern
//!
//! Up to [`MAX_PHASES`] phase durations.  Even phases (0, 2, ...) are
//! "light on", odd phases are "light off".  One full pass over the phases
//! is a *lap*; laps repeat until the session times out.
//!
//! ```text
//!  phase:   0      1      2    ...
//!         ┌─────┐      ┌─────┐
//!         │ on  │ off  │ on  │ ...
//!  ───────┘     └──────┘     └───
//!         ^ phase reference (moves forward one lap at a time)
//! ```
//!
//! ## Drift
//!
//! The phase reference only ever moves forward by whole laps, so phase
//! boundaries stay on the original grid no matter how late a tick runs.
//! A late tick simply lands further into the current lap.

use heapless::Vec;
use log::{debug, info};

use super::parse::{LONG_FIELD_DIGITS, decimal_tokens, parse_bounded_decimal};
use super::relay::Relay;
use crate::app::ports::OutputPort;

/// Pattern capacity.
pub const MAX_PHASES: usize = 10;
/// Shortest phase the relay is asked to hold.
pub const MIN_PHASE_MS: u32 = 200;
/// One pattern token unit, in milliseconds.
const TOKEN_SCALE_MS: u32 = 100;
/// Fallback pattern: half a second on, half a second off.
pub const DEFAULT_PHASES: [u32; 2] = [500, 500];
/// Phase length of the slow preset.
pub const SLOW_PHASE_MS: u32 = 1000;
/// Phase length of the fast preset.
pub const FAST_PHASE_MS: u32 = 500;

// ═══════════════════════════════════════════════════════════════
//  Pattern
// ═══════════════════════════════════════════════════════════════

/// A validated blink pattern.  Always holds between 2 and
/// [`MAX_PHASES`] phases of at least [`MIN_PHASE_MS`] each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkPattern {
    phases: Vec<u32, MAX_PHASES>,
}

impl BlinkPattern {
    /// Parse a pattern such as `"5,5"` or `"2 3 2 10"`.
    ///
    /// Each number is in tenths of a second and is raised to at least
    /// [`MIN_PHASE_MS`].  Numbers past the tenth are ignored.  Fewer than
    /// two numbers yields the default pattern.
    pub fn parse(text: &str) -> Self {
        let mut phases: Vec<u32, MAX_PHASES> = Vec::new();
        for value in decimal_tokens(text).take(MAX_PHASES) {
            let ms = value.saturating_mul(TOKEN_SCALE_MS).max(MIN_PHASE_MS);
            // take() keeps us within capacity.
            let _ = phases.push(ms);
        }

        if phases.len() < 2 {
            debug!("blink: pattern {:?} has {} phase(s), using default", text, phases.len());
            return Self::default();
        }
        Self { phases }
    }

    /// Equal on and off phases of `phase_ms`, raised to [`MIN_PHASE_MS`].
    pub fn symmetric(phase_ms: u32) -> Self {
        let ms = phase_ms.max(MIN_PHASE_MS);
        let mut phases = Vec::new();
        let _ = phases.push(ms);
        let _ = phases.push(ms);
        Self { phases }
    }

    pub fn phases(&self) -> &[u32] {
        &self.phases
    }

    /// Length of one lap.  `u64` because ten saturated phases overflow `u32`.
    pub fn lap_ms(&self) -> u64 {
        self.phases.iter().map(|&p| u64::from(p)).sum()
    }

    /// Index of the phase running `elapsed_ms` into a lap, or `None` once
    /// the whole lap has elapsed.
    pub fn phase_at(&self, elapsed_ms: u32) -> Option<usize> {
        let elapsed = u64::from(elapsed_ms);
        let mut sum = 0u64;
        for (index, &phase) in self.phases.iter().enumerate() {
            sum += u64::from(phase);
            if sum > elapsed {
                return Some(index);
            }
        }
        None
    }
}

/// Canned patterns started straight from a bus topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPreset {
    /// One second on, one second off.
    Slow,
    /// Half a second on, half a second off.
    Fast,
}

impl BlinkPreset {
    pub fn pattern(self) -> BlinkPattern {
        match self {
            Self::Slow => BlinkPattern::symmetric(SLOW_PHASE_MS),
            Self::Fast => BlinkPattern::symmetric(FAST_PHASE_MS),
        }
    }
}

impl Default for BlinkPattern {
    fn default() -> Self {
        let mut phases = Vec::new();
        for ms in DEFAULT_PHASES {
            let _ = phases.push(ms);
        }
        Self { phases }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Engine
// ═══════════════════════════════════════════════════════════════

/// Outcome of a single [`BlinkEngine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    /// No session running.
    Idle,
    /// Still in the phase that was already applied.
    Holding,
    /// Entered a new phase; the line was driven to this level.
    Switched(bool),
    /// The session ran out of time and the output was restored.
    Finished,
}

/// Bookkeeping for a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Session {
    started_ms: u32,
    /// Start of the current lap.
    phase_reference_ms: u32,
    /// Level last driven; `None` until the first advance.
    applied: Option<bool>,
}

/// Idle → Active → Idle blink sequencer.
#[derive(Debug, Clone)]
pub struct BlinkEngine {
    pattern: BlinkPattern,
    session_secs: u16,
    session: Option<Session>,
}

impl BlinkEngine {
    pub fn new(pattern: BlinkPattern, session_secs: u16) -> Self {
        Self {
            pattern,
            session_secs,
            session: None,
        }
    }

    /// Replace the pattern.  Does not start a session; a running session
    /// continues on the new pattern from its current lap reference.
    pub fn set_pattern(&mut self, text: &str) {
        self.load_pattern(BlinkPattern::parse(text));
    }

    /// Like [`set_pattern`](Self::set_pattern) for an already built pattern.
    pub fn load_pattern(&mut self, pattern: BlinkPattern) {
        self.pattern = pattern;
        info!("blink: pattern set to {:?}", self.pattern.phases());
    }

    /// Apply a raw session-duration parameter (seconds).  Unparsable
    /// input keeps the previous duration.
    pub fn set_session_duration(&mut self, raw: Option<&str>) {
        match parse_bounded_decimal(raw, LONG_FIELD_DIGITS) {
            Ok(secs) => self.session_secs = secs,
            Err(e) => debug!("blink: ignoring session duration {:?} ({})", raw, e),
        }
    }

    /// Begin (or restart) a session at `now_ms`.  The line is first
    /// driven on the next [`advance`](Self::advance).
    pub fn start(&mut self, now_ms: u32) {
        if self.session.is_some() {
            debug!("blink: restarting running session");
        }
        info!(
            "blink: start {} phase(s) for {}s",
            self.pattern.phases().len(),
            self.session_secs
        );
        self.session = Some(Session {
            started_ms: now_ms,
            phase_reference_ms: now_ms,
            applied: None,
        });
    }

    /// End the session and put the line back where the relay state says
    /// it belongs.  Returns `false` if no session was running.
    ///
    /// The restore level uses the distance heuristic: brightness closer
    /// to `min` than to `max` restores LOW, anything else restores HIGH.
    pub fn stop(&mut self, relay: &Relay, out: &mut impl OutputPort) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        let b = i16::from(relay.brightness());
        let min = i16::from(relay.bounds().min());
        let max = i16::from(relay.bounds().max());
        let restore_high = (b - min) >= (max - b);
        info!("blink: stop, restoring {}", if restore_high { "on" } else { "off" });
        out.drive(restore_high);
        true
    }

    /// Reconcile the line with the pattern at `now_ms`.
    pub fn advance(&mut self, now_ms: u32, relay: &Relay, out: &mut impl OutputPort) -> BlinkStep {
        let Some(mut session) = self.session else {
            return BlinkStep::Idle;
        };

        let limit_ms = u32::from(self.session_secs) * 1000;
        if now_ms.wrapping_sub(session.started_ms) > limit_ms {
            self.stop(relay, out);
            return BlinkStep::Finished;
        }

        let lap = self.pattern.lap_ms();
        if lap == 0 {
            // Unreachable with a validated pattern; never spin on it.
            self.stop(relay, out);
            return BlinkStep::Finished;
        }

        let mut elapsed = now_ms.wrapping_sub(session.phase_reference_ms);
        if u64::from(elapsed) >= lap {
            // Jump whole laps at once; identical to stepping one lap at a time.
            let skipped = (u64::from(elapsed) / lap * lap) as u32;
            session.phase_reference_ms = session.phase_reference_ms.wrapping_add(skipped);
            elapsed -= skipped;
        }

        let step = match self.pattern.phase_at(elapsed) {
            Some(phase) => {
                let light_on = phase % 2 == 0;
                if session.applied == Some(light_on) {
                    BlinkStep::Holding
                } else {
                    debug!("blink: phase {} -> {}", phase, if light_on { "on" } else { "off" });
                    out.drive(light_on);
                    session.applied = Some(light_on);
                    BlinkStep::Switched(light_on)
                }
            }
            None => BlinkStep::Holding,
        };

        self.session = Some(session);
        step
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn pattern(&self) -> &BlinkPattern {
        &self.pattern
    }

    pub fn session_secs(&self) -> u16 {
        self.session_secs
    }

    /// Level most recently driven by the running session.
    pub fn applied(&self) -> Option<bool> {
        self.session.and_then(|s| s.applied)
    }

    /// Start of the lap the running session is in.
    pub fn phase_reference_ms(&self) -> Option<u32> {
        self.session.map(|s| s.phase_reference_ms)
    }
}
