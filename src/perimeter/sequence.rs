//! Tick-driven alarm sequencing.
//!
//! Earlier firmware ran the blink/buzzer routines as blocking delay loops,
//! freezing sensing for the whole alarm.  Here each sequence is an explicit
//! timed-phase state machine advanced by the event loop's base tick:
//!
//! ```text
//!   Idle ──▶ SideBlink(1500 ms, buzzer held on) ──▶ Idle
//!   Idle ──▶ GateBlink(2000 ms) ──▶ GateBuzzer(2000 ms) ──▶ Idle
//! ```
//!
//! Every tick returns an [`OutputFrame`] with the desired light and buzzer
//! levels.  A running sequence is never cancelled or restarted; requests
//! arriving while one is active are queued, coalescing duplicates, so a
//! stuck-high sensor re-runs its sequence back to back rather than growing
//! the queue.

use heapless::Deque;
use log::debug;

use crate::config::GuardConfig;

use super::Side;

// ---------------------------------------------------------------------------
// Requests and output frames
// ---------------------------------------------------------------------------

/// A runnable alarm sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Single-side light blink with the shared buzzer held on.
    Side(Side),
    /// All-lights blink followed by a continuous buzzer hold.
    GateBreach,
}

/// Desired output levels for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFrame {
    pub lights: [bool; 4],
    pub buzzer: bool,
}

impl OutputFrame {
    pub const OFF: Self = Self {
        lights: [false; 4],
        buzzer: false,
    };
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    SideBlink { side: Side, elapsed_ms: u32 },
    GateBlink { elapsed_ms: u32 },
    GateBuzzer { elapsed_ms: u32 },
}

/// Shared single-channel alarm sequencer.
///
/// One sequence runs at a time (there is one buzzer and one operator
/// watching the lights); four side entries plus the gate entry bound the
/// queue.
pub struct AlarmSequencer {
    phase: Phase,
    queue: Deque<SequenceKind, 5>,

    side_blink_total_ms: u32,
    side_blink_half_ms: u32,
    gate_blink_total_ms: u32,
    gate_blink_half_ms: u32,
    gate_buzzer_hold_ms: u32,
}

impl AlarmSequencer {
    pub fn new(config: &GuardConfig) -> Self {
        Self {
            phase: Phase::Idle,
            queue: Deque::new(),
            side_blink_total_ms: config.side_blink_total_ms,
            side_blink_half_ms: config.side_blink_half_ms,
            gate_blink_total_ms: config.gate_blink_total_ms,
            gate_blink_half_ms: config.gate_blink_half_ms,
            gate_buzzer_hold_ms: config.gate_buzzer_hold_ms,
        }
    }

    /// Request a sequence.  Starts immediately when idle; otherwise the
    /// request is queued unless the same sequence is already active or
    /// pending (coalesced).  Returns `true` if the request was accepted.
    pub fn request(&mut self, kind: SequenceKind) -> bool {
        if self.active_kind() == Some(kind) || self.queue.iter().any(|&k| k == kind) {
            return false;
        }
        if matches!(self.phase, Phase::Idle) {
            self.start(kind);
            return true;
        }
        match self.queue.push_back(kind) {
            Ok(()) => true,
            Err(_) => {
                // Cannot happen with coalescing (5 distinct kinds, 5 slots).
                debug!("sequence queue full, dropping {kind:?}");
                false
            }
        }
    }

    /// Advance by `delta_ms` and return the output levels for the tick that
    /// just started.  A fresh sequence therefore begins with its first
    /// on-phase: lights turn on immediately, then blink.
    pub fn tick(&mut self, delta_ms: u32) -> OutputFrame {
        if matches!(self.phase, Phase::Idle) {
            self.start_next();
        }
        let frame = self.frame();
        self.advance(delta_ms);
        frame
    }

    /// The sequence currently holding the outputs, if any.
    pub fn active_kind(&self) -> Option<SequenceKind> {
        match self.phase {
            Phase::Idle => None,
            Phase::SideBlink { side, .. } => Some(SequenceKind::Side(side)),
            Phase::GateBlink { .. } | Phase::GateBuzzer { .. } => Some(SequenceKind::GateBreach),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle) && self.queue.is_empty()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn start(&mut self, kind: SequenceKind) {
        debug!("alarm sequence start: {kind:?}");
        self.phase = match kind {
            SequenceKind::Side(side) => Phase::SideBlink {
                side,
                elapsed_ms: 0,
            },
            SequenceKind::GateBreach => Phase::GateBlink { elapsed_ms: 0 },
        };
    }

    fn start_next(&mut self) {
        if let Some(kind) = self.queue.pop_front() {
            self.start(kind);
        }
    }

    fn advance(&mut self, delta_ms: u32) {
        match self.phase {
            Phase::Idle => {}
            Phase::SideBlink { side, elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                if elapsed_ms >= self.side_blink_total_ms {
                    self.phase = Phase::Idle;
                    self.start_next();
                } else {
                    self.phase = Phase::SideBlink { side, elapsed_ms };
                }
            }
            Phase::GateBlink { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                if elapsed_ms >= self.gate_blink_total_ms {
                    self.phase = Phase::GateBuzzer { elapsed_ms: 0 };
                } else {
                    self.phase = Phase::GateBlink { elapsed_ms };
                }
            }
            Phase::GateBuzzer { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                if elapsed_ms >= self.gate_buzzer_hold_ms {
                    self.phase = Phase::Idle;
                    self.start_next();
                } else {
                    self.phase = Phase::GateBuzzer { elapsed_ms };
                }
            }
        }
    }

    fn frame(&self) -> OutputFrame {
        let mut frame = OutputFrame::OFF;
        match self.phase {
            Phase::Idle => {}
            Phase::SideBlink { side, elapsed_ms } => {
                let period = 2 * self.side_blink_half_ms;
                frame.lights[side.index()] = elapsed_ms % period < self.side_blink_half_ms;
                // The shared buzzer is held on for the whole side window.
                frame.buzzer = true;
            }
            Phase::GateBlink { elapsed_ms } => {
                let period = 2 * self.gate_blink_half_ms;
                let on = elapsed_ms % period < self.gate_blink_half_ms;
                frame.lights = [on; 4];
            }
            Phase::GateBuzzer { .. } => {
                frame.buzzer = true;
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perimeter::Side;

    const TICK: u32 = 50;

    fn make() -> AlarmSequencer {
        AlarmSequencer::new(&GuardConfig::default())
    }

    /// Collect frames until the sequencer goes idle.
    fn run_to_idle(seq: &mut AlarmSequencer) -> Vec<OutputFrame> {
        let mut frames = Vec::new();
        loop {
            let frame = seq.tick(TICK);
            if frame == OutputFrame::OFF && seq.is_idle() {
                break;
            }
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn idle_outputs_nothing() {
        let mut seq = make();
        assert_eq!(seq.tick(TICK), OutputFrame::OFF);
        assert!(seq.is_idle());
    }

    #[test]
    fn side_sequence_lasts_exactly_1500ms() {
        let mut seq = make();
        assert!(seq.request(SequenceKind::Side(Side::One)));
        let frames = run_to_idle(&mut seq);
        assert_eq!(frames.len() as u32 * TICK, 1500);
    }

    #[test]
    fn side_sequence_holds_buzzer_and_blinks_light() {
        let mut seq = make();
        seq.request(SequenceKind::Side(Side::Three));
        let frames = run_to_idle(&mut seq);

        assert!(frames.iter().all(|f| f.buzzer), "buzzer held for the window");
        // 50 ms on / 50 ms off starting high.
        for (i, f) in frames.iter().enumerate() {
            assert_eq!(f.lights[Side::Three.index()], i % 2 == 0);
            // Only the triggered side's light participates.
            assert!(!f.lights[Side::One.index()]);
            assert!(!f.lights[Side::Two.index()]);
            assert!(!f.lights[Side::Four.index()]);
        }
        // Final state: light extinguished, buzzer off.
        assert_eq!(seq.tick(TICK), OutputFrame::OFF);
    }

    #[test]
    fn gate_sequence_blinks_then_holds_buzzer() {
        let mut seq = make();
        seq.request(SequenceKind::GateBreach);
        let frames = run_to_idle(&mut seq);
        assert_eq!(frames.len() as u32 * TICK, 4000);

        let (blink, hold) = frames.split_at((2000 / TICK) as usize);
        // 100 ms on / 100 ms off on all four lights, buzzer silent.
        for (i, f) in blink.iter().enumerate() {
            let on = (i as u32 * TICK) % 200 < 100;
            assert_eq!(f.lights, [on; 4]);
            assert!(!f.buzzer);
        }
        // Then 2000 ms of continuous buzzer, lights off.
        for f in hold {
            assert_eq!(f.lights, [false; 4]);
            assert!(f.buzzer);
        }
    }

    #[test]
    fn duplicate_request_coalesces() {
        let mut seq = make();
        assert!(seq.request(SequenceKind::Side(Side::One)));
        assert!(!seq.request(SequenceKind::Side(Side::One)));
        seq.tick(TICK);
        assert!(!seq.request(SequenceKind::Side(Side::One)));
    }

    #[test]
    fn queued_sequences_run_back_to_back() {
        let mut seq = make();
        seq.request(SequenceKind::Side(Side::One));
        seq.request(SequenceKind::Side(Side::Two));

        let mut side1_ticks = 0u32;
        while seq.active_kind() == Some(SequenceKind::Side(Side::One)) {
            seq.tick(TICK);
            side1_ticks += 1;
        }
        assert_eq!(side1_ticks * TICK, 1500);
        assert_eq!(seq.active_kind(), Some(SequenceKind::Side(Side::Two)));
    }

    #[test]
    fn active_sequence_is_never_cancelled() {
        let mut seq = make();
        seq.request(SequenceKind::Side(Side::Four));
        seq.tick(TICK);
        // A gate breach mid-sequence queues; it does not preempt.
        assert!(seq.request(SequenceKind::GateBreach));
        assert_eq!(seq.active_kind(), Some(SequenceKind::Side(Side::Four)));

        while seq.active_kind() == Some(SequenceKind::Side(Side::Four)) {
            seq.tick(TICK);
        }
        assert_eq!(seq.active_kind(), Some(SequenceKind::GateBreach));
    }

    #[test]
    fn re_request_after_completion_restarts() {
        let mut seq = make();
        seq.request(SequenceKind::Side(Side::One));
        let _ = run_to_idle(&mut seq);
        assert!(seq.request(SequenceKind::Side(Side::One)));
        assert_eq!(seq.active_kind(), Some(SequenceKind::Side(Side::One)));
    }
}
