//! Perimeter domain types and decision logic.
//!
//! Everything in this module is transient: a [`PerimeterSnapshot`] is
//! produced fresh by the sensor hub each poll cycle, evaluated into four
//! [`AlarmDecision`]s, and discarded.  The only state that outlives a cycle
//! is the alarm sequence currently running on the
//! [`AlarmSequencer`](sequence::AlarmSequencer).

pub mod decision;
pub mod sequence;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Side identity
// ---------------------------------------------------------------------------

/// One of the four monitored perimeter faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
}

impl Side {
    /// All sides in evaluation order.
    pub const ALL: [Side; 4] = [Side::One, Side::Two, Side::Three, Side::Four];

    /// Zero-based array index for this side.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human side number (1–4), for logs and SMS texts.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Convert a zero-based index back to a `Side`.  Out-of-range indices
    /// fall back to `One` in release builds.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Three,
            3 => Self::Four,
            _ => {
                debug_assert!(false, "invalid side index: {idx}");
                Self::One
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Per-cycle readings
// ---------------------------------------------------------------------------

/// A point-in-time reading for one side, produced fresh each poll cycle.
#[derive(Debug, Clone, Copy)]
pub struct SideReading {
    pub side: Side,
    /// Ranging result in cm.  `None` when the side has no ultrasonic sensor
    /// or the echo timed out (no detection).
    pub distance_cm: Option<u16>,
    /// PIR motion detected this cycle.
    pub motion: bool,
}

/// Gate reed-loop state for one cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateState {
    /// The normally-closed loop has been opened.
    pub circuit_broken: bool,
}

/// A snapshot of every perimeter sensor, one per poll cycle.
#[derive(Debug, Clone, Copy)]
pub struct PerimeterSnapshot {
    pub sides: [SideReading; 4],
    pub gate: GateState,
}

impl Default for PerimeterSnapshot {
    fn default() -> Self {
        let sides = Side::ALL.map(|side| SideReading {
            side,
            distance_cm: None,
            motion: false,
        });
        Self {
            sides,
            gate: GateState::default(),
        }
    }
}

impl PerimeterSnapshot {
    pub fn side(&self, side: Side) -> &SideReading {
        &self.sides[side.index()]
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Why a side entered the triggered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Ranging reading below the side's proximity threshold.
    Proximity,
    /// PIR motion on that side.
    Motion,
    /// The gate loop is broken; all sides are forced active.
    GateBreach,
}

impl core::fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Proximity => write!(f, "proximity"),
            Self::Motion => write!(f, "motion"),
            Self::GateBreach => write!(f, "gate breach"),
        }
    }
}

/// Per-side verdict for one cycle.  Drives output side-effects only.
#[derive(Debug, Clone, Copy)]
pub struct AlarmDecision {
    pub side: Side,
    pub activate: bool,
    /// Dominant trigger reason when active (Proximity > Motion > GateBreach).
    pub reason: Option<TriggerReason>,
}
