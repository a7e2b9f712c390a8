//! Pure per-cycle decision evaluation.
//!
//! Each side's [`AlarmDecision`] is a function of that side's reading plus
//! the gate state, nothing else.  A broken gate loop forces every side into
//! the triggered state regardless of its own readings.  Absent distance
//! readings (no ranging sensor, or echo timeout) never compare below a
//! threshold.

use crate::config::GuardConfig;

use super::{AlarmDecision, GateState, PerimeterSnapshot, Side, SideReading, TriggerReason};

/// Evaluate one side against its proximity threshold and the gate state.
pub fn evaluate_side(
    reading: &SideReading,
    gate: &GateState,
    threshold_cm: Option<u16>,
) -> AlarmDecision {
    let proximity = match (reading.distance_cm, threshold_cm) {
        (Some(d), Some(t)) => d < t,
        _ => false,
    };
    let motion = reading.motion;
    let breach = gate.circuit_broken;

    // Reporting priority only; activation is the OR of all three.
    let reason = if proximity {
        Some(TriggerReason::Proximity)
    } else if motion {
        Some(TriggerReason::Motion)
    } else if breach {
        Some(TriggerReason::GateBreach)
    } else {
        None
    };

    AlarmDecision {
        side: reading.side,
        activate: reason.is_some(),
        reason,
    }
}

/// Evaluate the whole perimeter for one cycle.
pub fn evaluate(snapshot: &PerimeterSnapshot, config: &GuardConfig) -> [AlarmDecision; 4] {
    Side::ALL.map(|side| {
        evaluate_side(
            snapshot.side(side),
            &snapshot.gate,
            config.threshold_for(side),
        )
    })
}

/// True iff side 4's ranging reading alone is below its threshold this
/// cycle.  Deliberately independent of side 4's PIR: only the proximity
/// check on side 4 notifies the owner.
pub fn side4_proximity_alert(snapshot: &PerimeterSnapshot, config: &GuardConfig) -> bool {
    match (
        snapshot.side(Side::Four).distance_cm,
        config.threshold_for(Side::Four),
    ) {
        (Some(d), Some(t)) => d < t,
        _ => false,
    }
}
