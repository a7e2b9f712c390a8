//! Property tests for the decision logic and the alarm sequencer.

use proptest::prelude::*;

use farmguard::config::GuardConfig;
use farmguard::perimeter::decision;
use farmguard::perimeter::sequence::{AlarmSequencer, OutputFrame, SequenceKind};
use farmguard::perimeter::{PerimeterSnapshot, Side, TriggerReason};

fn snapshot_strategy() -> impl Strategy<Value = PerimeterSnapshot> {
    (
        prop::array::uniform4(prop::option::of(0u16..200)),
        prop::array::uniform4(any::<bool>()),
        any::<bool>(),
    )
        .prop_map(|(distances, motions, broken)| {
            let mut snap = PerimeterSnapshot::default();
            for i in 0..4 {
                snap.sides[i].distance_cm = distances[i];
                snap.sides[i].motion = motions[i];
            }
            snap.gate.circuit_broken = broken;
            snap
        })
}

fn kind_strategy() -> impl Strategy<Value = SequenceKind> {
    prop_oneof![
        Just(SequenceKind::Side(Side::One)),
        Just(SequenceKind::Side(Side::Two)),
        Just(SequenceKind::Side(Side::Three)),
        Just(SequenceKind::Side(Side::Four)),
        Just(SequenceKind::GateBreach),
    ]
}

proptest! {
    /// A side activates exactly when one of its own conditions holds or
    /// the gate is broken.
    #[test]
    fn activation_is_or_of_conditions(snap in snapshot_strategy()) {
        let config = GuardConfig::default();
        let decisions = decision::evaluate(&snap, &config);

        for d in &decisions {
            let reading = snap.side(d.side);
            let proximity = match (reading.distance_cm, config.threshold_for(d.side)) {
                (Some(dist), Some(threshold)) => dist < threshold,
                _ => false,
            };
            let expected = proximity || reading.motion || snap.gate.circuit_broken;
            prop_assert_eq!(d.activate, expected);
            prop_assert_eq!(d.reason.is_some(), expected);
        }
    }

    /// Evaluation is pure: the same snapshot always yields the same verdicts.
    #[test]
    fn evaluation_is_deterministic(snap in snapshot_strategy()) {
        let config = GuardConfig::default();
        let a = decision::evaluate(&snap, &config);
        let b = decision::evaluate(&snap, &config);
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.activate, y.activate);
            prop_assert_eq!(x.reason, y.reason);
        }
    }

    /// The dominant reason respects Proximity > Motion > GateBreach.
    #[test]
    fn reason_priority_holds(snap in snapshot_strategy()) {
        let config = GuardConfig::default();
        for d in decision::evaluate(&snap, &config) {
            let reading = snap.side(d.side);
            let proximity = match (reading.distance_cm, config.threshold_for(d.side)) {
                (Some(dist), Some(threshold)) => dist < threshold,
                _ => false,
            };
            match d.reason {
                Some(TriggerReason::Proximity) => prop_assert!(proximity),
                Some(TriggerReason::Motion) => {
                    prop_assert!(reading.motion && !proximity);
                }
                Some(TriggerReason::GateBreach) => {
                    prop_assert!(snap.gate.circuit_broken && !proximity && !reading.motion);
                }
                None => prop_assert!(!d.activate),
            }
        }
    }

    /// The SMS-worthy side-4 condition ignores motion and the gate.
    #[test]
    fn side4_alert_depends_only_on_distance(snap in snapshot_strategy()) {
        let config = GuardConfig::default();
        let expected = match (snap.side(Side::Four).distance_cm, config.threshold_for(Side::Four)) {
            (Some(dist), Some(threshold)) => dist < threshold,
            _ => false,
        };
        prop_assert_eq!(decision::side4_proximity_alert(&snap, &config), expected);
    }

    /// Any burst of requests drains: the sequencer always returns to idle
    /// within the bounded queue's worst-case playing time.
    #[test]
    fn sequencer_always_returns_to_idle(kinds in prop::collection::vec(kind_strategy(), 0..8)) {
        let config = GuardConfig::default();
        let mut seq = AlarmSequencer::new(&config);
        for kind in kinds {
            seq.request(kind);
        }

        // Worst case: four side sequences plus the gate sequence.
        let bound_ms = 4 * config.side_blink_total_ms
            + config.gate_blink_total_ms
            + config.gate_buzzer_hold_ms;
        let mut ticks = 0;
        while !seq.is_idle() {
            seq.tick(config.base_tick_ms);
            ticks += 1;
            prop_assert!(ticks * config.base_tick_ms <= bound_ms, "sequencer failed to drain");
        }
        prop_assert_eq!(seq.tick(config.base_tick_ms), OutputFrame::OFF);
    }

    /// A side sequence never lights another side's lamp.
    #[test]
    fn side_sequence_isolates_its_light(side_idx in 0usize..4) {
        let side = Side::from_index(side_idx);
        let config = GuardConfig::default();
        let mut seq = AlarmSequencer::new(&config);
        seq.request(SequenceKind::Side(side));

        while !seq.is_idle() {
            let frame = seq.tick(config.base_tick_ms);
            for other in Side::ALL {
                if other != side {
                    prop_assert!(!frame.lights[other.index()]);
                }
            }
        }
    }
}
