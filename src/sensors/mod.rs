//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every perimeter sensor and produces a fresh
//! [`PerimeterSnapshot`] each poll cycle.  An individual read failure is
//! logged and degrades to "no detection"; one flaky sensor must not stall
//! the decision loop.

pub mod gate;
pub mod motion;
pub mod ultrasonic;

use log::warn;

use crate::perimeter::{GateState, PerimeterSnapshot, Side};
use gate::GateSensor;
use motion::MotionSensor;
use ultrasonic::UltrasonicSensor;

/// Aggregates all perimeter sensors and produces a unified snapshot.
pub struct SensorHub {
    /// Ranging sensors with the side they watch (sides 1, 3 and 4).
    ranging: [(Side, UltrasonicSensor); ultrasonic::CHANNELS],
    /// PIR sensors, one per side, indexed by `Side::index()`.
    motion: [MotionSensor; 4],
    gate: GateSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main where
    /// pin ownership is established).
    pub fn new(
        ranging: [(Side, UltrasonicSensor); ultrasonic::CHANNELS],
        motion: [MotionSensor; 4],
        gate: GateSensor,
    ) -> Self {
        Self {
            ranging,
            motion,
            gate,
        }
    }

    /// Read every sensor and return a unified snapshot.
    pub fn read_all(&mut self) -> PerimeterSnapshot {
        let mut snapshot = PerimeterSnapshot::default();

        for (side, sensor) in &mut self.ranging {
            match sensor.measure() {
                Ok(distance_cm) => snapshot.sides[side.index()].distance_cm = distance_cm,
                Err(e) => warn!("side {} ranging read failed: {e}", side.number()),
            }
        }

        for (idx, pir) in self.motion.iter_mut().enumerate() {
            match pir.read() {
                Ok(detected) => snapshot.sides[idx].motion = detected,
                Err(e) => warn!("side {} PIR read failed: {e}", idx + 1),
            }
        }

        match self.gate.read() {
            Ok(state) => snapshot.gate = state,
            Err(e) => {
                warn!("gate loop read failed: {e}");
                snapshot.gate = GateState::default();
            }
        }

        snapshot
    }
}

/// Build the hub from the fixed pin table.
pub fn hub_from_pins() -> SensorHub {
    use crate::pins;

    SensorHub::new(
        [
            (
                Side::One,
                UltrasonicSensor::new(pins::TRIG1_GPIO, pins::ECHO1_GPIO, 0),
            ),
            (
                Side::Three,
                UltrasonicSensor::new(pins::TRIG3_GPIO, pins::ECHO3_GPIO, 1),
            ),
            (
                Side::Four,
                UltrasonicSensor::new(pins::TRIG4_GPIO, pins::ECHO4_GPIO, 2),
            ),
        ],
        [
            MotionSensor::new(pins::PIR1_GPIO, Side::One),
            MotionSensor::new(pins::PIR2_GPIO, Side::Two),
            MotionSensor::new(pins::PIR3_GPIO, Side::Three),
            MotionSensor::new(pins::PIR4_GPIO, Side::Four),
        ],
        GateSensor::new(pins::REED_GPIO),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the sim statics are shared process-wide, so the hub
    // scenarios run sequentially in one body.
    #[test]
    fn hub_snapshot_reflects_sim_state() {
        let mut hub = hub_from_pins();

        // Quiet perimeter.
        for ch in 0..ultrasonic::CHANNELS {
            ultrasonic::sim_set_distance(ch, None);
        }
        for side in Side::ALL {
            motion::sim_set_motion(side, false);
        }
        gate::sim_set_reed_level(true);

        let snap = hub.read_all();
        assert!(snap.sides.iter().all(|r| r.distance_cm.is_none()));
        assert!(snap.sides.iter().all(|r| !r.motion));
        assert!(!snap.gate.circuit_broken);

        // Side 3 ranging (channel 1) plus side 2 motion plus broken gate.
        ultrasonic::sim_set_distance(1, Some(6));
        motion::sim_set_motion(Side::Two, true);
        gate::sim_set_reed_level(false);

        let snap = hub.read_all();
        assert_eq!(snap.side(Side::Three).distance_cm, Some(6));
        assert_eq!(snap.side(Side::One).distance_cm, None);
        assert!(snap.side(Side::Two).motion);
        assert!(snap.gate.circuit_broken);

        // Restore quiet defaults for other tests.
        ultrasonic::sim_set_distance(1, None);
        motion::sim_set_motion(Side::Two, false);
        gate::sim_set_reed_level(true);
    }
}
