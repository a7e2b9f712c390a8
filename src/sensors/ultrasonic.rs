//! HC-SR04 ultrasonic ranging sensor driver.
//!
//! A 10 µs trigger pulse starts a ranging cycle; the sensor answers with an
//! echo pulse whose width is the round-trip time of flight.  Width is
//! converted to centimetres with the speed-of-sound constant 0.034 cm/µs,
//! halved for the round trip.
//!
//! The echo wait is bounded by [`ECHO_TIMEOUT_US`]: a silent perimeter
//! produces no echo, so a timeout is a normal absent reading (`None`), not
//! an error.  No retries; a single reading is acted on immediately.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the trigger GPIO and times the echo pulse via
//! hw_init helpers.  On host/test: reads a per-channel simulated distance.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Speed of sound at the sensor, cm per µs.
pub const SOUND_CM_PER_US: f32 = 0.034;

/// Upper bound on the echo wait (~5 m round trip).  Past this the target is
/// out of range for every threshold anyway.
pub const ECHO_TIMEOUT_US: u32 = 30_000;

/// Number of ranging channels on the board (sides 1, 3, 4).
pub const CHANNELS: usize = 3;

/// Sim sentinel for "no echo".
#[cfg(not(target_os = "espidf"))]
const SIM_NO_ECHO: u32 = u32::MAX;

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_CM: [AtomicU32; CHANNELS] = [
    AtomicU32::new(SIM_NO_ECHO),
    AtomicU32::new(SIM_NO_ECHO),
    AtomicU32::new(SIM_NO_ECHO),
];

/// Set the simulated distance for a ranging channel (`None` = no echo).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance(channel: usize, distance_cm: Option<u16>) {
    let raw = distance_cm.map_or(SIM_NO_ECHO, u32::from);
    SIM_DISTANCE_CM[channel].store(raw, Ordering::Relaxed);
}

/// Convert an echo pulse width to centimetres (round trip halved).
pub fn echo_us_to_cm(echo_us: u32) -> u16 {
    (echo_us as f32 * SOUND_CM_PER_US / 2.0) as u16
}

pub struct UltrasonicSensor {
    _trig_gpio: i32,
    _echo_gpio: i32,
    /// Ranging channel index, used to address the sim value off-target.
    channel: usize,
}

impl UltrasonicSensor {
    pub fn new(trig_gpio: i32, echo_gpio: i32, channel: usize) -> Self {
        Self {
            _trig_gpio: trig_gpio,
            _echo_gpio: echo_gpio,
            channel,
        }
    }

    /// Run one ranging cycle.  `Ok(None)` means no echo within the timeout.
    pub fn measure(&mut self) -> Result<Option<u16>, SensorError> {
        self.measure_impl()
    }

    #[cfg(target_os = "espidf")]
    fn measure_impl(&mut self) -> Result<Option<u16>, SensorError> {
        // 2 µs settle low, 10 µs trigger high.
        hw_init::gpio_write(self._trig_gpio, false);
        hw_init::delay_us(2);
        hw_init::gpio_write(self._trig_gpio, true);
        hw_init::delay_us(10);
        hw_init::gpio_write(self._trig_gpio, false);

        Ok(hw_init::pulse_in_us(self._echo_gpio, true, ECHO_TIMEOUT_US).map(echo_us_to_cm))
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure_impl(&mut self) -> Result<Option<u16>, SensorError> {
        match SIM_DISTANCE_CM[self.channel].load(Ordering::Relaxed) {
            SIM_NO_ECHO => Ok(None),
            raw => Ok(Some(raw as u16)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_conversion_halves_round_trip() {
        // 588 µs round trip ≈ 10 cm target (conversion truncates).
        assert_eq!(echo_us_to_cm(588), 9);
        assert_eq!(echo_us_to_cm(1000), 17);
        assert_eq!(echo_us_to_cm(0), 0);
    }

    #[test]
    fn timeout_is_an_absent_reading() {
        let mut sensor = UltrasonicSensor::new(0, 0, 0);
        sim_set_distance(0, None);
        assert_eq!(sensor.measure().unwrap(), None);
    }

    #[test]
    fn sim_distance_round_trips() {
        let mut sensor = UltrasonicSensor::new(0, 0, 1);
        sim_set_distance(1, Some(42));
        assert_eq!(sensor.measure().unwrap(), Some(42));
        sim_set_distance(1, None);
        assert_eq!(sensor.measure().unwrap(), None);
    }
}
