//! PIR motion sensor driver.
//!
//! HC-SR501 style passive-infrared sensors output a digital HIGH while
//! motion is detected.  One single-sample read per poll cycle; debouncing
//! is the PIR module's own hold time.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level via hw_init.  On host/test: reads a
//! per-side simulated level (default: no motion).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::SensorError;
use crate::perimeter::Side;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_MOTION: [AtomicBool; 4] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];

/// Set the simulated PIR level for one side.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(side: Side, detected: bool) {
    SIM_MOTION[side.index()].store(detected, Ordering::Relaxed);
}

pub struct MotionSensor {
    _gpio: i32,
    side: Side,
}

impl MotionSensor {
    pub fn new(gpio: i32, side: Side) -> Self {
        Self { _gpio: gpio, side }
    }

    /// Single-sample digital read: `true` = motion detected.
    pub fn read(&mut self) -> Result<bool, SensorError> {
        self.read_impl()
    }

    #[cfg(target_os = "espidf")]
    fn read_impl(&mut self) -> Result<bool, SensorError> {
        Ok(hw_init::gpio_read(self._gpio))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_impl(&mut self) -> Result<bool, SensorError> {
        Ok(SIM_MOTION[self.side.index()].load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_level_round_trips() {
        let mut pir = MotionSensor::new(0, Side::Two);
        sim_set_motion(Side::Two, true);
        assert!(pir.read().unwrap());
        sim_set_motion(Side::Two, false);
        assert!(!pir.read().unwrap());
    }
}
