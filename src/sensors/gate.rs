//! Gate security reed-loop sensor.
//!
//! A magnetic reed switch (or a wire looped through the gate) forms a
//! normally-closed circuit on a pulled-up input.  Polarity is fixed by the
//! board wiring and must not be "corrected": **a LOW read means the loop
//! has been broken**.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the pulled-up GPIO via hw_init.  On host/test: reads a
//! simulated level (default HIGH = intact).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::SensorError;
use crate::perimeter::GateState;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Simulated raw input level (true = HIGH).
#[cfg(not(target_os = "espidf"))]
static SIM_REED_LEVEL: AtomicBool = AtomicBool::new(true);

/// Set the simulated reed input level (`false` = LOW = loop broken).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reed_level(level_high: bool) {
    SIM_REED_LEVEL.store(level_high, Ordering::Relaxed);
}

pub struct GateSensor {
    _gpio: i32,
}

impl GateSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// Read the loop state.  Broken ⇔ the input level is LOW (NC loop).
    pub fn read(&mut self) -> Result<GateState, SensorError> {
        let level_high = self.read_level()?;
        Ok(GateState {
            circuit_broken: !level_high,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&mut self) -> Result<bool, SensorError> {
        Ok(hw_init::gpio_read(self._gpio))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&mut self) -> Result<bool, SensorError> {
        Ok(SIM_REED_LEVEL.load(Ordering::Relaxed))
    }
}
