//! Production adapter binding the port traits to the real drivers.

use crate::app::ports::{AlarmPort, PerimeterPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::lights::LightBank;
use crate::perimeter::{PerimeterSnapshot, Side};
use crate::pins;
use crate::sensors::{self, SensorHub};

/// Owns the sensor hub and both actuator drivers.
pub struct HardwareAdapter {
    hub: SensorHub,
    lights: LightBank,
    buzzer: Buzzer,
}

impl HardwareAdapter {
    pub fn new(hub: SensorHub, lights: LightBank, buzzer: Buzzer) -> Self {
        Self {
            hub,
            lights,
            buzzer,
        }
    }

    /// Wire everything up from the fixed pin table.
    pub fn from_pins() -> Self {
        Self::new(
            sensors::hub_from_pins(),
            LightBank::new([
                pins::LIGHT1_GPIO,
                pins::LIGHT2_GPIO,
                pins::LIGHT3_GPIO,
                pins::LIGHT4_GPIO,
            ]),
            Buzzer::new(pins::BUZZER_GPIO),
        )
    }
}

impl PerimeterPort for HardwareAdapter {
    fn read_snapshot(&mut self) -> PerimeterSnapshot {
        self.hub.read_all()
    }
}

impl AlarmPort for HardwareAdapter {
    fn set_light(&mut self, side: Side, on: bool) {
        self.lights.set(side, on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn all_off(&mut self) {
        self.lights.all_off();
        self.buzzer.set(false);
    }
}
