//! Per-side alarm light driver.
//!
//! Four discrete flood lights, one per perimeter side, switched through
//! driver transistors on plain GPIO outputs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO levels via hw_init.  On host/test: tracks
//! state in-memory only.

use crate::drivers::hw_init;
use crate::perimeter::Side;

pub struct LightBank {
    gpios: [i32; 4],
    current: [bool; 4],
}

impl LightBank {
    pub fn new(gpios: [i32; 4]) -> Self {
        Self {
            gpios,
            current: [false; 4],
        }
    }

    pub fn set(&mut self, side: Side, on: bool) {
        hw_init::gpio_write(self.gpios[side.index()], on);
        self.current[side.index()] = on;
    }

    /// Apply a whole frame at once (sequencer output).
    pub fn apply(&mut self, levels: [bool; 4]) {
        for side in Side::ALL {
            self.set(side, levels[side.index()]);
        }
    }

    pub fn all_off(&mut self) {
        self.apply([false; 4]);
    }

    pub fn current(&self) -> [bool; 4] {
        self.current
    }
}
