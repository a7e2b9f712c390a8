//! Shared siren driver.
//!
//! One buzzer serves all four sides; the sequencer arbitrates who holds it.
//! Turning it off is idempotent: the service drives it low at the end of
//! every quiet cycle regardless of prior state.

use crate::drivers::hw_init;

pub struct Buzzer {
    gpio: i32,
    on: bool,
}

impl Buzzer {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
