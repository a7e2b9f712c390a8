//! Actuator drivers and low-level hardware shims.

pub mod buzzer;
pub mod hw_init;
pub mod lights;
