//! FarmGuard: perimeter security controller for a fenced farm plot.
//!
//! Watches four perimeter sides with ultrasonic ranging and PIR motion
//! sensors plus a normally-closed reed loop on the gate.  Intrusions drive
//! per-side flood lights and a shared siren through a tick-driven alarm
//! sequencer, and the serious ones (side-4 proximity, gate breach) go out
//! as SMS alerts over a GSM modem.
//!
//! The crate is split hexagonally: `perimeter` holds the pure decision and
//! sequencing logic, `app` the orchestration behind port traits, and the
//! `sensors`/`drivers`/`notify`/`adapters` modules the hardware-facing
//! implementations.  Everything except the ESP-IDF glue compiles and tests
//! on the host.

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod notify;
pub mod perimeter;
pub mod pins;
pub mod sensors;
