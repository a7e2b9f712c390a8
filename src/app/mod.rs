//! Application layer: port traits, events, and the guard service.

pub mod events;
pub mod ports;
pub mod service;
