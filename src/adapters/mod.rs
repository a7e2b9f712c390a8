//! Adapters binding the application ports to concrete infrastructure.

pub mod hardware;
pub mod log_sink;
pub mod time;
