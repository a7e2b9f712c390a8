//! Delay provider for the notifier's AT-command pacing.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// Blocking delay backed by the OS scheduler.  ESP-IDF maps this onto a
/// FreeRTOS task sleep, so the modem pauses do not spin the CPU.
pub struct OsDelay;

impl DelayNs for OsDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
