//! One-shot hardware peripheral initialization and GPIO shims.
//!
//! Configures input/output directions for every sensor and alarm pin using
//! raw ESP-IDF sys calls, called once from `main()` before the event loop
//! starts.  Also hosts the low-level GPIO helpers the drivers share:
//! level read/write, microsecond delay, and the bounded pulse-width timer
//! the ranging sensors rely on.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

// ── Initialization ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the event loop; single-threaded.
    unsafe {
        init_inputs()?;
        init_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_inputs() -> Result<(), HwInitError> {
    let floating = [
        pins::ECHO1_GPIO,
        pins::ECHO3_GPIO,
        pins::ECHO4_GPIO,
        pins::PIR1_GPIO,
        pins::PIR2_GPIO,
        pins::PIR3_GPIO,
        pins::PIR4_GPIO,
    ];
    for gpio in floating {
        let rc = unsafe { gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_INPUT) };
        if rc != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(rc));
        }
    }

    // Reed loop: input with internal pull-up (NC loop pulls it low-capable;
    // an intact loop reads HIGH, a broken loop reads LOW).
    let rc = unsafe { gpio_set_direction(pins::REED_GPIO, gpio_mode_t_GPIO_MODE_INPUT) };
    if rc != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(rc));
    }
    let rc = unsafe { gpio_set_pull_mode(pins::REED_GPIO, gpio_pull_mode_t_GPIO_PULLUP_ONLY) };
    if rc != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(rc));
    }

    info!("hw_init: inputs configured (3x echo, 4x PIR, reed pull-up)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_outputs() -> Result<(), HwInitError> {
    let outputs = [
        pins::TRIG1_GPIO,
        pins::TRIG3_GPIO,
        pins::TRIG4_GPIO,
        pins::BUZZER_GPIO,
        pins::LIGHT1_GPIO,
        pins::LIGHT2_GPIO,
        pins::LIGHT3_GPIO,
        pins::LIGHT4_GPIO,
    ];
    for gpio in outputs {
        let rc = unsafe { gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT) };
        if rc != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(rc));
        }
        // All outputs start low: lights and siren off, triggers idle.
        let rc = unsafe { gpio_set_level(gpio as u32, 0) };
        if rc != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(rc));
        }
    }

    info!("hw_init: outputs configured (3x trig, 4x light, buzzer) and driven low");
    Ok(())
}

// ── GPIO level shims ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(gpio: i32) -> bool {
    // SAFETY: level reads are always safe after init_peripherals().
    unsafe { gpio_get_level(gpio as u32) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_gpio: i32) -> bool {
    false
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(gpio: i32, high: bool) {
    // SAFETY: level writes are always safe after init_peripherals().
    let _ = unsafe { gpio_set_level(gpio as u32, u32::from(high)) };
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_gpio: i32, _high: bool) {}

// ── Timing helpers ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: busy-wait ROM delay, safe from any context.
    unsafe { esp_rom_delay_us(us) };
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}

/// Measure the width of the next `high` pulse on `gpio` in µs, bounded by
/// `timeout_us` for both the leading-edge wait and the pulse itself.
/// Returns `None` on timeout.
#[cfg(target_os = "espidf")]
pub fn pulse_in_us(gpio: i32, high: bool, timeout_us: u32) -> Option<u32> {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    let now = || unsafe { esp_timer_get_time() } as u64;
    let deadline = now() + u64::from(timeout_us);

    // Wait for the leading edge.
    while gpio_read(gpio) != high {
        if now() >= deadline {
            return None;
        }
    }
    let start = now();

    // Time the pulse.
    while gpio_read(gpio) == high {
        if now() >= deadline {
            return None;
        }
    }
    Some((now() - start) as u32)
}

#[cfg(not(target_os = "espidf"))]
pub fn pulse_in_us(_gpio: i32, _high: bool, _timeout_us: u32) -> Option<u32> {
    None
}
