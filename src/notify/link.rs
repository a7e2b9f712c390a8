//! Byte-oriented serial link to the GSM modem.
//!
//! The notifier only needs two primitives: a blocking write and a
//! non-blocking drain of whatever response bytes the modem has queued.
//! Tests substitute a recording mock; on ESP-IDF the link is a UART
//! configured from the pin table at the modem's fixed 9600 baud.

use crate::error::NotifyError;

/// Transport seam between the notifier and the modem.
pub trait SerialLink {
    /// Write all bytes to the modem.
    fn write(&mut self, bytes: &[u8]) -> Result<(), NotifyError>;

    /// Move any pending response bytes into `buf` without blocking.
    /// Returns the number of bytes read (0 when the modem is silent).
    fn drain(&mut self, buf: &mut [u8]) -> usize;
}

// ── ESP-IDF UART implementation ───────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp_uart::GsmUart;

#[cfg(target_os = "espidf")]
mod esp_uart {
    use esp_idf_svc::sys::*;
    use log::info;

    use super::SerialLink;
    use crate::error::{Error, NotifyError};

    const RX_BUFFER_BYTES: i32 = 256;

    /// Raw-sys UART link to the GSM modem.
    pub struct GsmUart {
        port: u32,
    }

    impl GsmUart {
        /// Install and configure the UART driver.  Call once at boot.
        pub fn new(port: u32, tx_gpio: i32, rx_gpio: i32, baud: u32) -> Result<Self, Error> {
            let config = uart_config_t {
                baud_rate: baud as i32,
                data_bits: uart_word_length_t_UART_DATA_8_BITS,
                parity: uart_parity_t_UART_PARITY_DISABLE,
                stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
                flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
                ..Default::default()
            };

            // SAFETY: called once at boot before the event loop starts.
            let rc = unsafe { uart_param_config(port as i32, &config) };
            if rc != ESP_OK {
                return Err(Error::Init("GSM UART param config failed"));
            }
            let rc = unsafe {
                uart_set_pin(
                    port as i32,
                    tx_gpio,
                    rx_gpio,
                    UART_PIN_NO_CHANGE,
                    UART_PIN_NO_CHANGE,
                )
            };
            if rc != ESP_OK {
                return Err(Error::Init("GSM UART pin mux failed"));
            }
            let rc = unsafe {
                uart_driver_install(port as i32, RX_BUFFER_BYTES, 0, 0, core::ptr::null_mut(), 0)
            };
            if rc != ESP_OK {
                return Err(Error::Init("GSM UART driver install failed"));
            }

            info!("GSM UART{} ready at {} baud", port, baud);
            Ok(Self { port })
        }
    }

    impl SerialLink for GsmUart {
        fn write(&mut self, bytes: &[u8]) -> Result<(), NotifyError> {
            // SAFETY: driver installed in new(); single-threaded access.
            let written = unsafe {
                uart_write_bytes(
                    self.port as i32,
                    bytes.as_ptr().cast(),
                    bytes.len(),
                )
            };
            if written < 0 || written as usize != bytes.len() {
                return Err(NotifyError::UartWriteFailed);
            }
            Ok(())
        }

        fn drain(&mut self, buf: &mut [u8]) -> usize {
            // SAFETY: driver installed in new(); zero timeout = non-blocking.
            let read = unsafe {
                uart_read_bytes(
                    self.port as i32,
                    buf.as_mut_ptr().cast(),
                    buf.len() as u32,
                    0,
                )
            };
            read.max(0) as usize
        }
    }
}
