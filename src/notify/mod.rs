//! SMS alert delivery over a GSM modem.
//!
//! The modem speaks plain text-mode AT commands.  Each alert is one SMS:
//! set text mode, address the recipient, stream the body, terminate with
//! Ctrl+Z, then drain whatever the modem echoed back into the log.  Inter-
//! command pacing matches what the SIM800-class modules need at 9600 baud.

pub mod link;

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::{debug, warn};

use crate::error::NotifyError;
use link::SerialLink;

/// Events worth waking somebody's phone for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTrigger {
    /// Controller finished booting.
    StartUp,
    /// Ranging sensor on side 4 saw an object inside its threshold.
    Side4Proximity,
    /// Gate reed loop opened.
    GateBreach,
}

impl AlertTrigger {
    /// SMS body for this trigger.
    pub fn message(self) -> &'static str {
        match self {
            Self::StartUp => "FarmGuard perimeter protection system is activated.",
            Self::Side4Proximity => "Object detected on side 4!",
            Self::GateBreach => "CIRCUIT BROKEN IN THE FARM BY UNKNOWN PERSON.",
        }
    }
}

impl core::fmt::Display for AlertTrigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StartUp => write!(f, "start-up"),
            Self::Side4Proximity => write!(f, "side-4 proximity"),
            Self::GateBreach => write!(f, "gate breach"),
        }
    }
}

/// Text-mode SMS limit; bodies never get near it but the guard keeps a
/// config mistake from wedging the modem mid-message.
const MAX_BODY_BYTES: usize = 160;

/// Pause after each command so the modem can process it.
const CMD_PAUSE_MS: u32 = 100;

/// Pause after Ctrl+Z while the modem submits to the network.
const SUBMIT_PAUSE_MS: u32 = 1000;

const CTRL_Z: u8 = 0x1A;

/// Sends alert SMS messages through a [`SerialLink`].
pub struct GsmNotifier<L: SerialLink, D: DelayNs> {
    link: L,
    delay: D,
    recipient: String<20>,
}

impl<L: SerialLink, D: DelayNs> GsmNotifier<L, D> {
    pub fn new(link: L, delay: D, recipient: String<20>) -> Self {
        Self {
            link,
            delay,
            recipient,
        }
    }

    /// Send one SMS for `trigger`, blocking until the modem has had time
    /// to submit it (~1.3 s end to end).
    pub fn send(&mut self, trigger: AlertTrigger) -> Result<(), NotifyError> {
        self.send_text(trigger.message())
    }

    fn send_text(&mut self, body: &str) -> Result<(), NotifyError> {
        if body.len() > MAX_BODY_BYTES {
            return Err(NotifyError::MessageTooLong);
        }

        self.link.write(b"AT+CMGF=1\r")?;
        self.delay.delay_ms(CMD_PAUSE_MS);

        let mut cmgs: String<40> = String::new();
        let _ = cmgs.push_str("AT+CMGS=\"");
        let _ = cmgs.push_str(&self.recipient);
        let _ = cmgs.push_str("\"\r\n");
        self.link.write(cmgs.as_bytes())?;
        self.delay.delay_ms(CMD_PAUSE_MS);

        self.link.write(body.as_bytes())?;
        self.delay.delay_ms(CMD_PAUSE_MS);

        self.link.write(&[CTRL_Z])?;
        self.delay.delay_ms(SUBMIT_PAUSE_MS);

        self.drain_responses();
        Ok(())
    }

    /// Forward any queued modem responses to the log so AT errors are
    /// visible on the serial monitor.
    fn drain_responses(&mut self) {
        let mut buf = [0u8; 64];
        loop {
            let n = self.link.drain(&mut buf);
            if n == 0 {
                break;
            }
            match core::str::from_utf8(&buf[..n]) {
                Ok(text) => debug!("GSM <- {}", text.trim()),
                Err(_) => warn!("GSM <- {} non-UTF8 bytes", n),
            }
        }
    }
}

impl<L: SerialLink, D: DelayNs> crate::app::ports::AlertPort for GsmNotifier<L, D> {
    fn send(&mut self, trigger: AlertTrigger) -> Result<(), NotifyError> {
        self.send_text(trigger.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every write; drain yields a canned "OK" once.
    struct MockLink {
        written: Vec<Vec<u8>>,
        response: Option<&'static [u8]>,
        fail_writes: bool,
    }

    impl MockLink {
        fn new() -> Self {
            Self {
                written: Vec::new(),
                response: Some(b"\r\nOK\r\n"),
                fail_writes: false,
            }
        }
    }

    impl SerialLink for MockLink {
        fn write(&mut self, bytes: &[u8]) -> Result<(), NotifyError> {
            if self.fail_writes {
                return Err(NotifyError::UartWriteFailed);
            }
            self.written.push(bytes.to_vec());
            Ok(())
        }

        fn drain(&mut self, buf: &mut [u8]) -> usize {
            match self.response.take() {
                Some(bytes) => {
                    buf[..bytes.len()].copy_from_slice(bytes);
                    bytes.len()
                }
                None => 0,
            }
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn recipient() -> String<20> {
        let mut s = String::new();
        let _ = s.push_str("+916361240104");
        s
    }

    #[test]
    fn sms_framing_matches_at_protocol() {
        let mut notifier = GsmNotifier::new(MockLink::new(), NoopDelay, recipient());
        notifier.send(AlertTrigger::GateBreach).unwrap();

        let written = &notifier.link.written;
        assert_eq!(written.len(), 4);
        assert_eq!(written[0], b"AT+CMGF=1\r");
        assert_eq!(written[1], b"AT+CMGS=\"+916361240104\"\r\n");
        assert_eq!(written[2], b"CIRCUIT BROKEN IN THE FARM BY UNKNOWN PERSON.");
        assert_eq!(written[3], [0x1A]);
    }

    #[test]
    fn each_trigger_has_distinct_body() {
        let bodies = [
            AlertTrigger::StartUp.message(),
            AlertTrigger::Side4Proximity.message(),
            AlertTrigger::GateBreach.message(),
        ];
        assert_ne!(bodies[0], bodies[1]);
        assert_ne!(bodies[1], bodies[2]);
        assert!(bodies.iter().all(|b| b.len() <= MAX_BODY_BYTES));
    }

    #[test]
    fn write_failure_propagates() {
        let mut link = MockLink::new();
        link.fail_writes = true;
        let mut notifier = GsmNotifier::new(link, NoopDelay, recipient());
        assert_eq!(
            notifier.send(AlertTrigger::StartUp),
            Err(NotifyError::UartWriteFailed)
        );
    }
}
