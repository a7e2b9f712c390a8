//! System configuration parameters.
//!
//! All tunable parameters for the FarmGuard controller.  The struct is
//! injected at construction so tests and simulation can run with altered
//! thresholds and timings without touching the wiring table in `pins.rs`.

use serde::{Deserialize, Serialize};

use crate::perimeter::Side;

/// Default SMS recipient (the plot owner).
pub const DEFAULT_RECIPIENT: &str = "+916361240104";

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    // --- Proximity ---
    /// Per-side proximity thresholds in cm, indexed by `Side::index()`.
    /// `None` means the side carries no ranging sensor (side 2).
    /// Deliberately non-uniform: side 3 uses a tighter 8 cm window.
    pub proximity_threshold_cm: [Option<u16>; 4],

    // --- Timing ---
    /// Base event-loop tick (ms).  Must divide the blink half-periods.
    pub base_tick_ms: u32,
    /// Sensor poll cycle interval (ms).
    pub cycle_interval_ms: u32,

    // --- Per-side alarm sequence ---
    /// Total blink duration for a single-side alarm (ms).
    pub side_blink_total_ms: u32,
    /// Blink half-period for a single-side alarm (ms on, then ms off).
    pub side_blink_half_ms: u32,

    // --- Gate-breach alarm sequence ---
    /// Total all-lights blink duration on gate breach (ms).
    pub gate_blink_total_ms: u32,
    /// Blink half-period during the gate-breach blink phase (ms).
    pub gate_blink_half_ms: u32,
    /// Continuous buzzer hold after the gate-breach blink phase (ms).
    pub gate_buzzer_hold_ms: u32,

    // --- Notifications ---
    /// Owner phone number for SMS alerts.
    pub alert_recipient: heapless::String<20>,
    /// Minimum gap between two SMS sends of the same trigger (ms).
    /// 0 re-sends on every poll cycle while the condition holds.
    pub notify_cooldown_ms: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        let mut recipient = heapless::String::new();
        let _ = recipient.push_str(DEFAULT_RECIPIENT);

        Self {
            // Sides 1 and 4 trigger below 10 cm, side 3 below 8 cm,
            // side 2 is PIR-only.
            proximity_threshold_cm: [Some(10), None, Some(8), Some(10)],

            base_tick_ms: 50,
            cycle_interval_ms: 100,

            side_blink_total_ms: 1500,
            side_blink_half_ms: 50,

            gate_blink_total_ms: 2000,
            gate_blink_half_ms: 100,
            gate_buzzer_hold_ms: 2000,

            alert_recipient: recipient,
            notify_cooldown_ms: 0,
        }
    }
}

impl GuardConfig {
    /// Proximity threshold for one side, if it has a ranging sensor.
    pub fn threshold_for(&self, side: Side) -> Option<u16> {
        self.proximity_threshold_cm[side.index()]
    }

    /// Reject configurations the sequencer cannot honour.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.base_tick_ms == 0 || self.cycle_interval_ms == 0 {
            return Err(crate::error::Error::Config("tick intervals must be non-zero"));
        }
        if self.side_blink_half_ms == 0 || self.gate_blink_half_ms == 0 {
            return Err(crate::error::Error::Config("blink half-periods must be non-zero"));
        }
        if self.base_tick_ms > self.side_blink_half_ms {
            return Err(crate::error::Error::Config(
                "base tick coarser than the side blink half-period",
            ));
        }
        if self.alert_recipient.is_empty() {
            return Err(crate::error::Error::Config("alert recipient is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = GuardConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.proximity_threshold_cm[Side::One.index()], Some(10));
        assert_eq!(c.proximity_threshold_cm[Side::Two.index()], None);
        assert_eq!(c.proximity_threshold_cm[Side::Three.index()], Some(8));
        assert_eq!(c.proximity_threshold_cm[Side::Four.index()], Some(10));
        assert_eq!(c.alert_recipient.as_str(), DEFAULT_RECIPIENT);
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = GuardConfig::default();
        assert!(
            c.base_tick_ms <= c.side_blink_half_ms,
            "base tick must resolve the fastest blink"
        );
        assert!(c.base_tick_ms <= c.cycle_interval_ms);
        assert_eq!(c.side_blink_total_ms % (2 * c.side_blink_half_ms), 0);
        assert_eq!(c.gate_blink_total_ms % (2 * c.gate_blink_half_ms), 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = GuardConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: GuardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.proximity_threshold_cm, c2.proximity_threshold_cm);
        assert_eq!(c.alert_recipient, c2.alert_recipient);
        assert_eq!(c.gate_buzzer_hold_ms, c2.gate_buzzer_hold_ms);
    }

    #[test]
    fn coarse_base_tick_rejected() {
        let c = GuardConfig {
            base_tick_ms: 200,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_recipient_rejected() {
        let c = GuardConfig {
            alert_recipient: heapless::String::new(),
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
