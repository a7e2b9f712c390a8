//! Port traits decoupling the guard service from concrete hardware.
//!
//! The service is generic over these traits; production wires them to the
//! sensor hub, the light bank and buzzer, and the GSM notifier, while the
//! integration tests substitute recording mocks.

use crate::error::NotifyError;
use crate::notify::AlertTrigger;
use crate::perimeter::{PerimeterSnapshot, Side};

use super::events::AppEvent;

/// Source of perimeter sensor state, one snapshot per poll cycle.
pub trait PerimeterPort {
    fn read_snapshot(&mut self) -> PerimeterSnapshot;
}

/// Sink for alarm actuator levels.
pub trait AlarmPort {
    fn set_light(&mut self, side: Side, on: bool);
    fn set_buzzer(&mut self, on: bool);

    fn all_off(&mut self) {
        for side in Side::ALL {
            self.set_light(side, false);
        }
        self.set_buzzer(false);
    }
}

/// Outbound alert channel (SMS in production).
pub trait AlertPort {
    fn send(&mut self, trigger: AlertTrigger) -> Result<(), NotifyError>;
}

/// Observer for application events.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
