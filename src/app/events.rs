//! Application events emitted by the guard service.
//!
//! Events flow through the [`EventSink`](super::ports::EventSink) port so
//! the loop stays free of formatting concerns; the log sink renders them
//! for the serial monitor and tests capture them for assertions.

use crate::error::NotifyError;
use crate::notify::AlertTrigger;
use crate::perimeter::{GateState, Side, SideReading, TriggerReason};

/// One poll cycle's worth of raw readings and the decisions made on them.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub cycle: u64,
    pub sides: [SideReading; 4],
    pub gate: GateState,
    pub triggered: [bool; 4],
}

#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// Controller finished start-up.
    Started,
    /// Sensing and decision summary for one poll cycle.
    Cycle(CycleReport),
    /// A side's own sensors put it into alarm.
    SideAlarm { side: Side, reason: TriggerReason },
    /// The gate reed loop opened.
    GateBreach,
    /// An SMS alert was handed to the modem.
    AlertSent(AlertTrigger),
    /// An SMS alert could not be delivered.
    AlertFailed {
        trigger: AlertTrigger,
        error: NotifyError,
    },
}
