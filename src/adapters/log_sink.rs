//! Event sink that renders application events to the log.
//!
//! This is the serial-monitor view of the controller: one line per event,
//! with the per-cycle summary kept on a single line so a scrolling monitor
//! stays readable at a 100 ms cadence.

use log::{info, warn};

use crate::app::events::{AppEvent, CycleReport};
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `Some(d)` as the distance and `None` as `--`.
struct Dist(Option<u16>);

impl core::fmt::Display for Dist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(cm) => write!(f, "{}cm", cm),
            None => write!(f, "--"),
        }
    }
}

fn log_cycle(report: &CycleReport) {
    let s = &report.sides;
    info!(
        "CYCLE {} | dist 1:{} 3:{} 4:{} | pir {}{}{}{} | gate {} | alarm {}{}{}{}",
        report.cycle,
        Dist(s[0].distance_cm),
        Dist(s[2].distance_cm),
        Dist(s[3].distance_cm),
        u8::from(s[0].motion),
        u8::from(s[1].motion),
        u8::from(s[2].motion),
        u8::from(s[3].motion),
        if report.gate.circuit_broken { "BROKEN" } else { "ok" },
        u8::from(report.triggered[0]),
        u8::from(report.triggered[1]),
        u8::from(report.triggered[2]),
        u8::from(report.triggered[3]),
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("guard service started"),
            AppEvent::Cycle(report) => log_cycle(report),
            AppEvent::SideAlarm { side, reason } => {
                info!("ALARM side {} ({})", side.number(), reason);
            }
            AppEvent::GateBreach => warn!("GATE BREACH: reed loop open"),
            AppEvent::AlertSent(trigger) => info!("SMS sent: {}", trigger),
            AppEvent::AlertFailed { trigger, error } => {
                warn!("SMS failed ({}): {}", trigger, error);
            }
        }
    }
}
