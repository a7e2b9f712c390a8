//! Core guard orchestration.
//!
//! [`GuardService`] is pure application logic: no GPIO, no UART, no clock.
//! The binary drives it from a fixed-period loop; every call to [`tick`]
//! advances the alarm sequencer by `delta_ms` and, once enough time has
//! accumulated, runs a full poll cycle (read sensors, decide, queue alarm
//! sequences, send alerts).
//!
//! [`tick`]: GuardService::tick

use log::warn;

use crate::config::GuardConfig;
use crate::notify::AlertTrigger;
use crate::perimeter::decision;
use crate::perimeter::sequence::{AlarmSequencer, SequenceKind};
use crate::perimeter::TriggerReason;

use super::events::{AppEvent, CycleReport};
use super::ports::{AlarmPort, AlertPort, EventSink, PerimeterPort};

/// Cooldown slots for the repeat-capable alert triggers.  Start-up is
/// sent exactly once and needs no slot.
const COOLDOWN_SLOTS: usize = 2;

fn cooldown_slot(trigger: AlertTrigger) -> Option<usize> {
    match trigger {
        AlertTrigger::StartUp => None,
        AlertTrigger::Side4Proximity => Some(0),
        AlertTrigger::GateBreach => Some(1),
    }
}

pub struct GuardService {
    config: GuardConfig,
    sequencer: AlarmSequencer,
    /// Milliseconds accumulated since the last poll cycle.  Seeded to the
    /// cycle interval so the very first tick polls immediately.
    since_poll_ms: u32,
    cooldown_remaining_ms: [u32; COOLDOWN_SLOTS],
    cycle_count: u64,
}

impl GuardService {
    pub fn new(config: GuardConfig) -> Self {
        let sequencer = AlarmSequencer::new(&config);
        let since_poll_ms = config.cycle_interval_ms;
        Self {
            config,
            sequencer,
            since_poll_ms,
            cooldown_remaining_ms: [0; COOLDOWN_SLOTS],
            cycle_count: 0,
        }
    }

    /// Announce start-up: emit the event and send the one-time SMS.
    pub fn start(&mut self, alerts: &mut impl AlertPort, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        match alerts.send(AlertTrigger::StartUp) {
            Ok(()) => sink.emit(&AppEvent::AlertSent(AlertTrigger::StartUp)),
            Err(error) => {
                warn!("start-up alert failed: {}", error);
                sink.emit(&AppEvent::AlertFailed {
                    trigger: AlertTrigger::StartUp,
                    error,
                });
            }
        }
    }

    /// Advance the controller by `delta_ms`.  Runs a poll cycle whenever
    /// the configured interval has elapsed, then drives the actuators from
    /// the sequencer's output frame for this tick.
    pub fn tick<H>(
        &mut self,
        hw: &mut H,
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
        delta_ms: u32,
    ) where
        H: PerimeterPort + AlarmPort,
    {
        for remaining in &mut self.cooldown_remaining_ms {
            *remaining = remaining.saturating_sub(delta_ms);
        }

        self.since_poll_ms += delta_ms;
        if self.since_poll_ms >= self.config.cycle_interval_ms {
            self.since_poll_ms = 0;
            self.poll_cycle(hw, alerts, sink);
        }

        let frame = self.sequencer.tick(delta_ms);
        for side in crate::perimeter::Side::ALL {
            hw.set_light(side, frame.lights[side.index()]);
        }
        hw.set_buzzer(frame.buzzer);
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn is_alarm_active(&self) -> bool {
        !self.sequencer.is_idle()
    }

    fn poll_cycle<H>(&mut self, hw: &mut H, alerts: &mut impl AlertPort, sink: &mut impl EventSink)
    where
        H: PerimeterPort + AlarmPort,
    {
        self.cycle_count += 1;
        let snapshot = hw.read_snapshot();
        let decisions = decision::evaluate(&snapshot, &self.config);

        sink.emit(&AppEvent::Cycle(CycleReport {
            cycle: self.cycle_count,
            sides: snapshot.sides,
            gate: snapshot.gate,
            triggered: [
                decisions[0].activate,
                decisions[1].activate,
                decisions[2].activate,
                decisions[3].activate,
            ],
        }));

        // Per-side sequences fire only for a side's own sensors; a gate
        // breach covers all four sides with the dedicated gate sequence.
        for d in &decisions {
            match d.reason {
                Some(reason @ (TriggerReason::Proximity | TriggerReason::Motion)) => {
                    self.sequencer.request(SequenceKind::Side(d.side));
                    sink.emit(&AppEvent::SideAlarm {
                        side: d.side,
                        reason,
                    });
                }
                Some(TriggerReason::GateBreach) | None => {}
            }
        }

        if snapshot.gate.circuit_broken {
            self.sequencer.request(SequenceKind::GateBreach);
            sink.emit(&AppEvent::GateBreach);
        }

        if decision::side4_proximity_alert(&snapshot, &self.config) {
            self.notify(AlertTrigger::Side4Proximity, alerts, sink);
        }
        if snapshot.gate.circuit_broken {
            self.notify(AlertTrigger::GateBreach, alerts, sink);
        }

        // Quiet cycle with nothing playing: make sure the siren is low.
        if decisions.iter().all(|d| !d.activate) && self.sequencer.is_idle() {
            hw.set_buzzer(false);
        }
    }

    fn notify(
        &mut self,
        trigger: AlertTrigger,
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        let slot = match cooldown_slot(trigger) {
            Some(slot) => slot,
            None => return,
        };
        if self.cooldown_remaining_ms[slot] > 0 {
            return;
        }
        match alerts.send(trigger) {
            Ok(()) => {
                self.cooldown_remaining_ms[slot] = self.config.notify_cooldown_ms;
                sink.emit(&AppEvent::AlertSent(trigger));
            }
            Err(error) => {
                warn!("{} alert failed: {}", trigger, error);
                sink.emit(&AppEvent::AlertFailed { trigger, error });
            }
        }
    }
}
