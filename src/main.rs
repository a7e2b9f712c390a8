//! FarmGuard firmware entry point.
//!
//! Boot order: patch the runtime, bring up logging, configure every GPIO,
//! wire the adapters to the fixed pin table, announce start-up over SMS,
//! then run the guard loop at the base tick forever.

use std::time::Duration;

use anyhow::Context;
use log::{error, info};

use farmguard::adapters::hardware::HardwareAdapter;
use farmguard::adapters::log_sink::LogEventSink;
use farmguard::adapters::time::OsDelay;
use farmguard::app::service::GuardService;
use farmguard::config::GuardConfig;
use farmguard::drivers::hw_init;
use farmguard::notify::link::GsmUart;
use farmguard::notify::GsmNotifier;
use farmguard::pins;

fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("FarmGuard v{} booting", env!("CARGO_PKG_VERSION"));

    let config = GuardConfig::default();
    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        return Err(e.into());
    }

    if let Err(e) = hw_init::init_peripherals() {
        // Without configured pins every reading is garbage; halt here so
        // the fault is visible on the serial monitor instead of tripping
        // false alarms all night.
        error!("peripheral init failed: {}; halting", e);
        loop {
            std::thread::sleep(Duration::from_secs(1));
        }
    }

    let mut hw = HardwareAdapter::from_pins();
    let link = GsmUart::new(
        pins::GSM_UART_PORT,
        pins::GSM_TX_GPIO,
        pins::GSM_RX_GPIO,
        pins::GSM_BAUD,
    )
    .context("GSM modem link")?;
    let mut alerts = GsmNotifier::new(link, OsDelay, config.alert_recipient.clone());
    let mut sink = LogEventSink::new();

    let base_tick = Duration::from_millis(u64::from(config.base_tick_ms));
    let tick_ms = config.base_tick_ms;
    let mut service = GuardService::new(config);

    service.start(&mut alerts, &mut sink);
    info!("entering guard loop ({} ms tick)", tick_ms);

    loop {
        std::thread::sleep(base_tick);
        service.tick(&mut hw, &mut alerts, &mut sink, tick_ms);
    }
}
