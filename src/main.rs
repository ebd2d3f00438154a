//! EnvMon firmware — main entry point.
//!
//! Hexagonal layout: the control loop in `envmon::app` is pure logic
//! behind port traits; this binary wires it to the board.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  EspSensorPort      OutputBank        LogReportSink      │
//! │  (SensorPort)       (ActuatorPins)    (ReportSink)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ───────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │   AcquisitionEngine · ActuatorGate · Consumers │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  tasks::spawn_* (FreeRTOS-backed threads, core 1)        │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{OutputPin as _, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use envmon::adapters::gpio::OutputBank;
use envmon::adapters::hardware::{self, EspSensorPort};
use envmon::adapters::log_sink::LogReportSink;
use envmon::app::acquisition::AcquisitionEngine;
use envmon::app::gate::ActuatorGate;
use envmon::config::SystemConfig;
use envmon::pins;
use envmon::signal::{BUTTON_EDGE, EdgeSignal, PROXIMITY_EDGE};
use envmon::tasks::{self, ReadingQueue};

// The typed gpioN pins handed to the output bank and buzzer below must
// agree with the board map.
const _: () = {
    assert!(pins::LED_GPIO == 4);
    assert!(pins::LED2_GPIO == 5);
    assert!(pins::RED_LED_GPIO == 25);
    assert!(pins::YELLOW_LED_GPIO == 26);
    assert!(pins::BLUE_LED_GPIO == 27);
    assert!(pins::BUZZER_GPIO == 19);
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("EnvMon v{} booting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Hardware peripherals ───────────────────────────────
    if let Err(e) = hardware::init_peripherals() {
        // Peripheral init failure is critical — log and halt. In
        // production the watchdog resets the board after timeout.
        error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hardware::init_isr_service() {
        error!("ISR service init failed: {e} — button/proximity inert");
    }

    let peripherals = Peripherals::take()?;

    let bank = OutputBank::new(
        PinDriver::output(peripherals.pins.gpio4.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio5.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio25.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio26.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio27.downgrade_output())?,
    );
    let buzzer = PinDriver::output(peripherals.pins.gpio19.downgrade_output())?;

    // ── 3. Shared state ───────────────────────────────────────
    let gate = Arc::new(ActuatorGate::new(
        bank,
        Duration::from_millis(u64::from(config.gate_lock_timeout_ms)),
    ));
    let queue = Arc::new(ReadingQueue::new());
    let sample_signal = Arc::new(EdgeSignal::new());

    // Remote channel writes arrive through app::remote::handle_remote_write
    // against this same gate once the cloud transport is provisioned.

    // ── 4. Task spawn (ordered consumers-first so nothing published
    //      to the queue or signals can arrive before its reader) ─
    let _ = tasks::spawn_reading_sink(Arc::clone(&queue));
    let _ = tasks::spawn_button(
        &BUTTON_EDGE,
        Arc::clone(&gate),
        LogReportSink::new(),
        Duration::from_millis(u64::from(config.button_poll_ms)),
    );
    let _ = tasks::spawn_proximity(
        &PROXIMITY_EDGE,
        hardware::proximity_detected,
        buzzer,
        LogReportSink::new(),
    );
    let _ = tasks::spawn_acquisition(
        Arc::clone(&sample_signal),
        AcquisitionEngine::new(config.clone()),
        EspSensorPort::new(),
        Arc::clone(&gate),
        LogReportSink::new(),
        Arc::clone(&queue),
    );
    let _ = tasks::spawn_sampler(
        sample_signal,
        Duration::from_millis(u64::from(config.sample_interval_ms)),
    );

    info!("System ready. {} ms acquisition cadence.", config.sample_interval_ms);

    // The tasks own the control loop from here; the main thread idles.
    loop {
        thread::park();
    }
}
