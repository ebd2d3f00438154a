//! Task wiring for the control loop.
//!
//! Spawns the five firmware tasks — periodic sampler, sensor acquisition,
//! button consumer, proximity consumer, reading sink — as FreeRTOS-backed
//! threads with explicit priorities, all pinned to the application core so
//! the other core stays free for the networking stacks.
//!
//! # ESP-IDF threading model
//!
//! ESP-IDF implements `std::thread` via pthreads, thin wrappers around
//! FreeRTOS tasks. `esp_pthread_set_cfg()` sets thread-local configuration
//! that applies to the *next* thread spawned from the calling thread, so
//! the config→spawn pair must not interleave with other spawns.
//!
//! A failed spawn is logged and the system continues with that subsystem
//! inert (degraded, never aborted).

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::digital::OutputPin;
use log::{error, info};

use crate::app::acquisition::AcquisitionEngine;
use crate::app::button::ButtonConsumer;
use crate::app::gate::ActuatorGate;
use crate::app::ports::{ActuatorPins, ReportSink, SensorPort};
use crate::app::proximity::ProximityMonitor;
use crate::app::reading::CompositeReading;
use crate::queue::{BoundedQueue, READING_QUEUE_CAPACITY};
use crate::signal::EdgeSignal;

/// The acquisition → sink queue type used throughout the firmware.
pub type ReadingQueue = BoundedQueue<CompositeReading, READING_QUEUE_CAPACITY>;

/// CPU core identifiers for the ESP32 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU) — protocol stacks (WiFi, BLE, lwIP).
    Pro = 0,
    /// Core 1 (APP_CPU) — the entire control loop.
    App = 1,
}

/// Button and proximity consumers: actuation-critical, highest.
pub const CONSUMER_PRIORITY: u8 = 3;
/// Reading sink and the periodic sampler.
pub const SINK_PRIORITY: u8 = 2;
/// Acquisition: lowest — allowed to be delayed by actuation work.
pub const ACQUISITION_PRIORITY: u8 = 1;

/// Spawn a thread pinned to a core with explicit priority and stack size.
///
/// On ESP-IDF the FreeRTOS priority and core affinity are applied through
/// `esp_pthread_set_cfg`; on host targets they are ignored. The `name`
/// must be NUL-terminated (e.g. `"sampler\0"`). Returns `None` (after
/// logging an error) if the spawn fails.
pub fn spawn_on_core(
    core: Core,
    priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> Option<JoinHandle<()>> {
    #[cfg(feature = "espidf")]
    {
        // Thread-local: applies to the next pthread_create from this thread.
        unsafe {
            let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
            cfg.pin_to_core = core as i32;
            // prio and stack_size are both size_t in esp_pthread_cfg_t;
            // inferred casts track whatever type the binding gives them.
            cfg.prio = priority as _;
            cfg.stack_size = (stack_kb * 1024) as _;
            cfg.thread_name = name.as_ptr().cast();
            let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
            if ret != esp_idf_sys::ESP_OK as i32 {
                error!("esp_pthread_set_cfg failed: {ret}");
            }
        }
    }
    let display_name = name.trim_end_matches('\0');
    let builder = thread::Builder::new()
        .name(display_name.to_string())
        .stack_size(stack_kb * 1024);

    match builder.spawn(f) {
        Ok(handle) => {
            info!("task '{display_name}' spawned (core={core:?}, prio={priority})");
            Some(handle)
        }
        Err(e) => {
            // Degraded state: this subsystem stays inert until reboot.
            error!("task '{display_name}' spawn failed: {e}");
            None
        }
    }
}

/// Periodic sampler: raises the acquisition signal at a fixed cadence.
/// If a cycle is still running when the interval lapses, the raise
/// coalesces into the already-pending signal — bursts never backlog.
pub fn spawn_sampler(signal: Arc<EdgeSignal>, interval: Duration) -> Option<JoinHandle<()>> {
    spawn_on_core(Core::App, SINK_PRIORITY, 4, "sampler\0", move || loop {
        thread::sleep(interval);
        signal.raise();
    })
}

/// Sensor acquisition task: one full cycle per sampler signal, composite
/// reading pushed to the bounded queue (blocking on back-pressure).
pub fn spawn_acquisition<S, P, R>(
    signal: Arc<EdgeSignal>,
    mut engine: AcquisitionEngine,
    mut sensors: S,
    gate: Arc<ActuatorGate<P>>,
    mut sink: R,
    queue: Arc<ReadingQueue>,
) -> Option<JoinHandle<()>>
where
    S: SensorPort + Send + 'static,
    P: ActuatorPins + Send + 'static,
    R: ReportSink + Send + 'static,
{
    spawn_on_core(Core::App, ACQUISITION_PRIORITY, 8, "acquisition\0", move || {
        loop {
            signal.wait();
            let reading = engine.run_cycle(&mut sensors, &gate, &mut sink);
            queue.push(reading);
        }
    })
}

/// Button consumer: bounded 50 ms poll of the button edge signal.
pub fn spawn_button<P, R>(
    signal: &'static EdgeSignal,
    gate: Arc<ActuatorGate<P>>,
    mut sink: R,
    poll: Duration,
) -> Option<JoinHandle<()>>
where
    P: ActuatorPins + Send + 'static,
    R: ReportSink + Send + 'static,
{
    spawn_on_core(Core::App, CONSUMER_PRIORITY, 4, "button\0", move || {
        let mut button = ButtonConsumer::new();
        loop {
            let _ = button.poll_once(signal, &gate, &mut sink);
            thread::sleep(poll);
        }
    })
}

/// Proximity consumer: blocks on its edge signal; on wake samples the
/// physical level through `read_detected` (active-low already resolved)
/// and lets the monitor debounce repeats.
pub fn spawn_proximity<F, B, R>(
    signal: &'static EdgeSignal,
    read_detected: F,
    mut buzzer: B,
    mut sink: R,
) -> Option<JoinHandle<()>>
where
    F: Fn() -> bool + Send + 'static,
    B: OutputPin + Send + 'static,
    R: ReportSink + Send + 'static,
{
    spawn_on_core(Core::App, CONSUMER_PRIORITY, 4, "proximity\0", move || {
        let mut monitor = ProximityMonitor::new();
        loop {
            signal.wait();
            let _ = monitor.on_signal(read_detected(), &mut buzzer, &mut sink);
        }
    })
}

/// Reading sink: drains the bounded queue and logs each composite reading.
/// Purely an observability consumer — no reporting, no further processing.
pub fn spawn_reading_sink(queue: Arc<ReadingQueue>) -> Option<JoinHandle<()>> {
    spawn_on_core(Core::App, SINK_PRIORITY, 4, "reading-sink\0", move || loop {
        queue.pop().log();
    })
}
