//! Application core — sensor acquisition, debouncing and actuation.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ ReportSink
//!                 │   AcquisitionEngine       │
//!                 │   indicator · thresholds  │ ──▶ BoundedQueue ──▶ reading sink
//!  EdgeSignals ──▶│   button · proximity      │
//!                 └──────────────────────────┘
//!                            │
//!                            ▼
//!                      ActuatorGate ──▶ ActuatorPins (hardware)
//! ```
//!
//! Everything in this module is hardware-agnostic: sensors, pins and the
//! remote sink are reached exclusively through the port traits in
//! [`ports`], so the whole control loop runs under host tests with mock
//! adapters.

pub mod acquisition;
pub mod button;
pub mod gate;
pub mod indicator;
pub mod params;
pub mod ports;
pub mod proximity;
pub mod reading;
pub mod remote;
