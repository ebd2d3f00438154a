//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements    | Connects to                    |
//! |------------|---------------|--------------------------------|
//! | `gpio`     | ActuatorPins  | `embedded-hal` output pins     |
//! | `log_sink` | ReportSink    | Serial log output              |
//! | `hardware` | SensorPort    | ESP32 ADC oneshot, DHT, ISRs   |
//!
//! `hardware` is the only module that touches ESP-IDF and is compiled
//! only with the `espidf` feature.

pub mod gpio;
pub mod log_sink;

#[cfg(feature = "espidf")]
pub mod hardware;
