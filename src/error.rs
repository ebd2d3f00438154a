//! Error types for the EnvMon firmware.
//!
//! Two small `Copy` enums, one per fallible subsystem. Both are leaf
//! types: sensor failures are absorbed by the acquisition task (log and
//! retry next cycle) and actuator failures by the caller that requested
//! the write (log and drop), so nothing above them ever needs a combined
//! error. `main` uses `anyhow` for its one-shot init path.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Transient sensor failures. Never fatal: the acquisition task logs the
/// failure and retries naturally on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The DHT climate probe did not answer or failed its checksum.
    ClimateReadFailed,
    /// An ADC oneshot read returned an error.
    AdcReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClimateReadFailed => write!(f, "climate probe read failed"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
        }
    }
}

impl core::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The gate lock could not be acquired within the bounded wait.
    /// The requested write has been dropped; actuation is best-effort.
    Busy,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "actuator gate busy"),
        }
    }
}

impl core::error::Error for ActuatorError {}
