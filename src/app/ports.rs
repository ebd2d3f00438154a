//! Port traits — the boundary between the control loop and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ acquisition / consumers (domain)
//! ```
//!
//! Driven adapters (sensor primitives, output pins, the remote parameter
//! sink) implement these traits. The domain tasks consume them via
//! generics, so the control loop never touches hardware directly and runs
//! unchanged under host tests.

use crate::app::params::{Channel, Param, ParamValue};
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One successful climate probe read, in tenths of real units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClimateSample {
    /// Temperature in tenths of °C (25.1 °C = 251).
    pub temperature_tenths: i16,
    /// Relative humidity in tenths of %RH.
    pub humidity_tenths: i16,
}

/// Read-side port over the raw sensor primitives. The drivers behind it
/// are vendor-supplied; this core only sees success/failure plus values.
pub trait SensorPort {
    /// Read the temperature/humidity probe.
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError>;

    /// One oneshot read of the gas sensor's analog channel (12-bit raw).
    fn read_gas_raw(&mut self) -> Result<u16, SensorError>;

    /// One oneshot read of the light sensor's analog channel (12-bit raw).
    fn read_light_raw(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator pins (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Physical pin writes for the five gate channels. Implementations do the
/// level write and nothing else — caching, locking and no-op suppression
/// live in the [`ActuatorGate`](crate::app::gate::ActuatorGate).
pub trait ActuatorPins {
    fn write(&mut self, channel: Channel, level: bool);
}

// ───────────────────────────────────────────────────────────────
// Remote parameter sink (driven adapter: domain → cloud glue)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget reporting of calibrated values and decision outputs.
/// Implementations must not block the caller; the cloud plumbing behind
/// this trait signals no backpressure into the control loop.
pub trait ReportSink {
    fn report(&mut self, param: Param, value: ParamValue);
}
