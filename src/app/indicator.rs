//! Three-level gas indicator decision.
//!
//! Classifies the calibrated gas concentration into exactly one of three
//! bands and drives the corresponding indicator LED, turning the other two
//! off. Evaluated only when the ppm epsilon gate fires; on every
//! evaluation all three pins are written and all three channel states are
//! reported, whether or not the band changed.

use log::info;

use crate::app::gate::ActuatorGate;
use crate::app::params::{Param, ParamValue};
use crate::app::ports::{ActuatorPins, ReportSink};
use crate::config::SystemConfig;

/// Gas concentration band. Exactly one indicator is lit per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLevel {
    /// `ppm > high` — red indicator.
    High,
    /// `low <= ppm <= high` — yellow indicator. Both boundary values land
    /// here: the outer comparisons are strict.
    Moderate,
    /// `ppm < low` — blue indicator.
    Low,
}

impl GasLevel {
    /// Band for a concentration, with thresholds from config. Evaluated in
    /// fixed order; ties at either boundary classify as `Moderate`.
    pub fn classify(ppm: f32, config: &SystemConfig) -> Self {
        if ppm > config.gas_high_threshold_ppm {
            Self::High
        } else if ppm < config.gas_low_threshold_ppm {
            Self::Low
        } else {
            Self::Moderate
        }
    }

    /// (red, yellow, blue) levels for this band.
    pub const fn indicator_levels(self) -> (bool, bool, bool) {
        match self {
            Self::High => (true, false, false),
            Self::Moderate => (false, true, false),
            Self::Low => (false, false, true),
        }
    }
}

/// Drive the indicator LEDs for `level` and report all three channel
/// states. Reports are unconditional; pin writes are dropped if the gate
/// stays busy past its bounded wait.
pub fn apply<P: ActuatorPins>(
    level: GasLevel,
    gate: &ActuatorGate<P>,
    sink: &mut impl ReportSink,
) {
    let (red, yellow, blue) = level.indicator_levels();

    if gate.apply_indicators(red, yellow, blue).is_err() {
        log::warn!("indicator: gate busy, pin writes dropped");
    }

    sink.report(Param::Red, ParamValue::Bool(red));
    sink.report(Param::Yellow, ParamValue::Bool(yellow));
    sink.report(Param::Blue, ParamValue::Bool(blue));

    info!("indicator: {:?}", level);
}
