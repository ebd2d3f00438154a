//! Sensor acquisition cycle: read, calibrate, gate by epsilon, actuate.
//!
//! One [`AcquisitionEngine::run_cycle`] call performs a complete cycle in
//! strict sequence — climate probe, gas channel, light channel — applying
//! per-signal change thresholds before anything is reported. The epsilon
//! gates are the sole brake on report frequency: sampling cadence and
//! reporting cadence are deliberately decoupled.
//!
//! All last-reported values live in task-local [`ThresholdMemory`] owned
//! by the single acquisition task; they reset on restart and need no lock.

use log::{info, warn};

use crate::app::gate::ActuatorGate;
use crate::app::indicator::{self, GasLevel};
use crate::app::params::{Channel, Param, ParamValue};
use crate::app::ports::{ActuatorPins, ClimateSample, ReportSink, SensorPort};
use crate::app::reading::CompositeReading;
use crate::config::SystemConfig;
use crate::pins::ADC_FULL_SCALE;

/// Fixed linear calibration for the gas sensor; no sensor-specific curve.
pub fn gas_ppm(raw: u16) -> f32 {
    if raw > 0 { f32::from(raw) / 20.0 } else { 0.0 }
}

/// Inverted 12-bit ADC fraction: on this board a higher raw value means
/// lower ambient light.
pub fn light_percent(raw_avg: u16) -> f32 {
    (1.0 - f32::from(raw_avg) / f32::from(ADC_FULL_SCALE)) * 100.0
}

/// Last-reported value per signal. `None` until the first report, so a
/// fresh boot always reports the first sample of every signal.
#[derive(Debug, Default)]
struct ThresholdMemory {
    temperature_tenths: Option<i16>,
    humidity_tenths: Option<i16>,
    gas_ppm: Option<f32>,
    light_percent: Option<f32>,
}

fn tenths_delta_reached(last: Option<i16>, new: i16, epsilon: i16) -> bool {
    last.is_none_or(|l| (i32::from(new) - i32::from(l)).abs() >= i32::from(epsilon))
}

fn float_delta_exceeded(last: Option<f32>, new: f32, epsilon: f32) -> bool {
    last.is_none_or(|l| (new - l).abs() > epsilon)
}

fn float_delta_reached(last: Option<f32>, new: f32, epsilon: f32) -> bool {
    last.is_none_or(|l| (new - l).abs() >= epsilon)
}

/// State owned by the acquisition task across cycles.
pub struct AcquisitionEngine {
    config: SystemConfig,
    thresholds: ThresholdMemory,
    /// Last successful climate read; carried into the composite when the
    /// probe fails mid-run.
    climate: ClimateSample,
    /// Last successful calibrated gas read.
    gas_ppm: f32,
    /// The engine's own view of the light-driven LED. The gate does not
    /// report applied-vs-noop back, so the engine compares against its own
    /// held reference and updates it only when a gate write succeeds.
    light_led_on: bool,
}

impl AcquisitionEngine {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            thresholds: ThresholdMemory::default(),
            climate: ClimateSample::default(),
            gas_ppm: 0.0,
            light_led_on: false,
        }
    }

    /// Run one complete acquisition cycle and return the composite reading
    /// for the queue. Sensor failures degrade to "skip this signal"; the
    /// next cycle retries naturally.
    pub fn run_cycle<P: ActuatorPins>(
        &mut self,
        sensors: &mut impl SensorPort,
        gate: &ActuatorGate<P>,
        sink: &mut impl ReportSink,
    ) -> CompositeReading {
        self.sample_climate(sensors, sink);
        self.sample_gas(sensors, gate, sink);
        let light_raw = self.oversample_light(sensors);
        let light = light_percent(light_raw);
        self.gate_light_report(light, sink);
        self.drive_light_led(light, gate, sink);

        CompositeReading {
            gas_ppm: self.gas_ppm,
            temperature_tenths: self.climate.temperature_tenths,
            humidity_tenths: self.climate.humidity_tenths,
            light_raw,
            light_percent: light,
        }
    }

    // ── Step 1/2: climate probe + per-signal epsilon gates ────

    fn sample_climate(&mut self, sensors: &mut impl SensorPort, sink: &mut impl ReportSink) {
        let sample = match sensors.read_climate() {
            Ok(sample) => sample,
            Err(e) => {
                // Non-fatal: stale values ride along, no retry this cycle.
                warn!("climate probe: {e}");
                return;
            }
        };
        self.climate = sample;

        if tenths_delta_reached(
            self.thresholds.temperature_tenths,
            sample.temperature_tenths,
            self.config.temperature_epsilon_tenths,
        ) {
            sink.report(
                Param::Temperature,
                ParamValue::Float(f32::from(sample.temperature_tenths) / 10.0),
            );
            self.thresholds.temperature_tenths = Some(sample.temperature_tenths);
        }

        if tenths_delta_reached(
            self.thresholds.humidity_tenths,
            sample.humidity_tenths,
            self.config.humidity_epsilon_tenths,
        ) {
            sink.report(
                Param::Humidity,
                ParamValue::Float(f32::from(sample.humidity_tenths) / 10.0),
            );
            self.thresholds.humidity_tenths = Some(sample.humidity_tenths);
        }
    }

    // ── Step 3: gas channel + indicator decision ──────────────

    fn sample_gas<P: ActuatorPins>(
        &mut self,
        sensors: &mut impl SensorPort,
        gate: &ActuatorGate<P>,
        sink: &mut impl ReportSink,
    ) {
        let raw = match sensors.read_gas_raw() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("gas channel: {e}");
                return;
            }
        };

        let ppm = gas_ppm(raw);
        self.gas_ppm = ppm;

        // Strict comparison: a change of exactly epsilon does not report.
        if float_delta_exceeded(self.thresholds.gas_ppm, ppm, self.config.gas_epsilon_ppm) {
            sink.report(Param::GasPpm, ParamValue::Float(ppm));
            self.thresholds.gas_ppm = Some(ppm);
            indicator::apply(GasLevel::classify(ppm, &self.config), gate, sink);
        }
    }

    // ── Step 4: light oversampling ────────────────────────────

    /// Fixed-count oversampling for noise reduction, no outlier rejection.
    /// Failed reads contribute zero to the sum but still count toward the
    /// divisor, matching the board's long-standing behavior.
    fn oversample_light(&mut self, sensors: &mut impl SensorPort) -> u16 {
        let samples = self.config.light_oversample.max(1);
        let mut sum: u32 = 0;
        for _ in 0..samples {
            match sensors.read_light_raw() {
                Ok(raw) => sum += u32::from(raw),
                Err(e) => warn!("light channel: {e}"),
            }
        }
        (sum / u32::from(samples)) as u16
    }

    fn gate_light_report(&mut self, light: f32, sink: &mut impl ReportSink) {
        if float_delta_reached(
            self.thresholds.light_percent,
            light,
            self.config.light_epsilon_percent,
        ) {
            sink.report(Param::LightPercent, ParamValue::Float(light));
            self.thresholds.light_percent = Some(light);
        }
    }

    // ── Step 5: light-driven LED ──────────────────────────────

    /// Two-level threshold with the same 50.0 boundary in both directions.
    /// Known characteristic: readings sitting exactly on the boundary can
    /// chatter; left as-is.
    fn drive_light_led<P: ActuatorPins>(
        &mut self,
        light: f32,
        gate: &ActuatorGate<P>,
        sink: &mut impl ReportSink,
    ) {
        let threshold = self.config.light_on_threshold_percent;

        let target = if light < threshold && !self.light_led_on {
            true
        } else if light >= threshold && self.light_led_on {
            false
        } else {
            return;
        };

        match gate.set(Channel::Led, target) {
            Ok(()) => {
                self.light_led_on = target;
                sink.report(Param::Led, ParamValue::Bool(target));
                info!(
                    "auto LED {} (light {:.1}%)",
                    if target { "on" } else { "off" },
                    light
                );
            }
            Err(e) => warn!("auto LED: {e}, write dropped"),
        }
    }
}
