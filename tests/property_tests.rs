//! Property tests for the calibration, classification, and gating logic.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use std::time::Duration;

use envmon::app::acquisition::{AcquisitionEngine, gas_ppm, light_percent};
use envmon::app::gate::ActuatorGate;
use envmon::app::indicator::GasLevel;
use envmon::app::params::{Channel, Param, ParamValue};
use envmon::app::ports::{ActuatorPins, ClimateSample, ReportSink, SensorPort};
use envmon::config::SystemConfig;
use envmon::error::SensorError;
use envmon::queue::BoundedQueue;
use proptest::prelude::*;

// ── Calibration ───────────────────────────────────────────────

proptest! {
    /// Any 12-bit raw value maps to a finite, non-negative concentration,
    /// and the mapping is monotone.
    #[test]
    fn gas_calibration_is_monotone_and_bounded(
        a in 0u16..=4095u16,
        b in 0u16..=4095u16,
    ) {
        let pa = gas_ppm(a);
        let pb = gas_ppm(b);
        prop_assert!(pa.is_finite() && pa >= 0.0);
        if a <= b {
            prop_assert!(pa <= pb);
        }
    }

    /// The inverted light fraction stays within 0..=100 % across the full
    /// ADC range and decreases as the raw value rises.
    #[test]
    fn light_percent_stays_in_range(
        a in 0u16..=4095u16,
        b in 0u16..=4095u16,
    ) {
        let la = light_percent(a);
        prop_assert!((0.0..=100.0).contains(&la));
        if a < b {
            prop_assert!(la >= light_percent(b));
        }
    }
}

// ── Indicator classification ──────────────────────────────────

proptest! {
    /// Every concentration lands in exactly one band and lights exactly
    /// one indicator.
    #[test]
    fn every_ppm_lights_exactly_one_indicator(ppm in 0.0f32..=1000.0f32) {
        let config = SystemConfig::default();
        let level = GasLevel::classify(ppm, &config);
        let (r, y, b) = level.indicator_levels();
        prop_assert_eq!(u8::from(r) + u8::from(y) + u8::from(b), 1);

        match level {
            GasLevel::High => prop_assert!(ppm > config.gas_high_threshold_ppm),
            GasLevel::Low => prop_assert!(ppm < config.gas_low_threshold_ppm),
            GasLevel::Moderate => prop_assert!(
                ppm >= config.gas_low_threshold_ppm
                    && ppm <= config.gas_high_threshold_ppm
            ),
        }
    }
}

// ── Epsilon gate on the gas channel ───────────────────────────

struct TwoCycleSensors {
    gas: [u16; 2],
    cycle: usize,
}

impl SensorPort for TwoCycleSensors {
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        Ok(ClimateSample {
            temperature_tenths: 250,
            humidity_tenths: 600,
        })
    }
    fn read_gas_raw(&mut self) -> Result<u16, SensorError> {
        let raw = self.gas[self.cycle.min(1)];
        self.cycle += 1;
        Ok(raw)
    }
    fn read_light_raw(&mut self) -> Result<u16, SensorError> {
        Ok(2000)
    }
}

#[derive(Default)]
struct CountingSink {
    gas_reports: usize,
}

impl ReportSink for CountingSink {
    fn report(&mut self, param: Param, _value: ParamValue) {
        if param == Param::GasPpm {
            self.gas_reports += 1;
        }
    }
}

struct NullPins;
impl ActuatorPins for NullPins {
    fn write(&mut self, _channel: Channel, _level: bool) {}
}

proptest! {
    /// For any pair of raw gas values, the second cycle reports exactly
    /// when the calibrated delta strictly exceeds the epsilon.
    #[test]
    fn gas_report_fires_iff_epsilon_exceeded(
        first in 1u16..=4095u16,
        second in 1u16..=4095u16,
    ) {
        let config = SystemConfig::default();
        let epsilon = config.gas_epsilon_ppm;
        let mut engine = AcquisitionEngine::new(config);
        let gate = ActuatorGate::new(NullPins, Duration::from_millis(100));
        let mut sink = CountingSink::default();
        let mut sensors = TwoCycleSensors { gas: [first, second], cycle: 0 };

        engine.run_cycle(&mut sensors, &gate, &mut sink);
        prop_assert_eq!(sink.gas_reports, 1, "first sample always reports");

        engine.run_cycle(&mut sensors, &gate, &mut sink);
        let delta = (gas_ppm(second) - gas_ppm(first)).abs();
        let expected = if delta > epsilon { 2 } else { 1 };
        prop_assert_eq!(sink.gas_reports, expected);
    }
}

// ── Queue ordering ────────────────────────────────────────────

proptest! {
    /// Up to capacity, the queue is strictly FIFO.
    #[test]
    fn queue_preserves_fifo_order(
        items in proptest::collection::vec(any::<u32>(), 0..=10),
    ) {
        let q: BoundedQueue<u32, 10> = BoundedQueue::new();
        for &item in &items {
            prop_assert!(q.try_push(item).is_ok());
        }
        for &expected in &items {
            prop_assert_eq!(q.try_pop(), Some(expected));
        }
        prop_assert_eq!(q.try_pop(), None);
    }
}

// ── Channel name resolution ───────────────────────────────────

proptest! {
    /// Arbitrary strings resolve to a channel only when they are exactly
    /// one of the five wire names.
    #[test]
    fn only_wire_names_resolve(name in "\\PC{0,8}") {
        let resolved = Channel::from_name(&name);
        let is_wire_name = ["LED", "LED2", "RED", "YELLOW", "BLUE"]
            .contains(&name.as_str());
        prop_assert_eq!(resolved.is_some(), is_wire_name);
    }
}
