//! System configuration parameters.
//!
//! All tunable parameters for the EnvMon control loop. Defaults match the
//! deployed board; values can be overridden by the provisioning layer
//! before the tasks are spawned.

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sampling cadence ---
    /// Interval between full acquisition cycles (milliseconds).
    pub sample_interval_ms: u32,
    /// Number of back-to-back light-sensor reads averaged per cycle.
    pub light_oversample: u16,

    // --- Report epsilon gates ---
    /// Minimum temperature change (tenths of °C) before a report is emitted.
    pub temperature_epsilon_tenths: i16,
    /// Minimum humidity change (tenths of %RH) before a report is emitted.
    pub humidity_epsilon_tenths: i16,
    /// Gas concentration change (ppm) that must be *exceeded* to report.
    pub gas_epsilon_ppm: f32,
    /// Minimum light-level change (percent) before a report is emitted.
    pub light_epsilon_percent: f32,

    // --- Actuation thresholds ---
    /// Light level (percent) below which the auto LED turns on. The same
    /// boundary is used for turn-off; there is no hysteresis band.
    pub light_on_threshold_percent: f32,
    /// Gas concentration (ppm) above which the high indicator lights.
    pub gas_high_threshold_ppm: f32,
    /// Gas concentration (ppm) below which the low indicator lights.
    pub gas_low_threshold_ppm: f32,

    // --- Timing ---
    /// Bounded wait for the actuator gate lock (milliseconds). On timeout
    /// the write is dropped.
    pub gate_lock_timeout_ms: u32,
    /// Button consumer poll period (milliseconds). Chosen latency/CPU
    /// trade-off: the button tolerates up to one poll period of latency in
    /// exchange for never blocking a semaphore slot.
    pub button_poll_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sampling
            sample_interval_ms: 7000,
            light_oversample: 10,

            // Epsilon gates
            temperature_epsilon_tenths: 1,
            humidity_epsilon_tenths: 1,
            gas_epsilon_ppm: 1.0,
            light_epsilon_percent: 10.0,

            // Actuation thresholds
            light_on_threshold_percent: 50.0,
            gas_high_threshold_ppm: 100.0,
            gas_low_threshold_ppm: 55.0,

            // Timing
            gate_lock_timeout_ms: 100,
            button_poll_ms: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.sample_interval_ms > 0);
        assert!(c.light_oversample > 0);
        assert!(c.gas_high_threshold_ppm > c.gas_low_threshold_ppm);
        assert!(c.temperature_epsilon_tenths >= 1);
        assert!(c.humidity_epsilon_tenths >= 1);
        assert!(c.gas_epsilon_ppm > 0.0);
        assert!(c.light_epsilon_percent > 0.0);
        assert!(c.gate_lock_timeout_ms > 0);
        assert!(c.button_poll_ms > 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.sample_interval_ms, c2.sample_interval_ms);
        assert_eq!(c.light_oversample, c2.light_oversample);
        assert!((c.gas_high_threshold_ppm - c2.gas_high_threshold_ppm).abs() < 0.001);
        assert!((c.light_on_threshold_percent - c2.light_on_threshold_percent).abs() < 0.001);
    }

    #[test]
    fn thresholds_leave_a_moderate_band() {
        let c = SystemConfig::default();
        assert!(
            c.gas_low_threshold_ppm < c.gas_high_threshold_ppm,
            "low/high indicator thresholds must not overlap"
        );
    }

    #[test]
    fn button_poll_is_shorter_than_sample_interval() {
        let c = SystemConfig::default();
        assert!(c.button_poll_ms < c.sample_interval_ms);
    }
}
