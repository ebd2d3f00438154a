//! Composite reading — the bundled result of one full acquisition cycle.

use log::info;

/// Produced once per sampling cycle and moved by value through the bounded
/// queue to the reading sink. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeReading {
    /// Calibrated gas concentration.
    pub gas_ppm: f32,
    /// Temperature in tenths of °C (last successful probe read).
    pub temperature_tenths: i16,
    /// Relative humidity in tenths of %RH.
    pub humidity_tenths: i16,
    /// Oversampled raw light ADC average.
    pub light_raw: u16,
    /// Light level as a percentage (inverted ADC fraction).
    pub light_percent: f32,
}

impl CompositeReading {
    pub fn temperature_c(&self) -> f32 {
        f32::from(self.temperature_tenths) / 10.0
    }

    pub fn humidity_percent(&self) -> f32 {
        f32::from(self.humidity_tenths) / 10.0
    }

    /// Structured log emission, the reading sink's only side effect.
    pub fn log(&self) {
        info!(
            "PPM: {:.2} | Temp: {}.{}°C | Humidity: {}.{}% | Light: {:.1}%",
            self.gas_ppm,
            self.temperature_tenths / 10,
            (self.temperature_tenths % 10).abs(),
            self.humidity_tenths / 10,
            (self.humidity_tenths % 10).abs(),
            self.light_percent,
        );
    }
}
