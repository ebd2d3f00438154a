//! Proximity / metal-detection consumer.
//!
//! The detector's interrupt fires on any edge, and spurious repeats on
//! the same physical state are common. The monitor therefore acts only
//! when the sampled detection state differs from the last reported one:
//! the buzzer follows the detection state and a textual state is reported
//! exactly once per real transition.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::app::params::{Param, ParamValue};
use crate::app::ports::ReportSink;

/// Debouncing state machine for the proximity line. Owned by the single
/// proximity task.
pub struct ProximityMonitor {
    last_detected: bool,
}

impl ProximityMonitor {
    /// Starts "undetected"; the first genuine detection edge reports.
    pub fn new() -> Self {
        Self {
            last_detected: false,
        }
    }

    /// Handle one edge-signal wake. `detected` is the current physical
    /// level, already resolved for the active-low input (low = detected).
    /// Returns `true` if this wake was a real state change.
    pub fn on_signal<P: OutputPin>(
        &mut self,
        detected: bool,
        buzzer: &mut P,
        sink: &mut impl ReportSink,
    ) -> bool {
        if detected == self.last_detected {
            return false;
        }

        let drive = if detected {
            buzzer.set_high()
        } else {
            buzzer.set_low()
        };
        if let Err(e) = drive {
            warn!("buzzer write failed: {e:?}");
        }

        let state = if detected { "Detected" } else { "Undetected" };
        sink.report(Param::MetalDetection, ParamValue::Text(state));
        info!("proximity: {state}");

        self.last_detected = detected;
        true
    }
}

impl Default for ProximityMonitor {
    fn default() -> Self {
        Self::new()
    }
}
