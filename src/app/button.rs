//! Debounced push-button consumer.
//!
//! The button task polls its edge signal on a fixed period instead of
//! blocking on it — an explicit latency/CPU trade-off: button presses
//! tolerate up to one poll period (50 ms) of latency, and the ISR burst
//! that a bouncing contact produces collapses into a single pending raise
//! between polls.

use log::{debug, info};

use crate::app::gate::ActuatorGate;
use crate::app::params::{Channel, Param, ParamValue};
use crate::app::ports::{ActuatorPins, ReportSink};
use crate::signal::EdgeSignal;

/// Consumer for the push-button edge signal. Toggles LED2 through the
/// gate and reports the new state.
pub struct ButtonConsumer {
    channel: Channel,
}

impl ButtonConsumer {
    pub fn new() -> Self {
        Self {
            channel: Channel::Led2,
        }
    }

    /// One poll iteration: consume a pending press, if any, and toggle.
    /// Returns the new channel state when a toggle was applied.
    pub fn poll_once<P: ActuatorPins>(
        &mut self,
        signal: &EdgeSignal,
        gate: &ActuatorGate<P>,
        sink: &mut impl ReportSink,
    ) -> Option<bool> {
        if !signal.try_take() {
            return None;
        }

        match gate.toggle(self.channel) {
            Ok(state) => {
                sink.report(self.channel.param(), ParamValue::Bool(state));
                info!("{}: {}", Param::Led2, if state { "ON" } else { "OFF" });
                Some(state)
            }
            Err(e) => {
                // Best-effort actuation: a contended gate drops the toggle.
                debug!("button: {e}, toggle dropped");
                None
            }
        }
    }
}

impl Default for ButtonConsumer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct NullPins;
    impl ActuatorPins for NullPins {
        fn write(&mut self, _channel: Channel, _level: bool) {}
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<(Param, ParamValue)>,
    }
    impl ReportSink for RecordingSink {
        fn report(&mut self, param: Param, value: ParamValue) {
            self.reports.push((param, value));
        }
    }

    #[test]
    fn no_signal_no_action() {
        let signal = EdgeSignal::new();
        let gate = ActuatorGate::new(NullPins, Duration::from_millis(100));
        let mut sink = RecordingSink::default();
        let mut button = ButtonConsumer::new();

        assert_eq!(button.poll_once(&signal, &gate, &mut sink), None);
        assert!(sink.reports.is_empty());
    }

    #[test]
    fn press_toggles_and_reports() {
        let signal = EdgeSignal::new();
        let gate = ActuatorGate::new(NullPins, Duration::from_millis(100));
        let mut sink = RecordingSink::default();
        let mut button = ButtonConsumer::new();

        signal.raise();
        assert_eq!(button.poll_once(&signal, &gate, &mut sink), Some(true));
        signal.raise();
        assert_eq!(button.poll_once(&signal, &gate, &mut sink), Some(false));

        assert_eq!(
            sink.reports,
            vec![
                (Param::Led2, ParamValue::Bool(true)),
                (Param::Led2, ParamValue::Bool(false)),
            ]
        );
    }

    #[test]
    fn isr_burst_collapses_to_one_toggle() {
        let signal = EdgeSignal::new();
        let gate = ActuatorGate::new(NullPins, Duration::from_millis(100));
        let mut sink = RecordingSink::default();
        let mut button = ButtonConsumer::new();

        // Contact bounce: several edges before the consumer polls.
        signal.raise_from_isr();
        signal.raise_from_isr();
        signal.raise_from_isr();

        assert_eq!(button.poll_once(&signal, &gate, &mut sink), Some(true));
        assert_eq!(button.poll_once(&signal, &gate, &mut sink), None);
        assert_eq!(sink.reports.len(), 1);
    }
}
