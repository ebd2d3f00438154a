//! Output pin bank behind the [`ActuatorPins`] port.
//!
//! Generic over any `embedded-hal` 1.0 [`OutputPin`], so the same bank
//! drives `esp-idf-hal` pin drivers on the device and mock pins under
//! host tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::params::Channel;
use crate::app::ports::ActuatorPins;

/// The five gate-routed output pins, indexed by [`Channel::index`].
pub struct OutputBank<P> {
    pins: [P; Channel::COUNT],
}

impl<P: OutputPin> OutputBank<P> {
    /// Pins are expected to be driven low before hand-over so the gate's
    /// all-off cache starts in sync with the hardware.
    pub fn new(led: P, led2: P, red: P, yellow: P, blue: P) -> Self {
        Self {
            pins: [led, led2, red, yellow, blue],
        }
    }
}

impl<P: OutputPin> ActuatorPins for OutputBank<P> {
    fn write(&mut self, channel: Channel, level: bool) {
        let pin = &mut self.pins[channel.index()];
        let result = if level { pin.set_high() } else { pin.set_low() };
        if let Err(e) = result {
            warn!("pin write {channel:?}={level} failed: {e:?}");
        }
    }
}
