//! GPIO actuator gate — serialized, cached writes to the output channels.
//!
//! All five boolean channels share one mutual-exclusion lock: at most one
//! task alters any actuator output at a time. Each channel carries a
//! cached last-applied level, and a write requesting the already-applied
//! level is a no-op that never reaches the pin.
//!
//! Lock acquisition is bounded (100 ms by default). On timeout the write
//! is dropped — no queuing, no retry. Actuation is best-effort and never
//! blocks a caller beyond the bounded wait.

use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

use crate::app::params::Channel;
use crate::app::ports::ActuatorPins;
use crate::error::ActuatorError;

/// Granularity of the bounded lock wait.
const LOCK_POLL: Duration = Duration::from_millis(2);

struct GateInner<P> {
    pins: P,
    applied: [bool; Channel::COUNT],
}

/// Shared actuator gate. `&self` methods only — wrap in an `Arc` and hand
/// a clone to every task that actuates.
pub struct ActuatorGate<P> {
    inner: Mutex<GateInner<P>>,
    lock_timeout: Duration,
}

impl<P: ActuatorPins> ActuatorGate<P> {
    /// All channels start "off" with the cache in sync: the adapter is
    /// expected to hand over pins driven low.
    pub fn new(pins: P, lock_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(GateInner {
                pins,
                applied: [false; Channel::COUNT],
            }),
            lock_timeout,
        }
    }

    /// Bounded lock acquisition: poll `try_lock` until the timeout lapses.
    fn lock_timed(&self) -> Result<MutexGuard<'_, GateInner<P>>, ActuatorError> {
        let deadline = Instant::now() + self.lock_timeout;
        loop {
            match self.inner.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(ActuatorError::Busy);
                    }
                    std::thread::sleep(LOCK_POLL);
                }
            }
        }
    }

    /// Set one channel. The physical pin is written only if the requested
    /// state differs from the cached last-applied state; `Ok(())` does not
    /// distinguish "applied" from "no-op".
    pub fn set(&self, channel: Channel, state: bool) -> Result<(), ActuatorError> {
        let mut inner = self.lock_timed()?;
        if inner.applied[channel.index()] != state {
            inner.pins.write(channel, state);
            inner.applied[channel.index()] = state;
        }
        Ok(())
    }

    /// Flip one channel and return the new state. Read-modify-write under
    /// a single lock hold, so a concurrent remote write cannot interleave.
    pub fn toggle(&self, channel: Channel) -> Result<bool, ActuatorError> {
        let mut inner = self.lock_timed()?;
        let state = !inner.applied[channel.index()];
        inner.pins.write(channel, state);
        inner.applied[channel.index()] = state;
        Ok(state)
    }

    /// Last-applied state of one channel.
    pub fn level(&self, channel: Channel) -> Result<bool, ActuatorError> {
        Ok(self.lock_timed()?.applied[channel.index()])
    }

    /// Drive all three gas-level indicators in one lock hold, writing every
    /// pin unconditionally (the indicator decision bypasses the cached-state
    /// suppression; the cache is still brought in sync).
    pub fn apply_indicators(&self, red: bool, yellow: bool, blue: bool) -> Result<(), ActuatorError> {
        let mut inner = self.lock_timed()?;
        for (channel, state) in [
            (Channel::Red, red),
            (Channel::Yellow, yellow),
            (Channel::Blue, blue),
        ] {
            inner.pins.write(channel, state);
            inner.applied[channel.index()] = state;
        }
        Ok(())
    }
}
