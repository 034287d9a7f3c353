//! Ignition relay driver (single-channel opto-isolated module).
//!
//! The module's IN pin is active LOW: driving the GPIO LOW closes the
//! contact and lets the ignition run. HIGH (and a floating pin, thanks to
//! the module's pull-up) leaves it open.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init helpers.
//! On host/test: tracks the pin level in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::safety::RelayState;

pub struct RelayDriver {
    gpio: i32,
    state: RelayState,
    level_high: bool,
}

impl RelayDriver {
    /// Assumes `hw_init` already parked the pin HIGH.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: RelayState::Disengaged,
            level_high: true,
        }
    }

    pub fn set(&mut self, state: RelayState) -> Result<(), ActuatorError> {
        let high = Self::level_for(state);
        hw_init::gpio_write(self.gpio, high)?;
        self.level_high = high;
        self.state = state;
        Ok(())
    }

    /// Active-low mapping.
    pub const fn level_for(state: RelayState) -> bool {
        match state {
            RelayState::Engaged => false,
            RelayState::Disengaged => true,
        }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Logic level last written to the pin.
    pub fn level_high(&self) -> bool {
        self.level_high
    }
}
