//! Hardware adapter — bridges the sensor and relay drivers to domain ports.
//!
//! Owns the [`AlcoholSensor`] and [`RelayDriver`], exposing them through
//! [`SensorPort`] and [`RelayPort`]. On non-espidf targets the underlying
//! drivers use cfg-gated simulation stubs.

use crate::app::ports::{RelayPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::error::{ActuatorError, SensorError};
use crate::safety::RelayState;
use crate::sensors::alcohol::AlcoholSensor;

/// Concrete adapter that combines the board I/O behind port traits.
pub struct HardwareAdapter {
    sensor: AlcoholSensor,
    relay: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(sensor: AlcoholSensor, relay: RelayDriver) -> Self {
        Self { sensor, relay }
    }

    pub fn relay_driver(&self) -> &RelayDriver {
        &self.relay
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_alcohol(&mut self) -> Result<u16, SensorError> {
        self.sensor.read()
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl RelayPort for HardwareAdapter {
    fn set_relay(&mut self, state: RelayState) -> Result<(), ActuatorError> {
        self.relay.set(state)
    }

    fn relay(&self) -> RelayState {
        self.relay.state()
    }
}
