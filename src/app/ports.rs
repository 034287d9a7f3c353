//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor, relay, SMS alerter, clock, event sinks)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use embedded_hal::delay::DelayNs;

use crate::alert::location::LocationSnippet;
use crate::error::{ActuatorError, SensorError};
use crate::safety::RelayState;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the alcohol sensor.
pub trait SensorPort {
    /// Take one fresh raw ADC sample. Never cached across calls.
    fn read_alcohol(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the ignition relay.
pub trait RelayPort {
    /// Drive the relay to `state`.
    fn set_relay(&mut self, state: RelayState) -> Result<(), ActuatorError>;

    /// Position last written to the hardware.
    fn relay(&self) -> RelayState;
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → modem / GPS)
// ───────────────────────────────────────────────────────────────

/// Outbound alerting. Both calls block for fixed, non-cancellable
/// durations dictated by the peripherals.
pub trait AlertPort {
    /// Drain the GPS link for the configured window and return a
    /// best-effort location snippet.
    fn locate(&mut self) -> LocationSnippet;

    /// Fire-and-forget SMS to the configured number. Link failures are
    /// logged by the adapter and never reported back.
    fn send_sms(&mut self, body: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus the blocking delays used for peripheral timing.
pub trait ClockPort: DelayNs {
    /// Milliseconds since boot.
    fn uptime_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostic stream)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
