//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The only production sink
//! writes them to the serial console as the diagnostic status stream.

use crate::alert::location::LocationSnippet;
use crate::diagnostics::RuntimeMetrics;
use crate::error::{ActuatorError, SensorError};
use crate::safety::{CycleDecision, SafetyState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started; the relay is DISENGAGED.
    Started { threshold: u16 },

    /// One control cycle completed.
    Reading(CycleDecision),

    /// The interlock crossed the threshold in either direction.
    StateChanged { from: SafetyState, to: SafetyState },

    /// An unsafe-episode alert was handed to the modem.
    AlertSent { location: LocationSnippet },

    /// The sensor read failed; a full-scale reading was substituted.
    SensorFault(SensorError),

    /// The relay GPIO write failed.
    RelayFault(ActuatorError),

    /// Periodic runtime metrics.
    Heartbeat(RuntimeMetrics),
}
