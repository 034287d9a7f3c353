//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART0 / USB-CDC). This is the diagnostic status stream: one
//! line per control cycle with the raw reading and the decision.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::safety::SafetyState;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Reading(d) => {
                let verdict = match d.state {
                    SafetyState::Unsafe => "ALCOHOL DETECTED! Ignition Disabled.",
                    SafetyState::Safe => "SAFE TO RIDE - Ignition ON",
                };
                info!("ALCOHOL | value={} | relay={} | {}", d.reading, d.relay, verdict);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::AlertSent { location } => {
                info!("ALERT | sent, location={}", location);
            }
            AppEvent::SensorFault(e) => {
                warn!("FAULT | sensor: {}", e);
            }
            AppEvent::RelayFault(e) => {
                warn!("FAULT | relay: {}", e);
            }
            AppEvent::Heartbeat(m) => {
                info!(
                    "HEARTBEAT | up={}s | cycles={} | alerts={} | sensor_faults={} | \
                     relay_faults={} | heap_free={}",
                    m.uptime_secs,
                    m.control_cycles,
                    m.alerts_sent,
                    m.sensor_faults,
                    m.relay_faults,
                    m.heap_free,
                );
            }
            AppEvent::Started { threshold } => {
                info!("START | threshold={} | relay=DISENGAGED", threshold);
            }
        }
    }
}
