//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`SafetyController`] and the runtime counters.
//! One call to [`AppService::tick`] is one control cycle:
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                 │      AppService      │
//!   RelayPort ◀── │  threshold · latch   │ ──▶ AlertPort (GPS + SMS)
//!                 └──────────────────────┘
//! ```
//!
//! The relay is always written before any alert work starts, so the
//! ignition is already open while the alert path blocks on the GPS window
//! and modem pauses.

use core::fmt::Write as _;

use log::{info, warn};

use crate::alert::location::LocationSnippet;
use crate::config::SystemConfig;
use crate::diagnostics::RuntimeMetrics;
use crate::pins::ADC_FULL_SCALE;
use crate::safety::{CycleDecision, RelayState, SafetyController, SafetyState};

use super::events::AppEvent;
use super::ports::{AlertPort, EventSink, RelayPort, SensorPort};

/// Sent once at boot when `send_startup_notice` is set.
pub const STARTUP_NOTICE: &str = "SMART HELMET SYSTEM STARTED";

/// Prefix of every unsafe-episode alert.
pub const ALERT_PREFIX: &str = "ALCOHOL DETECTED! Ignition Disabled. Location: ";

/// One SMS worth of text.
pub const SMS_BODY_CAP: usize = 160;

pub type AlertBody = heapless::String<SMS_BODY_CAP>;

/// Build the alert text for an unsafe episode.
pub fn compose_alert_body(location: &LocationSnippet) -> AlertBody {
    let mut body = AlertBody::new();
    let _ = write!(body, "{ALERT_PREFIX}{location}");
    body
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: SystemConfig,
    safety: SafetyController,
    cycles: u64,
    alerts_sent: u32,
    sensor_faults: u32,
    relay_faults: u32,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        let safety = SafetyController::new(config.alcohol_threshold);
        Self {
            config,
            safety,
            cycles: 0,
            alerts_sent: 0,
            sensor_faults: 0,
            relay_faults: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the relay open and announce the boot.
    ///
    /// Call once before the first [`tick`](Self::tick). The startup notice
    /// does not touch the alert latch.
    pub fn start(
        &mut self,
        hw: &mut impl RelayPort,
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        self.apply_relay(hw, RelayState::Disengaged, sink);
        sink.emit(&AppEvent::Started {
            threshold: self.safety.threshold(),
        });
        info!(
            "AppService started: threshold={} relay={}",
            self.safety.threshold(),
            hw.relay()
        );

        if self.config.send_startup_notice {
            alerts.send_sms(STARTUP_NOTICE);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read → decide → relay → (maybe) alert.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + RelayPort),
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) -> CycleDecision {
        self.cycles += 1;
        let prev_state = self.safety.state();

        // 1. Fresh sample. A failed read is treated as full scale so the
        //    relay opens.
        let reading = match hw.read_alcohol() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Alcohol sensor read failed ({}), assuming full scale", e);
                self.sensor_faults = self.sensor_faults.saturating_add(1);
                sink.emit(&AppEvent::SensorFault(e));
                ADC_FULL_SCALE
            }
        };

        // 2. Threshold + latch
        let decision = self.safety.evaluate(reading);

        // 3. Relay first
        self.apply_relay(hw, decision.relay, sink);

        // 4. Diagnostic stream
        sink.emit(&AppEvent::Reading(decision));
        if decision.state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: decision.state,
            });
        }

        // 5. One alert per unsafe episode
        if decision.raise_alert {
            self.raise_alert(alerts, sink);
        }

        decision
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether a heartbeat is due after the latest cycle.
    pub fn heartbeat_due(&self) -> bool {
        let every = u64::from(self.config.heartbeat_interval_cycles);
        every > 0 && self.cycles > 0 && self.cycles % every == 0
    }

    /// Snapshot runtime counters for the heartbeat event.
    pub fn build_metrics(&self, uptime_secs: u64) -> RuntimeMetrics {
        RuntimeMetrics::collect(
            uptime_secs,
            self.cycles,
            self.alerts_sent,
            self.sensor_faults,
            self.relay_faults,
        )
    }

    pub fn state(&self) -> SafetyState {
        self.safety.state()
    }

    /// Relay position commanded by the controller.
    pub fn relay(&self) -> RelayState {
        self.safety.relay()
    }

    pub fn alert_sent(&self) -> bool {
        self.safety.alert_sent()
    }

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    pub fn alerts_sent(&self) -> u32 {
        self.alerts_sent
    }

    pub fn sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_relay(&mut self, hw: &mut impl RelayPort, state: RelayState, sink: &mut impl EventSink) {
        if let Err(e) = hw.set_relay(state) {
            warn!("Relay write to {} failed: {}", state, e);
            self.relay_faults = self.relay_faults.saturating_add(1);
            sink.emit(&AppEvent::RelayFault(e));
        }
    }

    fn raise_alert(&mut self, alerts: &mut impl AlertPort, sink: &mut impl EventSink) {
        info!("Unsafe episode: collecting location before alert");
        let location = alerts.locate();
        let body = compose_alert_body(&location);
        alerts.send_sms(&body);
        self.alerts_sent = self.alerts_sent.saturating_add(1);
        sink.emit(&AppEvent::AlertSent { location });
    }
}
