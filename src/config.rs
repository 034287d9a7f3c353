//! System configuration parameters
//!
//! Every tunable is a compile-time constant; [`SystemConfig::default`] is the
//! only way a config is built. Nothing is loaded or persisted at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins::ADC_FULL_SCALE;

/// Raw ADC counts above which the rider is considered unsafe.
/// Calibrate against the individual MQ-3 after its burn-in period.
pub const ALCOHOL_THRESHOLD: u16 = 300;

/// Destination for alert SMS, in international format.
pub const ALERT_PHONE_NUMBER: &str = "+910000000000";

/// Capacity of the phone number field (E.164 max is 15 digits plus `+`).
pub const PHONE_NUMBER_CAP: usize = 20;

/// Control loop cadence.
pub const POLL_INTERVAL_MS: u32 = 1000;

/// How long the GPS channel is drained when building an alert.
pub const GPS_WINDOW_MS: u32 = 5000;

/// Pause after the mode-select, compose and body frames.
pub const MODEM_COMMAND_PAUSE_MS: u32 = 500;

/// Pause after CTRL-Z while the modem hands the message to the network.
pub const MODEM_SEND_PAUSE_MS: u32 = 1000;

/// Emit a runtime-metrics heartbeat every N control cycles.
pub const HEARTBEAT_INTERVAL_CYCLES: u32 = 60;

/// Task watchdog timeout. Must exceed the longest blocking cycle.
pub const WATCHDOG_TIMEOUT_MS: u32 = 15_000;

/// Send a "system started" SMS at boot.
pub const SEND_STARTUP_NOTICE: bool = true;

const _: () = assert!(ALERT_PHONE_NUMBER.len() <= PHONE_NUMBER_CAP);

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Interlock ---
    /// Readings strictly greater than this are unsafe.
    pub alcohol_threshold: u16,

    // --- Alerting ---
    /// Alert SMS destination.
    pub alert_number: heapless::String<PHONE_NUMBER_CAP>,
    /// Send a notice SMS when the controller boots.
    pub send_startup_notice: bool,

    // --- Timing ---
    /// Delay between control cycles (milliseconds).
    pub poll_interval_ms: u32,
    /// GPS drain window per alert (milliseconds).
    pub gps_window_ms: u32,
    /// Modem inter-command pause (milliseconds).
    pub modem_command_pause_ms: u32,
    /// Modem pause after the terminator byte (milliseconds).
    pub modem_send_pause_ms: u32,
    /// Heartbeat period in control cycles (0 disables).
    pub heartbeat_interval_cycles: u32,
    /// Task watchdog timeout (milliseconds).
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut alert_number = heapless::String::new();
        let _ = alert_number.push_str(ALERT_PHONE_NUMBER);

        Self {
            alcohol_threshold: ALCOHOL_THRESHOLD,

            alert_number,
            send_startup_notice: SEND_STARTUP_NOTICE,

            poll_interval_ms: POLL_INTERVAL_MS,
            gps_window_ms: GPS_WINDOW_MS,
            modem_command_pause_ms: MODEM_COMMAND_PAUSE_MS,
            modem_send_pause_ms: MODEM_SEND_PAUSE_MS,
            heartbeat_interval_cycles: HEARTBEAT_INTERVAL_CYCLES,
            watchdog_timeout_ms: WATCHDOG_TIMEOUT_MS,
        }
    }
}

impl SystemConfig {
    /// Time spent inside one SMS transmission (four fixed pauses).
    pub fn sms_duration_ms(&self) -> u32 {
        self.modem_command_pause_ms * 3 + self.modem_send_pause_ms
    }

    /// Longest a single loop iteration can block: alert path plus the
    /// inter-cycle delay.
    pub fn worst_case_cycle_ms(&self) -> u32 {
        self.gps_window_ms + self.sms_duration_ms() + self.poll_interval_ms
    }

    /// Reject values the firmware cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !is_dialable(&self.alert_number) {
            return Err(Error::Config("alert_number must be digits with an optional leading '+'"));
        }
        // A failed ADC read is replaced by full scale; it must stay unsafe.
        if self.alcohol_threshold >= ADC_FULL_SCALE {
            return Err(Error::Config("alcohol_threshold must be below ADC full scale"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.worst_case_cycle_ms() {
            return Err(Error::Config(
                "watchdog_timeout_ms shorter than worst-case alert cycle",
            ));
        }
        Ok(())
    }
}

/// `+` optional, then at least three ASCII digits and nothing else.
fn is_dialable(number: &str) -> bool {
    let digits = number.strip_prefix('+').unwrap_or(number);
    digits.len() >= 3 && digits.bytes().all(|b| b.is_ascii_digit())
}
