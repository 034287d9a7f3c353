//! Ignition interlock decision logic.
//!
//! The controller is a two-state machine driven solely by the current
//! reading against a fixed threshold:
//!
//! ```text
//!            reading > threshold
//!   ┌──────┐ ──────────────────▶ ┌────────┐
//!   │ SAFE │                     │ UNSAFE │ ── relay DISENGAGED
//!   └──────┘ ◀────────────────── └────────┘
//!   relay ENGAGED   reading ≤ threshold
//! ```
//!
//! There is no hysteresis band and no debounce: a single reading flips the
//! state. The controller boots in UNSAFE with the relay DISENGAGED and
//! `alert_sent == false`, so an unsafe first reading still raises one alert.
//!
//! ## Alert de-duplication
//!
//! `alert_sent` latches on the first unsafe cycle of an episode and is
//! cleared by the first safe reading. At most one alert is requested per
//! contiguous run of unsafe readings, however long the run is.

use core::fmt;

/// Ignition relay position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Ignition circuit closed — the vehicle can start.
    Engaged,
    /// Ignition circuit open — fail-safe position.
    Disengaged,
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engaged => write!(f, "ENGAGED"),
            Self::Disengaged => write!(f, "DISENGAGED"),
        }
    }
}

/// Interlock state for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyState {
    Safe,
    Unsafe,
}

impl SafetyState {
    /// Relay position mandated by this state.
    pub const fn relay(self) -> RelayState {
        match self {
            Self::Safe => RelayState::Engaged,
            Self::Unsafe => RelayState::Disengaged,
        }
    }
}

/// Result of evaluating one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDecision {
    pub reading: u16,
    pub state: SafetyState,
    pub relay: RelayState,
    /// True on the first unsafe cycle of an episode only.
    pub raise_alert: bool,
}

/// Owns the alert latch and the commanded relay position.
pub struct SafetyController {
    threshold: u16,
    state: SafetyState,
    relay: RelayState,
    alert_sent: bool,
}

impl SafetyController {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            state: SafetyState::Unsafe,
            relay: RelayState::Disengaged,
            alert_sent: false,
        }
    }

    /// Apply the threshold to `reading` and update the latch.
    pub fn evaluate(&mut self, reading: u16) -> CycleDecision {
        let state = if reading > self.threshold {
            SafetyState::Unsafe
        } else {
            SafetyState::Safe
        };

        let raise_alert = match state {
            SafetyState::Unsafe => !self.alert_sent,
            SafetyState::Safe => false,
        };
        self.alert_sent = state == SafetyState::Unsafe;

        self.state = state;
        self.relay = state.relay();

        CycleDecision {
            reading,
            state,
            relay: self.relay,
            raise_alert,
        }
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn state(&self) -> SafetyState {
        self.state
    }

    /// Relay position commanded by the last evaluation (DISENGAGED before
    /// the first reading).
    pub fn relay(&self) -> RelayState {
        self.relay
    }

    /// Whether the current unsafe episode has already been alerted.
    pub fn alert_sent(&self) -> bool {
        self.alert_sent
    }
}
