//! Alerting over the two serial links.
//!
//! [`SmsAlerter`] bundles the modem link, the GPS link and a clock behind
//! the [`AlertPort`] the application core talks to. The location
//! extractor and messenger it delegates to keep no state between alerts.

pub mod location;
pub mod messenger;

use crate::app::ports::{AlertPort, ClockPort};
use crate::config::SystemConfig;
use crate::transport::SerialTransport;

use location::{LocationExtractor, LocationSnippet};
use messenger::AlertMessenger;

/// Modem + GPS alert adapter.
pub struct SmsAlerter<M, G, C> {
    modem: M,
    gps: G,
    clock: C,
    messenger: AlertMessenger,
    extractor: LocationExtractor,
}

impl<M, G, C> SmsAlerter<M, G, C>
where
    M: SerialTransport,
    G: SerialTransport,
    C: ClockPort,
{
    pub fn new(config: &SystemConfig, modem: M, gps: G, clock: C) -> Self {
        Self {
            modem,
            gps,
            clock,
            messenger: AlertMessenger::new(config),
            extractor: LocationExtractor::new(config.gps_window_ms),
        }
    }

    pub fn modem(&self) -> &M {
        &self.modem
    }

    pub fn gps(&self) -> &G {
        &self.gps
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<M, G, C> AlertPort for SmsAlerter<M, G, C>
where
    M: SerialTransport,
    G: SerialTransport,
    C: ClockPort,
{
    fn locate(&mut self) -> LocationSnippet {
        self.extractor.extract(&mut self.gps, &mut self.clock)
    }

    fn send_sms(&mut self, body: &str) {
        self.messenger.send(&mut self.modem, &mut self.clock, body);
    }
}
