//! GPS location snippet extraction.
//!
//! The NEO-6M streams NMEA sentences continuously. When an alert is being
//! built, the extractor drains the GPS link for a fixed window, then looks
//! for the first `GPGGA` fix sentence and returns up to 80 raw characters
//! starting at the marker. No NMEA parsing, no checksum validation.
//!
//! Whatever the link buffered before the window opens is discarded, so a
//! snippet never comes from sentences older than the alert. The drain is
//! blocking and runs for the whole window regardless of what arrives. Accumulation is capped at [`GPS_BUFFER_CAP`] bytes; anything
//! received after the cap is read off the link and dropped.

use core::fmt;

use log::{debug, warn};

use crate::app::ports::ClockPort;
use crate::transport::SerialTransport;

/// Leading token of the fix sentence we report.
pub const FIX_MARKER: &[u8] = b"GPGGA";

/// Below this many bytes the receiver is considered silent.
pub const MIN_USEFUL_BYTES: usize = 10;

/// Longest snippet forwarded in an alert.
pub const SNIPPET_CHARS: usize = 80;

/// Upper bound on bytes kept from one drain window.
pub const GPS_BUFFER_CAP: usize = 1024;

const READ_CHUNK: usize = 64;

/// Pause between polls while the link is idle.
const IDLE_POLL_MS: u32 = 10;

/// Best-effort location text for one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSnippet {
    /// Fewer than [`MIN_USEFUL_BYTES`] arrived during the window.
    NoData,
    /// Data arrived but contained no fix sentence.
    SignalWeak,
    /// Raw text starting at the fix marker.
    Sentence(heapless::String<SNIPPET_CHARS>),
}

impl LocationSnippet {
    /// Classify one window's worth of received bytes.
    pub fn from_buffer(buf: &[u8]) -> Self {
        if buf.len() < MIN_USEFUL_BYTES {
            return Self::NoData;
        }

        let Some(at) = find_marker(buf) else {
            return Self::SignalWeak;
        };

        let end = (at + SNIPPET_CHARS).min(buf.len());
        let mut text = heapless::String::new();
        for &b in &buf[at..end] {
            // NMEA is ASCII; line noise is replaced so the snippet stays
            // one byte per character.
            let c = if b.is_ascii() { b as char } else { '?' };
            let _ = text.push(c);
        }
        Self::Sentence(text)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoData => "No GPS Data",
            Self::SignalWeak => "GPS Signal Weak",
            Self::Sentence(s) => s.as_str(),
        }
    }

    /// True when a fix sentence was found.
    pub fn is_fix(&self) -> bool {
        matches!(self, Self::Sentence(_))
    }
}

impl fmt::Display for LocationSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn find_marker(buf: &[u8]) -> Option<usize> {
    buf.windows(FIX_MARKER.len()).position(|w| w == FIX_MARKER)
}

/// Drains the GPS link for a fixed window. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct LocationExtractor {
    window_ms: u32,
}

impl LocationExtractor {
    pub fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Block for the full window, then classify what arrived.
    ///
    /// The receiver streams continuously, so the link's RX backlog is
    /// thrown away first: only bytes that arrive inside the window count.
    pub fn extract<T, C>(&self, gps: &mut T, clock: &mut C) -> LocationSnippet
    where
        T: SerialTransport,
        C: ClockPort,
    {
        if let Err(e) = gps.clear_rx() {
            warn!("GPS backlog flush failed: {:?}", e);
        }

        let mut buf: heapless::Vec<u8, GPS_BUFFER_CAP> = heapless::Vec::new();
        let mut dropped: usize = 0;
        let window = u64::from(self.window_ms);
        let start = clock.uptime_ms();

        while clock.uptime_ms().saturating_sub(start) < window {
            let mut chunk = [0u8; READ_CHUNK];
            match gps.read(&mut chunk) {
                Ok(0) => clock.delay_ms(IDLE_POLL_MS),
                Ok(n) => {
                    let n = n.min(chunk.len());
                    let take = n.min(GPS_BUFFER_CAP - buf.len());
                    let _ = buf.extend_from_slice(&chunk[..take]);
                    dropped += n - take;
                }
                Err(e) => {
                    warn!("GPS read failed: {:?}", e);
                    clock.delay_ms(IDLE_POLL_MS);
                }
            }
        }

        if dropped > 0 {
            debug!("GPS buffer full, dropped {} bytes", dropped);
        }
        let snippet = LocationSnippet::from_buffer(&buf);
        debug!("GPS window closed: {} bytes -> {:?}", buf.len(), snippet);
        snippet
    }
}
