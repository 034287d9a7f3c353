//! Mock adapters for integration tests.
//!
//! Records every relay write, SMS and modem frame so tests can assert on
//! the full command history without touching real GPIO or UART registers.

use std::cell::Cell;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use smarthelmet::alert::location::LocationSnippet;
use smarthelmet::app::events::AppEvent;
use smarthelmet::app::ports::{AlertPort, ClockPort, EventSink, RelayPort, SensorPort};
use smarthelmet::error::{ActuatorError, SensorError};
use smarthelmet::safety::RelayState;
use smarthelmet::transport::SerialTransport;

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensor plus a recording relay.
///
/// `None` in the script is a failed ADC read. Once the script runs out
/// the last value repeats.
pub struct MockHardware {
    readings: VecDeque<Option<u16>>,
    last: Option<u16>,
    relay: RelayState,
    pub relay_calls: Vec<RelayState>,
    pub fail_relay: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(readings: &[u16]) -> Self {
        Self::scripted(readings.iter().copied().map(Some).collect())
    }

    pub fn scripted(readings: Vec<Option<u16>>) -> Self {
        Self {
            readings: readings.into(),
            last: Some(0),
            relay: RelayState::Disengaged,
            relay_calls: Vec::new(),
            fail_relay: false,
        }
    }

    pub fn last_relay_call(&self) -> Option<RelayState> {
        self.relay_calls.last().copied()
    }
}

impl SensorPort for MockHardware {
    fn read_alcohol(&mut self) -> Result<u16, SensorError> {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last.ok_or(SensorError::AdcReadFailed)
    }
}

impl RelayPort for MockHardware {
    fn set_relay(&mut self, state: RelayState) -> Result<(), ActuatorError> {
        self.relay_calls.push(state);
        if self.fail_relay {
            return Err(ActuatorError::GpioWriteFailed);
        }
        self.relay = state;
        Ok(())
    }

    fn relay(&self) -> RelayState {
        self.relay
    }
}

// ── MockAlerts ────────────────────────────────────────────────

/// Alert port that returns a fixed location and records SMS bodies.
pub struct MockAlerts {
    pub location: LocationSnippet,
    pub locate_calls: usize,
    pub sent: Vec<String>,
}

#[allow(dead_code)]
impl MockAlerts {
    pub fn new() -> Self {
        Self::with_location(LocationSnippet::NoData)
    }

    pub fn with_location(location: LocationSnippet) -> Self {
        Self {
            location,
            locate_calls: 0,
            sent: Vec::new(),
        }
    }

    /// SMS bodies other than the boot notice.
    pub fn alerts(&self) -> Vec<&String> {
        self.sent
            .iter()
            .filter(|s| s.starts_with(smarthelmet::app::service::ALERT_PREFIX))
            .collect()
    }
}

impl Default for MockAlerts {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertPort for MockAlerts {
    fn locate(&mut self) -> LocationSnippet {
        self.locate_calls += 1;
        self.location.clone()
    }

    fn send_sms(&mut self, body: &str) {
        self.sent.push(body.to_string());
    }
}

// ── MockSerial ────────────────────────────────────────────────

/// Serial link that records every write and replays scripted reads.
///
/// `backlog` is what the driver already buffered before anyone looked;
/// `clear_rx` discards it. Each queued `rx` chunk arrives later and is
/// returned by one `read` call. An empty link reads as idle.
pub struct MockSerial {
    backlog: VecDeque<u8>,
    rx: VecDeque<Vec<u8>>,
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
    pub clears: usize,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self {
            backlog: VecDeque::new(),
            rx: VecDeque::new(),
            writes: Vec::new(),
            flushes: 0,
            clears: 0,
            fail_writes: false,
        }
    }

    pub fn with_rx(chunks: &[&[u8]]) -> Self {
        let mut s = Self::new();
        for c in chunks {
            s.push_rx(c);
        }
        s
    }

    /// Bytes sitting in the driver ring before the next drain.
    pub fn with_backlog(mut self, bytes: &[u8]) -> Self {
        self.backlog.extend(bytes);
        self
    }

    pub fn push_rx(&mut self, chunk: &[u8]) {
        self.rx.push_back(chunk.to_vec());
    }

    /// Everything written so far, concatenated.
    pub fn tx_bytes(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn rx_remaining(&self) -> usize {
        self.backlog.len() + self.rx.len()
    }
}

impl Default for MockSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialTransport for MockSerial {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.backlog.is_empty() {
            let n = buf.len().min(self.backlog.len());
            for (slot, byte) in buf.iter_mut().zip(self.backlog.drain(..n)) {
                *slot = byte;
            }
            return Ok(n);
        }
        let Some(mut chunk) = self.rx.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.rx.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err("link down");
        }
        self.writes.push(data.to_vec());
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }

    fn clear_rx(&mut self) -> Result<(), Self::Error> {
        self.clears += 1;
        self.backlog.clear();
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Virtual clock: delays advance time instantly and are recorded.
///
/// `tick_ms` is added on every uptime query so busy loops still make
/// progress.
pub struct MockClock {
    now_ms: Cell<u64>,
    pub tick_ms: u64,
    pub pauses_ms: Vec<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            tick_ms: 1,
            pauses_ms: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now_ms.get()
    }

    /// Pauses of at least `min_ms`, i.e. modem pauses rather than GPS
    /// idle polls.
    pub fn long_pauses(&self, min_ms: u32) -> Vec<u32> {
        self.pauses_ms.iter().copied().filter(|&p| p >= min_ms).collect()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ms.set(self.now_ms.get() + u64::from(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
        self.now_ms.set(self.now_ms.get() + u64::from(ms));
    }
}

impl ClockPort for MockClock {
    fn uptime_ms(&self) -> u64 {
        let now = self.now_ms.get();
        self.now_ms.set(now + self.tick_ms);
        now
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
