//! Serial transport abstraction — any byte-oriented channel.
//!
//! Concrete implementations:
//! - [`UartTransport`](crate::drivers::uart::UartTransport) — ESP-IDF UART
//!   (SIM800C modem, NEO-6M GPS)
//! - [`NullTransport`] — discards writes, never has data
//!
//! The alert messenger and location extractor are generic over
//! `SerialTransport`, so tests substitute a recording mock.

/// Byte-oriented serial channel.
pub trait SerialTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` already-received bytes into `buf`.
    /// Returns 0 if nothing is buffered (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for transmission.
    /// Returns the number of bytes actually accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Block until queued output has left the wire.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Discard everything received so far.
    fn clear_rx(&mut self) -> Result<(), Self::Error>;
}

/// A transport that discards all writes and never reads.
/// Stands in for a link that is not fitted on a given board.
pub struct NullTransport;

impl SerialTransport for NullTransport {
    type Error = ();

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn clear_rx(&mut self) -> Result<(), ()> {
        Ok(())
    }
}
