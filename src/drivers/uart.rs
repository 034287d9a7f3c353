//! UART serial link for the modem and GPS receiver.
//!
//! Implements [`SerialTransport`] over `esp_idf_hal::uart::UartDriver`
//! (8N1, no flow control). Reads never block: they return whatever the
//! driver's RX ring buffer already holds.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the HAL UART driver, opened from the board peripherals.
//! On host/test: an in-memory link with injectable RX bytes and captured
//! TX bytes.

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
#[cfg(target_os = "espidf")]
use esp_idf_hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_hal::uart::{Uart, UartDriver, config::Config};

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

use log::info;

use crate::error::CommsError;
use crate::transport::SerialTransport;

/// Upper bound on how long `flush` waits for the TX FIFO to drain.
#[cfg(target_os = "espidf")]
const TX_DRAIN_TICKS: u32 = 100;

/// Zero-tick timeout: return immediately with what is buffered.
#[cfg(target_os = "espidf")]
const NON_BLOCKING: u32 = 0;

#[cfg(target_os = "espidf")]
pub struct UartTransport {
    driver: UartDriver<'static>,
}

#[cfg(not(target_os = "espidf"))]
pub struct UartTransport {
    port: i32,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

#[cfg(target_os = "espidf")]
impl UartTransport {
    /// Install the driver on `uart`, routed to the given pins.
    pub fn open<U: Uart>(
        uart: impl Peripheral<P = U> + 'static,
        tx: impl Peripheral<P = impl OutputPin> + 'static,
        rx: impl Peripheral<P = impl InputPin> + 'static,
        baud: u32,
    ) -> Result<Self, CommsError> {
        let mut config = Config::new().baudrate(baud.into());
        config.rx_fifo_size = crate::pins::UART_RX_BUFFER_BYTES;

        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|e| CommsError::UartInitFailed(e.code()))?;

        info!("UART{}: {} baud", driver.port(), baud);
        Ok(Self { driver })
    }

    pub fn port(&self) -> i32 {
        self.driver.port() as i32
    }
}

#[cfg(not(target_os = "espidf"))]
impl UartTransport {
    pub fn open(port: i32, baud: u32) -> Result<Self, CommsError> {
        info!("UART{}(sim): {} baud", port, baud);
        Ok(Self {
            port,
            rx: VecDeque::new(),
            tx: Vec::new(),
        })
    }

    pub fn port(&self) -> i32 {
        self.port
    }

    /// Queue bytes as if the peer had sent them.
    pub fn sim_inject_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Take everything written so far.
    pub fn sim_take_tx(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }
}

#[cfg(target_os = "espidf")]
impl SerialTransport for UartTransport {
    type Error = CommsError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, CommsError> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.driver
            .read(buf, NON_BLOCKING)
            .map_err(|_| CommsError::UartReadFailed)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, CommsError> {
        self.driver.write(data).map_err(|_| CommsError::UartWriteFailed)
    }

    fn flush(&mut self) -> Result<(), CommsError> {
        self.driver
            .wait_tx_done(TX_DRAIN_TICKS)
            .map_err(|_| CommsError::UartWriteFailed)
    }

    fn clear_rx(&mut self) -> Result<(), CommsError> {
        self.driver.clear_rx().map_err(|_| CommsError::UartReadFailed)
    }
}

#[cfg(not(target_os = "espidf"))]
impl SerialTransport for UartTransport {
    type Error = CommsError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, CommsError> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, CommsError> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), CommsError> {
        Ok(())
    }

    fn clear_rx(&mut self) -> Result<(), CommsError> {
        self.rx.clear();
        Ok(())
    }
}
