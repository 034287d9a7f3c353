//! GPIO / peripheral pin assignments for the SmartHelmet controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Alcohol sensor (MQ-3, analog)
// ---------------------------------------------------------------------------

/// MQ-3 analog output through a resistive divider.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const MQ3_ADC_GPIO: i32 = 4;
/// ADC1 channel matching [`MQ3_ADC_GPIO`].
pub const MQ3_ADC_CHANNEL: u32 = 3;
/// Largest raw value the 12-bit ADC can report.
pub const ADC_FULL_SCALE: u16 = 4095;

// ---------------------------------------------------------------------------
// Ignition relay
// ---------------------------------------------------------------------------

/// Relay module IN pin. Active LOW: LOW = ignition engaged.
pub const RELAY_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Serial links
//
// `main` takes the matching `Peripherals` fields (uart1/gpio17/gpio18,
// uart2/gpio15/gpio16); keep the two in step.
// ---------------------------------------------------------------------------

/// SIM800C GSM modem.
pub const MODEM_UART_PORT: i32 = 1;
pub const MODEM_TX_GPIO: i32 = 17;
pub const MODEM_RX_GPIO: i32 = 18;

/// NEO-6M GPS receiver (RX only in practice; TX wired for completeness).
pub const GPS_UART_PORT: i32 = 2;
pub const GPS_TX_GPIO: i32 = 15;
pub const GPS_RX_GPIO: i32 = 16;

/// Both the SIM800C and the NEO-6M ship configured for 9600 8N1.
pub const SERIAL_BAUD: u32 = 9600;

/// Driver-side RX ring buffer size for each UART.
pub const UART_RX_BUFFER_BYTES: usize = 1024;
