//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC (MQ-3)         |
//! |                | RelayPort          | ESP32 GPIO (relay IN)    |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | ClockPort, DelayNs | ESP32 timer / FreeRTOS   |
//!
//! The `AlertPort` adapter lives in [`crate::alert`] next to the modem and
//! GPS logic it wires together.

pub mod hardware;
pub mod log_sink;
pub mod time;
