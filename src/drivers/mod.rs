//! Relay, UART and watchdog drivers plus one-shot hardware initialisation.

pub mod hw_init;
pub mod relay;
pub mod uart;
pub mod watchdog;
