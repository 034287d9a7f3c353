//! Sensor drivers.
//!
//! The interlock has a single analog input, the MQ-3 alcohol sensor.

pub mod alcohol;
