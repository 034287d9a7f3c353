//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the interlock rules: the per-cycle orchestration
//! of sensor read, relay decision and alerting. All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
