//! MQ-3 alcohol vapour sensor driver.
//!
//! The sensor's analog output goes through a resistive divider into an
//! ESP32-S3 ADC1 channel. Readings are raw 12-bit counts; the interlock
//! threshold is expressed in the same units, so no conversion to mg/L is
//! done here.
//!
//! Every call samples the ADC. Nothing is averaged or cached: the control
//! loop wants one fresh value per cycle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection, with an
//! `AtomicBool` to simulate driver failures.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_MQ3_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_MQ3_FAULT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_alcohol_adc(raw: u16) {
    SIM_MQ3_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc_fault(failing: bool) {
    SIM_MQ3_FAULT.store(failing, Ordering::Relaxed);
}

pub struct AlcoholSensor {
    channel: u32,
    total_reads: u32,
    _adc_gpio: i32,
}

impl AlcoholSensor {
    pub fn new(adc_gpio: i32, channel: u32) -> Self {
        Self {
            channel,
            total_reads: 0,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&mut self) -> Result<u16, SensorError> {
        self.total_reads = self.total_reads.saturating_add(1);
        self.read_adc()
    }

    /// Samples taken since boot.
    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        if SIM_MQ3_FAULT.load(Ordering::Relaxed) {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(SIM_MQ3_ADC.load(Ordering::Relaxed))
    }
}
