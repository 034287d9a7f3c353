//! Control-loop watchdog (ESP-IDF Task Watchdog Timer).
//!
//! One loop iteration legitimately blocks for a long time when an alert
//! goes out: the GPS window, four modem pauses, then the poll delay. The
//! timeout is taken from [`SystemConfig`] and must stay above
//! [`SystemConfig::worst_case_cycle_ms`]; a stall beyond that panics and
//! the chip resets with the relay pin back at its HIGH (ignition open)
//! reset level.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{
    ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure, esp_task_wdt_reset,
};
use log::{info, warn};

use crate::config::SystemConfig;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Arm the watchdog for the control task using `config`'s timeout.
    pub fn start(config: &SystemConfig) -> Self {
        let timeout_ms = config.watchdog_timeout_ms;
        let worst_case_ms = config.worst_case_cycle_ms();
        if timeout_ms <= worst_case_ms {
            warn!(
                "Watchdog: {}ms timeout does not cover a {}ms alert cycle",
                timeout_ms, worst_case_ms
            );
        }
        info!(
            "Watchdog: {}ms timeout, worst-case cycle {}ms",
            timeout_ms, worst_case_ms
        );
        Self::arm(timeout_ms)
    }

    #[cfg(target_os = "espidf")]
    fn arm(timeout_ms: u32) -> Self {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        // SAFETY: reconfigure + subscribe once from the control task during
        // boot; nothing else touches the TWDT.
        let subscribed = unsafe {
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK as i32 {
                warn!("Watchdog: reconfigure returned {}", ret);
            }
            let ret = esp_task_wdt_add(core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                warn!("Watchdog: control task not subscribed ({})", ret);
            }
            ret == ESP_OK as i32
        };
        Self { timeout_ms, subscribed }
    }

    #[cfg(not(target_os = "espidf"))]
    fn arm(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Called once per control-loop iteration.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: the control task is subscribed.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }
}
