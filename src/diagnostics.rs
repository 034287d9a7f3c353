//! Runtime diagnostics.
//!
//! Counters are owned by the application service and assembled into a
//! [`RuntimeMetrics`] snapshot for the periodic heartbeat line. Nothing is
//! persisted; a panic is logged and the platform resets.

/// Runtime diagnostics snapshot collected on-demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeMetrics {
    pub uptime_secs: u64,
    pub control_cycles: u64,
    pub alerts_sent: u32,
    pub sensor_faults: u32,
    pub relay_faults: u32,
    pub heap_free: u32,
}

impl RuntimeMetrics {
    #[cfg(target_os = "espidf")]
    pub fn collect(
        uptime_secs: u64,
        control_cycles: u64,
        alerts_sent: u32,
        sensor_faults: u32,
        relay_faults: u32,
    ) -> Self {
        // SAFETY: read-only query of the heap allocator statistics.
        let heap_free = unsafe { esp_idf_svc::sys::esp_get_free_heap_size() };
        Self {
            uptime_secs,
            control_cycles,
            alerts_sent,
            sensor_faults,
            relay_faults,
            heap_free,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn collect(
        uptime_secs: u64,
        control_cycles: u64,
        alerts_sent: u32,
        sensor_faults: u32,
        relay_faults: u32,
    ) -> Self {
        Self {
            uptime_secs,
            control_cycles,
            alerts_sent,
            sensor_faults,
            relay_faults,
            // Host builds have no fixed heap to report.
            heap_free: 0,
        }
    }
}

/// Install a panic hook that logs the reason before the default handler
/// aborts and the chip resets.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => log::error!("PANIC at {}:{}: {}", loc.file(), loc.line(), reason),
            None => log::error!("PANIC: {}", reason),
        }
    }));
}
