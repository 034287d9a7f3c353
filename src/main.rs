//! SmartHelmet Firmware — Main Entry Point
//!
//! Single-threaded polling loop around the hexagonal core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    SmsAlerter           LogEventSink          │
//! │  (Sensor+Relay)     (Alert: modem+GPS)   (EventSink)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  threshold · alert latch · relay command               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  BoardClock (delays) · Watchdog                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use smarthelmet::adapters::hardware::HardwareAdapter;
use smarthelmet::adapters::log_sink::LogEventSink;
use smarthelmet::adapters::time::BoardClock;
use smarthelmet::alert::SmsAlerter;
use smarthelmet::app::events::AppEvent;
use smarthelmet::app::ports::EventSink;
use smarthelmet::app::service::AppService;
use smarthelmet::config::SystemConfig;
use smarthelmet::diagnostics;
use smarthelmet::drivers::hw_init;
use smarthelmet::drivers::relay::RelayDriver;
use smarthelmet::drivers::uart::UartTransport;
use smarthelmet::drivers::watchdog::Watchdog;
use smarthelmet::error::Error;
use smarthelmet::pins;
use smarthelmet::sensors::alcohol::AlcoholSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartHelmet v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    diagnostics::install_panic_handler();

    // ── 2. Relay parked open, ADC up ──────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Relay pin state unknown; never enter the control loop.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Compile-time configuration ─────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 4. Serial links ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let modem = UartTransport::open(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        pins::SERIAL_BAUD,
    )
    .map_err(Error::from)?;
    let gps = UartTransport::open(
        peripherals.uart2,
        peripherals.pins.gpio15,
        peripherals.pins.gpio16,
        pins::SERIAL_BAUD,
    )
    .map_err(Error::from)?;

    // ── 5. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        AlcoholSensor::new(pins::MQ3_ADC_GPIO, pins::MQ3_ADC_CHANNEL),
        RelayDriver::new(pins::RELAY_GPIO),
    );
    let mut alerts = SmsAlerter::new(&config, modem, gps, BoardClock::new());
    let mut log_sink = LogEventSink::new();
    let mut clock = BoardClock::new();

    // ── 6. App service ────────────────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut hw, &mut alerts, &mut log_sink);

    let watchdog = Watchdog::start(&config);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut alerts, &mut log_sink);

        if app.heartbeat_due() {
            let metrics = app.build_metrics(clock.uptime_secs());
            log_sink.emit(&AppEvent::Heartbeat(metrics));
        }

        watchdog.feed();

        clock.delay_ms(config.poll_interval_ms);
    }
}
