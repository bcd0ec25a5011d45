//! SmartDevice Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter     LogEventSink   NvsAdapter           │
//! │  (Relay + Sensor)    (EventSink)    (ConfigPort)         │
//! │  UartTransport ──▶ SerialEndpoint                        │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        DeviceService (relay · sensor)          │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::delay::FreeRtos;

use smartdevice::adapters::hardware::HardwareAdapter;
use smartdevice::adapters::log_sink::LogEventSink;
use smartdevice::adapters::nvs::NvsAdapter;
use smartdevice::adapters::time::{Esp32TimeAdapter, IntervalTimer};
use smartdevice::adapters::uart::UartTransport;
use smartdevice::app::ports::ConfigPort;
use smartdevice::app::service::DeviceService;
use smartdevice::config::DeviceConfig;
use smartdevice::drivers::hw_init;
use smartdevice::error::Error;
use smartdevice::protocol::endpoint::SerialEndpoint;

/// Upper bound on one UART read; keeps the sensor log on schedule.
const UART_READ_TIMEOUT_MS: u64 = 20;

type Service = DeviceService<HardwareAdapter, LogEventSink>;

/// Bring up peripherals and the device service, applying the boot relay state.
fn boot(config: &DeviceConfig) -> smartdevice::error::Result<Service> {
    config.validate().map_err(Error::Config)?;
    hw_init::init_peripherals()?;
    hw_init::init_uart(config.uart_baud)?;

    let hw = HardwareAdapter::from_config(config);
    let mut service = DeviceService::new(hw, LogEventSink::new(), config.clone());
    service.start()?;
    Ok(service)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            NvsAdapter::default()
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            DeviceConfig::default()
        }
    };

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartDevice v{} ({})", env!("CARGO_PKG_VERSION"), config.device_name);
    info!("╚══════════════════════════════════════╝");

    // ── 3. Peripherals + service ──────────────────────────────
    let mut service = match boot(&config) {
        Ok(s) => s,
        Err(e) => {
            // Without the relay output there is nothing safe to do.
            error!("Boot failed: {} — halting", e);
            loop {
                FreeRtos::delay_ms(1000);
            }
        }
    };

    let mut transport = UartTransport::new(UART_READ_TIMEOUT_MS);
    let mut endpoint = SerialEndpoint::new();
    let clock = Esp32TimeAdapter::new();
    let mut sensor_timer =
        IntervalTimer::new(u64::from(config.sensor_log_interval_ms), clock.uptime_ms());

    info!("System ready. Entering event loop.");

    // ── 4. Event loop ─────────────────────────────────────────
    loop {
        if let Err(e) = endpoint.poll(&mut transport, &mut service) {
            warn!("UART error {}, dropping partial line", e);
            endpoint.reset();
        }

        if sensor_timer.poll(clock.uptime_ms()) {
            if let Err(e) = service.sample_sensor() {
                warn!("Periodic sensor sample failed: {}", e);
            }
        }
    }
}
