//! Device configuration parameters
//!
//! All tunable parameters for the SmartDevice board.
//! Values are persisted in NVS by [`NvsAdapter`](crate::adapters::nvs::NvsAdapter).

use serde::{Deserialize, Serialize};

/// Baud rates the host link is allowed to run at.
pub const SUPPORTED_BAUD_RATES: [u32; 6] = [9_600, 19_200, 38_400, 57_600, 115_200, 230_400];

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Human-readable name reported in the startup banner.
    pub device_name: String,

    // --- Relay ---
    /// `true` when a HIGH level energises the relay coil.
    pub relay_active_high: bool,
    /// Relay state applied once at boot.
    pub relay_on_at_boot: bool,

    // --- Sensor ---
    /// ADC reference voltage in millivolts (full-scale reading).
    pub sensor_vref_mv: u16,
    /// How often the main loop logs a sensor sample (milliseconds).
    pub sensor_log_interval_ms: u32,

    // --- Host link ---
    /// UART baud rate for the host link.
    pub uart_baud: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: String::from("smartdevice"),

            relay_active_high: true,
            relay_on_at_boot: false,

            sensor_vref_mv: 3300,
            sensor_log_interval_ms: 5000,

            uart_baud: 9600,
        }
    }
}

impl DeviceConfig {
    /// Range-check every field. Returns the first offending field description.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.device_name.is_empty() || self.device_name.len() > 32 {
            return Err("device_name must be 1–32 bytes");
        }
        if !(1000..=5000).contains(&self.sensor_vref_mv) {
            return Err("sensor_vref_mv must be 1000–5000");
        }
        if !(100..=600_000).contains(&self.sensor_log_interval_ms) {
            return Err("sensor_log_interval_ms must be 100–600000");
        }
        if !SUPPORTED_BAUD_RATES.contains(&self.uart_baud) {
            return Err("uart_baud must be a standard rate (9600–230400)");
        }
        Ok(())
    }
}
