//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the relay driver and the analog sensor, exposing them through
//! [`RelayPort`] and [`SensorPort`]. On non-espidf targets, the underlying
//! drivers use the hw_init simulation stubs.

use log::warn;

use crate::app::ports::{RelayPort, SensorPort};
use crate::config::DeviceConfig;
use crate::drivers::relay::{RelayDriver, RelayPin};
use crate::error::{ActuatorError, SensorError};
use crate::pins;
use crate::sensors::{AnalogReading, AnalogSensor};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    relay: RelayDriver<RelayPin>,
    sensor: AnalogSensor,
}

impl HardwareAdapter {
    pub fn new(relay: RelayDriver<RelayPin>, sensor: AnalogSensor) -> Self {
        Self { relay, sensor }
    }

    /// Build the board's relay and sensor from configuration.
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self::new(
            RelayDriver::new(RelayPin, config.relay_active_high),
            AnalogSensor::new(pins::SENSOR_PIN, config.sensor_vref_mv),
        )
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl RelayPort for HardwareAdapter {
    fn set_relay(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay.set(on)
    }

    fn relay_on(&self) -> bool {
        self.relay.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_sensor(&mut self) -> Result<AnalogReading, SensorError> {
        self.sensor.read().inspect_err(|e| warn!("HardwareAdapter: sensor read failed: {}", e))
    }
}
