//! Port traits — the hexagonal boundary between device logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DeviceService (domain)
//! ```
//!
//! Driven adapters (relay, sensor, event sinks, config storage) implement
//! these traits. The [`DeviceService`](super::service::DeviceService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use std::collections::BTreeMap;

use crate::config::DeviceConfig;
use crate::error::{ActuatorError, SensorError};
use crate::protocol::message::{DeviceCommand, DeviceResponse};
use crate::sensors::AnalogReading;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait RelayPort {
    /// Energise (`true`) or release (`false`) the relay.
    fn set_relay(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Last successfully commanded relay state.
    fn relay_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait SensorPort {
    fn read_sensor(&mut self) -> Result<AnalogReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Device control (driving side: protocol → domain)
// ───────────────────────────────────────────────────────────────

/// Anything that can execute host device commands: the real board or
/// the [`DeviceSimulator`](crate::simulator::DeviceSimulator).
pub trait DeviceControl {
    /// Apply one command and describe the outcome.
    fn control_device(&mut self, command: &DeviceCommand) -> DeviceResponse;

    /// Current state of every device, keyed by device id.
    fn device_states(&self) -> BTreeMap<String, String>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists device configuration.
///
/// Implementations MUST validate before persisting; invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`DeviceConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<DeviceConfig, ConfigError>;

    fn save(&self, config: &DeviceConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
