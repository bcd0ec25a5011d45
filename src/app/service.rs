//! Device service — the hexagonal core.
//!
//! [`DeviceService`] maps host commands onto the board's two devices:
//!
//! | device_id | actions                                  |
//! |-----------|------------------------------------------|
//! | `relay`   | `turn_on`, `turn_off`, `toggle`, `status` |
//! | `sensor`  | `read`                                   |
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────┐ ──▶ EventSink
//!                 │   DeviceService     │
//!   RelayPort ◀── └────────────────────┘
//! ```

use std::collections::BTreeMap;

use log::{info, warn};

use crate::config::DeviceConfig;
use crate::error::{ActuatorError, SensorError};
use crate::protocol::message::{ActionError, ActionResult, DeviceCommand, DeviceResponse};
use crate::sensors::AnalogReading;

use super::events::AppEvent;
use super::ports::{DeviceControl, EventSink, RelayPort, SensorPort};

pub const RELAY_DEVICE: &str = "relay";
pub const SENSOR_DEVICE: &str = "sensor";

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

pub struct DeviceService<H, E> {
    hw: H,
    sink: E,
    config: DeviceConfig,
    last_reading: Option<AnalogReading>,
}

impl<H, E> DeviceService<H, E>
where
    H: RelayPort + SensorPort,
    E: EventSink,
{
    /// Construct the service. Does **not** touch the relay; call [`start`](Self::start).
    pub fn new(hw: H, sink: E, config: DeviceConfig) -> Self {
        Self {
            hw,
            sink,
            config,
            last_reading: None,
        }
    }

    /// Apply the configured boot relay state.
    pub fn start(&mut self) -> Result<(), ActuatorError> {
        let on = self.config.relay_on_at_boot;
        self.hw.set_relay(on)?;
        self.sink.emit(&AppEvent::Started { relay_on: on });
        info!("DeviceService started, relay {}", on_off(on));
        Ok(())
    }

    /// Take one sensor sample and remember it for [`DeviceControl::device_states`].
    pub fn sample_sensor(&mut self) -> Result<AnalogReading, SensorError> {
        let reading = self.hw.read_sensor()?;
        self.last_reading = Some(reading);
        self.sink.emit(&AppEvent::SensorRead(reading));
        Ok(reading)
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    // ── Device actions ────────────────────────────────────────

    fn relay_action(&mut self, action: &str) -> ActionResult {
        match action {
            "turn_on" => self.switch_relay(true),
            "turn_off" => self.switch_relay(false),
            "toggle" => {
                let on = !self.hw.relay_on();
                self.switch_relay(on)
            }
            "status" => Ok(format!("Relay is {}", on_off(self.hw.relay_on()))),
            other => Err(ActionError::Rejected(format!("Unknown action: {other}"))),
        }
    }

    fn switch_relay(&mut self, on: bool) -> ActionResult {
        self.hw
            .set_relay(on)
            .map_err(|e| ActionError::Failed(format!("Relay write failed: {e}")))?;
        self.sink.emit(&AppEvent::RelaySwitched { on });
        Ok(format!("Relay turned {}", on_off(on)))
    }

    fn sensor_action(&mut self, action: &str) -> ActionResult {
        match action {
            "read" => {
                let r = self
                    .sample_sensor()
                    .map_err(|e| ActionError::Failed(format!("Sensor read failed: {e}")))?;
                Ok(format!("Sensor raw={} mv={}", r.raw, r.millivolts))
            }
            other => Err(ActionError::Rejected(format!("Unknown action: {other}"))),
        }
    }
}

impl<H, E> DeviceControl for DeviceService<H, E>
where
    H: RelayPort + SensorPort,
    E: EventSink,
{
    fn control_device(&mut self, command: &DeviceCommand) -> DeviceResponse {
        let result = match command.device_id.as_str() {
            RELAY_DEVICE => self.relay_action(&command.action),
            SENSOR_DEVICE => self.sensor_action(&command.action),
            other => Err(ActionError::Rejected(format!("Unknown device_id: {other}"))),
        };

        let response = DeviceResponse::from_result(command.id.clone(), result);
        if !response.is_ok() {
            warn!(
                "command {:?} {}/{} -> {:?}: {}",
                command.id, command.device_id, command.action, response.code, response.msg
            );
            self.sink.emit(&AppEvent::CommandRejected {
                id: response.id.clone(),
                code: response.code,
                msg: response.msg.clone(),
            });
        }
        response
    }

    fn device_states(&self) -> BTreeMap<String, String> {
        let mut states = BTreeMap::new();
        states.insert(RELAY_DEVICE.to_owned(), on_off(self.hw.relay_on()).to_owned());
        let sensor = self
            .last_reading
            .map_or_else(|| "unknown".to_owned(), |r| r.raw.to_string());
        states.insert(SENSOR_DEVICE.to_owned(), sensor);
        states
    }
}
