//! Simulated device back end.
//!
//! [`DeviceSimulator`] speaks the same command protocol as the real board
//! but dispatches to a table of per-device action handlers. Host tooling
//! uses it to exercise command flows without hardware; the default table
//! models a dimmable bedroom light and an IR blaster.
//!
//! Each device carries a free-form state string that handlers update and
//! [`DeviceControl::device_states`] reports.

use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::app::ports::DeviceControl;
use crate::protocol::message::{
    parse_command, require_arg, ActionError, ActionResult, Args, DeviceCommand, DeviceResponse,
};

/// Action handler: reads the command arguments, may update the device state.
pub type Handler = Box<dyn FnMut(&Args, &mut String) -> ActionResult + Send>;

struct SimDevice {
    state: String,
    actions: BTreeMap<String, Handler>,
}

pub struct DeviceSimulator {
    devices: BTreeMap<String, SimDevice>,
}

impl DeviceSimulator {
    /// A simulator with no devices.
    pub fn empty() -> Self {
        Self {
            devices: BTreeMap::new(),
        }
    }

    /// Register (or reset) a device with its initial state.
    pub fn with_device(mut self, device_id: &str, initial_state: &str) -> Self {
        self.devices.insert(
            device_id.to_owned(),
            SimDevice {
                state: initial_state.to_owned(),
                actions: BTreeMap::new(),
            },
        );
        self
    }

    /// Register an action. Unknown devices are created with state `unknown`.
    pub fn with_action<F>(mut self, device_id: &str, action: &str, handler: F) -> Self
    where
        F: FnMut(&Args, &mut String) -> ActionResult + Send + 'static,
    {
        self.devices
            .entry(device_id.to_owned())
            .or_insert_with(|| SimDevice {
                state: "unknown".to_owned(),
                actions: BTreeMap::new(),
            })
            .actions
            .insert(action.to_owned(), Box::new(handler));
        self
    }

    /// Feed raw request text, as the serial link would.
    pub fn serial_write(&mut self, text: &str) -> DeviceResponse {
        match parse_command(text) {
            Ok(cmd) => self.control_device(&cmd),
            Err(resp) => resp,
        }
    }

    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }
}

impl Default for DeviceSimulator {
    fn default() -> Self {
        Self::empty()
            .with_device("bedroom_light", "off")
            .with_action("bedroom_light", "turn_on", |_, state| {
                *state = "on".into();
                Ok("Bedroom light turned on".into())
            })
            .with_action("bedroom_light", "turn_off", |_, state| {
                *state = "off".into();
                Ok("Bedroom light turned off".into())
            })
            .with_action("bedroom_light", "set_brightness", set_brightness)
            .with_device("ir_led", "idle")
            .with_action("ir_led", "send_code", |args, state| {
                let code = match require_arg(args, "code")? {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                *state = format!("sent {code}");
                Ok(format!("IR code {code} sent"))
            })
    }
}

fn set_brightness(args: &Args, state: &mut String) -> ActionResult {
    let Value::Number(level) = require_arg(args, "level")? else {
        return Err(ActionError::Rejected("Argument level must be a number".into()));
    };
    let in_range = level.as_f64().is_some_and(|pct| (0.0..=100.0).contains(&pct));
    if !in_range {
        return Err(ActionError::Rejected("Brightness out of range (0-100)".into()));
    }
    // Report the level as the host sent it (`30`, `50.5`).
    *state = format!("on {level}%");
    Ok(format!("Brightness set to {level}%"))
}

impl DeviceControl for DeviceSimulator {
    fn control_device(&mut self, command: &DeviceCommand) -> DeviceResponse {
        debug!("sim: {}/{}", command.device_id, command.action);
        let Some(device) = self.devices.get_mut(&command.device_id) else {
            return DeviceResponse::rejected(
                command.id.clone(),
                format!("Unknown device_id: {}", command.device_id),
            );
        };
        let Some(handler) = device.actions.get_mut(&command.action) else {
            return DeviceResponse::rejected(command.id.clone(), format!("Unknown action: {}", command.action));
        };
        DeviceResponse::from_result(command.id.clone(), handler(&command.args, &mut device.state))
    }

    fn device_states(&self) -> BTreeMap<String, String> {
        self.devices
            .iter()
            .map(|(id, d)| (id.clone(), d.state.clone()))
            .collect()
    }
}
