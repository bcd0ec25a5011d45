//! Legacy `<pin>:<level>` line commands.
//!
//! Early host scripts wrote raw pin levels (`b"10:1\n"`). Only the relay
//! pin is writable this way; the write is routed through the relay
//! device so that state tracking and events stay consistent.

use serde_json::Value;

use crate::error::ProtocolError;

use super::message::DeviceCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCommand {
    pub pin: u32,
    pub high: bool,
}

impl LegacyCommand {
    /// Translate into a relay command when `pin` is the relay pin.
    pub fn into_device_command(self, relay_pin: i32) -> Option<DeviceCommand> {
        if i32::try_from(self.pin) != Ok(relay_pin) {
            return None;
        }
        let action = if self.high { "turn_on" } else { "turn_off" };
        Some(DeviceCommand::build(Value::Null, "relay", action, None))
    }
}

pub fn parse_legacy(line: &str) -> Result<LegacyCommand, ProtocolError> {
    let (pin, level) = line.trim().split_once(':').ok_or(ProtocolError::MalformedLine)?;
    let pin: u32 = pin.trim().parse().map_err(|_| ProtocolError::BadPin)?;
    let high = match level.trim() {
        "0" => false,
        "1" => true,
        _ => return Err(ProtocolError::BadLevel),
    };
    Ok(LegacyCommand { pin, high })
}
