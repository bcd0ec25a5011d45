//! JSON command/response messages.
//!
//! Request:  `{"id": 7, "device_id": "relay", "action": "turn_on", "args": {...}}`
//! Response: `{"id": 7, "code": 0, "msg": "Relay turned on"}`
//!
//! `args` is optional and omitted when empty. `id` may be any JSON value
//! and is echoed verbatim; it is `null` when absent or when the request
//! could not be parsed. A missing `device_id` or `action` decodes as the
//! empty string and is rejected by the device as unknown.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form action arguments.
pub type Args = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommand {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub args: Args,
}

impl DeviceCommand {
    /// Build a command; a null `id` and `None` or empty `args` are left
    /// out of the wire form.
    pub fn build(id: impl Into<Value>, device_id: &str, action: &str, args: Option<Args>) -> Self {
        Self {
            id: id.into(),
            device_id: device_id.into(),
            action: action.into(),
            args: args.unwrap_or_default(),
        }
    }
}

/// Outcome class carried in every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ResponseCode {
    /// Action executed.
    Ok = 0,
    /// Unknown device or action, or a missing / out-of-range argument.
    Rejected = 1,
    /// Malformed input or the action failed while executing.
    Failed = 2,
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = &'static str;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Ok),
            1 => Ok(Self::Rejected),
            2 => Ok(Self::Failed),
            _ => Err("response code must be 0, 1 or 2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: Value,
    pub code: ResponseCode,
    pub msg: String,
}

impl DeviceResponse {
    pub fn ok(id: impl Into<Value>, msg: impl Into<String>) -> Self {
        Self { id: id.into(), code: ResponseCode::Ok, msg: msg.into() }
    }

    pub fn rejected(id: impl Into<Value>, msg: impl Into<String>) -> Self {
        Self { id: id.into(), code: ResponseCode::Rejected, msg: msg.into() }
    }

    pub fn failed(id: impl Into<Value>, msg: impl Into<String>) -> Self {
        Self { id: id.into(), code: ResponseCode::Failed, msg: msg.into() }
    }

    pub fn from_result(id: Value, result: ActionResult) -> Self {
        match result {
            Ok(msg) => Self::ok(id, msg),
            Err(ActionError::Rejected(msg)) => Self::rejected(id, msg),
            Err(ActionError::Failed(msg)) => Self::failed(id, msg),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResponseCode::Ok
    }
}

/// Why a device action did not produce a success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Maps to [`ResponseCode::Rejected`].
    Rejected(String),
    /// Maps to [`ResponseCode::Failed`].
    Failed(String),
}

/// Success message or failure class for one device action.
pub type ActionResult = Result<String, ActionError>;

/// Look up a required argument.
pub fn require_arg<'a>(args: &'a Args, name: &str) -> Result<&'a Value, ActionError> {
    args.get(name)
        .ok_or_else(|| ActionError::Rejected(format!("Missing required argument: {name}")))
}

/// Decode one JSON request line.
///
/// On failure the returned response is ready to send back to the host.
pub fn parse_command(text: &str) -> Result<DeviceCommand, DeviceResponse> {
    serde_json::from_str(text).map_err(|e| DeviceResponse::failed(Value::Null, format!("Invalid input: {e}")))
}
