//! Outbound application events.
//!
//! The [`DeviceService`](super::service::DeviceService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use serde_json::Value;

use crate::protocol::message::ResponseCode;
use crate::sensors::AnalogReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started and applied the boot relay state.
    Started { relay_on: bool },

    /// The relay was driven to a new commanded state.
    RelaySwitched { on: bool },

    /// A sensor sample was taken.
    SensorRead(AnalogReading),

    /// A host command did not succeed.
    CommandRejected {
        /// Request id as sent by the host (`null` when absent).
        id: Value,
        code: ResponseCode,
        msg: String,
    },
}
