//! Host ↔ device serial protocol.
//!
//! ```text
//!   UART bytes ──▶ LineDecoder ──▶ JSON / legacy parser ──▶ DeviceControl
//!                                                              │
//!   UART bytes ◀── JSON response line ◀────────────────────────┘
//! ```
//!
//! Requests are newline-terminated. A line starting with `{` is a JSON
//! [`DeviceCommand`](message::DeviceCommand); anything else is read as a
//! legacy `<pin>:<level>` write. Every request line gets exactly one JSON
//! [`DeviceResponse`](message::DeviceResponse) line back.

pub mod endpoint;
pub mod legacy;
pub mod line;
pub mod message;
pub mod transport;
