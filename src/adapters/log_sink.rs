//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to the USB-CDC console in production,
//! separate from the host-link UART).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { relay_on } => {
                info!("START | relay={}", if *relay_on { "ON" } else { "OFF" });
            }
            AppEvent::RelaySwitched { on } => {
                info!("RELAY | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::SensorRead(r) => {
                info!("SENSOR | raw={} | {}mV", r.raw, r.millivolts);
            }
            AppEvent::CommandRejected { id, code, msg } => {
                warn!("CMD | id={:?} code={} | {}", id, u8::from(*code), msg);
            }
        }
    }
}
