//! Mock adapters for integration tests.
//!
//! Records every relay call and emitted event so tests can assert on the
//! full history, and provides an in-memory byte pipe standing in for the
//! UART link.

use std::collections::VecDeque;

use smartdevice::app::events::AppEvent;
use smartdevice::app::ports::{DeviceControl, EventSink, RelayPort, SensorPort};
use smartdevice::error::{ActuatorError, SensorError};
use smartdevice::protocol::endpoint::SerialEndpoint;
use smartdevice::protocol::message::DeviceResponse;
use smartdevice::protocol::transport::Transport;
use smartdevice::sensors::AnalogReading;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub relay_calls: Vec<bool>,
    pub relay: bool,
    pub reading: Option<AnalogReading>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            relay_calls: Vec::new(),
            relay: false,
            reading: Some(AnalogReading {
                raw: 2048,
                millivolts: 1650,
            }),
        }
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for MockHardware {
    fn set_relay(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay_calls.push(on);
        self.relay = on;
        Ok(())
    }

    fn relay_on(&self) -> bool {
        self.relay
    }
}

impl SensorPort for MockHardware {
    fn read_sensor(&mut self) -> Result<AnalogReading, SensorError> {
        self.reading.ok_or(SensorError::AdcReadFailed)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── PipeTransport ─────────────────────────────────────────────

/// In-memory stand-in for the UART: the test pushes host bytes into
/// `rx` and inspects what the device wrote to `tx`.
pub struct PipeTransport {
    rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    /// Bytes handed out per `read` call, to exercise partial reads.
    max_read: usize,
    pub flushes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl PipeTransport {
    pub fn new() -> Self {
        Self::with_max_read(usize::MAX)
    }

    pub fn with_max_read(max_read: usize) -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            max_read,
            flushes: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn send(&mut self, data: &[u8]) {
        self.rx.extend(data.iter().copied());
    }

    pub fn has_input(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Responses written so far, one per line.
    pub fn responses(&self) -> Vec<DeviceResponse> {
        String::from_utf8(self.tx.clone())
            .expect("responses are UTF-8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("response line is JSON"))
            .collect()
    }
}

impl Transport for PipeTransport {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        if self.fail_reads {
            return Err(());
        }
        let n = buf.len().min(self.max_read).min(self.rx.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.rx.pop_front().unwrap_or_default();
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        if self.fail_writes {
            return Err(());
        }
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Poll until the pipe has no pending input; returns requests handled.
#[allow(dead_code)]
pub fn drain<D: DeviceControl>(
    endpoint: &mut SerialEndpoint,
    pipe: &mut PipeTransport,
    device: &mut D,
) -> usize {
    let mut handled = 0;
    while pipe.has_input() {
        handled += endpoint.poll(pipe, device).expect("pipe never fails");
    }
    handled
}
