//! Serial request endpoint.
//!
//! Pulls bytes from a [`Transport`], frames them into lines, dispatches
//! each request to a [`DeviceControl`] and writes back one JSON response
//! line per request.

use log::{debug, warn};
use serde_json::Value;

use crate::app::ports::DeviceControl;
use crate::pins;

use super::legacy::parse_legacy;
use super::line::LineDecoder;
use super::message::{parse_command, DeviceResponse};
use super::transport::Transport;

/// Bytes pulled from the transport per poll.
const READ_CHUNK: usize = 64;

/// Fallback when a response cannot be encoded.
const ENCODE_FAILED: &[u8] = b"{\"id\":null,\"code\":2,\"msg\":\"Response encoding failed\"}\n";

pub struct SerialEndpoint {
    decoder: LineDecoder,
    relay_pin: i32,
}

impl SerialEndpoint {
    pub fn new() -> Self {
        Self::with_relay_pin(pins::RELAY_PIN)
    }

    /// Endpoint whose legacy `<pin>:<level>` writes target `relay_pin`.
    pub fn with_relay_pin(relay_pin: i32) -> Self {
        Self {
            decoder: LineDecoder::new(),
            relay_pin,
        }
    }

    /// Service whatever the transport has buffered.
    ///
    /// Returns the number of request lines handled. A read error aborts
    /// the poll before anything is decoded. After a write error the rest
    /// of the chunk is still dispatched but gets no responses, and the
    /// first error is returned once the chunk is consumed. The partial
    /// line buffer is kept in both cases.
    pub fn poll<T, D>(&mut self, transport: &mut T, device: &mut D) -> Result<usize, T::Error>
    where
        T: Transport,
        D: DeviceControl,
    {
        let mut buf = [0u8; READ_CHUNK];
        let n = transport.read(&mut buf)?;
        let mut handled = 0;
        let mut write_err = None;

        for &byte in &buf[..n] {
            let Some(line) = self.decoder.push(byte) else {
                continue;
            };
            let response = match line {
                Ok(line) => self.handle_line(&line, device),
                Err(e) => DeviceResponse::failed(Value::Null, format!("Invalid input: {e}")),
            };
            handled += 1;
            if write_err.is_none() {
                write_err = write_response(transport, &response).err();
            }
        }

        if let Some(e) = write_err {
            return Err(e);
        }
        if handled > 0 {
            transport.flush()?;
        }
        Ok(handled)
    }

    /// Interpret one request line (without its newline).
    pub fn handle_line<D: DeviceControl>(&self, line: &str, device: &mut D) -> DeviceResponse {
        let line = line.trim();
        debug!("endpoint: <- {}", line);

        if line.starts_with('{') {
            return match parse_command(line) {
                Ok(cmd) => device.control_device(&cmd),
                Err(resp) => resp,
            };
        }

        match parse_legacy(line) {
            Ok(legacy) => match legacy.into_device_command(self.relay_pin) {
                Some(cmd) => device.control_device(&cmd),
                None => DeviceResponse::rejected(Value::Null, format!("Unknown pin: {}", legacy.pin)),
            },
            Err(e) => DeviceResponse::failed(Value::Null, format!("Invalid input: {e}")),
        }
    }

    /// Drop any partially received line.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}

impl Default for SerialEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

fn write_response<T: Transport>(transport: &mut T, response: &DeviceResponse) -> Result<(), T::Error> {
    match serde_json::to_string(response) {
        Ok(mut text) => {
            text.push('\n');
            write_all(transport, text.as_bytes())
        }
        Err(e) => {
            warn!("endpoint: response encode failed: {}", e);
            write_all(transport, ENCODE_FAILED)
        }
    }
}

fn write_all<T: Transport>(transport: &mut T, mut data: &[u8]) -> Result<(), T::Error> {
    while !data.is_empty() {
        let n = transport.write(data)?;
        if n == 0 {
            warn!("endpoint: transport accepted 0 bytes, dropping {} bytes", data.len());
            break;
        }
        data = &data[n..];
    }
    Ok(())
}
