//! UART host-link transport (ESP-IDF only).
//!
//! Wraps the driver installed by [`hw_init::init_uart`](crate::drivers::hw_init::init_uart)
//! behind the protocol [`Transport`] trait.

use esp_idf_hal::delay::TickType;
use esp_idf_svc::sys::*;

use crate::pins;
use crate::protocol::transport::Transport;

pub struct UartTransport {
    read_timeout_ticks: u32,
}

impl UartTransport {
    /// `read_timeout_ms` bounds how long one `read` blocks waiting for bytes.
    pub fn new(read_timeout_ms: u64) -> Self {
        Self {
            read_timeout_ticks: TickType::new_millis(read_timeout_ms).ticks(),
        }
    }
}

impl Transport for UartTransport {
    type Error = i32;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, i32> {
        // SAFETY: driver installed at boot; buf is valid for buf.len() bytes.
        let n = unsafe {
            uart_read_bytes(
                pins::UART_PORT,
                buf.as_mut_ptr().cast(),
                buf.len() as u32,
                self.read_timeout_ticks,
            )
        };
        if n < 0 {
            return Err(n);
        }
        Ok(n as usize)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, i32> {
        // SAFETY: driver installed at boot; data is valid for data.len() bytes.
        let n = unsafe { uart_write_bytes(pins::UART_PORT, data.as_ptr().cast(), data.len()) };
        if n < 0 {
            return Err(n);
        }
        Ok(n as usize)
    }

    fn flush(&mut self) -> Result<(), i32> {
        // SAFETY: blocks until the TX FIFO drains; main task only.
        let ret = unsafe { uart_wait_tx_done(pins::UART_PORT, self.read_timeout_ticks) };
        if ret != ESP_OK {
            return Err(ret);
        }
        Ok(())
    }
}
