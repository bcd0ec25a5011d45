//! Transport abstraction — any byte-oriented channel.
//!
//! Concrete implementations:
//! - UART host link (`adapters::uart`, ESP-IDF only)
//! - in-memory pipes in the integration tests
//!
//! The [`SerialEndpoint`](super::endpoint::SerialEndpoint) is generic
//! over `Transport`, so a new link needs no protocol changes.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
