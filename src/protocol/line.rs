//! Newline-delimited frame decoder.
//!
//! The decoder accumulates incoming bytes into a fixed buffer and yields
//! one complete line per `\n`. This handles partial reads gracefully: a
//! single `Transport::read` may return part of a line or several lines.
//!
//! A line longer than [`MAX_LINE_LEN`] is dropped up to its terminating
//! newline and reported once as [`LineError::Overflow`].

use core::fmt;

/// Maximum request line length in bytes, excluding the newline.
pub const MAX_LINE_LEN: usize = 256;

pub type Line = heapless::String<MAX_LINE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    Overflow,
    InvalidUtf8,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "line exceeds {} bytes", MAX_LINE_LEN),
            Self::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

pub struct LineDecoder {
    buf: heapless::Vec<u8, MAX_LINE_LEN>,
    /// Set while skipping the tail of an overlong line.
    discarding: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte. Returns a result once a non-empty line is terminated.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, LineError>> {
        match byte {
            b'\r' => None,
            b'\n' => {
                if self.discarding {
                    self.discarding = false;
                    self.buf.clear();
                    return Some(Err(LineError::Overflow));
                }
                if self.buf.is_empty() {
                    return None;
                }
                let bytes = core::mem::take(&mut self.buf);
                Some(Line::from_utf8(bytes).map_err(|_| LineError::InvalidUtf8))
            }
            _ if self.discarding => None,
            _ => {
                if self.buf.push(byte).is_err() {
                    self.discarding = true;
                }
                None
            }
        }
    }

    /// Drop any partial line (e.g. after a UART error).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}
