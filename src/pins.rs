//! GPIO / peripheral pin assignments for the SmartDevice board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Pin numbers are fixed for the target board.

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Digital output driving the relay coil transistor. HIGH = energised.
pub const RELAY_PIN: i32 = 8;

// ---------------------------------------------------------------------------
// Sensor — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Analog sensor input, silkscreened `A0` on the board header.
/// Identifies ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const SENSOR_PIN: u32 = 0;

/// 12-bit ADC full scale.
pub const ADC_MAX_RAW: u16 = 4095;

// ---------------------------------------------------------------------------
// UART link to the host
// ---------------------------------------------------------------------------

pub const UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
