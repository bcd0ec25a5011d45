//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to              |
//! |------------|-----------------------|--------------------------|
//! | `hardware` | RelayPort, SensorPort | ESP32 GPIO, ADC1         |
//! | `log_sink` | EventSink             | Serial log output        |
//! | `nvs`      | ConfigPort            | NVS / in-memory store    |
//! | `time`     | —                     | ESP32 system timer       |
//! | `uart`     | Transport             | ESP-IDF UART driver      |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart;
