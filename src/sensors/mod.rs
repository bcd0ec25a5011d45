//! Sensor drivers.

pub mod analog;

pub use analog::{AnalogReading, AnalogSensor};
