//! Generic analog sensor on the `A0` header input.
//!
//! Reads one ADC1 oneshot sample and scales it linearly to millivolts
//! against the configured reference voltage. What the voltage means
//! (light, moisture, gas) is left to the host.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the channel via hw_init (initialised at boot).
//! On host/test: reads the value injected with `hw_init::sim_set_adc`.

use crate::drivers::hw_init;
use crate::error::SensorError;
use crate::pins::ADC_MAX_RAW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogReading {
    pub raw: u16,
    pub millivolts: u16,
}

pub struct AnalogSensor {
    channel: u32,
    vref_mv: u16,
}

impl AnalogSensor {
    pub fn new(channel: u32, vref_mv: u16) -> Self {
        Self { channel, vref_mv }
    }

    pub fn read(&self) -> Result<AnalogReading, SensorError> {
        let raw = hw_init::adc1_read(self.channel)
            .ok_or(SensorError::AdcReadFailed)?
            .min(ADC_MAX_RAW);
        Ok(AnalogReading {
            raw,
            millivolts: self.raw_to_millivolts(raw),
        })
    }

    fn raw_to_millivolts(&self, raw: u16) -> u16 {
        (u32::from(raw) * u32::from(self.vref_mv) / u32::from(ADC_MAX_RAW)) as u16
    }
}
