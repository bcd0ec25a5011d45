//! Relay driver (single coil, transistor-switched from [`RELAY_PIN`]).
//!
//! [`toggle_relay`] is the bare helper: it maps a boolean straight onto
//! the pin level (`true` → HIGH, `false` → LOW) and nothing else.
//!
//! [`RelayDriver`] is the stateful actuator used by the application. It
//! drives any `embedded_hal` output, honours board polarity, and tracks
//! the last commanded state.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`RelayPin`] writes the GPIO via hw_init.
//! On host/test: writes land in the hw_init simulation log.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins::RELAY_PIN;

/// Drive the relay pin HIGH when `on`, LOW otherwise.
pub fn toggle_relay(on: bool) {
    hw_init::gpio_write(RELAY_PIN, on);
}

/// The board's relay output as an `embedded_hal` pin.
#[derive(Debug, Default)]
pub struct RelayPin;

impl ErrorType for RelayPin {
    type Error = Infallible;
}

impl OutputPin for RelayPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        toggle_relay(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        toggle_relay(true);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

pub struct RelayDriver<P> {
    pin: P,
    active_high: bool,
    state: RelayState,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Wrap `pin`. The relay is assumed de-energised until the first `set`.
    pub fn new(pin: P, active_high: bool) -> Self {
        Self {
            pin,
            active_high,
            state: RelayState::Off,
        }
    }

    /// Energise (`true`) or release (`false`) the relay coil.
    ///
    /// On a failed write the tracked state is left untouched.
    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = on == self.active_high;
        let written = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        written.map_err(|_| ActuatorError::GpioWriteFailed)?;

        self.state = if on { RelayState::On } else { RelayState::Off };
        debug!("relay: {:?} (pin {})", self.state, if high { "HIGH" } else { "LOW" });
        Ok(())
    }

    pub fn on(&mut self) -> Result<(), ActuatorError> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set(false)
    }

    /// Flip the relay and return the new state.
    pub fn toggle(&mut self) -> Result<RelayState, ActuatorError> {
        self.set(!self.is_on())?;
        Ok(self.state)
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == RelayState::On
    }
}
