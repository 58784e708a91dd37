//! Driver for the LTC2943 multicell battery gas gauge.
//!
//! Covers the ADC conversion mode and the pending temperature/voltage
//! alerts. Every operation acquires the bus, runs its register
//! transactions and releases the bus again before returning.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod codec;
pub mod config;
pub mod consts;

pub use bus::{Bus, HalBus};
pub use codec::{AdcMode, DecodeError};
pub use config::{Config, ModeDecoding};

use bus::Acquired;
use consts::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus (de)initialization or a register transaction failed.
    Bus(E),
    /// The control register held no recognizable ADC mode.
    Decode(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Bus(error)
    }
}

/// Values last read back from the device.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// `None` until a mode has been read back and decoded.
    pub adc_mode: Option<AdcMode>,
    pub temperature_alert: bool,
    pub voltage_alert: bool,
}

pub struct Ltc2943<B> {
    bus: B,
    config: Config,
    state: DeviceState,
}

impl<B: Bus> Ltc2943<B> {
    /// Create a driver at the default address and read the initial state.
    pub fn new(bus: B) -> Result<Self, Error<B::Error>> {
        Self::with_config(bus, Config::default())
    }

    /// Create a driver and read the current ADC mode and alert flags.
    ///
    /// Fails only if the device can't be reached. A mode that doesn't decode
    /// under `config.mode_decoding` (a sleeping chip with
    /// [`ModeDecoding::FirstMatch`]) leaves the cached mode unset.
    pub fn with_config(bus: B, config: Config) -> Result<Self, Error<B::Error>> {
        let mut this = Self {
            bus,
            config,
            state: DeviceState::default(),
        };

        match this.get_adc_mode() {
            Ok(_) => {}
            Err(Error::Decode(raw)) => {
                warn!("adc mode unknown at startup ({=u8:#x})", raw);
            }
            Err(e) => return Err(e),
        }
        this.seed_alerts()?;

        Ok(this)
    }

    /// Read the ADC mode from the control register.
    pub fn get_adc_mode(&mut self) -> Result<AdcMode, Error<B::Error>> {
        let mut bus = Acquired::acquire(&mut self.bus)?;
        let raw = bus.read_register(self.config.address, Reg::Control)?;

        let mode = codec::decode_mode_with(self.config.mode_decoding, raw).map_err(
            |DecodeError(raw)| {
                warn!("failed to decode adc mode from {=u8:#x}", raw);
                Error::Decode(raw)
            },
        )?;

        debug!("adc mode: {}", mode);
        self.state.adc_mode = Some(mode);
        Ok(mode)
    }

    /// Write `mode` to the control register.
    ///
    /// The rest of the control register (prescaler, ALCC configuration,
    /// shutdown) is cleared. The cached mode is left alone until the next
    /// [`get_adc_mode`](Self::get_adc_mode).
    pub fn set_adc_mode(&mut self, mode: AdcMode) -> Result<(), Error<B::Error>> {
        let mut bus = Acquired::acquire(&mut self.bus)?;
        bus.write_register(self.config.address, Reg::Control, codec::encode_mode(mode))?;

        debug!("adc mode set to {}", mode);
        Ok(())
    }

    /// Check whether a temperature alert is pending.
    pub fn get_temperature_alert(&mut self) -> Result<bool, Error<B::Error>> {
        let status = self.read_status()?;
        self.state.temperature_alert = codec::decode_temp_alert(status);
        Ok(self.state.temperature_alert)
    }

    /// Check whether a voltage alert is pending.
    pub fn get_voltage_alert(&mut self) -> Result<bool, Error<B::Error>> {
        let status = self.read_status()?;
        self.state.voltage_alert = codec::decode_volt_alert(status);
        Ok(self.state.voltage_alert)
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// ADC mode as of the last successful read. No bus traffic.
    pub fn adc_mode(&self) -> Option<AdcMode> {
        self.state.adc_mode
    }

    pub fn temperature_alert(&self) -> bool {
        self.state.temperature_alert
    }

    pub fn voltage_alert(&self) -> bool {
        self.state.voltage_alert
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn release(self) -> B {
        self.bus
    }

    // Both flags come from one status read.
    fn seed_alerts(&mut self) -> Result<(), Error<B::Error>> {
        let status = self.read_status()?;
        self.state.temperature_alert = codec::decode_temp_alert(status);
        self.state.voltage_alert = codec::decode_volt_alert(status);
        Ok(())
    }

    fn read_status(&mut self) -> Result<u8, Error<B::Error>> {
        let mut bus = Acquired::acquire(&mut self.bus)?;
        let status = bus.read_register(self.config.address, Reg::Status)?;

        debug!("status: {=u8:#x}", status);
        Ok(status)
    }
}
