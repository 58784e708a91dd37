//! Two-wire bus transport.
//!
//! The driver only needs lifecycle control plus raw read/write
//! transactions. [`HalBus`] provides those on top of any blocking
//! `embedded-hal` I2C peripheral.

use embedded_hal::blocking::i2c;

use crate::consts::Reg;

/// Transport the driver talks through.
///
/// `read` and `write` are whole transactions addressed to a 7-bit device
/// address; the slice length is the transfer length.
pub trait Bus {
    type Error;

    fn initialize(&mut self) -> Result<(), Self::Error>;

    fn deinitialize(&mut self) -> Result<(), Self::Error>;

    fn is_initialized(&self) -> bool;

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    fn write(&mut self, address: u8, buffer: &[u8]) -> Result<(), Self::Error>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        (**self).initialize()
    }

    fn deinitialize(&mut self) -> Result<(), Self::Error> {
        (**self).deinitialize()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buffer)
    }

    fn write(&mut self, address: u8, buffer: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, buffer)
    }
}

/// A bus held for the length of one driver operation.
///
/// The bus is initialized on acquisition unless it already is, and
/// deinitialized when the guard drops, whichever way the operation ends.
pub(crate) struct Acquired<'a, B: Bus> {
    bus: &'a mut B,
}

impl<'a, B: Bus> Acquired<'a, B> {
    pub(crate) fn acquire(bus: &'a mut B) -> Result<Self, B::Error> {
        let guard = Self { bus };
        if !guard.bus.is_initialized() {
            if let Err(e) = guard.bus.initialize() {
                warn!("failed to initialize bus");
                return Err(e);
            }
        }
        Ok(guard)
    }

    /// Point the device at `reg`, then read it back.
    pub(crate) fn read_register(&mut self, address: u8, reg: Reg) -> Result<u8, B::Error> {
        if let Err(e) = self.bus.write(address, &[reg.addr()]) {
            warn!("failed to write to {} at {=u8:#x}", reg, address);
            return Err(e);
        }

        let mut value = 0u8;
        if let Err(e) = self.bus.read(address, core::slice::from_mut(&mut value)) {
            warn!("failed to read from {} at {=u8:#x}", reg, address);
            return Err(e);
        }

        trace!("{} -> {=u8:#x}", reg, value);
        Ok(value)
    }

    pub(crate) fn write_register(
        &mut self,
        address: u8,
        reg: Reg,
        value: u8,
    ) -> Result<(), B::Error> {
        trace!("{} <- {=u8:#x}", reg, value);
        self.bus.write(address, &[reg.addr(), value]).map_err(|e| {
            warn!("failed to write to {} at {=u8:#x}", reg, address);
            e
        })
    }
}

impl<B: Bus> Drop for Acquired<'_, B> {
    fn drop(&mut self) {
        if self.bus.is_initialized() && self.bus.deinitialize().is_err() {
            warn!("failed to deinitialize bus");
        }
    }
}

/// [`Bus`] over a blocking `embedded-hal` I2C peripheral.
///
/// The peripheral is expected to be configured by the HAL already, so
/// (de)initialization only tracks state.
pub struct HalBus<I2C> {
    i2c: I2C,
    initialized: bool,
}

impl<I2C> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            initialized: false,
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Bus for HalBus<I2C>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
{
    type Error = E;

    fn initialize(&mut self) -> Result<(), E> {
        self.initialized = true;
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<(), E> {
        self.initialized = false;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c.read(address, buffer)
    }

    fn write(&mut self, address: u8, buffer: &[u8]) -> Result<(), E> {
        self.i2c.write(address, buffer)
    }
}
