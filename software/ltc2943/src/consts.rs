//! LTC2943 register map and bit patterns.
//!
//! Only the status and control registers are driven by this crate. The rest
//! of the map is listed so the offsets stay reserved.

/// Fixed 7-bit bus address.
pub const ADDRESS: u8 = 0x64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Reg {
    Status = 0x00,
    Control = 0x01,
    AccumChargeMsb = 0x02,
    AccumChargeLsb = 0x03,
    ChargeThreshHighMsb = 0x04,
    ChargeThreshHighLsb = 0x05,
    ChargeThreshLowMsb = 0x06,
    ChargeThreshLowLsb = 0x07,
    VoltageMsb = 0x08,
    VoltageLsb = 0x09,
    VoltageThreshHighMsb = 0x0A,
    VoltageThreshHighLsb = 0x0B,
    VoltageThreshLowMsb = 0x0C,
    VoltageThreshLowLsb = 0x0D,
    CurrentMsb = 0x0E,
    CurrentLsb = 0x0F,
    CurrentThreshHighMsb = 0x10,
    CurrentThreshHighLsb = 0x11,
    CurrentThreshLowMsb = 0x12,
    CurrentThreshLowLsb = 0x13,
    TemperatureMsb = 0x14,
    TemperatureLsb = 0x15,
    TemperatureThreshHigh = 0x16,
    TemperatureThreshLow = 0x17,
}

impl Reg {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Control register (B) fields.
pub mod control {
    // ADC mode, bits 7:6
    pub const AUTOMATIC_MODE: u8 = 0xC0;
    pub const SCAN_MODE: u8 = 0x80;
    pub const MANUAL_MODE: u8 = 0x40;
    pub const SLEEP_MODE: u8 = 0x00;

    // Coulomb counter prescaler M, bits 5:3
    pub const PRESCALER_M_1: u8 = 0x00;
    pub const PRESCALER_M_4: u8 = 0x08;
    pub const PRESCALER_M_16: u8 = 0x10;
    pub const PRESCALER_M_64: u8 = 0x18;
    pub const PRESCALER_M_256: u8 = 0x20;
    pub const PRESCALER_M_1024: u8 = 0x28;
    pub const PRESCALER_M_4096: u8 = 0x30;
    pub const PRESCALER_M_4096_2: u8 = 0x38;

    // ALCC pin configuration, bits 2:1
    pub const ALERT_MODE: u8 = 0x04;
    pub const CHARGE_COMPLETE_MODE: u8 = 0x02;
    pub const DISABLE_ALCC_PIN: u8 = 0x00;

    /// Analog section shutdown, bit 0.
    pub const SHUTDOWN: u8 = 0x01;
}

/// Status register (A) flags.
pub mod status {
    pub const UNDERVOLTAGE_LOCKOUT: u8 = 0x01;
    pub const VOLTAGE_ALERT: u8 = 0x02;
    pub const CHARGE_ALERT_LOW: u8 = 0x04;
    pub const CHARGE_ALERT_HIGH: u8 = 0x08;
    pub const TEMPERATURE_ALERT: u8 = 0x10;
    pub const ACCUM_CHARGE_OVERFLOW: u8 = 0x20;
    pub const CURRENT_ALERT: u8 = 0x40;
}
