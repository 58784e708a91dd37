//! Translation between raw register bytes and typed values.
//!
//! Nothing in here touches the bus.

use modular_bitfield::prelude::*;

use crate::config::ModeDecoding;
use crate::consts::control;

/// ADC conversion mode, control register bits 7:6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcMode {
    /// Voltage, current and temperature converted continuously.
    Automatic,
    /// Conversions every 10 s.
    Scan,
    /// A single conversion, then back to sleep.
    Manual,
    /// ADC off. Power-on default of the chip.
    Sleep,
}

/// Raw control byte whose mode field matched no known pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeError(pub u8);

/// Mode patterns in decode priority order.
const MODE_PATTERNS: [(AdcMode, u8); 4] = [
    (AdcMode::Automatic, control::AUTOMATIC_MODE),
    (AdcMode::Scan, control::SCAN_MODE),
    (AdcMode::Manual, control::MANUAL_MODE),
    (AdcMode::Sleep, control::SLEEP_MODE),
];

/// Control register (B) layout, LSB first.
#[bitfield(bits = 8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRegister {
    pub shutdown: bool,
    pub alcc: B2,
    pub prescaler: B3,
    pub adc_mode: B2,
}

/// Status register (A) layout, LSB first.
#[bitfield(bits = 8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRegister {
    pub undervoltage_lockout: bool,
    pub voltage_alert: bool,
    pub charge_alert_low: bool,
    pub charge_alert_high: bool,
    pub temperature_alert: bool,
    pub accum_charge_overflow: bool,
    pub current_alert: bool,
    #[skip]
    __: B1,
}

pub const fn encode_mode(mode: AdcMode) -> u8 {
    match mode {
        AdcMode::Automatic => control::AUTOMATIC_MODE,
        AdcMode::Scan => control::SCAN_MODE,
        AdcMode::Manual => control::MANUAL_MODE,
        AdcMode::Sleep => control::SLEEP_MODE,
    }
}

/// Decode the ADC mode from a raw control byte.
///
/// Patterns are tried in the order Automatic, Scan, Manual, Sleep and the
/// first one whose bits are all set in `raw` wins. Bits outside the pattern
/// are ignored, so `0xC8` (automatic, prescaler M = 4) is `Automatic`.
///
/// An all-zero pattern never matches. Sleep therefore cannot be decoded this
/// way and `0x00` is a [`DecodeError`]; use [`decode_mode_exact`] to tell
/// sleep apart.
pub fn decode_mode(raw: u8) -> Result<AdcMode, DecodeError> {
    MODE_PATTERNS
        .iter()
        .find(|&&(_, pattern)| pattern != 0 && raw & pattern == pattern)
        .map(|&(mode, _)| mode)
        .ok_or(DecodeError(raw))
}

/// Decode the ADC mode from bits 7:6 only. Every byte maps to a mode.
pub fn decode_mode_exact(raw: u8) -> AdcMode {
    match ControlRegister::from_bytes([raw]).adc_mode() {
        0b11 => AdcMode::Automatic,
        0b10 => AdcMode::Scan,
        0b01 => AdcMode::Manual,
        _ => AdcMode::Sleep,
    }
}

pub fn decode_mode_with(decoding: ModeDecoding, raw: u8) -> Result<AdcMode, DecodeError> {
    match decoding {
        ModeDecoding::FirstMatch => decode_mode(raw),
        ModeDecoding::Exact => Ok(decode_mode_exact(raw)),
    }
}

pub fn decode_temp_alert(status: u8) -> bool {
    StatusRegister::from_bytes([status]).temperature_alert()
}

pub fn decode_volt_alert(status: u8) -> bool {
    StatusRegister::from_bytes([status]).voltage_alert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::status;

    #[test]
    fn first_match_round_trips_active_modes() {
        for mode in [AdcMode::Automatic, AdcMode::Scan, AdcMode::Manual] {
            assert_eq!(decode_mode(encode_mode(mode)), Ok(mode));
        }
    }

    #[test]
    fn first_match_cannot_see_sleep() {
        assert_eq!(encode_mode(AdcMode::Sleep), 0x00);
        assert_eq!(decode_mode(encode_mode(AdcMode::Sleep)), Err(DecodeError(0x00)));
        // power-on default: sleep, M = 4096, ALCC alert mode
        assert_eq!(decode_mode(0x3C), Err(DecodeError(0x3C)));
    }

    #[test]
    fn first_match_ignores_unrelated_bits() {
        assert_eq!(decode_mode(0xC8), Ok(AdcMode::Automatic));
        assert_eq!(decode_mode(0x80 | control::PRESCALER_M_256), Ok(AdcMode::Scan));
        assert_eq!(
            decode_mode(0x40 | control::ALERT_MODE | control::SHUTDOWN),
            Ok(AdcMode::Manual)
        );
    }

    #[test]
    fn exact_round_trips_every_mode() {
        for mode in [AdcMode::Automatic, AdcMode::Scan, AdcMode::Manual, AdcMode::Sleep] {
            assert_eq!(decode_mode_exact(encode_mode(mode)), mode);
            assert_eq!(decode_mode_with(ModeDecoding::Exact, encode_mode(mode)), Ok(mode));
        }
        assert_eq!(decode_mode_exact(0x3C), AdcMode::Sleep);
        assert_eq!(decode_mode_exact(0xFF), AdcMode::Automatic);
    }

    #[test]
    fn decodings_only_differ_on_sleep() {
        for raw in 0..=u8::MAX {
            match decode_mode(raw) {
                Ok(mode) => assert_eq!(mode, decode_mode_exact(raw)),
                Err(_) => assert_eq!(decode_mode_exact(raw), AdcMode::Sleep),
            }
        }
    }

    #[test]
    fn control_layout_matches_patterns() {
        let reg = ControlRegister::new().with_adc_mode(0b11).with_prescaler(0b001);
        assert_eq!(reg.into_bytes(), [0xC8]);

        let reg = ControlRegister::from_bytes([0x3C]);
        assert_eq!(reg.prescaler(), 0b111);
        assert_eq!(reg.alcc(), 0b10);
        assert!(!reg.shutdown());
    }

    #[test]
    fn alert_bits_are_independent() {
        for (raw, temp, volt) in [
            (0x00, false, false),
            (status::TEMPERATURE_ALERT, true, false),
            (status::VOLTAGE_ALERT, false, true),
            (status::TEMPERATURE_ALERT | status::VOLTAGE_ALERT, true, true),
        ] {
            assert_eq!(decode_temp_alert(raw), temp, "status {:#04x}", raw);
            assert_eq!(decode_volt_alert(raw), volt, "status {:#04x}", raw);

            // Other flags must not leak into either alert.
            let noisy = raw | !(status::TEMPERATURE_ALERT | status::VOLTAGE_ALERT);
            assert_eq!(decode_temp_alert(noisy), temp);
            assert_eq!(decode_volt_alert(noisy), volt);
        }
    }

    #[test]
    fn both_alerts_pending() {
        assert!(decode_temp_alert(0x12));
        assert!(decode_volt_alert(0x12));
    }

    #[test]
    fn status_layout_matches_masks() {
        let reg = StatusRegister::from_bytes([status::UNDERVOLTAGE_LOCKOUT
            | status::CHARGE_ALERT_HIGH
            | status::CURRENT_ALERT]);
        assert!(reg.undervoltage_lockout());
        assert!(reg.charge_alert_high());
        assert!(reg.current_alert());
        assert!(!reg.charge_alert_low());
        assert!(!reg.accum_charge_overflow());
    }
}
