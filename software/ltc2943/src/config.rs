use crate::consts;

/// How the ADC mode field of the control register is decoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeDecoding {
    /// Priority-ordered pattern test. Sleep is reported as a decode error.
    #[default]
    FirstMatch,
    /// Compare bits 7:6 exactly. Sleep decodes as [`AdcMode::Sleep`].
    ///
    /// [`AdcMode::Sleep`]: crate::AdcMode::Sleep
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit bus address.
    pub address: u8,
    pub mode_decoding: ModeDecoding,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            address: consts::ADDRESS,
            mode_decoding: ModeDecoding::FirstMatch,
        }
    }

    pub const fn with_address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    pub const fn with_mode_decoding(self, mode_decoding: ModeDecoding) -> Self {
        Self {
            mode_decoding,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_datasheet() {
        let config = Config::default();
        assert_eq!(config.address, 0x64);
        assert_eq!(config.mode_decoding, ModeDecoding::FirstMatch);
    }

    #[test]
    fn builders_only_touch_their_field() {
        let config = Config::new()
            .with_mode_decoding(ModeDecoding::Exact)
            .with_address(0x65);
        assert_eq!(config.address, 0x65);
        assert_eq!(config.mode_decoding, ModeDecoding::Exact);
    }
}
