// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The state and event indicators field (ANSI/VITA-49.2-2017 section 9.10.8).

Each attribute owns two bits: an enable bit in 31..24 saying "this
indicator is meaningful", and the indicator value itself in 19..12. An
attribute therefore reads as an optional boolean: `None` while the enable
bit is clear. Setting a value raises the enable bit; `reset_*` clears both.
*/

use deku::prelude::*;
use std::fmt;

/// Gain control mode carried by the AGC/MGC indicator.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgcMode {
    /// Manual gain control.
    Mgc,
    /// Automatic gain control active.
    Agc,
}

impl From<bool> for AgcMode {
    fn from(value: bool) -> Self {
        if value {
            AgcMode::Agc
        } else {
            AgcMode::Mgc
        }
    }
}

/// Base state/event indicators data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateEventIndicators(u32);

macro_rules! enabled_indicator {
    ($name:ident, $set:ident, $reset:ident, $enable_bit:literal, $value_bit:literal) => {
        #[doc = concat!("Gets the ", stringify!($name), " indicator, or `None` if not enabled.")]
        pub fn $name(&self) -> Option<bool> {
            if self.0 & (1 << $enable_bit) != 0 {
                Some(self.0 & (1 << $value_bit) != 0)
            } else {
                None
            }
        }
        #[doc = concat!("Sets the ", stringify!($name), " indicator and its enable bit.")]
        pub fn $set(&mut self, value: bool) {
            self.0 |= 1 << $enable_bit;
            self.0 = (self.0 & !(1 << $value_bit)) | ((value as u32) << $value_bit);
        }
        #[doc = concat!("Clears the ", stringify!($name), " indicator and its enable bit.")]
        pub fn $reset(&mut self) {
            self.0 &= !(1 << $enable_bit) & !(1 << $value_bit);
        }
    };
}

#[rustfmt::skip]
impl StateEventIndicators {
    enabled_indicator!(calibrated_time, set_calibrated_time, reset_calibrated_time, 31, 19);
    enabled_indicator!(valid_data, set_valid_data, reset_valid_data, 30, 18);
    enabled_indicator!(reference_lock, set_reference_lock, reset_reference_lock, 29, 17);
    enabled_indicator!(detected_signal, set_detected_signal, reset_detected_signal, 27, 15);
    enabled_indicator!(spectral_inversion, set_spectral_inversion, reset_spectral_inversion, 26, 14);
    enabled_indicator!(over_range, set_over_range, reset_over_range, 25, 13);
    enabled_indicator!(sample_loss, set_sample_loss, reset_sample_loss, 24, 12);

    /// Gets the AGC/MGC indicator, or `None` if not enabled.
    pub fn agc_mgc(&self) -> Option<AgcMode> {
        if self.0 & (1 << 28) != 0 {
            Some(AgcMode::from(self.0 & (1 << 16) != 0))
        } else {
            None
        }
    }
    /// Sets the AGC/MGC indicator and its enable bit.
    pub fn set_agc_mgc(&mut self, mode: AgcMode) {
        self.0 |= 1 << 28;
        let bit = matches!(mode, AgcMode::Agc) as u32;
        self.0 = (self.0 & !(1 << 16)) | (bit << 16);
    }
    /// Clears the AGC/MGC indicator and its enable bit.
    pub fn reset_agc_mgc(&mut self) {
        self.0 &= !(1 << 28) & !(1 << 16);
    }

    /// The raw 32-bit indicator word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Size of the state/event indicators field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }
}

impl fmt::Display for StateEventIndicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "State/event indicators:")?;
        writeln!(f, "  Calibrated time: {:?}", self.calibrated_time())?;
        writeln!(f, "  Valid data: {:?}", self.valid_data())?;
        writeln!(f, "  Reference lock: {:?}", self.reference_lock())?;
        writeln!(f, "  AGC/MGC: {:?}", self.agc_mgc())?;
        writeln!(f, "  Detected signal: {:?}", self.detected_signal())?;
        writeln!(f, "  Spectral inversion: {:?}", self.spectral_inversion())?;
        writeln!(f, "  Over-range: {:?}", self.over_range())?;
        writeln!(f, "  Sample loss: {:?}", self.sample_loss())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_reads_as_none() {
        let ind = StateEventIndicators::default();
        assert_eq!(ind.valid_data(), None);
        assert_eq!(ind.agc_mgc(), None);
    }

    #[test]
    fn set_raises_enable() {
        let mut ind = StateEventIndicators::default();
        ind.set_valid_data(true);
        assert_eq!(ind.valid_data(), Some(true));
        // Enable bit 30, value bit 18
        assert_eq!(ind.as_u32(), (1 << 30) | (1 << 18));
        ind.set_valid_data(false);
        assert_eq!(ind.valid_data(), Some(false));
        assert_eq!(ind.as_u32(), 1 << 30);
    }

    #[test]
    fn reset_clears_both_bits() {
        let mut ind = StateEventIndicators::default();
        ind.set_over_range(true);
        ind.set_agc_mgc(AgcMode::Agc);
        ind.reset_over_range();
        assert_eq!(ind.over_range(), None);
        assert_eq!(ind.agc_mgc(), Some(AgcMode::Agc));
        ind.reset_agc_mgc();
        assert_eq!(ind.as_u32(), 0);
    }
}
