// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The data packet trailer word (ANSI/VITA-49.2-2017 section 5.1.6),
included when data-header bit 26 is set.

Like the state/event indicators field, each trailer state bit is paired
with an enable bit: enables in bits 31..20, indicator values in 19..8.
Bits 7..0 carry the associated context packet count with its own enable.
*/

use deku::prelude::*;

/// Start/stop of sample frame indication (SSI) bits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ssi {
    /// Sample frames are not in use, or the frame fits in one packet.
    #[default]
    Single,
    /// First data packet of the current sample frame.
    First,
    /// Middle packet of the current sample frame.
    Middle,
    /// Final data packet of the current sample frame.
    Final,
}

impl From<u32> for Ssi {
    fn from(value: u32) -> Self {
        match value & 0b11 {
            0b00 => Ssi::Single,
            0b01 => Ssi::First,
            0b10 => Ssi::Middle,
            _ => Ssi::Final,
        }
    }
}

/// Base trailer data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trailer(u32);

macro_rules! trailer_indicator {
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
impl Trailer {
    trailer_indicator!(calibrated_time, set_calibrated_time, reset_calibrated_time, 31, 19);
    trailer_indicator!(valid_data, set_valid_data, reset_valid_data, 30, 18);
    trailer_indicator!(reference_lock, set_reference_lock, reset_reference_lock, 29, 17);
    trailer_indicator!(agc_mgc, set_agc_mgc, reset_agc_mgc, 28, 16);
    trailer_indicator!(detected_signal, set_detected_signal, reset_detected_signal, 27, 15);
    trailer_indicator!(spectral_inversion, set_spectral_inversion, reset_spectral_inversion, 26, 14);
    trailer_indicator!(over_range, set_over_range, reset_over_range, 25, 13);
    trailer_indicator!(sample_loss, set_sample_loss, reset_sample_loss, 24, 12);

    /// The raw 32-bit trailer word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Gets the sample frame indicator, or `None` if not enabled. The two
    /// enable bits (23..22) are set and cleared together.
    pub fn sample_frame(&self) -> Option<Ssi> {
        if self.0 & (0b11 << 22) == 0b11 << 22 {
            Some(Ssi::from((self.0 >> 10) & 0b11))
        } else {
            None
        }
    }
    /// Sets the sample frame indicator and its enable bits.
    pub fn set_sample_frame(&mut self, ssi: Ssi) {
        self.0 |= 0b11 << 22;
        self.0 = (self.0 & !(0b11 << 10)) | ((ssi as u32) << 10);
    }
    /// Clears the sample frame indicator and its enable bits.
    pub fn reset_sample_frame(&mut self) {
        self.0 &= !(0b11 << 22) & !(0b11 << 10);
    }

    /// Gets the user-defined indicator bits, or `None` if not enabled.
    pub fn user_defined(&self) -> Option<u8> {
        if self.0 & (0b11 << 20) == 0b11 << 20 {
            Some(((self.0 >> 8) & 0b11) as u8)
        } else {
            None
        }
    }
    /// Sets the user-defined indicator bits and their enables.
    pub fn set_user_defined(&mut self, value: u8) {
        self.0 |= 0b11 << 20;
        self.0 = (self.0 & !(0b11 << 8)) | (((value & 0b11) as u32) << 8);
    }
    /// Clears the user-defined indicator bits and their enables.
    pub fn reset_user_defined(&mut self) {
        self.0 &= !(0b11 << 20) & !(0b11 << 8);
    }

    /// Gets the associated context packet count, or `None` if not enabled.
    pub fn associated_context_packet_count(&self) -> Option<u8> {
        if self.0 & (1 << 7) != 0 {
            Some((self.0 & 0x7F) as u8)
        } else {
            None
        }
    }
    /// Sets the associated context packet count (0..=127).
    pub fn set_associated_context_packet_count(&mut self, count: u8) {
        self.0 |= 1 << 7;
        self.0 = (self.0 & !0x7F) | (count & 0x7F) as u32;
    }
    /// Clears the associated context packet count and its enable.
    pub fn reset_associated_context_packet_count(&mut self) {
        self.0 &= !0xFF;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_enable_pairs() {
        let mut trailer = Trailer::default();
        assert_eq!(trailer.valid_data(), None);
        trailer.set_valid_data(true);
        assert_eq!(trailer.valid_data(), Some(true));
        assert_eq!(trailer.as_u32(), (1 << 30) | (1 << 18));
        trailer.reset_valid_data();
        assert_eq!(trailer.as_u32(), 0);
    }

    #[test]
    fn sample_frame_ssi() {
        let mut trailer = Trailer::default();
        trailer.set_sample_frame(Ssi::Middle);
        assert_eq!(trailer.sample_frame(), Some(Ssi::Middle));
        assert_eq!(trailer.as_u32(), (0b11 << 22) | (0b10 << 10));
    }

    #[test]
    fn context_packet_count() {
        let mut trailer = Trailer::default();
        trailer.set_associated_context_packet_count(5);
        assert_eq!(trailer.associated_context_packet_count(), Some(5));
        trailer.reset_associated_context_packet_count();
        assert_eq!(trailer.associated_context_packet_count(), None);
    }
}
