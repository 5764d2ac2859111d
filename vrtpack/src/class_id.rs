// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The 64-bit class identifier prologue field (ANSI/VITA-49.2-2017 section
5.1.3): pad bit count and OUI in the first word, information and packet
class codes in the second.
*/

use deku::prelude::*;

/// Base class identifier data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassIdentifier {
    word_1: u32,
    information_class_code: u16,
    packet_class_code: u16,
}

impl ClassIdentifier {
    /// Creates a class identifier from its three subfields.
    pub fn new(oui: u32, information_class_code: u16, packet_class_code: u16) -> ClassIdentifier {
        let mut ret = ClassIdentifier {
            word_1: 0,
            information_class_code,
            packet_class_code,
        };
        ret.set_oui(oui);
        ret
    }

    /// Gets the number of payload pad bits (bits 31..27 of the first word).
    pub fn pad_bit_count(&self) -> u8 {
        ((self.word_1 >> 27) & 0x1F) as u8
    }
    /// Sets the number of payload pad bits.
    pub fn set_pad_bit_count(&mut self, count: u8) {
        self.word_1 = (self.word_1 & !(0x1F << 27)) | (((count & 0x1F) as u32) << 27);
    }

    /// Gets the organizationally unique identifier (OUI).
    pub fn oui(&self) -> u32 {
        self.word_1 & 0xFF_FFFF
    }
    /// Sets the organizationally unique identifier (OUI). Only the least
    /// significant 24 bits are used.
    pub fn set_oui(&mut self, oui: u32) {
        self.word_1 = (self.word_1 & !0xFF_FFFF) | (oui & 0xFF_FFFF);
    }

    /// Gets the information class code.
    pub fn information_class_code(&self) -> u16 {
        self.information_class_code
    }
    /// Sets the information class code.
    pub fn set_information_class_code(&mut self, code: u16) {
        self.information_class_code = code;
    }

    /// Gets the packet class code.
    pub fn packet_class_code(&self) -> u16 {
        self.packet_class_code
    }
    /// Sets the packet class code.
    pub fn set_packet_class_code(&mut self, code: u16) {
        self.packet_class_code = code;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subfields_do_not_clobber_each_other() {
        let mut id = ClassIdentifier::new(0x12_34_56, 0xAAAA, 0x5555);
        id.set_pad_bit_count(0x1F);
        assert_eq!(id.oui(), 0x12_34_56);
        assert_eq!(id.pad_bit_count(), 0x1F);
        id.set_oui(0xFF_FFFF);
        assert_eq!(id.pad_bit_count(), 0x1F);
        assert_eq!(id.information_class_code(), 0xAAAA);
        assert_eq!(id.packet_class_code(), 0x5555);
    }
}
