// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The device identifier field (ANSI/VITA-49.2-2017 section 9.10.1): the
manufacturer OUI in the low 24 bits of the first word and the device code
in the low 16 bits of the second.
*/

use core::fmt;
use deku::prelude::*;

/// Base device identifier data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceIdentifier(u64);

impl DeviceIdentifier {
    /// Creates a device identifier from a manufacturer OUI and device code.
    pub fn new(manufacturer_oui: u32, device_code: u16) -> DeviceIdentifier {
        let mut ret = DeviceIdentifier::default();
        ret.set_manufacturer_oui(manufacturer_oui);
        ret.set_device_code(device_code);
        ret
    }

    /// Size of the device identifier field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        2
    }

    /// Gets the manufacturer organizationally unique identifier (OUI).
    pub fn manufacturer_oui(&self) -> u32 {
        ((self.0 >> 32) & 0xFF_FFFF) as u32
    }
    /// Sets the manufacturer OUI. Only the least significant 24 bits of the
    /// argument are used.
    pub fn set_manufacturer_oui(&mut self, oui: u32) {
        self.0 = (self.0 & !(0xFF_FFFF << 32)) | (((oui & 0xFF_FFFF) as u64) << 32);
    }

    /// Gets the device code.
    pub fn device_code(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
    /// Sets the device code.
    pub fn set_device_code(&mut self, code: u16) {
        self.0 = (self.0 & !0xFFFF) | code as u64;
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Device identifier:")?;
        writeln!(f, "  Manufacturer OUI: {:#x}", self.manufacturer_oui())?;
        writeln!(f, "  Device code: {}", self.device_code())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subfields_round_trip() {
        let mut id = DeviceIdentifier::new(0xAB_CDEF, 0x1234);
        assert_eq!(id.manufacturer_oui(), 0xAB_CDEF);
        assert_eq!(id.device_code(), 0x1234);
        id.set_device_code(0xFFFF);
        assert_eq!(id.manufacturer_oui(), 0xAB_CDEF);
        // Reserved bits stay clear
        assert_eq!(id.0 & !(0xFF_FFFF << 32) & !0xFFFF, 0);
    }
}
