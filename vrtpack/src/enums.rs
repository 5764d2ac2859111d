// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Closed-set wire encodings that are not tied to a single record module:
index-list entry sizes and the V49 standard compliance numbers
(ANSI/VITA-49.2-2017 tables 9.3.2-1 and 9.10.3-1).
*/

/// Index list entry size subfield coding (table 9.3.2-1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntrySize {
    /// 8-bit fields packed into 32-bit words.
    EightBit = 0x1,
    /// 16-bit fields packed into 32-bit words.
    SixteenBit = 0x2,
    /// 32-bit fields.
    ThirtyTwoBit = 0x4,
}

impl TryFrom<u8> for EntrySize {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x1 => Ok(EntrySize::EightBit),
            0x2 => Ok(EntrySize::SixteenBit),
            0x4 => Ok(EntrySize::ThirtyTwoBit),
            _ => Err(()),
        }
    }
}

/// V49 standard and specification compliance number (table 9.10.3-1).
/// Carried in the CIF1 V49 spec compliance field.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum V49StandardCompliance {
    /// VITA 49.0
    V49_0 = 0x1,
    /// VITA 49.1
    V49_1 = 0x2,
    /// VITA 49A
    V49A = 0x3,
    /// VITA 49.2
    V49_2 = 0x4,
}

impl TryFrom<u32> for V49StandardCompliance {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x1 => Ok(V49StandardCompliance::V49_0),
            0x2 => Ok(V49StandardCompliance::V49_1),
            0x3 => Ok(V49StandardCompliance::V49A),
            0x4 => Ok(V49StandardCompliance::V49_2),
            _ => Err(()),
        }
    }
}
