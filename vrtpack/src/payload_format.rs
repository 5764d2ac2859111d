// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The signal data payload format field (ANSI/VITA-49.2-2017 section 9.13.3).

Two words describing how data items are packed into a signal data payload:

```text
word 1: | 31 | 30..29 | 28..24 | 23 | 22..20 | 19..16 | 15..12 | 11..6 | 5..0 |
        | PM | type   | format | R  | evt    | chan   | frac   | ipfs  | dis  |
word 2: | 31..16       | 15..0       |
        | repeat count | vector size |
```

Item packing field size, data item size, repeat count, and vector size are
all stored on the wire as *value − 1*; the accessors below speak in the
natural 1-based range.
*/

use deku::prelude::*;
use std::fmt;

/// Data packing method flag (bit 31).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackingMethod {
    /// Items are padded so they never span a 32-bit word boundary.
    #[default]
    ProcessingEfficient,
    /// Items are packed back to back across word boundaries.
    LinkEfficient,
}

/// Real/complex sample type (bits 30..29).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataSampleType {
    /// Real samples.
    #[default]
    Real,
    /// Complex samples, cartesian (I/Q) form.
    ComplexCartesian,
    /// Complex samples, polar form.
    ComplexPolar,
}

impl TryFrom<u8> for DataSampleType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(DataSampleType::Real),
            0b01 => Ok(DataSampleType::ComplexCartesian),
            0b10 => Ok(DataSampleType::ComplexPolar),
            _ => Err(()),
        }
    }
}

/// Data item format codes (bits 28..24, table 9.13.3-1). The reserved
/// encodings are representable so that a parsed word can always be read
/// back; emitting them is the caller's responsibility to avoid.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum DataItemFormat {
    /// Signed fixed-point.
    #[default]
    SignedFixed = 0x00,
    SignedVrt1 = 0x01,
    SignedVrt2 = 0x02,
    SignedVrt3 = 0x03,
    SignedVrt4 = 0x04,
    SignedVrt5 = 0x05,
    SignedVrt6 = 0x06,
    /// Signed fixed-point, non-normalized.
    SignedFixedNonNormalized = 0x07,
    Reserved8 = 0x08,
    Reserved9 = 0x09,
    Reserved10 = 0x0A,
    Reserved11 = 0x0B,
    Reserved12 = 0x0C,
    /// IEEE-754 half-precision floating point.
    Ieee754Half = 0x0D,
    /// IEEE-754 single-precision floating point.
    Ieee754Single = 0x0E,
    /// IEEE-754 double-precision floating point.
    Ieee754Double = 0x0F,
    /// Unsigned fixed-point.
    UnsignedFixed = 0x10,
    UnsignedVrt1 = 0x11,
    UnsignedVrt2 = 0x12,
    UnsignedVrt3 = 0x13,
    UnsignedVrt4 = 0x14,
    UnsignedVrt5 = 0x15,
    UnsignedVrt6 = 0x16,
    /// Unsigned fixed-point, non-normalized.
    UnsignedFixedNonNormalized = 0x17,
    Reserved24 = 0x18,
    Reserved25 = 0x19,
    Reserved26 = 0x1A,
    Reserved27 = 0x1B,
    Reserved28 = 0x1C,
    Reserved29 = 0x1D,
    Reserved30 = 0x1E,
    Reserved31 = 0x1F,
}

impl DataItemFormat {
    /// True for the reserved format codes.
    pub fn is_reserved(&self) -> bool {
        matches!(*self as u8, 0x08..=0x0C | 0x18..=0x1F)
    }
}

impl From<u8> for DataItemFormat {
    fn from(value: u8) -> Self {
        // All 32 codes are representable, so a 5-bit value always maps.
        match value & 0x1F {
            0x00 => DataItemFormat::SignedFixed,
            0x01 => DataItemFormat::SignedVrt1,
            0x02 => DataItemFormat::SignedVrt2,
            0x03 => DataItemFormat::SignedVrt3,
            0x04 => DataItemFormat::SignedVrt4,
            0x05 => DataItemFormat::SignedVrt5,
            0x06 => DataItemFormat::SignedVrt6,
            0x07 => DataItemFormat::SignedFixedNonNormalized,
            0x08 => DataItemFormat::Reserved8,
            0x09 => DataItemFormat::Reserved9,
            0x0A => DataItemFormat::Reserved10,
            0x0B => DataItemFormat::Reserved11,
            0x0C => DataItemFormat::Reserved12,
            0x0D => DataItemFormat::Ieee754Half,
            0x0E => DataItemFormat::Ieee754Single,
            0x0F => DataItemFormat::Ieee754Double,
            0x10 => DataItemFormat::UnsignedFixed,
            0x11 => DataItemFormat::UnsignedVrt1,
            0x12 => DataItemFormat::UnsignedVrt2,
            0x13 => DataItemFormat::UnsignedVrt3,
            0x14 => DataItemFormat::UnsignedVrt4,
            0x15 => DataItemFormat::UnsignedVrt5,
            0x16 => DataItemFormat::UnsignedVrt6,
            0x17 => DataItemFormat::UnsignedFixedNonNormalized,
            0x18 => DataItemFormat::Reserved24,
            0x19 => DataItemFormat::Reserved25,
            0x1A => DataItemFormat::Reserved26,
            0x1B => DataItemFormat::Reserved27,
            0x1C => DataItemFormat::Reserved28,
            0x1D => DataItemFormat::Reserved29,
            0x1E => DataItemFormat::Reserved30,
            _ => DataItemFormat::Reserved31,
        }
    }
}

/// Base payload format data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayloadFormat {
    word_1: u32,
    word_2: u32,
}

impl PayloadFormat {
    /// Size of the payload format field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        2
    }

    fn field_1(&self, msb: u32, width: u32) -> u32 {
        (self.word_1 >> (msb + 1 - width)) & ((1 << width) - 1)
    }

    fn set_field_1(&mut self, msb: u32, width: u32, value: u32) {
        let shift = msb + 1 - width;
        let mask = ((1u32 << width) - 1) << shift;
        self.word_1 = (self.word_1 & !mask) | ((value << shift) & mask);
    }

    /// Gets the packing method.
    pub fn packing_method(&self) -> PackingMethod {
        if self.field_1(31, 1) != 0 {
            PackingMethod::LinkEfficient
        } else {
            PackingMethod::ProcessingEfficient
        }
    }
    /// Sets the packing method.
    pub fn set_packing_method(&mut self, method: PackingMethod) {
        self.set_field_1(31, 1, matches!(method, PackingMethod::LinkEfficient) as u32);
    }

    /// Gets the real/complex sample type. Returns `None` for the reserved
    /// encoding.
    pub fn data_sample_type(&self) -> Option<DataSampleType> {
        (self.field_1(30, 2) as u8).try_into().ok()
    }
    /// Sets the real/complex sample type.
    pub fn set_data_sample_type(&mut self, sample_type: DataSampleType) {
        self.set_field_1(30, 2, sample_type as u32);
    }

    /// Gets the data item format code.
    pub fn data_item_format(&self) -> DataItemFormat {
        DataItemFormat::from(self.field_1(28, 5) as u8)
    }
    /// Sets the data item format code.
    pub fn set_data_item_format(&mut self, format: DataItemFormat) {
        self.set_field_1(28, 5, format as u32);
    }

    /// Gets the sample-component repeat indicator.
    pub fn sample_component_repeat(&self) -> bool {
        self.field_1(23, 1) != 0
    }
    /// Sets the sample-component repeat indicator.
    pub fn set_sample_component_repeat(&mut self, repeating: bool) {
        self.set_field_1(23, 1, repeating as u32);
    }

    /// Gets the event tag size in bits (0..=7).
    pub fn event_tag_size(&self) -> u8 {
        self.field_1(22, 3) as u8
    }
    /// Sets the event tag size in bits (0..=7).
    pub fn set_event_tag_size(&mut self, bits: u8) {
        self.set_field_1(22, 3, bits as u32);
    }

    /// Gets the channel tag size in bits (0..=15).
    pub fn channel_tag_size(&self) -> u8 {
        self.field_1(19, 4) as u8
    }
    /// Sets the channel tag size in bits (0..=15).
    pub fn set_channel_tag_size(&mut self, bits: u8) {
        self.set_field_1(19, 4, bits as u32);
    }

    /// Gets the data item fraction size in bits (0..=15).
    pub fn data_item_fraction_size(&self) -> u8 {
        self.field_1(15, 4) as u8
    }
    /// Sets the data item fraction size in bits (0..=15).
    pub fn set_data_item_fraction_size(&mut self, bits: u8) {
        self.set_field_1(15, 4, bits as u32);
    }

    /// Gets the item packing field size in bits (1..=64; stored as
    /// value − 1 on the wire).
    pub fn item_packing_field_size(&self) -> u8 {
        self.field_1(11, 6) as u8 + 1
    }
    /// Sets the item packing field size in bits (1..=64).
    pub fn set_item_packing_field_size(&mut self, bits: u8) {
        self.set_field_1(11, 6, bits.saturating_sub(1) as u32);
    }

    /// Gets the data item size in bits (1..=64; stored as value − 1 on the
    /// wire).
    pub fn data_item_size(&self) -> u8 {
        self.field_1(5, 6) as u8 + 1
    }
    /// Sets the data item size in bits (1..=64).
    pub fn set_data_item_size(&mut self, bits: u8) {
        self.set_field_1(5, 6, bits.saturating_sub(1) as u32);
    }

    /// Gets the repeat count (1..=65536; stored as value − 1 on the wire).
    pub fn repeat_count(&self) -> u32 {
        (self.word_2 >> 16) + 1
    }
    /// Sets the repeat count (1..=65536).
    pub fn set_repeat_count(&mut self, count: u32) {
        self.word_2 = (self.word_2 & 0xFFFF) | ((count.saturating_sub(1) & 0xFFFF) << 16);
    }

    /// Gets the vector size (1..=65536; stored as value − 1 on the wire).
    pub fn vector_size(&self) -> u32 {
        (self.word_2 & 0xFFFF) + 1
    }
    /// Sets the vector size (1..=65536).
    pub fn set_vector_size(&mut self, size: u32) {
        self.word_2 = (self.word_2 & !0xFFFF) | (size.saturating_sub(1) & 0xFFFF);
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Payload format:")?;
        writeln!(f, "  Packing method: {:?}", self.packing_method())?;
        writeln!(f, "  Sample type: {:?}", self.data_sample_type())?;
        writeln!(f, "  Item format: {:?}", self.data_item_format())?;
        writeln!(f, "  Item packing field size: {}", self.item_packing_field_size())?;
        writeln!(f, "  Data item size: {}", self.data_item_size())?;
        writeln!(f, "  Repeat count: {}", self.repeat_count())?;
        writeln!(f, "  Vector size: {}", self.vector_size())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minus_one_fields() {
        let mut pf = PayloadFormat::default();
        // A fresh word reads back the minimum of every 1-based field.
        assert_eq!(pf.item_packing_field_size(), 1);
        assert_eq!(pf.data_item_size(), 1);
        assert_eq!(pf.repeat_count(), 1);
        assert_eq!(pf.vector_size(), 1);

        pf.set_item_packing_field_size(64);
        pf.set_data_item_size(64);
        pf.set_repeat_count(65536);
        pf.set_vector_size(65536);
        assert_eq!(pf.item_packing_field_size(), 64);
        assert_eq!(pf.data_item_size(), 64);
        assert_eq!(pf.repeat_count(), 65536);
        assert_eq!(pf.vector_size(), 65536);
        // Stored encodings are all-ones
        assert_eq!(pf.word_1 & 0xFFF, 0xFFF);
        assert_eq!(pf.word_2, 0xFFFF_FFFF);

        pf.set_item_packing_field_size(1);
        assert_eq!(pf.word_1 & (0x3F << 6), 0);
        assert_eq!(pf.item_packing_field_size(), 1);
    }

    #[test]
    fn word_one_layout() {
        let mut pf = PayloadFormat::default();
        pf.set_packing_method(PackingMethod::LinkEfficient);
        pf.set_data_sample_type(DataSampleType::Real);
        pf.set_data_item_format(DataItemFormat::Ieee754Single);
        pf.set_event_tag_size(1);
        pf.set_channel_tag_size(2);
        pf.set_item_packing_field_size(4);
        pf.set_data_item_size(8);
        assert_eq!(pf.word_1, 0x8E12_00C7);
    }

    #[test]
    fn format_codes_total() {
        for code in 0u8..32 {
            let format = DataItemFormat::from(code);
            assert_eq!(format as u8, code);
        }
        assert!(DataItemFormat::Reserved12.is_reserved());
        assert!(!DataItemFormat::Ieee754Double.is_reserved());
    }
}
