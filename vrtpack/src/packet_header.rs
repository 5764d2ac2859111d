// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The 32-bit VRT packet header (ANSI/VITA-49.2-2017 section 5.1.1) and the
closed sets encoded inside it.

Layout, bit 31 down to bit 0:

```text
| 31..28      | 27       | 26..24     | 23..22 | 21..20 | 19..16 | 15..0       |
| packet type | class id | indicators | TSI    | TSF    | count  | packet size |
```

The three indicator bits mean different things per packet type; see
[`Indicators`].
*/

use deku::prelude::*;

use crate::VrtError;

/// Base packet header data structure. The packet-size subfield counts
/// 32-bit words, header included.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketHeader {
    hword_1: u16,
    packet_size: u16,
}

/// The 4-bit packet type code (table 5.1.1-1). Codes 0x8..0xF are reserved;
/// parsing one of those fails with [`VrtError::UnknownPacketType`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(id_type = "u8", endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketType {
    /// Signal data packet without a stream identifier.
    #[deku(id = 0x0)]
    SignalData,
    /// Signal data packet with a stream identifier.
    #[deku(id = 0x1)]
    SignalDataStreamId,
    /// Extension data packet without a stream identifier.
    #[deku(id = 0x2)]
    ExtensionData,
    /// Extension data packet with a stream identifier.
    #[deku(id = 0x3)]
    ExtensionDataStreamId,
    /// Context packet.
    #[deku(id = 0x4)]
    Context,
    /// Extension context packet.
    #[deku(id = 0x5)]
    ExtensionContext,
    /// Command packet.
    #[deku(id = 0x6)]
    Command,
    /// Extension command packet.
    #[deku(id = 0x7)]
    ExtensionCommand,
}

impl PacketType {
    /// True for the four data packet types (signal/extension, with or
    /// without stream ID).
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            PacketType::SignalData
                | PacketType::SignalDataStreamId
                | PacketType::ExtensionData
                | PacketType::ExtensionDataStreamId
        )
    }
    /// True for context and extension context packets.
    pub fn is_context(&self) -> bool {
        matches!(self, PacketType::Context | PacketType::ExtensionContext)
    }
    /// True for command and extension command packets.
    pub fn is_command(&self) -> bool {
        matches!(self, PacketType::Command | PacketType::ExtensionCommand)
    }
}

impl TryFrom<u8> for PacketType {
    type Error = VrtError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(PacketType::SignalData),
            0x1 => Ok(PacketType::SignalDataStreamId),
            0x2 => Ok(PacketType::ExtensionData),
            0x3 => Ok(PacketType::ExtensionDataStreamId),
            0x4 => Ok(PacketType::Context),
            0x5 => Ok(PacketType::ExtensionContext),
            0x6 => Ok(PacketType::Command),
            0x7 => Ok(PacketType::ExtensionCommand),
            code => Err(VrtError::UnknownPacketType(code)),
        }
    }
}

/// TimeStamp-Integer (TSI) field (table 5.1.1-2).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(id_type = "u8", endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsi {
    /// No integer-seconds timestamp included.
    #[deku(id = 0x0)]
    None,
    /// UTC time.
    #[deku(id = 0x1)]
    Utc,
    /// GPS time.
    #[deku(id = 0x2)]
    Gps,
    /// Other, must be documented by the emitting system.
    #[deku(id = 0x3)]
    Other,
}

impl TryFrom<u8> for Tsi {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Tsi::None),
            0x1 => Ok(Tsi::Utc),
            0x2 => Ok(Tsi::Gps),
            0x3 => Ok(Tsi::Other),
            _ => Err(()),
        }
    }
}

/// TimeStamp-Fractional (TSF) field (table 5.1.1-3).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(id_type = "u8", endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsf {
    /// No fractional-seconds timestamp included.
    #[deku(id = 0x0)]
    None,
    /// Sample count timestamp.
    #[deku(id = 0x1)]
    SampleCount,
    /// Real-time (picoseconds) timestamp.
    #[deku(id = 0x2)]
    RealTimePs,
    /// Free-running count timestamp.
    #[deku(id = 0x3)]
    FreeRunning,
}

impl TryFrom<u8> for Tsf {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Tsf::None),
            0x1 => Ok(Tsf::SampleCount),
            0x2 => Ok(Tsf::RealTimePs),
            0x3 => Ok(Tsf::FreeRunning),
            _ => Err(()),
        }
    }
}

/// Timestamp mode for context packets (rules 7.1.1-3..5). Fine conveys the
/// precise timing of an event; coarse conveys general timing at the data
/// sampling interval.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(id_type = "u8", endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsm {
    /// Event-precise timestamps.
    #[deku(id = 0x0)]
    Fine,
    /// General timing.
    #[deku(id = 0x1)]
    Coarse,
}

impl From<bool> for Tsm {
    fn from(value: bool) -> Self {
        if value {
            Tsm::Coarse
        } else {
            Tsm::Fine
        }
    }
}

/// Packet-type-specific interpretation of header bits 26..24
/// (section 5.1.1.1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Indicators {
    /// Bits carry signal/extension data indicators.
    Data(DataIndicators),
    /// Bits carry context indicators.
    Context(ContextIndicators),
    /// Bits carry command indicators.
    Command(CommandIndicators),
}

/// Data packet indicator bits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataIndicators {
    /// Bit 26: the packet ends with a trailer word.
    pub trailer_included: bool,
    /// Bit 25: the packet is not compliant with VITA 49.0.
    pub not_v49d0: bool,
    /// Bit 24: the payload is spectral rather than time-domain data.
    pub spectrum: bool,
}

/// Context packet indicator bits. Bit 26 is reserved.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextIndicators {
    /// Bit 25: the packet is not compliant with VITA 49.0.
    pub not_v49d0: bool,
    /// Bit 24: timestamp mode.
    pub tsm: Tsm,
}

/// Command packet indicator bits. Bit 25 is reserved.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandIndicators {
    /// Bit 26: this command packet is an acknowledge packet.
    pub ack_packet: bool,
    /// Bit 24: this command packet is a cancellation packet.
    pub cancellation_packet: bool,
}

impl PacketHeader {
    /// Rebuilds a header from its raw 32-bit word.
    pub(crate) fn from_word(word: u32) -> PacketHeader {
        PacketHeader {
            hword_1: (word >> 16) as u16,
            packet_size: (word & 0xFFFF) as u16,
        }
    }

    /// The raw 32-bit header word.
    pub fn as_u32(&self) -> u32 {
        ((self.hword_1 as u32) << 16) | (self.packet_size as u32)
    }

    /// Gets the packet type.
    pub fn packet_type(&self) -> PacketType {
        (((self.hword_1 >> 12) & 0xF) as u8)
            .try_into()
            .expect("4-bit codes 0..=7 always decode")
    }
    /// Sets the packet type.
    pub fn set_packet_type(&mut self, packet_type: PacketType) {
        self.hword_1 = (self.hword_1 & !(0xF << 12)) | ((packet_type as u16) << 12);
    }

    /// Returns true if a class identifier is included in the packet.
    pub fn class_id_included(&self) -> bool {
        self.hword_1 & (1 << 11) != 0
    }
    /// Sets the class-identifier-included flag.
    pub(crate) fn set_class_id_included(&mut self, included: bool) {
        self.hword_1 = (self.hword_1 & !(1 << 11)) | ((included as u16) << 11);
    }

    /// Returns the three indicator bits decoded for this packet type.
    pub fn indicators(&self) -> Indicators {
        let i1 = self.hword_1 & (1 << 10) != 0;
        let i2 = self.hword_1 & (1 << 9) != 0;
        let i3 = self.hword_1 & (1 << 8) != 0;
        match self.packet_type() {
            t if t.is_data() => Indicators::Data(DataIndicators {
                trailer_included: i1,
                not_v49d0: i2,
                spectrum: i3,
            }),
            t if t.is_context() => Indicators::Context(ContextIndicators {
                // i1 is reserved
                not_v49d0: i2,
                tsm: i3.into(),
            }),
            _ => Indicators::Command(CommandIndicators {
                ack_packet: i1,
                // i2 is reserved
                cancellation_packet: i3,
            }),
        }
    }
    /// Sets the three indicator bits.
    pub fn set_indicators(&mut self, indicators: Indicators) {
        self.hword_1 &= !(0b111 << 8);
        let (i1, i2, i3) = match indicators {
            Indicators::Data(i) => (i.trailer_included, i.not_v49d0, i.spectrum),
            Indicators::Context(i) => (false, i.not_v49d0, matches!(i.tsm, Tsm::Coarse)),
            Indicators::Command(i) => (i.ack_packet, false, i.cancellation_packet),
        };
        self.hword_1 |= (i1 as u16) << 10 | (i2 as u16) << 9 | (i3 as u16) << 8;
    }

    /// Returns Ok(true) if this is an acknowledge packet, Ok(false) for
    /// other command packets, and an error for non-command packets.
    pub fn is_ack_packet(&self) -> Result<bool, VrtError> {
        match self.indicators() {
            Indicators::Command(i) => Ok(i.ack_packet),
            _ => Err(VrtError::CommandOnly),
        }
    }
    /// Returns Ok(true) if this is a cancellation packet, Ok(false) for
    /// other command packets, and an error for non-command packets.
    pub fn is_cancellation_packet(&self) -> Result<bool, VrtError> {
        match self.indicators() {
            Indicators::Command(i) => Ok(i.cancellation_packet),
            _ => Err(VrtError::CommandOnly),
        }
    }

    /// Gets the TimeStamp-Integer (TSI) field.
    pub fn tsi(&self) -> Tsi {
        (((self.hword_1 >> 6) & 0b11) as u8)
            .try_into()
            .expect("2-bit codes always decode")
    }
    /// Sets the TimeStamp-Integer (TSI) field.
    pub(crate) fn set_tsi(&mut self, tsi: Tsi) {
        self.hword_1 = (self.hword_1 & !(0b11 << 6)) | ((tsi as u16) << 6);
    }

    /// Gets the TimeStamp-Fractional (TSF) field.
    pub fn tsf(&self) -> Tsf {
        (((self.hword_1 >> 4) & 0b11) as u8)
            .try_into()
            .expect("2-bit codes always decode")
    }
    /// Sets the TimeStamp-Fractional (TSF) field.
    pub(crate) fn set_tsf(&mut self, tsf: Tsf) {
        self.hword_1 = (self.hword_1 & !(0b11 << 4)) | ((tsf as u16) << 4);
    }

    /// Gets the modulo-16 packet counter.
    pub fn packet_count(&self) -> u8 {
        (self.hword_1 & 0xF) as u8
    }
    /// Sets the modulo-16 packet counter.
    pub fn set_packet_count(&mut self, count: u8) {
        self.hword_1 = (self.hword_1 & !0xF) | ((count & 0xF) as u16);
    }
    /// Increments the packet counter, wrapping at 16.
    pub fn inc_packet_count(&mut self) {
        self.set_packet_count(self.packet_count().wrapping_add(1) & 0xF);
    }

    /// Gets the packet size field (32-bit words, header included).
    pub fn packet_size(&self) -> u16 {
        self.packet_size
    }
    /// Sets the packet size field (32-bit words, header included).
    pub fn set_packet_size(&mut self, n_words: u16) {
        self.packet_size = n_words;
    }

    /// Returns true if a stream identifier word follows the header. All
    /// packet types carry one except plain signal/extension data.
    pub fn stream_id_included(&self) -> bool {
        !matches!(
            self.packet_type(),
            PacketType::SignalData | PacketType::ExtensionData
        )
    }

    /// Returns true if an integer-seconds timestamp is included.
    pub fn integer_timestamp_included(&self) -> bool {
        self.tsi() != Tsi::None
    }

    /// Returns true if a fractional-seconds timestamp is included.
    pub fn fractional_timestamp_included(&self) -> bool {
        self.tsf() != Tsf::None
    }

    /// Returns true if a trailer word ends the packet.
    pub fn trailer_included(&self) -> bool {
        match self.indicators() {
            Indicators::Data(i) => i.trailer_included,
            _ => false,
        }
    }

    /// Size of the prologue in 32-bit words: the header plus every
    /// conditionally present field ahead of the payload.
    pub fn prologue_size_words(&self) -> usize {
        let mut words = 1;
        if self.stream_id_included() {
            words += 1;
        }
        if self.class_id_included() {
            words += 2;
        }
        if self.integer_timestamp_included() {
            words += 1;
        }
        if self.fractional_timestamp_included() {
            words += 2;
        }
        words
    }

    /// Returns the payload size in 32-bit words: the declared packet size
    /// minus the prologue and, where present, the trailer.
    pub fn payload_size_words(&self) -> usize {
        let mut words = (self.packet_size as usize).saturating_sub(self.prologue_size_words());
        if self.trailer_included() {
            words = words.saturating_sub(1);
        }
        words
    }

    /// Creates a signal data packet header (with stream ID) with defaults.
    pub fn new_signal_data_header() -> PacketHeader {
        let mut ret = PacketHeader::default();
        ret.set_packet_type(PacketType::SignalDataStreamId);
        ret.set_indicators(Indicators::Data(DataIndicators::default()));
        ret
    }

    /// Creates a context packet header with defaults.
    pub fn new_context_header() -> PacketHeader {
        let mut ret = PacketHeader::default();
        ret.set_packet_type(PacketType::Context);
        ret.set_indicators(Indicators::Context(ContextIndicators {
            not_v49d0: false,
            tsm: Tsm::Coarse,
        }));
        ret
    }

    /// Creates a control packet header.
    pub fn new_control_header() -> PacketHeader {
        let mut ret = PacketHeader::default();
        ret.set_packet_type(PacketType::Command);
        ret.set_indicators(Indicators::Command(CommandIndicators::default()));
        ret
    }

    /// Creates a cancellation packet header.
    pub fn new_cancellation_header() -> PacketHeader {
        let mut ret = PacketHeader::default();
        ret.set_packet_type(PacketType::Command);
        ret.set_indicators(Indicators::Command(CommandIndicators {
            ack_packet: false,
            cancellation_packet: true,
        }));
        ret
    }

    /// Creates an acknowledge packet header.
    pub fn new_ack_header() -> PacketHeader {
        let mut ret = PacketHeader::default();
        ret.set_packet_type(PacketType::Command);
        ret.set_indicators(Indicators::Command(CommandIndicators {
            ack_packet: true,
            cancellation_packet: false,
        }));
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_type_nibble() {
        let mut header = PacketHeader::new_control_header();
        assert_eq!(header.packet_type(), PacketType::Command);
        assert_eq!(header.as_u32() >> 28, 0b0110);
        header.set_packet_type(PacketType::ExtensionContext);
        assert_eq!(header.as_u32() >> 28, 0b0101);
    }

    #[test]
    fn reserved_type_codes_rejected() {
        for code in 8u8..=0xF {
            assert!(matches!(
                PacketType::try_from(code),
                Err(VrtError::UnknownPacketType(c)) if c == code
            ));
        }
    }

    #[test]
    fn indicator_bits_round_trip() {
        let mut header = PacketHeader::new_signal_data_header();
        header.set_indicators(Indicators::Data(DataIndicators {
            trailer_included: true,
            not_v49d0: false,
            spectrum: true,
        }));
        assert!(header.trailer_included());
        let word = header.as_u32();
        assert_eq!((word >> 24) & 0b111, 0b101);
    }

    #[test]
    fn packet_count_wraps() {
        let mut header = PacketHeader::default();
        header.set_packet_count(15);
        header.inc_packet_count();
        assert_eq!(header.packet_count(), 0);
    }

    #[test]
    fn tsi_tsf_fields() {
        let mut header = PacketHeader::new_context_header();
        header.set_tsi(Tsi::Gps);
        header.set_tsf(Tsf::RealTimePs);
        assert_eq!(header.tsi(), Tsi::Gps);
        assert_eq!(header.tsf(), Tsf::RealTimePs);
        assert!(header.integer_timestamp_included());
        assert!(header.fractional_timestamp_included());
        assert_eq!(header.prologue_size_words(), 1 + 1 + 1 + 2);
    }
}
