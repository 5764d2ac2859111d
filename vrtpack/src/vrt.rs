// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The top-level VRT packet structure and the pack/unpack entry points.
This is the module users of the crate normally interact with.

The wire operations are:

- [`VrtPacket::bytes_required`] — exact serialized size of the packet.
- [`VrtPacket::pack_into`] — serialize into a caller-provided buffer.
- [`VrtPacket::matches`] — cheap structural check of a received buffer.
- [`VrtPacket::unpack`] — parse a buffer into a typed packet.

`unpack` walks the raw prologue and CIF words before the field decode so
that truncation, reserved packet-type codes, and CIF bits this crate has
no record layout for surface as typed errors instead of misparses.
*/

use deku::prelude::*;
use deku::writer::Writer;

use crate::cam::Cam;
use crate::class_id::ClassIdentifier;
use crate::packet_header::{Indicators, PacketHeader, PacketType, Tsf, Tsi};
use crate::payload::Payload;
use crate::signal_data::SignalData;
use crate::trailer::Trailer;
use crate::{
    Cif0, Cif1, Cif2, Cif3, Cif7, Command, Context, VrtError,
};

/// The main VRT packet structure encapsulating every packet type.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(endian = "big")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VrtPacket {
    /// Packet header, present on every packet.
    header: PacketHeader,
    /// Stream identifier.
    #[deku(cond = "header.stream_id_included()")]
    stream_id: Option<u32>,
    /// Class identifier.
    #[deku(cond = "header.class_id_included()")]
    class_id: Option<ClassIdentifier>,
    /// Integer-seconds timestamp.
    #[deku(cond = "header.integer_timestamp_included()")]
    integer_timestamp: Option<u32>,
    /// Fractional-seconds timestamp.
    #[deku(cond = "header.fractional_timestamp_included()")]
    fractional_timestamp: Option<u64>,
    /// Packet payload: signal data words, context fields, or a command.
    #[deku(ctx = "header")]
    payload: Payload,
    /// Data packet trailer.
    #[deku(cond = "header.trailer_included()")]
    trailer: Option<Trailer>,
}

/// Reads the big-endian word at byte `offset`, or reports how many bytes
/// the packet would have needed.
fn read_word(buf: &[u8], offset: usize) -> Result<u32, VrtError> {
    match buf.get(offset..offset + 4) {
        Some(bytes) => Ok(u32::from_be_bytes(bytes.try_into().expect("4-byte slice"))),
        None => Err(VrtError::Truncated {
            expected: offset + 4,
            available: buf.len(),
        }),
    }
}

/// Fails with [`VrtError::UnknownField`] if `word` carries a bit outside
/// `known_mask`, naming the highest such bit.
fn check_cif_word(word: u32, known_mask: u32, cif: u8) -> Result<(), VrtError> {
    let unknown = word & !known_mask;
    if unknown != 0 {
        let bit = (31 - unknown.leading_zeros()) as u8;
        log::debug!("CIF{cif} bit {bit} set but not recognized");
        return Err(VrtError::UnknownField { cif, bit });
    }
    Ok(())
}

/// Walks a CIF0-led indicator chain starting at `offset`, validating each
/// present word against the bits this crate can decode. Returns the
/// offset just past the indicator words.
fn scan_cif_chain(buf: &[u8], mut offset: usize) -> Result<usize, VrtError> {
    let cif0 = read_word(buf, offset)?;
    offset += 4;
    check_cif_word(cif0, Cif0::KNOWN_MASK, 0)?;
    if cif0 & (1 << 1) != 0 {
        check_cif_word(read_word(buf, offset)?, Cif1::KNOWN_MASK, 1)?;
        offset += 4;
    }
    if cif0 & (1 << 2) != 0 {
        check_cif_word(read_word(buf, offset)?, Cif2::KNOWN_MASK, 2)?;
        offset += 4;
    }
    if cif0 & (1 << 3) != 0 {
        check_cif_word(read_word(buf, offset)?, Cif3::KNOWN_MASK, 3)?;
        offset += 4;
    }
    if cif0 & (1 << 7) != 0 {
        check_cif_word(read_word(buf, offset)?, Cif7::KNOWN_MASK, 7)?;
        offset += 4;
    }
    Ok(offset)
}

/// Structural pre-scan of a packet buffer: packet type, declared length,
/// and every CIF indicator word are checked before any field is decoded.
fn scan(buf: &[u8]) -> Result<(), VrtError> {
    let word0 = read_word(buf, 0)?;
    let packet_type = PacketType::try_from((word0 >> 28) as u8)?;
    let declared = ((word0 & 0xFFFF) as usize) * 4;
    if buf.len() < declared {
        return Err(VrtError::Truncated {
            expected: declared,
            available: buf.len(),
        });
    }
    // Scan only the declared extent; trailing bytes are not part of the
    // packet.
    let buf = &buf[..declared];

    if packet_type.is_data() {
        // Payload is opaque; nothing further to validate.
        return Ok(());
    }

    let header = PacketHeader::from_word(word0);
    let mut offset = header.prologue_size_words() * 4;

    if packet_type.is_command() {
        let cam = read_word(buf, offset)?;
        offset += 4; // CAM
        offset += 4; // message ID
        if cam & (1 << 31) != 0 {
            // Controllee: word or UUID per the format bit
            offset += if cam & (1 << 30) != 0 { 16 } else { 4 };
        }
        if cam & (1 << 29) != 0 {
            offset += if cam & (1 << 28) != 0 { 16 } else { 4 };
        }

        let is_ack = header.is_ack_packet().unwrap_or(false);
        let ack_state = cam & (1 << 18) != 0;
        if is_ack && !ack_state {
            // Validation/execution ack: warning then error indicator sets
            if cam & (1 << 17) != 0 {
                offset = scan_cif_chain(buf, offset)?;
            }
            if cam & (1 << 16) != 0 {
                scan_cif_chain(buf, offset)?;
            }
            return Ok(());
        }
    }

    // Context, control/cancellation, and query-ack payloads all lead with
    // a CIF0 chain.
    scan_cif_chain(buf, offset)?;
    Ok(())
}

impl VrtPacket {
    /// Produces a new signal data packet (with stream identifier) with
    /// sane defaults.
    ///
    /// # Example
    /// ```
    /// use vrtpack::prelude::*;
    /// # fn main() -> Result<(), VrtError> {
    /// let mut packet = VrtPacket::new_signal_data_packet();
    /// packet.set_stream_id(Some(0xDEAD_BEEF));
    /// packet.set_signal_payload(&[1, 2, 3, 4])?;
    /// assert_eq!(packet.stream_id()?, 0xDEAD_BEEF);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_signal_data_packet() -> VrtPacket {
        let mut ret = VrtPacket {
            header: PacketHeader::new_signal_data_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::SignalData(SignalData::new()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produces a new context packet with sane defaults.
    ///
    /// # Example
    /// ```
    /// use vrtpack::prelude::*;
    /// # fn main() -> Result<(), VrtError> {
    /// let mut packet = VrtPacket::new_context_packet();
    /// let context = packet.payload_mut().context_mut()?;
    /// context.set_bandwidth_hz(Some(8e6));
    /// assert_eq!(context.bandwidth_hz(), Some(8e6));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_context_packet() -> VrtPacket {
        let mut ret = VrtPacket {
            header: PacketHeader::new_context_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Context(Context::new()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    fn new_command_packet_with(header: PacketHeader, command: Command) -> VrtPacket {
        let mut ret = VrtPacket {
            header,
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(command),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produces a new control packet.
    pub fn new_control_packet() -> VrtPacket {
        Self::new_command_packet_with(PacketHeader::new_control_header(), Command::new_control())
    }

    /// Produces a new cancellation packet.
    pub fn new_cancellation_packet() -> VrtPacket {
        Self::new_command_packet_with(
            PacketHeader::new_cancellation_header(),
            Command::new_cancellation(),
        )
    }

    /// Produces a new validation acknowledge packet.
    pub fn new_validation_ack_packet() -> VrtPacket {
        Self::new_command_packet_with(
            PacketHeader::new_ack_header(),
            Command::new_validation_ack(),
        )
    }

    /// Produces a new execution acknowledge packet.
    pub fn new_exec_ack_packet() -> VrtPacket {
        Self::new_command_packet_with(PacketHeader::new_ack_header(), Command::new_exec_ack())
    }

    /// Produces a new query acknowledge packet.
    pub fn new_query_ack_packet() -> VrtPacket {
        Self::new_command_packet_with(PacketHeader::new_ack_header(), Command::new_query_ack())
    }

    /// Gets a reference to the packet header.
    pub fn header(&self) -> &PacketHeader {
        &self.header
    }
    /// Gets a mutable reference to the packet header.
    pub fn header_mut(&mut self) -> &mut PacketHeader {
        &mut self.header
    }

    /// Gets the stream identifier.
    ///
    /// # Errors
    /// Fails with [`VrtError::MissingPrologueField`] when the packet type
    /// carries no stream identifier.
    pub fn stream_id(&self) -> Result<u32, VrtError> {
        self.stream_id
            .ok_or(VrtError::MissingPrologueField("stream identifier"))
    }

    /// Sets the stream identifier. Passing `None` removes it; the packet
    /// type is switched between the with/without-stream-identifier codes
    /// as needed.
    pub fn set_stream_id(&mut self, stream_id: Option<u32>) {
        self.stream_id = stream_id;
        let packet_type = self.header.packet_type();
        let new_type = match (stream_id.is_some(), packet_type) {
            (true, PacketType::SignalData) => Some(PacketType::SignalDataStreamId),
            (true, PacketType::ExtensionData) => Some(PacketType::ExtensionDataStreamId),
            (false, PacketType::SignalDataStreamId) => Some(PacketType::SignalData),
            (false, PacketType::ExtensionDataStreamId) => Some(PacketType::ExtensionData),
            _ => None,
        };
        if let Some(t) = new_type {
            self.header.set_packet_type(t);
        }
    }

    /// Gets the class identifier.
    ///
    /// # Errors
    /// Fails with [`VrtError::MissingPrologueField`] when the header's
    /// class identifier bit is clear.
    pub fn class_id(&self) -> Result<&ClassIdentifier, VrtError> {
        self.class_id
            .as_ref()
            .ok_or(VrtError::MissingPrologueField("class identifier"))
    }
    /// Sets the class identifier and the matching header bit. Passing
    /// `None` removes the field.
    pub fn set_class_id(&mut self, class_id: Option<ClassIdentifier>) {
        self.header.set_class_id_included(class_id.is_some());
        self.class_id = class_id;
    }

    /// Gets the integer-seconds timestamp.
    ///
    /// # Errors
    /// Fails with [`VrtError::MissingPrologueField`] when the header TSI
    /// is null.
    pub fn integer_timestamp(&self) -> Result<u32, VrtError> {
        self.integer_timestamp
            .ok_or(VrtError::MissingPrologueField("integer timestamp"))
    }

    /// Sets the integer-seconds timestamp along with its TSI mode.
    ///
    /// # Errors
    /// Fails with [`VrtError::TimestampModeMismatch`] when the timestamp
    /// and mode disagree (a value with [`Tsi::None`], or `None` with any
    /// other mode).
    pub fn set_integer_timestamp(
        &mut self,
        timestamp: Option<u32>,
        tsi: Tsi,
    ) -> Result<(), VrtError> {
        if timestamp.is_some() != (tsi != Tsi::None) {
            return Err(VrtError::TimestampModeMismatch);
        }
        self.integer_timestamp = timestamp;
        self.header.set_tsi(tsi);
        Ok(())
    }

    /// Gets the fractional-seconds timestamp.
    ///
    /// # Errors
    /// Fails with [`VrtError::MissingPrologueField`] when the header TSF
    /// is null.
    pub fn fractional_timestamp(&self) -> Result<u64, VrtError> {
        self.fractional_timestamp
            .ok_or(VrtError::MissingPrologueField("fractional timestamp"))
    }

    /// Sets the fractional-seconds timestamp along with its TSF mode.
    ///
    /// # Errors
    /// Fails with [`VrtError::TimestampModeMismatch`] when the timestamp
    /// and mode disagree.
    pub fn set_fractional_timestamp(
        &mut self,
        timestamp: Option<u64>,
        tsf: Tsf,
    ) -> Result<(), VrtError> {
        if timestamp.is_some() != (tsf != Tsf::None) {
            return Err(VrtError::TimestampModeMismatch);
        }
        self.fractional_timestamp = timestamp;
        self.header.set_tsf(tsf);
        Ok(())
    }

    /// Gets a reference to the payload enumeration.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
    /// Gets a mutable reference to the payload enumeration.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Gets a reference to the trailer, if present.
    pub fn trailer(&self) -> Option<&Trailer> {
        self.trailer.as_ref()
    }
    /// Sets the trailer and the data-header trailer-included bit. Passing
    /// `None` removes it.
    ///
    /// # Errors
    /// Fails with [`VrtError::SignalDataOnly`] on non-data packets, which
    /// have no trailer.
    pub fn set_trailer(&mut self, trailer: Option<Trailer>) -> Result<(), VrtError> {
        let Indicators::Data(mut indicators) = self.header.indicators() else {
            return Err(VrtError::SignalDataOnly);
        };
        indicators.trailer_included = trailer.is_some();
        self.header.set_indicators(Indicators::Data(indicators));
        self.trailer = trailer;
        self.update_packet_size();
        Ok(())
    }

    /// Gets the signal data payload bytes.
    ///
    /// # Errors
    /// Fails when run on a packet other than a signal data packet.
    pub fn signal_payload(&self) -> Result<Vec<u8>, VrtError> {
        Ok(self.payload.signal_data()?.payload())
    }

    /// Sets the signal data payload bytes and refreshes the packet size.
    ///
    /// # Errors
    /// Fails on non-data packets, or when the byte count is not a
    /// multiple of four.
    pub fn set_signal_payload(&mut self, payload: &[u8]) -> Result<(), VrtError> {
        self.payload.signal_data_mut()?.set_payload(payload)?;
        self.update_packet_size();
        Ok(())
    }

    /// Recomputes the header packet-size field from the current contents.
    /// `pack_into` does this automatically; call it yourself when
    /// serializing through the raw deku traits instead.
    pub fn update_packet_size(&mut self) {
        let total = self.size_words();
        self.header.set_packet_size(total);
    }

    fn size_words(&self) -> u16 {
        let mut words: u16 = 1;
        if self.header.stream_id_included() {
            words += 1;
        }
        if self.header.class_id_included() {
            words += 2;
        }
        if self.header.integer_timestamp_included() {
            words += 1;
        }
        if self.header.fractional_timestamp_included() {
            words += 2;
        }
        if self.header.trailer_included() {
            words += 1;
        }
        words + self.payload.size_words()
    }

    /// Exact number of bytes [`VrtPacket::pack_into`] will write.
    pub fn bytes_required(&self) -> usize {
        self.size_words() as usize * 4
    }

    /// Serializes the packet into `buf`, refreshing the header
    /// packet-size field first. Returns the number of bytes written.
    ///
    /// # Errors
    /// Fails with [`VrtError::BufferTooSmall`] when `buf` cannot hold the
    /// packet; nothing useful is written in that case.
    pub fn pack_into(&mut self, buf: &mut [u8]) -> Result<usize, VrtError> {
        self.update_packet_size();
        let needed = self.bytes_required();
        if buf.len() < needed {
            return Err(VrtError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }
        let mut cursor = std::io::Cursor::new(buf);
        let mut writer = Writer::new(&mut cursor);
        self.to_writer(&mut writer, ())?;
        Ok(needed)
    }

    /// Serializes the packet to a new byte vector, refreshing the header
    /// packet-size field first.
    pub fn to_packed_bytes(&mut self) -> Result<Vec<u8>, VrtError> {
        self.update_packet_size();
        Ok(self.to_bytes()?)
    }

    /// Cheap structural check: does `buf` start with a known packet-type
    /// code and hold exactly the number of bytes the header declares?
    pub fn matches(buf: &[u8]) -> bool {
        let Ok(word0) = read_word(buf, 0) else {
            return false;
        };
        if PacketType::try_from((word0 >> 28) as u8).is_err() {
            return false;
        }
        ((word0 & 0xFFFF) as usize) * 4 == buf.len()
    }

    /// Parses a packet from `buf`. The buffer must hold at least the
    /// declared packet size; trailing bytes beyond it are ignored.
    ///
    /// # Errors
    /// - [`VrtError::Truncated`] when `buf` is shorter than declared.
    /// - [`VrtError::UnknownPacketType`] for reserved packet-type codes.
    /// - [`VrtError::UnknownField`] when a CIF bit is set whose record
    ///   layout this crate does not know.
    ///
    /// # Example
    /// ```
    /// use vrtpack::prelude::*;
    /// # fn main() -> Result<(), VrtError> {
    /// let mut packet = VrtPacket::new_context_packet();
    /// packet.payload_mut().context_mut()?.set_bandwidth_hz(Some(1.0));
    /// let bytes = packet.to_packed_bytes()?;
    /// let parsed = VrtPacket::unpack(&bytes)?;
    /// assert_eq!(parsed.payload().context()?.bandwidth_hz(), Some(1.0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn unpack(buf: &[u8]) -> Result<VrtPacket, VrtError> {
        scan(buf)?;
        let declared = ((read_word(buf, 0)? & 0xFFFF) as usize) * 4;
        log::trace!("unpacking {declared} byte packet");
        let (_, packet) = VrtPacket::from_bytes((&buf[..declared], 0)).map_err(|e| match e {
            DekuError::Incomplete(_) => VrtError::Truncated {
                expected: declared,
                available: buf.len(),
            },
            other => VrtError::Deku(other),
        })?;
        Ok(packet)
    }

    /// Gets the command payload's CAM word, when this is a command
    /// packet.
    pub fn cam(&self) -> Option<&Cam> {
        match &self.payload {
            Payload::Command(c) => Some(c.cam()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cif0::Cif0Manipulators;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn matches_checks_type_and_length() {
        log_init();
        let mut packet = VrtPacket::new_context_packet();
        let bytes = packet.to_packed_bytes().unwrap();
        assert!(VrtPacket::matches(&bytes));
        assert!(!VrtPacket::matches(&bytes[..bytes.len() - 1]));
        let mut reserved = bytes.clone();
        reserved[0] |= 0x80; // type code 0xC
        assert!(!VrtPacket::matches(&reserved));
    }

    #[test]
    fn unpack_rejects_truncation() {
        log_init();
        let mut packet = VrtPacket::new_context_packet();
        packet
            .payload_mut()
            .context_mut()
            .unwrap()
            .set_bandwidth_hz(Some(1e6));
        let bytes = packet.to_packed_bytes().unwrap();
        let err = VrtPacket::unpack(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, VrtError::Truncated { .. }));
    }

    #[test]
    fn unpack_rejects_reserved_packet_type() {
        log_init();
        let mut packet = VrtPacket::new_context_packet();
        let mut bytes = packet.to_packed_bytes().unwrap();
        bytes[0] = 0x90 | (bytes[0] & 0x0F);
        let err = VrtPacket::unpack(&bytes).unwrap_err();
        assert!(matches!(err, VrtError::UnknownPacketType(0x9)));
    }

    #[test]
    fn unpack_rejects_unknown_cif_bits() {
        log_init();
        let mut packet = VrtPacket::new_context_packet();
        let mut bytes = packet.to_packed_bytes().unwrap();
        // Context packet: header + stream ID + CIF0. Set reserved bit 4.
        bytes[11] |= 0x10;
        let err = VrtPacket::unpack(&bytes).unwrap_err();
        assert!(matches!(err, VrtError::UnknownField { cif: 0, bit: 4 }));
    }

    #[test]
    fn prologue_accessors_fail_when_absent() {
        log_init();
        let mut packet = VrtPacket::new_signal_data_packet();
        packet.set_stream_id(None);
        assert_eq!(packet.header().packet_type(), PacketType::SignalData);
        assert!(matches!(
            packet.stream_id(),
            Err(VrtError::MissingPrologueField(_))
        ));
        assert!(matches!(
            packet.integer_timestamp(),
            Err(VrtError::MissingPrologueField(_))
        ));
        assert!(matches!(
            packet.class_id(),
            Err(VrtError::MissingPrologueField(_))
        ));
    }

    #[test]
    fn timestamp_mode_mismatch_is_rejected() {
        log_init();
        let mut packet = VrtPacket::new_signal_data_packet();
        assert!(matches!(
            packet.set_integer_timestamp(Some(123), Tsi::None),
            Err(VrtError::TimestampModeMismatch)
        ));
        assert!(matches!(
            packet.set_fractional_timestamp(None, Tsf::RealTimePs),
            Err(VrtError::TimestampModeMismatch)
        ));
        packet.set_integer_timestamp(Some(123), Tsi::Utc).unwrap();
        assert_eq!(packet.integer_timestamp().unwrap(), 123);
    }

    #[test]
    fn pack_into_reports_small_buffers() {
        log_init();
        let mut packet = VrtPacket::new_context_packet();
        let mut buf = [0u8; 8];
        let err = packet.pack_into(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            VrtError::BufferTooSmall {
                needed: 12,
                available: 8
            }
        ));
        let mut buf = [0u8; 64];
        let written = packet.pack_into(&mut buf).unwrap();
        assert_eq!(written, 12);
    }
}
