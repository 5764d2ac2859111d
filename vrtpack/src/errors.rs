// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Error types for the `vrtpack` crate.
*/

use thiserror::Error;

/// Generic `vrtpack` crate error enumeration.
#[derive(Error, Debug)]
pub enum VrtError {
    /// The buffer passed to `pack_into()` cannot hold the serialized packet.
    #[error("pack buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes the packet serializes to.
        needed: usize,
        /// Bytes available in the caller's buffer.
        available: usize,
    },
    /// The buffer passed to `unpack()` is shorter than the packet it claims
    /// to hold.
    #[error("truncated packet: expected {expected} bytes, have {available}")]
    Truncated {
        /// Bytes the header's packet-size field declares.
        expected: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// The packet-type code in the header is in the reserved range.
    #[error("unknown packet type code {0:#x}")]
    UnknownPacketType(u8),
    /// A CIF bit is set for a field this implementation does not recognize.
    /// This is a forward-compatibility signal, not necessarily a malformed
    /// packet.
    #[error("unrecognized field: CIF{cif} bit {bit}")]
    UnknownField {
        /// Which CIF word carried the bit (0, 1, 2, 3, or 7).
        cif: u8,
        /// Bit position within the word (31..0).
        bit: u8,
    },
    /// An accessor for a conditionally present prologue field was called
    /// while the header says the field is absent.
    #[error("prologue field not present: {0}")]
    MissingPrologueField(&'static str),
    /// A payload that must be a whole number of 32-bit words was given
    /// something else.
    #[error("payload must be a whole number of 32-bit words")]
    PayloadUneven32BitWords,
    /// A function that only operates on signal data packets was run on
    /// another packet type.
    #[error("function can only run on signal data packets")]
    SignalDataOnly,
    /// A function that only operates on context packets was run on another
    /// packet type.
    #[error("function can only run on context packets")]
    ContextOnly,
    /// A function that only operates on command packets was run on another
    /// packet type.
    #[error("function can only run on command packets")]
    CommandOnly,
    /// A function that only operates on control sub-payloads was run on
    /// something else.
    #[error("function can only run on control command packets")]
    ControlOnly,
    /// A function that only operates on cancellation sub-payloads was run on
    /// something else.
    #[error("function can only run on cancellation command packets")]
    CancellationOnly,
    /// A function that only operates on acknowledge sub-payloads was run on
    /// something else.
    #[error("function can only run on acknowledge command packets")]
    AckOnly,
    /// A function that only operates on query-acknowledge sub-payloads was
    /// run on something else.
    #[error("function can only run on query acknowledge command packets")]
    QueryAckOnly,
    /// A timestamp was set with a TSI/TSF mode that contradicts it.
    #[error("timestamp and TSI/TSF mode do not agree")]
    TimestampModeMismatch,
    /// A 32-bit controllee/controller ID was set while the 128-bit UUID
    /// form is in use (they are mutually exclusive), or vice versa.
    #[error("controllee/controller word ID and UUID are mutually exclusive")]
    IdFormatConflict,
    /// A reserved encoding was supplied.
    #[error("attempted to use a reserved encoding")]
    ReservedField,
    /// An async-channel tag list was supplied whose length differs from the
    /// async-channel list. The wire format stores one count for both.
    #[error("async-channel tag list length must match the channel list")]
    TagListLengthMismatch,
    /// A list exceeds the capacity of its on-wire size field.
    #[error("list too long for its on-wire size field")]
    ListTooLong,
    /// An error bubbled up from the deku (de)serialization layer.
    #[error(transparent)]
    Deku(#[from] deku::DekuError),
}
