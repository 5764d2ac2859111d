// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Signal data payloads. The payload is an opaque run of 32-bit words whose
length comes from the header's packet size minus the prologue (and
trailer, when present); interpreting the samples is the caller's job,
guided by the payload format field of an associated context stream.
*/

use deku::prelude::*;

use crate::packet_header::PacketHeader;
use crate::VrtError;

/// Base signal data structure.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, packet_header: &PacketHeader"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalData {
    #[deku(count = "packet_header.payload_size_words()")]
    data: Vec<u32>,
}

impl SignalData {
    /// Creates a new, empty signal data payload.
    pub fn new() -> SignalData {
        SignalData::default()
    }

    /// Creates a signal data payload from raw bytes.
    ///
    /// # Errors
    /// The payload is stored as 32-bit words; a byte slice whose length is
    /// not a multiple of four is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<SignalData, VrtError> {
        let mut ret = SignalData::new();
        ret.set_payload(bytes)?;
        Ok(ret)
    }

    /// Gets the payload as a vector of bytes.
    pub fn payload(&self) -> Vec<u8> {
        self.data.iter().flat_map(|&w| w.to_be_bytes()).collect()
    }

    /// Sets the payload from raw bytes.
    ///
    /// # Errors
    /// The payload is stored as 32-bit words; a byte slice whose length is
    /// not a multiple of four is rejected.
    pub fn set_payload(&mut self, bytes: &[u8]) -> Result<(), VrtError> {
        self.data = bytes
            .chunks(4)
            .map(|chunk| {
                chunk
                    .try_into()
                    .map(u32::from_be_bytes)
                    .map_err(|_| VrtError::PayloadUneven32BitWords)
            })
            .collect::<Result<Vec<u32>, VrtError>>()?;
        Ok(())
    }

    /// Size of the payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        self.data.len() as u16
    }

    /// Size of the payload in bytes.
    pub fn payload_size_bytes(&self) -> usize {
        self.data.len() * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let data = SignalData::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(data.payload(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(data.size_words(), 2);
        assert_eq!(data.payload_size_bytes(), 8);
    }

    #[test]
    fn unaligned_payload_rejected() {
        assert!(matches!(
            SignalData::from_bytes(&[1, 2, 3]),
            Err(VrtError::PayloadUneven32BitWords)
        ));
    }
}
