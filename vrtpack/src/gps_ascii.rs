// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The GPS ASCII field (ANSI/VITA-49.2-2017 section 9.4.7): a manufacturer
OUI, a word count, and that many 32-bit words of opaque ASCII (typically
NMEA sentences), zero-padded up to the word boundary.
*/

use deku::prelude::*;

/// Base GPS ASCII data structure.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsAscii {
    w1: u32,
    num_words: u32,
    #[deku(count = "num_words")]
    ascii: Vec<u32>,
}

impl GpsAscii {
    /// Creates a GPS ASCII record from a manufacturer OUI and sentence text.
    pub fn new(manufacturer_oui: u32, sentence: &str) -> GpsAscii {
        let mut ret = GpsAscii::default();
        ret.set_manufacturer_oui(manufacturer_oui);
        ret.set_sentence(sentence);
        ret
    }

    /// Size of the GPS ASCII field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        2 + self.ascii.len() as u16
    }

    /// Gets the GPS manufacturer OUI.
    pub fn manufacturer_oui(&self) -> u32 {
        self.w1 & 0xFF_FFFF
    }
    /// Sets the GPS manufacturer OUI (least significant 24 bits used).
    pub fn set_manufacturer_oui(&mut self, oui: u32) {
        self.w1 = (self.w1 & !0xFF_FFFF) | (oui & 0xFF_FFFF);
    }

    /// Number of ASCII payload words declared by the record.
    pub fn num_words(&self) -> u32 {
        self.num_words
    }

    /// Gets the ASCII payload with trailing NUL padding stripped. Bytes
    /// outside the ASCII range survive as-is via lossy UTF-8 conversion.
    pub fn sentence(&self) -> String {
        let bytes: Vec<u8> = self.ascii.iter().flat_map(|w| w.to_be_bytes()).collect();
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    }

    /// Sets the ASCII payload, zero-padding the tail to a word boundary.
    pub fn set_sentence(&mut self, sentence: &str) {
        self.ascii = sentence
            .as_bytes()
            .chunks(4)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                u32::from_be_bytes(word)
            })
            .collect();
        self.num_words = self.ascii.len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_and_count() {
        let gps = GpsAscii::new(0x12_3456, "$GPGGA,123456");
        // 13 bytes round up to 4 words
        assert_eq!(gps.num_words(), 4);
        assert_eq!(gps.size_words(), 6);
        assert_eq!(gps.sentence(), "$GPGGA,123456");
        assert_eq!(gps.manufacturer_oui(), 0x12_3456);
    }

    #[test]
    fn empty_sentence() {
        let gps = GpsAscii::new(0, "");
        assert_eq!(gps.num_words(), 0);
        assert_eq!(gps.size_words(), 2);
        assert_eq!(gps.sentence(), "");
    }

    #[test]
    fn word_aligned_sentence_gets_no_padding() {
        let gps = GpsAscii::new(0, "ABCD");
        assert_eq!(gps.num_words(), 1);
        assert_eq!(gps.ascii, vec![u32::from_be_bytes(*b"ABCD")]);
    }
}
