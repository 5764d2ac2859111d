// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
CIF7, the field attributes indicator word (ANSI/VITA-49.2-2017 section
9.12), plus the belief and probability attachment records.

CIF7 does not gate fields of its own. Each set bit asks for a statistical
attribute — mean, median, maximum, belief, and so on — to be attached to
*every* field enabled in the other CIFs. When the `current` bit is set the
ordinary field value is included; every other set bit appends one more
value of the same field type immediately after it.

With the `cif7` feature enabled, each CIF field gains a companion
`*_attributes` vector holding those extra values in descending CIF7 bit
order. Correlating vector entries with attribute kinds is left to the
caller; this crate does none of the statistics itself.
*/

use deku::prelude::*;
use vrtpack_macros::cif_bit;

/// Base data structure for the CIF7 attribute indicators.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cif7(u32);

impl Cif7 {
    cif_bit!(current, 31);
    cif_bit!(mean, 30);
    cif_bit!(median, 29);
    cif_bit!(std_dev, 28);
    cif_bit!(max, 27);
    cif_bit!(min, 26);
    cif_bit!(precision, 25);
    cif_bit!(accuracy, 24);
    cif_bit!(first_derivative, 23);
    cif_bit!(second_derivative, 22);
    cif_bit!(third_derivative, 21);
    cif_bit!(probability, 20);
    cif_bit!(belief, 19);
    // Bits 18..0 are reserved

    /// Bits this implementation recognizes; anything else set in a parsed
    /// CIF7 word is reported as an unknown field.
    pub(crate) const KNOWN_MASK: u32 = 0xFFFF_E000;

    /// The raw 32-bit indicator word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the whole CIF is empty.
    pub fn empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of set attribute bits. Used to size the per-field attribute
    /// vectors while parsing.
    pub fn num_set(&self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Parse-time summary of a packet's CIF7 state, threaded through the
/// data-field structs as deku context.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Cif7Opts {
    /// Whether the primary field value is present. True when CIF7 is
    /// absent, or present with the `current` bit set.
    pub(crate) current_val: bool,
    /// How many extra attribute values follow each enabled field.
    pub(crate) num_extra_attrs: usize,
}

impl Cif7Opts {
    pub(crate) fn from(cif7: Option<&Cif7>) -> Cif7Opts {
        match cif7 {
            Some(c) => Cif7Opts {
                current_val: c.current(),
                num_extra_attrs: c.num_set().saturating_sub(1),
            },
            None => Cif7Opts {
                current_val: true,
                num_extra_attrs: 0,
            },
        }
    }
}

/// The belief attachment record: how much the producer believes the field
/// value, as a percentage in bits 7..0 where 255 means 100%.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Belief(u32);

impl Belief {
    /// Size of the belief record in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    /// Gets the belief percent subfield (0..=255, denoting N/255 of full
    /// scale).
    pub fn belief_percent(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
    /// Sets the belief percent subfield.
    pub fn set_belief_percent(&mut self, percent: u8) {
        self.0 = (self.0 & !0xFF) | percent as u32;
    }
}

/// The probability attachment record: a distribution function selector in
/// bits 15..8 (0 = uniform, 1 = normal, 2..=255 user defined) and a
/// percent in bits 7..0.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probability(u32);

impl Probability {
    /// Size of the probability record in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    /// Gets the probability function selector.
    pub fn probability_function(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }
    /// Sets the probability function selector.
    pub fn set_probability_function(&mut self, function: u8) {
        self.0 = (self.0 & !(0xFF << 8)) | ((function as u32) << 8);
    }

    /// Gets the probability percent subfield (N denoting N/255 of full
    /// scale).
    pub fn probability_percent(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
    /// Sets the probability percent subfield.
    pub fn set_probability_percent(&mut self, percent: u8) {
        self.0 = (self.0 & !0xFF) | percent as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_counting() {
        let mut cif7 = Cif7::default();
        assert_eq!(Cif7Opts::from(None).current_val, true);
        cif7.set_current();
        cif7.set_mean();
        cif7.set_max();
        let opts = Cif7Opts::from(Some(&cif7));
        assert!(opts.current_val);
        assert_eq!(opts.num_extra_attrs, 2);
    }

    #[test]
    fn belief_probability_subfields() {
        let mut belief = Belief::default();
        belief.set_belief_percent(255);
        assert_eq!(belief.belief_percent(), 255);
        assert_eq!(belief.0, 0xFF);

        let mut prob = Probability::default();
        prob.set_probability_function(1);
        prob.set_probability_percent(128);
        assert_eq!(prob.0, 0x0000_0180);
        assert_eq!(prob.probability_function(), 1);
        assert_eq!(prob.probability_percent(), 128);
    }
}
