// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The threshold field (ANSI/VITA-49.2-2017 section 9.5.13): two signed
Q9.7 dB values, stage 2 in the high half-word and stage 1 in the low.
*/

use deku::prelude::*;
use fixed::{types::extra::U7, FixedI16};
use std::fmt;

/// Base threshold data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold(i32);

impl Threshold {
    /// Create a new `Threshold` from stage 1 and stage 2 values in dB.
    pub fn new(stage_1_db: f32, stage_2_db: f32) -> Threshold {
        let s1 = FixedI16::<U7>::from_num(stage_1_db).to_bits() as u16;
        let s2 = FixedI16::<U7>::from_num(stage_2_db).to_bits() as u16;
        Threshold((((s2 as u32) << 16) | s1 as u32) as i32)
    }

    /// Size of the threshold field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    /// Gets the stage 1 threshold (dB).
    pub fn stage_1_db(&self) -> f32 {
        FixedI16::<U7>::from_bits(self.0 as i16).to_num()
    }
    /// Sets the stage 1 threshold (dB).
    pub fn set_stage_1_db(&mut self, threshold_db: f32) {
        let s1 = FixedI16::<U7>::from_num(threshold_db).to_bits() as u16;
        self.0 = (self.0 & !0xFFFF) | s1 as i32;
    }

    /// Gets the stage 2 threshold (dB).
    pub fn stage_2_db(&self) -> f32 {
        FixedI16::<U7>::from_bits(((self.0 >> 16) & 0xFFFF) as i16).to_num()
    }
    /// Sets the stage 2 threshold (dB).
    pub fn set_stage_2_db(&mut self, threshold_db: f32) {
        let s2 = FixedI16::<U7>::from_num(threshold_db).to_bits() as u16;
        self.0 = ((self.0 as u32 & 0x0000_FFFF) | ((s2 as u32) << 16)) as i32;
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "Stage 1: {} dB, Stage 2: {} dB",
            self.stage_1_db(),
            self.stage_2_db()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stages_round_trip() {
        let mut threshold = Threshold::new(25.2, 0.25);
        assert_relative_eq!(threshold.stage_1_db(), 25.2, max_relative = 0.01);
        assert_relative_eq!(threshold.stage_2_db(), 0.25, max_relative = 0.01);
        threshold.set_stage_2_db(-11.5);
        assert_relative_eq!(threshold.stage_1_db(), 25.2, max_relative = 0.01);
        assert_relative_eq!(threshold.stage_2_db(), -11.5, max_relative = 0.01);
    }
}
