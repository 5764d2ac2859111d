// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The ephemeris record (ANSI/VITA-49.2-2017 sections 9.4.3 and 9.4.9). The
same 13-word layout backs both the ECEF ephemeris field (CIF0 bit 12) and
the relative ephemeris field (CIF0 bit 11); only the reference frame
differs.

Like [`Geolocation`](crate::Geolocation), all position subfields default
to the `0x7FFF_FFFF` sentinel and the timestamps to all-ones.
*/

use deku::prelude::*;
use fixed::types::extra::{U16, U22, U5};
use fixed::FixedI32;
use std::fmt;

use crate::geolocation::UNSPECIFIED;
use crate::packet_header::{Tsf, Tsi};

/// Base ephemeris data structure.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ephemeris {
    word_1: u32,
    integer_timestamp: u32,
    fractional_timestamp: u64,
    position_x: i32,
    position_y: i32,
    position_z: i32,
    attitude_alpha: i32,
    attitude_beta: i32,
    attitude_phi: i32,
    velocity_dx: i32,
    velocity_dy: i32,
    velocity_dz: i32,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Ephemeris {
            word_1: 0,
            integer_timestamp: u32::MAX,
            fractional_timestamp: u64::MAX,
            position_x: UNSPECIFIED,
            position_y: UNSPECIFIED,
            position_z: UNSPECIFIED,
            attitude_alpha: UNSPECIFIED,
            attitude_beta: UNSPECIFIED,
            attitude_phi: UNSPECIFIED,
            velocity_dx: UNSPECIFIED,
            velocity_dy: UNSPECIFIED,
            velocity_dz: UNSPECIFIED,
        }
    }
}

macro_rules! fixed_subfield {
    ($field:ident, $get:ident, $set:ident, $frac:ty, $unit:literal) => {
        #[doc = concat!("Gets the ", stringify!($field), " subfield in ", $unit,
                        ", or `None` if unspecified.")]
        pub fn $get(&self) -> Option<f64> {
            if self.$field == UNSPECIFIED {
                None
            } else {
                Some(FixedI32::<$frac>::from_bits(self.$field).to_num())
            }
        }
        #[doc = concat!("Sets the ", stringify!($field), " subfield in ", $unit,
                        ". `None` stores the unspecified sentinel.")]
        pub fn $set(&mut self, value: Option<f64>) {
            self.$field = match value {
                Some(v) => FixedI32::<$frac>::from_num(v).to_bits(),
                None => UNSPECIFIED,
            };
        }
    };
}

impl Ephemeris {
    /// Size of the ephemeris record in 32-bit words.
    pub fn size_words(&self) -> u16 {
        13
    }

    /// Gets the TSI mode of the record's own timestamp.
    pub fn tsi(&self) -> Tsi {
        (((self.word_1 >> 26) & 0b11) as u8)
            .try_into()
            .expect("2-bit codes always decode")
    }
    /// Gets the TSF mode of the record's own timestamp.
    pub fn tsf(&self) -> Tsf {
        (((self.word_1 >> 24) & 0b11) as u8)
            .try_into()
            .expect("2-bit codes always decode")
    }

    /// Gets the ephemeris producer's OUI.
    pub fn manufacturer_oui(&self) -> u32 {
        self.word_1 & 0xFF_FFFF
    }
    /// Sets the ephemeris producer's OUI (least significant 24 bits used).
    pub fn set_manufacturer_oui(&mut self, oui: u32) {
        self.word_1 = (self.word_1 & !0xFF_FFFF) | (oui & 0xFF_FFFF);
    }

    /// Gets the integer-seconds timestamp, or `None` when TSI is null.
    pub fn integer_timestamp(&self) -> Option<u32> {
        if self.tsi() == Tsi::None {
            None
        } else {
            Some(self.integer_timestamp)
        }
    }
    /// Sets the integer-seconds timestamp along with its TSI mode.
    pub fn set_integer_timestamp(&mut self, timestamp: Option<u32>, tsi: Tsi) {
        self.word_1 &= !(0b11 << 26);
        match timestamp {
            Some(ts) => {
                self.word_1 |= ((tsi as u32) & 0b11) << 26;
                self.integer_timestamp = ts;
            }
            None => self.integer_timestamp = u32::MAX,
        }
    }

    /// Gets the fractional-seconds timestamp, or `None` when TSF is null.
    pub fn fractional_timestamp(&self) -> Option<u64> {
        if self.tsf() == Tsf::None {
            None
        } else {
            Some(self.fractional_timestamp)
        }
    }
    /// Sets the fractional-seconds timestamp along with its TSF mode.
    pub fn set_fractional_timestamp(&mut self, timestamp: Option<u64>, tsf: Tsf) {
        self.word_1 &= !(0b11 << 24);
        match timestamp {
            Some(ts) => {
                self.word_1 |= ((tsf as u32) & 0b11) << 24;
                self.fractional_timestamp = ts;
            }
            None => self.fractional_timestamp = u64::MAX,
        }
    }

    fixed_subfield!(position_x, position_x_m, set_position_x_m, U5, "meters");
    fixed_subfield!(position_y, position_y_m, set_position_y_m, U5, "meters");
    fixed_subfield!(position_z, position_z_m, set_position_z_m, U5, "meters");
    fixed_subfield!(attitude_alpha, attitude_alpha_deg, set_attitude_alpha_deg, U22, "degrees");
    fixed_subfield!(attitude_beta, attitude_beta_deg, set_attitude_beta_deg, U22, "degrees");
    fixed_subfield!(attitude_phi, attitude_phi_deg, set_attitude_phi_deg, U22, "degrees");
    fixed_subfield!(velocity_dx, velocity_dx_mps, set_velocity_dx_mps, U16, "meters per second");
    fixed_subfield!(velocity_dy, velocity_dy_mps, set_velocity_dy_mps, U16, "meters per second");
    fixed_subfield!(velocity_dz, velocity_dz_mps, set_velocity_dz_mps, U16, "meters per second");
}

impl fmt::Display for Ephemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ephemeris:")?;
        writeln!(
            f,
            "  Position: ({:?}, {:?}, {:?}) m",
            self.position_x_m(),
            self.position_y_m(),
            self.position_z_m()
        )?;
        writeln!(
            f,
            "  Attitude: ({:?}, {:?}, {:?}) deg",
            self.attitude_alpha_deg(),
            self.attitude_beta_deg(),
            self.attitude_phi_deg()
        )?;
        writeln!(
            f,
            "  Velocity: ({:?}, {:?}, {:?}) m/s",
            self.velocity_dx_mps(),
            self.velocity_dy_mps(),
            self.velocity_dz_mps()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_unspecified() {
        let eph = Ephemeris::default();
        assert_eq!(eph.position_x_m(), None);
        assert_eq!(eph.velocity_dz_mps(), None);
        assert_eq!(eph.position_x, UNSPECIFIED);
    }

    #[test]
    fn position_resolution() {
        let mut eph = Ephemeris::default();
        // 1 m at radix 5 is 0x20
        eph.set_position_x_m(Some(1.0));
        assert_eq!(eph.position_x, 0x20);
        eph.set_position_y_m(Some(-1.0));
        assert_eq!(eph.position_y, -0x20);
        assert_relative_eq!(eph.position_y_m().unwrap(), -1.0);
    }

    #[test]
    fn attitude_uses_angle_radix() {
        let mut eph = Ephemeris::default();
        eph.set_attitude_alpha_deg(Some(45.0));
        assert_eq!(eph.attitude_alpha, 45 << 22);
    }
}
