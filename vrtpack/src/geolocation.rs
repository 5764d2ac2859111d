// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The formatted GPS/INS geolocation record (ANSI/VITA-49.2-2017 sections
9.4.5 and 9.4.6). The same 11-word layout backs both the formatted GPS
field (CIF0 bit 14) and the formatted INS field (CIF0 bit 13).

Every position subfield defaults to the `0x7FFF_FFFF` "unspecified"
sentinel, and the timestamps default to all-ones, so a freshly constructed
record says nothing until individual subfields are filled in.
*/

use deku::prelude::*;
use fixed::types::extra::{U16, U22, U5};
use fixed::FixedI32;
use std::fmt;

use crate::packet_header::{Tsf, Tsi};

/// Sentinel for an unspecified 32-bit geolocation subfield.
pub(crate) const UNSPECIFIED: i32 = 0x7FFF_FFFF;

/// Base geolocation data structure.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geolocation {
    word_1: u32,
    integer_timestamp: u32,
    fractional_timestamp: u64,
    latitude: i32,
    longitude: i32,
    altitude: i32,
    speed_over_ground: i32,
    heading_angle: i32,
    track_angle: i32,
    magnetic_variation: i32,
}

impl Default for Geolocation {
    fn default() -> Self {
        Geolocation {
            word_1: 0,
            integer_timestamp: u32::MAX,
            fractional_timestamp: u64::MAX,
            latitude: UNSPECIFIED,
            longitude: UNSPECIFIED,
            altitude: UNSPECIFIED,
            speed_over_ground: UNSPECIFIED,
            heading_angle: UNSPECIFIED,
            track_angle: UNSPECIFIED,
            magnetic_variation: UNSPECIFIED,
        }
    }
}

macro_rules! fixed_subfield {
    ($field:ident, $get:ident, $set:ident, $frac:ty, $get_doc:expr) => {
        #[doc = $get_doc]
        pub fn $get(&self) -> Option<f64> {
            if self.$field == UNSPECIFIED {
                None
            } else {
                Some(FixedI32::<$frac>::from_bits(self.$field).to_num())
            }
        }
        #[doc = concat!("Sets the ", stringify!($field), " subfield. `None` stores the \
                         unspecified sentinel.")]
        pub fn $set(&mut self, value: Option<f64>) {
            self.$field = match value {
                Some(v) => FixedI32::<$frac>::from_num(v).to_bits(),
                None => UNSPECIFIED,
            };
        }
    };
}

impl Geolocation {
    /// Size of the geolocation record in 32-bit words.
    pub fn size_words(&self) -> u16 {
        11
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

    /// Gets the GPS/INS manufacturer OUI.
    pub fn manufacturer_oui(&self) -> u32 {
        self.word_1 & 0xFF_FFFF
    }
    /// Sets the GPS/INS manufacturer OUI (least significant 24 bits used).
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
    /// Sets the integer-seconds timestamp along with its TSI mode. Passing
    /// `None` stores the all-ones sentinel and clears the mode.
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
    /// Passing `None` stores the all-ones sentinel and clears the mode.
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

    fixed_subfield!(
        latitude,
        latitude_deg,
        set_latitude_deg,
        U22,
        "Gets the latitude in degrees, range [-90, 90]."
    );
    fixed_subfield!(
        longitude,
        longitude_deg,
        set_longitude_deg,
        U22,
        "Gets the longitude in degrees, range [-180, 180]."
    );
    fixed_subfield!(
        altitude,
        altitude_m,
        set_altitude_m,
        U5,
        "Gets the altitude in meters."
    );
    // Observation 9.4.5-5 claims a 0..65636 m/s range for this subfield; a
    // 32-bit signed radix-16 number tops out at 32767 m/s. The bit layout
    // is implemented as written and values are stored unchecked.
    fixed_subfield!(
        speed_over_ground,
        speed_over_ground_mps,
        set_speed_over_ground_mps,
        U16,
        "Gets the speed over ground in meters per second."
    );
    fixed_subfield!(
        heading_angle,
        heading_angle_deg,
        set_heading_angle_deg,
        U22,
        "Gets the heading angle in degrees, range [0, 360)."
    );
    fixed_subfield!(
        track_angle,
        track_angle_deg,
        set_track_angle_deg,
        U22,
        "Gets the track angle in degrees, range [0, 360)."
    );
    fixed_subfield!(
        magnetic_variation,
        magnetic_variation_deg,
        set_magnetic_variation_deg,
        U22,
        "Gets the magnetic variation in degrees, range [-180, 180]."
    );
}

impl fmt::Display for Geolocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Geolocation:")?;
        writeln!(f, "  Manufacturer OUI: {:#x}", self.manufacturer_oui())?;
        writeln!(f, "  Latitude: {:?} deg", self.latitude_deg())?;
        writeln!(f, "  Longitude: {:?} deg", self.longitude_deg())?;
        writeln!(f, "  Altitude: {:?} m", self.altitude_m())?;
        writeln!(f, "  Speed over ground: {:?} m/s", self.speed_over_ground_mps())?;
        writeln!(f, "  Heading: {:?} deg", self.heading_angle_deg())?;
        writeln!(f, "  Track: {:?} deg", self.track_angle_deg())?;
        writeln!(f, "  Magnetic variation: {:?} deg", self.magnetic_variation_deg())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_unspecified() {
        let geo = Geolocation::default();
        assert_eq!(geo.latitude_deg(), None);
        assert_eq!(geo.integer_timestamp(), None);
        assert_eq!(geo.fractional_timestamp(), None);
        assert_eq!(geo.latitude, UNSPECIFIED);
        assert_eq!(geo.integer_timestamp, u32::MAX);
        assert_eq!(geo.fractional_timestamp, u64::MAX);
    }

    #[test]
    fn latitude_extremes() {
        let mut geo = Geolocation::default();
        geo.set_latitude_deg(Some(90.0));
        // 90 << 22
        assert_eq!(geo.latitude, 0x1680_0000);
        geo.set_latitude_deg(Some(-90.0));
        assert_eq!(geo.latitude as u32, 0xE980_0000);
        assert_relative_eq!(geo.latitude_deg().unwrap(), -90.0);
    }

    #[test]
    fn timestamp_modes() {
        let mut geo = Geolocation::default();
        geo.set_integer_timestamp(Some(1234), Tsi::Utc);
        geo.set_fractional_timestamp(Some(5678), Tsf::RealTimePs);
        assert_eq!(geo.tsi(), Tsi::Utc);
        assert_eq!(geo.tsf(), Tsf::RealTimePs);
        assert_eq!(geo.integer_timestamp(), Some(1234));
        assert_eq!(geo.fractional_timestamp(), Some(5678));
        geo.set_integer_timestamp(None, Tsi::None);
        assert_eq!(geo.integer_timestamp(), None);
        assert_eq!(geo.integer_timestamp, u32::MAX);
    }

    #[test]
    fn velocity_resolution() {
        let mut geo = Geolocation::default();
        geo.set_speed_over_ground_mps(Some(1.5));
        assert_eq!(geo.speed_over_ground, 0x1_8000);
        assert_relative_eq!(geo.speed_over_ground_mps().unwrap(), 1.5);
    }
}
