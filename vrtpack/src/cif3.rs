// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
CIF3, the temporal and environmental indicator word and its gated fields
(ANSI/VITA-49.2-2017 section 9.1). Present when CIF0 bit 3 is set.

The age and shelf-life fields (bits 17 and 16) take their width from the
packet's TSF mode rather than a fixed layout, and this implementation
does not carry them; parsing a packet with either bit set fails with an
unknown-field error.
*/

use core::fmt;

use deku::prelude::*;
use fixed::types::extra::U6;
use fixed::FixedI16;
use vrtpack_macros::{ack_field, cif_bit, cif_fields, cif_fixed_masked, cif_plain};

use crate::ack::AckLevel;
use crate::cif0::{Cif0, Cif0AckFields};
use crate::cif7::Cif7Opts;
use crate::warning_error::WarningErrorFields;

/// Base data structure for the CIF3 single-bit indicators.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cif3(u32);

impl Cif3 {
    cif_bit!(timestamp_details, 31);
    cif_bit!(timestamp_skew, 30);
    // Bits 29..28 are reserved
    cif_bit!(rise_time, 27);
    cif_bit!(fall_time, 26);
    cif_bit!(offset_time, 25);
    cif_bit!(pulse_width, 24);
    cif_bit!(period, 23);
    cif_bit!(duration, 22);
    cif_bit!(dwell, 21);
    cif_bit!(jitter, 20);
    // Bits 19..18 are reserved
    cif_bit!(age, 17);
    cif_bit!(shelf_life, 16);
    // Bits 15..8 are reserved
    cif_bit!(air_temperature, 7);
    cif_bit!(sea_ground_temperature, 6);
    cif_bit!(humidity, 5);
    cif_bit!(barometric_pressure, 4);
    cif_bit!(sea_swell_state, 3);
    cif_bit!(tropospheric_state, 2);
    cif_bit!(network_id, 1);
    // Bit 0 is reserved

    /// Bits this implementation can parse a record for. Excludes the
    /// reserved bits plus age and shelf life.
    pub(crate) const KNOWN_MASK: u32 = {
        let reserved = (0b11 << 28) | (0b11 << 18) | (0xFF << 8) | 1;
        let unsupported = (1 << 17) | (1 << 16);
        !(reserved | unsupported)
    };

    /// The raw 32-bit indicator word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the whole CIF is empty.
    pub fn empty(&self) -> bool {
        self.0 == 0
    }
}

#[cif_fields(cif3)]
pub struct Cif3Fields {
    timestamp_details: u64,
    timestamp_skew: i64,
    rise_time: i64,
    fall_time: i64,
    offset_time: i64,
    pulse_width: i64,
    period: i64,
    duration: i64,
    dwell: i64,
    jitter: i64,
    air_temperature: i32,
    sea_ground_temperature: i32,
    humidity: u32,
    barometric_pressure: u32,
    sea_swell_state: u32,
    tropospheric_state: u32,
    network_id: u32,
}

#[cif_fields(cif3, optional)]
pub struct Cif3AckFields {
    timestamp_details: WarningErrorFields,
    timestamp_skew: WarningErrorFields,
    rise_time: WarningErrorFields,
    fall_time: WarningErrorFields,
    offset_time: WarningErrorFields,
    pulse_width: WarningErrorFields,
    period: WarningErrorFields,
    duration: WarningErrorFields,
    dwell: WarningErrorFields,
    jitter: WarningErrorFields,
    air_temperature: WarningErrorFields,
    sea_ground_temperature: WarningErrorFields,
    humidity: WarningErrorFields,
    barometric_pressure: WarningErrorFields,
    sea_swell_state: WarningErrorFields,
    tropospheric_state: WarningErrorFields,
    network_id: WarningErrorFields,
}

/// Typed accessors for the CIF3 fields, shared by context, control, and
/// query-acknowledge payloads. The pulse/interval times are picosecond
/// counts; the environmental temperatures are Q10.6 degrees Celsius.
#[rustfmt::skip]
pub trait Cif3Manipulators {
    /// Get a reference to the payload's CIF0 indicator word.
    fn cif0(&self) -> &Cif0;
    /// Get a mutable reference to the payload's CIF0 indicator word.
    fn cif0_mut(&mut self) -> &mut Cif0;
    /// Get a reference to the payload's CIF3 indicator word, if present.
    fn cif3(&self) -> Option<&Cif3>;
    /// Get a mutable reference to the payload's CIF3 indicator word.
    fn cif3_mut(&mut self) -> &mut Option<Cif3>;
    /// Get a reference to the payload's CIF3 data fields, if present.
    fn cif3_fields(&self) -> Option<&Cif3Fields>;
    /// Get a mutable reference to the payload's CIF3 data fields.
    fn cif3_fields_mut(&mut self) -> &mut Option<Cif3Fields>;

    cif_plain!(cif3, timestamp_details, timestamp_details, u64);
    cif_plain!(cif3, timestamp_skew, timestamp_skew_ps, i64);
    cif_plain!(cif3, rise_time, rise_time_ps, i64);
    cif_plain!(cif3, fall_time, fall_time_ps, i64);
    cif_plain!(cif3, offset_time, offset_time_ps, i64);
    cif_plain!(cif3, pulse_width, pulse_width_ps, i64);
    cif_plain!(cif3, period, period_ps, i64);
    cif_plain!(cif3, duration, duration_ps, i64);
    cif_plain!(cif3, dwell, dwell_ps, i64);
    cif_plain!(cif3, jitter, jitter_ps, i64);
    cif_fixed_masked!(cif3, air_temperature, air_temperature_c, f32, FixedI16::<U6>, i32, i16);
    cif_fixed_masked!(cif3, sea_ground_temperature, sea_ground_temperature_c, f32, FixedI16::<U6>, i32, i16);
    cif_plain!(cif3, humidity, humidity, u32);
    cif_plain!(cif3, barometric_pressure, barometric_pressure, u32);
    cif_plain!(cif3, sea_swell_state, sea_swell_state, u32);
    cif_plain!(cif3, tropospheric_state, tropospheric_state, u32);
    cif_plain!(cif3, network_id, network_id, u32);
}

/// Warning/error response accessors for the CIF3 fields of an acknowledge
/// payload.
pub trait Cif3AckManipulators {
    /// Get a reference to the level-0 warning indicator word, if present.
    fn wif0(&self) -> Option<&Cif0>;
    /// Get a mutable reference to the level-0 warning indicator word.
    fn wif0_mut(&mut self) -> &mut Option<Cif0>;
    /// Get a reference to the level-0 warning response fields, if present.
    fn wif0_fields(&self) -> Option<&Cif0AckFields>;
    /// Get a mutable reference to the level-0 warning response fields.
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields>;
    /// Get a reference to the level-0 error indicator word, if present.
    fn eif0(&self) -> Option<&Cif0>;
    /// Get a mutable reference to the level-0 error indicator word.
    fn eif0_mut(&mut self) -> &mut Option<Cif0>;
    /// Get a reference to the level-0 error response fields, if present.
    fn eif0_fields(&self) -> Option<&Cif0AckFields>;
    /// Get a mutable reference to the level-0 error response fields.
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields>;
    /// Get a reference to the warning indicator word, if present.
    fn wif3(&self) -> Option<&Cif3>;
    /// Get a mutable reference to the warning indicator word.
    fn wif3_mut(&mut self) -> &mut Option<Cif3>;
    /// Get a reference to the warning response fields, if present.
    fn wif3_fields(&self) -> Option<&Cif3AckFields>;
    /// Get a mutable reference to the warning response fields.
    fn wif3_fields_mut(&mut self) -> &mut Option<Cif3AckFields>;
    /// Get a reference to the error indicator word, if present.
    fn eif3(&self) -> Option<&Cif3>;
    /// Get a mutable reference to the error indicator word.
    fn eif3_mut(&mut self) -> &mut Option<Cif3>;
    /// Get a reference to the error response fields, if present.
    fn eif3_fields(&self) -> Option<&Cif3AckFields>;
    /// Get a mutable reference to the error response fields.
    fn eif3_fields_mut(&mut self) -> &mut Option<Cif3AckFields>;

    ack_field!(3, timestamp_details);
    ack_field!(3, timestamp_skew);
    ack_field!(3, rise_time);
    ack_field!(3, fall_time);
    ack_field!(3, offset_time);
    ack_field!(3, pulse_width);
    ack_field!(3, period);
    ack_field!(3, duration);
    ack_field!(3, dwell);
    ack_field!(3, jitter);
    ack_field!(3, air_temperature);
    ack_field!(3, sea_ground_temperature);
    ack_field!(3, humidity);
    ack_field!(3, barometric_pressure);
    ack_field!(3, sea_swell_state);
    ack_field!(3, tropospheric_state);
    ack_field!(3, network_id);
}

impl fmt::Display for Cif3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CIF3: {:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_bits_excluded_from_known_mask() {
        for bit in [29u32, 28, 17, 16, 0] {
            assert_eq!(Cif3::KNOWN_MASK & (1 << bit), 0, "bit {bit}");
        }
        for bit in [31u32, 27, 7, 1] {
            assert_ne!(Cif3::KNOWN_MASK & (1 << bit), 0, "bit {bit}");
        }
    }
}
