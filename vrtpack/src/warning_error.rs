// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The warning/error response field (ANSI/VITA-49.2-2017 section 8.4.1.2).

Every warning or error a controllee reports in an acknowledge packet uses
one of these words regardless of the underlying field's size: thirteen
fault classification flags in bits 31..19, the rest reserved.
*/

use deku::prelude::*;
use std::fmt;

/// Base warning/error response data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarningErrorFields(u32);

macro_rules! fault_flag {
    ($name:ident, $set:ident, $unset:ident, $bit:literal, $doc:expr) => {
        #[doc = $doc]
        pub fn $name(&self) -> bool {
            self.0 & (1 << $bit) != 0
        }
        #[doc = concat!("Sets the ", stringify!($name), " flag.")]
        pub fn $set(&mut self) {
            self.0 |= 1 << $bit;
        }
        #[doc = concat!("Clears the ", stringify!($name), " flag.")]
        pub fn $unset(&mut self) {
            self.0 &= !(1 << $bit);
        }
    };
}

#[rustfmt::skip]
impl WarningErrorFields {
    /// Size of the response field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    /// The raw 32-bit response word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    fault_flag!(field_not_executed, set_field_not_executed, unset_field_not_executed, 31,
        "The field was not executed because of a warning or error.");
    fault_flag!(device_failure, set_device_failure, unset_device_failure, 30,
        "The field was not executed properly due to a hardware failure.");
    fault_flag!(erroneous_field, set_erroneous_field, unset_erroneous_field, 29,
        "The field's setting was erroneous.");
    fault_flag!(parameter_out_of_range, set_parameter_out_of_range, unset_parameter_out_of_range, 28,
        "The requested parameter is outside the device's capability.");
    fault_flag!(parameter_unsupported_precision, set_parameter_unsupported_precision,
        unset_parameter_unsupported_precision, 27,
        "The requested parameter exceeds the supported precision.");
    fault_flag!(field_value_invalid, set_field_value_invalid, unset_field_value_invalid, 26,
        "The field value is invalid.");
    fault_flag!(timestamp_problem, set_timestamp_problem, unset_timestamp_problem, 25,
        "The requested timestamp could not be honored.");
    fault_flag!(hazardous_power_levels, set_hazardous_power_levels, unset_hazardous_power_levels, 24,
        "Executing the field would produce hazardous power levels.");
    fault_flag!(distortion, set_distortion, unset_distortion, 23,
        "Executing the field would cause signal distortion.");
    fault_flag!(in_band_power_compliance, set_in_band_power_compliance,
        unset_in_band_power_compliance, 22,
        "In-band spectral power compliance would be violated.");
    fault_flag!(out_of_band_power_compliance, set_out_of_band_power_compliance,
        unset_out_of_band_power_compliance, 21,
        "Out-of-band spectral power compliance would be violated.");
    fault_flag!(cosite_interference, set_cosite_interference, unset_cosite_interference, 20,
        "Co-site interference prevents proper execution.");
    fault_flag!(regional_interference, set_regional_interference, unset_regional_interference, 19,
        "Regional interference prevents proper execution.");
}

impl fmt::Display for WarningErrorFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Warning/error response: {:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_positions() {
        let mut resp = WarningErrorFields::default();
        resp.set_field_not_executed();
        resp.set_regional_interference();
        assert_eq!(resp.as_u32(), (1 << 31) | (1 << 19));
        assert!(resp.field_not_executed());
        assert!(resp.regional_interference());
        resp.unset_field_not_executed();
        assert!(!resp.field_not_executed());
        assert_eq!(resp.as_u32(), 1 << 19);
    }
}
