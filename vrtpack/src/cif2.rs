// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
CIF2, the identifier indicator word and its gated fields
(ANSI/VITA-49.2-2017 section 9.1). Present when CIF0 bit 2 is set.
Everything here is an identifier of one kind or another: stream bindings,
controllee/controller identities, platform and emitter classification.
*/

use core::fmt;

use deku::prelude::*;
use vrtpack_macros::{ack_field, cif_bit, cif_fields, cif_plain};

use crate::ack::AckLevel;
use crate::cif0::{Cif0, Cif0AckFields};
use crate::cif7::Cif7Opts;
use crate::warning_error::WarningErrorFields;

/// Base data structure for the CIF2 single-bit indicators.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cif2(u32);

impl Cif2 {
    cif_bit!(bind, 31);
    cif_bit!(cited_sid, 30);
    cif_bit!(sibling_sid, 29);
    cif_bit!(parent_sid, 28);
    cif_bit!(child_sid, 27);
    cif_bit!(cited_message_id, 26);
    cif_bit!(controllee_id, 25);
    cif_bit!(controllee_uuid, 24);
    cif_bit!(controller_id, 23);
    cif_bit!(controller_uuid, 22);
    cif_bit!(information_source_id, 21);
    cif_bit!(track_id, 20);
    cif_bit!(country_code, 19);
    cif_bit!(operator_id, 18);
    cif_bit!(platform_class, 17);
    cif_bit!(platform_instance, 16);
    cif_bit!(platform_display, 15);
    cif_bit!(ems_device_class, 14);
    cif_bit!(ems_device_type, 13);
    cif_bit!(ems_device_instance, 12);
    cif_bit!(modulation_class, 11);
    cif_bit!(modulation_type, 10);
    cif_bit!(function_id, 9);
    cif_bit!(mode_id, 8);
    cif_bit!(event_id, 7);
    cif_bit!(function_priority_id, 6);
    cif_bit!(comms_priority_id, 5);
    cif_bit!(rf_footprint, 4);
    cif_bit!(rf_footprint_range, 3);
    // Bits 2..0 are reserved

    /// Bits with a defined meaning in this implementation.
    pub(crate) const KNOWN_MASK: u32 = !0b111;

    /// The raw 32-bit indicator word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the whole CIF is empty.
    pub fn empty(&self) -> bool {
        self.0 == 0
    }
}

#[cif_fields(cif2)]
pub struct Cif2Fields {
    bind: u32,
    cited_sid: u32,
    sibling_sid: u32,
    parent_sid: u32,
    child_sid: u32,
    cited_message_id: u32,
    controllee_id: u32,
    controllee_uuid: u128,
    controller_id: u32,
    controller_uuid: u128,
    information_source_id: u32,
    track_id: u32,
    country_code: u32,
    operator_id: u32,
    platform_class: u32,
    platform_instance: u32,
    platform_display: u32,
    ems_device_class: u32,
    ems_device_type: u32,
    ems_device_instance: u32,
    modulation_class: u32,
    modulation_type: u32,
    function_id: u32,
    mode_id: u32,
    event_id: u32,
    function_priority_id: u32,
    comms_priority_id: u32,
    rf_footprint: u32,
    rf_footprint_range: u32,
}

#[cif_fields(cif2, optional)]
pub struct Cif2AckFields {
    bind: WarningErrorFields,
    cited_sid: WarningErrorFields,
    sibling_sid: WarningErrorFields,
    parent_sid: WarningErrorFields,
    child_sid: WarningErrorFields,
    cited_message_id: WarningErrorFields,
    controllee_id: WarningErrorFields,
    controllee_uuid: WarningErrorFields,
    controller_id: WarningErrorFields,
    controller_uuid: WarningErrorFields,
    information_source_id: WarningErrorFields,
    track_id: WarningErrorFields,
    country_code: WarningErrorFields,
    operator_id: WarningErrorFields,
    platform_class: WarningErrorFields,
    platform_instance: WarningErrorFields,
    platform_display: WarningErrorFields,
    ems_device_class: WarningErrorFields,
    ems_device_type: WarningErrorFields,
    ems_device_instance: WarningErrorFields,
    modulation_class: WarningErrorFields,
    modulation_type: WarningErrorFields,
    function_id: WarningErrorFields,
    mode_id: WarningErrorFields,
    event_id: WarningErrorFields,
    function_priority_id: WarningErrorFields,
    comms_priority_id: WarningErrorFields,
    rf_footprint: WarningErrorFields,
    rf_footprint_range: WarningErrorFields,
}

/// Typed accessors for the CIF2 fields, shared by context, control, and
/// query-acknowledge payloads.
#[rustfmt::skip]
pub trait Cif2Manipulators {
    /// Get a reference to the payload's CIF0 indicator word.
    fn cif0(&self) -> &Cif0;
    /// Get a mutable reference to the payload's CIF0 indicator word.
    fn cif0_mut(&mut self) -> &mut Cif0;
    /// Get a reference to the payload's CIF2 indicator word, if present.
    fn cif2(&self) -> Option<&Cif2>;
    /// Get a mutable reference to the payload's CIF2 indicator word.
    fn cif2_mut(&mut self) -> &mut Option<Cif2>;
    /// Get a reference to the payload's CIF2 data fields, if present.
    fn cif2_fields(&self) -> Option<&Cif2Fields>;
    /// Get a mutable reference to the payload's CIF2 data fields.
    fn cif2_fields_mut(&mut self) -> &mut Option<Cif2Fields>;

    cif_plain!(cif2, bind, bind, u32);
    cif_plain!(cif2, cited_sid, cited_sid, u32);
    cif_plain!(cif2, sibling_sid, sibling_sid, u32);
    cif_plain!(cif2, parent_sid, parent_sid, u32);
    cif_plain!(cif2, child_sid, child_sid, u32);
    cif_plain!(cif2, cited_message_id, cited_message_id, u32);
    cif_plain!(cif2, controllee_id, controllee_id, u32);
    cif_plain!(cif2, controllee_uuid, controllee_uuid, u128);
    cif_plain!(cif2, controller_id, controller_id, u32);
    cif_plain!(cif2, controller_uuid, controller_uuid, u128);
    cif_plain!(cif2, information_source_id, information_source_id, u32);
    cif_plain!(cif2, track_id, track_id, u32);
    cif_plain!(cif2, country_code, country_code, u32);
    cif_plain!(cif2, operator_id, operator_id, u32);
    cif_plain!(cif2, platform_class, platform_class, u32);
    cif_plain!(cif2, platform_instance, platform_instance, u32);
    cif_plain!(cif2, platform_display, platform_display, u32);
    cif_plain!(cif2, ems_device_class, ems_device_class, u32);
    cif_plain!(cif2, ems_device_type, ems_device_type, u32);
    cif_plain!(cif2, ems_device_instance, ems_device_instance, u32);
    cif_plain!(cif2, modulation_class, modulation_class, u32);
    cif_plain!(cif2, modulation_type, modulation_type, u32);
    cif_plain!(cif2, function_id, function_id, u32);
    cif_plain!(cif2, mode_id, mode_id, u32);
    cif_plain!(cif2, event_id, event_id, u32);
    cif_plain!(cif2, function_priority_id, function_priority_id, u32);
    cif_plain!(cif2, comms_priority_id, comms_priority_id, u32);
    cif_plain!(cif2, rf_footprint, rf_footprint, u32);
    cif_plain!(cif2, rf_footprint_range, rf_footprint_range, u32);
}

/// Warning/error response accessors for the CIF2 fields of an acknowledge
/// payload.
pub trait Cif2AckManipulators {
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
    fn wif2(&self) -> Option<&Cif2>;
    /// Get a mutable reference to the warning indicator word.
    fn wif2_mut(&mut self) -> &mut Option<Cif2>;
    /// Get a reference to the warning response fields, if present.
    fn wif2_fields(&self) -> Option<&Cif2AckFields>;
    /// Get a mutable reference to the warning response fields.
    fn wif2_fields_mut(&mut self) -> &mut Option<Cif2AckFields>;
    /// Get a reference to the error indicator word, if present.
    fn eif2(&self) -> Option<&Cif2>;
    /// Get a mutable reference to the error indicator word.
    fn eif2_mut(&mut self) -> &mut Option<Cif2>;
    /// Get a reference to the error response fields, if present.
    fn eif2_fields(&self) -> Option<&Cif2AckFields>;
    /// Get a mutable reference to the error response fields.
    fn eif2_fields_mut(&mut self) -> &mut Option<Cif2AckFields>;

    ack_field!(2, bind);
    ack_field!(2, cited_sid);
    ack_field!(2, sibling_sid);
    ack_field!(2, parent_sid);
    ack_field!(2, child_sid);
    ack_field!(2, cited_message_id);
    ack_field!(2, controllee_id);
    ack_field!(2, controllee_uuid);
    ack_field!(2, controller_id);
    ack_field!(2, controller_uuid);
    ack_field!(2, information_source_id);
    ack_field!(2, track_id);
    ack_field!(2, country_code);
    ack_field!(2, operator_id);
    ack_field!(2, platform_class);
    ack_field!(2, platform_instance);
    ack_field!(2, platform_display);
    ack_field!(2, ems_device_class);
    ack_field!(2, ems_device_type);
    ack_field!(2, ems_device_instance);
    ack_field!(2, modulation_class);
    ack_field!(2, modulation_type);
    ack_field!(2, function_id);
    ack_field!(2, mode_id);
    ack_field!(2, event_id);
    ack_field!(2, function_priority_id);
    ack_field!(2, comms_priority_id);
    ack_field!(2, rf_footprint);
    ack_field!(2, rf_footprint_range);
}

impl fmt::Display for Cif2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CIF2: {:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_bits_unknown() {
        assert_eq!(Cif2::KNOWN_MASK & 0b111, 0);
        assert_ne!(Cif2::KNOWN_MASK & (1 << 3), 0);
        assert_ne!(Cif2::KNOWN_MASK & (1 << 31), 0);
    }
}
