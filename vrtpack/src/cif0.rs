// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
CIF0, the primary context indicator word and its gated fields
(ANSI/VITA-49.2-2017 section 9.1). Every bit corresponds to one typed
field record; fields are serialized in descending bit order, bit 31 first.
*/

use core::fmt;

use deku::prelude::*;
use fixed::types::extra::{U20, U6, U7};
use fixed::{FixedI16, FixedI64, FixedU64};
use vrtpack_macros::{ack_field, cif_bit, cif_fields, cif_fixed, cif_fixed_masked, cif_plain};

use crate::ack::AckLevel;
use crate::cif7::Cif7Opts;
use crate::context_assoc::ContextAssociationLists;
use crate::device_id::DeviceIdentifier;
use crate::ephemeris::Ephemeris;
use crate::geolocation::Geolocation;
use crate::gps_ascii::GpsAscii;
use crate::payload_format::PayloadFormat;
use crate::gain::Gain;
use crate::state_event::StateEventIndicators;
use crate::warning_error::WarningErrorFields;

/// Base data structure for the CIF0 single-bit indicators.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cif0(u32);

impl Cif0 {
    cif_bit!(change_indicator, 31);
    cif_bit!(reference_point_id, 30);
    cif_bit!(bandwidth, 29);
    cif_bit!(if_ref_freq, 28);
    cif_bit!(rf_ref_freq, 27);
    cif_bit!(rf_ref_freq_offset, 26);
    cif_bit!(if_band_offset, 25);
    cif_bit!(reference_level, 24);
    cif_bit!(gain, 23);
    cif_bit!(over_range_count, 22);
    cif_bit!(sample_rate, 21);
    cif_bit!(timestamp_adjustment, 20);
    cif_bit!(timestamp_cal_time, 19);
    cif_bit!(temperature, 18);
    cif_bit!(device_id, 17);
    cif_bit!(state_indicators, 16);
    cif_bit!(signal_data_payload_format, 15);
    cif_bit!(formatted_gps, 14);
    cif_bit!(formatted_ins, 13);
    cif_bit!(ecef_ephemeris, 12);
    cif_bit!(relative_ephemeris, 11);
    cif_bit!(ephemeris_ref_id, 10);
    cif_bit!(gps_ascii, 9);
    cif_bit!(context_association_lists, 8);
    cif_bit!(cif7_enabled, 7);
    // Bits 6..4 are reserved
    cif_bit!(cif3_enabled, 3);
    cif_bit!(cif2_enabled, 2);
    cif_bit!(cif1_enabled, 1);
    // Bit 0 is reserved

    /// Bits with a defined meaning in this implementation. Bits 6..4 and
    /// bit 0 are reserved by the standard.
    pub(crate) const KNOWN_MASK: u32 = !0b0111_0001;

    /// The raw 32-bit indicator word.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the whole CIF is empty.
    pub fn empty(&self) -> bool {
        self.0 == 0
    }
}

#[cif_fields(cif0)]
pub struct Cif0Fields {
    reference_point_id: u32,
    bandwidth: u64,
    if_ref_freq: i64,
    rf_ref_freq: u64,
    rf_ref_freq_offset: i64,
    if_band_offset: i64,
    reference_level: i32,
    gain: Gain,
    over_range_count: u32,
    sample_rate: u64,
    timestamp_adjustment: u64,
    timestamp_cal_time: u32,
    temperature: i32,
    device_id: DeviceIdentifier,
    state_indicators: StateEventIndicators,
    signal_data_payload_format: PayloadFormat,
    formatted_gps: Geolocation,
    formatted_ins: Geolocation,
    ecef_ephemeris: Ephemeris,
    relative_ephemeris: Ephemeris,
    ephemeris_ref_id: u32,
    gps_ascii: GpsAscii,
    context_association_lists: ContextAssociationLists,
}

#[cif_fields(cif0, optional)]
pub struct Cif0AckFields {
    reference_point_id: WarningErrorFields,
    bandwidth: WarningErrorFields,
    if_ref_freq: WarningErrorFields,
    rf_ref_freq: WarningErrorFields,
    rf_ref_freq_offset: WarningErrorFields,
    if_band_offset: WarningErrorFields,
    reference_level: WarningErrorFields,
    gain: WarningErrorFields,
    over_range_count: WarningErrorFields,
    sample_rate: WarningErrorFields,
    timestamp_adjustment: WarningErrorFields,
    timestamp_cal_time: WarningErrorFields,
    temperature: WarningErrorFields,
    device_id: WarningErrorFields,
    state_indicators: WarningErrorFields,
    signal_data_payload_format: WarningErrorFields,
    formatted_gps: WarningErrorFields,
    formatted_ins: WarningErrorFields,
    ecef_ephemeris: WarningErrorFields,
    relative_ephemeris: WarningErrorFields,
    ephemeris_ref_id: WarningErrorFields,
    gps_ascii: WarningErrorFields,
    context_association_lists: WarningErrorFields,
}

/// Typed accessors for the CIF0 fields, shared by context, control, and
/// query-acknowledge payloads.
#[rustfmt::skip]
pub trait Cif0Manipulators {
    /// Get a reference to the payload's CIF0 indicator word.
    fn cif0(&self) -> &Cif0;
    /// Get a mutable reference to the payload's CIF0 indicator word.
    fn cif0_mut(&mut self) -> &mut Cif0;
    /// Get a reference to the payload's CIF0 data fields.
    fn cif0_fields(&self) -> &Cif0Fields;
    /// Get a mutable reference to the payload's CIF0 data fields.
    fn cif0_fields_mut(&mut self) -> &mut Cif0Fields;

    cif_plain!(cif0, reference_point_id, reference_point_id, u32);
    cif_fixed!(cif0, bandwidth, bandwidth_hz, f64, FixedU64::<U20>);
    cif_fixed!(cif0, if_ref_freq, if_ref_freq_hz, f64, FixedI64::<U20>);
    cif_fixed!(cif0, rf_ref_freq, rf_ref_freq_hz, f64, FixedU64::<U20>);
    cif_fixed!(cif0, rf_ref_freq_offset, rf_ref_freq_offset_hz, f64, FixedI64::<U20>);
    cif_fixed!(cif0, if_band_offset, if_band_offset_hz, f64, FixedI64::<U20>);
    cif_fixed_masked!(cif0, reference_level, reference_level_dbm, f32, FixedI16::<U7>, i32, i16);
    cif_plain!(cif0, gain, gain, Gain);
    cif_plain!(cif0, over_range_count, over_range_count, u32);
    cif_fixed!(cif0, sample_rate, sample_rate_sps, f64, FixedU64::<U20>);
    cif_plain!(cif0, timestamp_adjustment, timestamp_adjustment_fs, u64);
    cif_plain!(cif0, timestamp_cal_time, timestamp_cal_time, u32);
    cif_fixed_masked!(cif0, temperature, temperature_c, f32, FixedI16::<U6>, i32, i16);
    cif_plain!(cif0, device_id, device_id, DeviceIdentifier);
    cif_plain!(cif0, state_indicators, state_indicators, StateEventIndicators);
    cif_plain!(cif0, signal_data_payload_format, signal_data_payload_format, PayloadFormat);
    cif_plain!(cif0, formatted_gps, formatted_gps, Geolocation);
    cif_plain!(cif0, formatted_ins, formatted_ins, Geolocation);
    cif_plain!(cif0, ecef_ephemeris, ecef_ephemeris, Ephemeris);
    cif_plain!(cif0, relative_ephemeris, relative_ephemeris, Ephemeris);
    cif_plain!(cif0, ephemeris_ref_id, ephemeris_ref_id, u32);
    cif_plain!(cif0, gps_ascii, gps_ascii, GpsAscii);
    cif_plain!(cif0, context_association_lists, context_association_lists, ContextAssociationLists);
}

/// Warning/error response accessors for the CIF0 fields of an acknowledge
/// payload.
pub trait Cif0AckManipulators {
    /// Get a reference to the warning indicator word, if present.
    fn wif0(&self) -> Option<&Cif0>;
    /// Get a mutable reference to the warning indicator word.
    fn wif0_mut(&mut self) -> &mut Option<Cif0>;
    /// Get a reference to the warning response fields, if present.
    fn wif0_fields(&self) -> Option<&Cif0AckFields>;
    /// Get a mutable reference to the warning response fields.
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields>;

    /// Get a reference to the error indicator word, if present.
    fn eif0(&self) -> Option<&Cif0>;
    /// Get a mutable reference to the error indicator word.
    fn eif0_mut(&mut self) -> &mut Option<Cif0>;
    /// Get a reference to the error response fields, if present.
    fn eif0_fields(&self) -> Option<&Cif0AckFields>;
    /// Get a mutable reference to the error response fields.
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields>;

    ack_field!(0, reference_point_id);
    ack_field!(0, bandwidth);
    ack_field!(0, if_ref_freq);
    ack_field!(0, rf_ref_freq);
    ack_field!(0, rf_ref_freq_offset);
    ack_field!(0, if_band_offset);
    ack_field!(0, reference_level);
    ack_field!(0, gain);
    ack_field!(0, over_range_count);
    ack_field!(0, sample_rate);
    ack_field!(0, timestamp_adjustment);
    ack_field!(0, timestamp_cal_time);
    ack_field!(0, temperature);
    ack_field!(0, device_id);
    ack_field!(0, state_indicators);
    ack_field!(0, signal_data_payload_format);
    ack_field!(0, formatted_gps);
    ack_field!(0, formatted_ins);
    ack_field!(0, ecef_ephemeris);
    ack_field!(0, relative_ephemeris);
    ack_field!(0, ephemeris_ref_id);
    ack_field!(0, gps_ascii);
    ack_field!(0, context_association_lists);
}

impl fmt::Display for Cif0 {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CIF0:")?;
        writeln!(f, "  Context field change indicator: {}", self.change_indicator())?;
        writeln!(f, "  Reference point identifier: {}", self.reference_point_id())?;
        writeln!(f, "  Bandwidth: {}", self.bandwidth())?;
        writeln!(f, "  IF reference frequency: {}", self.if_ref_freq())?;
        writeln!(f, "  RF reference frequency: {}", self.rf_ref_freq())?;
        writeln!(f, "  RF reference frequency offset: {}", self.rf_ref_freq_offset())?;
        writeln!(f, "  IF band offset: {}", self.if_band_offset())?;
        writeln!(f, "  Reference level: {}", self.reference_level())?;
        writeln!(f, "  Gain: {}", self.gain())?;
        writeln!(f, "  Over-range count: {}", self.over_range_count())?;
        writeln!(f, "  Sample rate: {}", self.sample_rate())?;
        writeln!(f, "  Timestamp adjustment: {}", self.timestamp_adjustment())?;
        writeln!(f, "  Timestamp calibration time: {}", self.timestamp_cal_time())?;
        writeln!(f, "  Temperature: {}", self.temperature())?;
        writeln!(f, "  Device identifier: {}", self.device_id())?;
        writeln!(f, "  State/event indicators: {}", self.state_indicators())?;
        writeln!(f, "  Signal data payload format: {}", self.signal_data_payload_format())?;
        writeln!(f, "  Formatted GPS: {}", self.formatted_gps())?;
        writeln!(f, "  Formatted INS: {}", self.formatted_ins())?;
        writeln!(f, "  ECEF ephemeris: {}", self.ecef_ephemeris())?;
        writeln!(f, "  Relative ephemeris: {}", self.relative_ephemeris())?;
        writeln!(f, "  Ephemeris reference ID: {}", self.ephemeris_ref_id())?;
        writeln!(f, "  GPS ASCII: {}", self.gps_ascii())?;
        writeln!(f, "  Context association lists: {}", self.context_association_lists())?;
        writeln!(f, "  CIF7: {}", self.cif7_enabled())?;
        writeln!(f, "  CIF3: {}", self.cif3_enabled())?;
        writeln!(f, "  CIF2: {}", self.cif2_enabled())?;
        writeln!(f, "  CIF1: {}", self.cif1_enabled())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions() {
        let mut cif0 = Cif0::default();
        cif0.set_change_indicator();
        assert_eq!(cif0.as_u32(), 0x8000_0000);
        cif0.unset_change_indicator();
        cif0.set_bandwidth();
        assert_eq!(cif0.as_u32(), 0x2000_0000);
        cif0.set_cif1_enabled();
        assert_eq!(cif0.as_u32(), 0x2000_0002);
        assert!(cif0.bandwidth());
        assert!(cif0.cif1_enabled());
        assert!(!cif0.gain());
    }

    #[test]
    fn reserved_bits_are_unknown() {
        assert_eq!(Cif0::KNOWN_MASK, 0xFFFF_FF8E);
        assert_eq!(!Cif0::KNOWN_MASK & (1 << 7), 0);
        assert_ne!(!Cif0::KNOWN_MASK & (1 << 6), 0);
        assert_ne!(!Cif0::KNOWN_MASK & 1, 0);
    }
}
