// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
CIF1, spatial and signal quality indicator word and its gated fields
(ANSI/VITA-49.2-2017 section 9.1). Present when CIF0 bit 1 is set.

Four of the standard's CIF1 fields (the pointing vector structure, array
of CIFs, sector scan/step, and index list) have variable layouts this
implementation does not carry; parsing a packet with one of those bits set
fails with an unknown-field error.
*/

use core::fmt;

use deku::prelude::*;
use fixed::types::extra::{U20, U7};
use fixed::{FixedI16, FixedU64};
use vrtpack_macros::{ack_field, cif_bit, cif_fields, cif_fixed, cif_fixed_masked, cif_plain};

use crate::ack::AckLevel;
use crate::cif0::{Cif0, Cif0AckFields};
use crate::cif7::Cif7Opts;
use crate::gain::Gain;
use crate::spectrum::Spectrum;
use crate::threshold::Threshold;
use crate::warning_error::WarningErrorFields;

/// Base data structure for the CIF1 single-bit indicators.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cif1(u32);

impl Cif1 {
    cif_bit!(phase_offset, 31);
    cif_bit!(polarization, 30);
    cif_bit!(pointing_vector, 29);
    cif_bit!(pointing_vector_structure, 28);
    cif_bit!(spatial_scan_type, 27);
    cif_bit!(spatial_reference_type, 26);
    cif_bit!(beam_widths, 25);
    cif_bit!(range, 24);
    // Bits 23..21 are reserved
    cif_bit!(ebno_ber, 20);
    cif_bit!(threshold, 19);
    cif_bit!(compression_point, 18);
    cif_bit!(intercept_points, 17);
    cif_bit!(snr_noise_figure, 16);
    cif_bit!(aux_frequency, 15);
    cif_bit!(aux_gain, 14);
    cif_bit!(aux_bandwidth, 13);
    // Bit 12 is reserved
    cif_bit!(array_of_cifs, 11);
    cif_bit!(spectrum, 10);
    cif_bit!(sector_step_scan, 9);
    // Bit 8 is reserved
    cif_bit!(index_list, 7);
    cif_bit!(discrete_io_32, 6);
    cif_bit!(discrete_io_64, 5);
    cif_bit!(health_status, 4);
    cif_bit!(v49_spec_compliance, 3);
    cif_bit!(version_build_code, 2);
    cif_bit!(buffer_size, 1);
    // Bit 0 is reserved

    /// Bits this implementation can parse a record for. Excludes the
    /// reserved bits and the four variable-layout fields noted above.
    pub(crate) const KNOWN_MASK: u32 = {
        let reserved = (0b111 << 21) | (1 << 12) | (1 << 8) | 1;
        let unsupported = (1 << 28) | (1 << 11) | (1 << 9) | (1 << 7);
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

#[cif_fields(cif1)]
pub struct Cif1Fields {
    phase_offset: i32,
    polarization: i32,
    pointing_vector: i32,
    spatial_scan_type: u32,
    spatial_reference_type: u32,
    beam_widths: u32,
    range: i32,
    ebno_ber: i32,
    threshold: Threshold,
    compression_point: i32,
    intercept_points: i32,
    snr_noise_figure: i32,
    aux_frequency: u64,
    aux_gain: Gain,
    aux_bandwidth: u64,
    spectrum: Spectrum,
    discrete_io_32: u32,
    discrete_io_64: u64,
    health_status: u32,
    v49_spec_compliance: u32,
    version_build_code: u32,
    buffer_size: u64,
}

#[cif_fields(cif1, optional)]
pub struct Cif1AckFields {
    phase_offset: WarningErrorFields,
    polarization: WarningErrorFields,
    pointing_vector: WarningErrorFields,
    spatial_scan_type: WarningErrorFields,
    spatial_reference_type: WarningErrorFields,
    beam_widths: WarningErrorFields,
    range: WarningErrorFields,
    ebno_ber: WarningErrorFields,
    threshold: WarningErrorFields,
    compression_point: WarningErrorFields,
    intercept_points: WarningErrorFields,
    snr_noise_figure: WarningErrorFields,
    aux_frequency: WarningErrorFields,
    aux_gain: WarningErrorFields,
    aux_bandwidth: WarningErrorFields,
    spectrum: WarningErrorFields,
    discrete_io_32: WarningErrorFields,
    discrete_io_64: WarningErrorFields,
    health_status: WarningErrorFields,
    v49_spec_compliance: WarningErrorFields,
    version_build_code: WarningErrorFields,
    buffer_size: WarningErrorFields,
}

/// Typed accessors for the CIF1 fields, shared by context, control, and
/// query-acknowledge payloads.
#[rustfmt::skip]
pub trait Cif1Manipulators {
    /// Get a reference to the payload's CIF0 indicator word.
    fn cif0(&self) -> &Cif0;
    /// Get a mutable reference to the payload's CIF0 indicator word.
    fn cif0_mut(&mut self) -> &mut Cif0;
    /// Get a reference to the payload's CIF1 indicator word, if present.
    fn cif1(&self) -> Option<&Cif1>;
    /// Get a mutable reference to the payload's CIF1 indicator word.
    fn cif1_mut(&mut self) -> &mut Option<Cif1>;
    /// Get a reference to the payload's CIF1 data fields, if present.
    fn cif1_fields(&self) -> Option<&Cif1Fields>;
    /// Get a mutable reference to the payload's CIF1 data fields.
    fn cif1_fields_mut(&mut self) -> &mut Option<Cif1Fields>;

    cif_fixed_masked!(cif1, phase_offset, phase_offset_deg, f32, FixedI16::<U7>, i32, i16);
    cif_plain!(cif1, polarization, polarization, i32);
    cif_plain!(cif1, pointing_vector, pointing_vector, i32);
    cif_plain!(cif1, spatial_scan_type, spatial_scan_type, u32);
    cif_plain!(cif1, spatial_reference_type, spatial_reference_type, u32);
    cif_plain!(cif1, beam_widths, beam_widths, u32);
    cif_plain!(cif1, range, range, i32);
    cif_plain!(cif1, ebno_ber, ebno_ber, i32);
    cif_plain!(cif1, threshold, threshold, Threshold);
    cif_plain!(cif1, compression_point, compression_point, i32);
    cif_plain!(cif1, intercept_points, intercept_points, i32);
    cif_plain!(cif1, snr_noise_figure, snr_noise_figure, i32);
    cif_fixed!(cif1, aux_frequency, aux_frequency_hz, f64, FixedU64::<U20>);
    cif_plain!(cif1, aux_gain, aux_gain, Gain);
    cif_fixed!(cif1, aux_bandwidth, aux_bandwidth_hz, f64, FixedU64::<U20>);
    cif_plain!(cif1, spectrum, spectrum, Spectrum);
    cif_plain!(cif1, discrete_io_32, discrete_io_32, u32);
    cif_plain!(cif1, discrete_io_64, discrete_io_64, u64);
    cif_plain!(cif1, health_status, health_status, u32);
    cif_plain!(cif1, v49_spec_compliance, v49_spec_compliance, u32);
    cif_plain!(cif1, version_build_code, version_build_code, u32);
    cif_plain!(cif1, buffer_size, buffer_size, u64);
}

/// Warning/error response accessors for the CIF1 fields of an acknowledge
/// payload.
pub trait Cif1AckManipulators {
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
    fn wif1(&self) -> Option<&Cif1>;
    /// Get a mutable reference to the warning indicator word.
    fn wif1_mut(&mut self) -> &mut Option<Cif1>;
    /// Get a reference to the warning response fields, if present.
    fn wif1_fields(&self) -> Option<&Cif1AckFields>;
    /// Get a mutable reference to the warning response fields.
    fn wif1_fields_mut(&mut self) -> &mut Option<Cif1AckFields>;
    /// Get a reference to the error indicator word, if present.
    fn eif1(&self) -> Option<&Cif1>;
    /// Get a mutable reference to the error indicator word.
    fn eif1_mut(&mut self) -> &mut Option<Cif1>;
    /// Get a reference to the error response fields, if present.
    fn eif1_fields(&self) -> Option<&Cif1AckFields>;
    /// Get a mutable reference to the error response fields.
    fn eif1_fields_mut(&mut self) -> &mut Option<Cif1AckFields>;

    ack_field!(1, phase_offset);
    ack_field!(1, polarization);
    ack_field!(1, pointing_vector);
    ack_field!(1, spatial_scan_type);
    ack_field!(1, spatial_reference_type);
    ack_field!(1, beam_widths);
    ack_field!(1, range);
    ack_field!(1, ebno_ber);
    ack_field!(1, threshold);
    ack_field!(1, compression_point);
    ack_field!(1, intercept_points);
    ack_field!(1, snr_noise_figure);
    ack_field!(1, aux_frequency);
    ack_field!(1, aux_gain);
    ack_field!(1, aux_bandwidth);
    ack_field!(1, spectrum);
    ack_field!(1, discrete_io_32);
    ack_field!(1, discrete_io_64);
    ack_field!(1, health_status);
    ack_field!(1, v49_spec_compliance);
    ack_field!(1, version_build_code);
    ack_field!(1, buffer_size);
}

impl fmt::Display for Cif1 {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CIF1:")?;
        writeln!(f, "  Phase offset: {}", self.phase_offset())?;
        writeln!(f, "  Polarization: {}", self.polarization())?;
        writeln!(f, "  Pointing vector: {}", self.pointing_vector())?;
        writeln!(f, "  Spatial scan type: {}", self.spatial_scan_type())?;
        writeln!(f, "  Beam widths: {}", self.beam_widths())?;
        writeln!(f, "  Range: {}", self.range())?;
        writeln!(f, "  Eb/No BER: {}", self.ebno_ber())?;
        writeln!(f, "  Threshold: {}", self.threshold())?;
        writeln!(f, "  Compression point: {}", self.compression_point())?;
        writeln!(f, "  Intercept points: {}", self.intercept_points())?;
        writeln!(f, "  SNR/noise figure: {}", self.snr_noise_figure())?;
        writeln!(f, "  Aux frequency: {}", self.aux_frequency())?;
        writeln!(f, "  Aux gain: {}", self.aux_gain())?;
        writeln!(f, "  Aux bandwidth: {}", self.aux_bandwidth())?;
        writeln!(f, "  Spectrum: {}", self.spectrum())?;
        writeln!(f, "  Discrete I/O 32: {}", self.discrete_io_32())?;
        writeln!(f, "  Discrete I/O 64: {}", self.discrete_io_64())?;
        writeln!(f, "  Health status: {}", self.health_status())?;
        writeln!(f, "  V49 spec compliance: {}", self.v49_spec_compliance())?;
        writeln!(f, "  Version/build code: {}", self.version_build_code())?;
        writeln!(f, "  Buffer size: {}", self.buffer_size())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_bits_excluded_from_known_mask() {
        for bit in [28u32, 11, 9, 7] {
            assert_eq!(Cif1::KNOWN_MASK & (1 << bit), 0, "bit {bit}");
        }
        for bit in [31u32, 10, 1] {
            assert_ne!(Cif1::KNOWN_MASK & (1 << bit), 0, "bit {bit}");
        }
    }
}
