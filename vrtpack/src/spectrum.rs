// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The spectrum field (ANSI/VITA-49.2-2017 section 9.6.1): thirteen words of
spectral metadata describing how a spectral signal data stream was
produced. Window and averaging codes outside the small typed sets below
are kept as raw words rather than enumerated exhaustively.
*/

use deku::prelude::*;
use fixed::{types::extra::U20, FixedI64};
use std::fmt;

/// Spectrum type subfield coding (low byte of the spectrum type word).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpectrumType {
    /// No setting.
    #[default]
    Default,
    /// Log power (dB).
    LogPowerDb,
    /// Cartesian (I, Q).
    Cartesian,
    /// Polar (magnitude, phase).
    Polar,
    /// Magnitude only.
    Magnitude,
    /// Reserved (5..=127) or user-defined (128..=255) coding.
    Other(u8),
}

impl From<u8> for SpectrumType {
    fn from(value: u8) -> Self {
        match value {
            0 => SpectrumType::Default,
            1 => SpectrumType::LogPowerDb,
            2 => SpectrumType::Cartesian,
            3 => SpectrumType::Polar,
            4 => SpectrumType::Magnitude,
            v => SpectrumType::Other(v),
        }
    }
}

impl From<SpectrumType> for u8 {
    fn from(value: SpectrumType) -> Self {
        match value {
            SpectrumType::Default => 0,
            SpectrumType::LogPowerDb => 1,
            SpectrumType::Cartesian => 2,
            SpectrumType::Polar => 3,
            SpectrumType::Magnitude => 4,
            SpectrumType::Other(v) => v,
        }
    }
}

/// How the window time delta word is to be interpreted (bits 13..12 of the
/// spectrum type word).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowTimeDeltaInterpretation {
    /// Overlap is not controlled.
    #[default]
    NotControlled,
    /// Percent overlap.
    PercentOverlap,
    /// Sample count.
    Samples,
    /// Time.
    Time,
}

/// Base spectrum data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spectrum {
    spectrum_type: u32,
    window_type: u32,
    num_transform_points: u32,
    num_window_points: u32,
    resolution: i64,
    span: i64,
    num_averages: u32,
    weighting_factor: i32,
    f1_index: i32,
    f2_index: i32,
    window_time_delta: u32,
}

impl Spectrum {
    /// Size of the spectrum field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        13
    }

    /// Gets the spectrum type code.
    pub fn spectrum_type(&self) -> SpectrumType {
        ((self.spectrum_type & 0xFF) as u8).into()
    }
    /// Sets the spectrum type code.
    pub fn set_spectrum_type(&mut self, spectrum_type: SpectrumType) {
        self.spectrum_type = (self.spectrum_type & !0xFF) | u8::from(spectrum_type) as u32;
    }

    /// Gets the averaging type code byte (bits 15..8 of the spectrum type
    /// word, table 9.6.1-2).
    pub fn averaging_type(&self) -> u8 {
        ((self.spectrum_type >> 8) & 0xFF) as u8
    }
    /// Sets the averaging type code byte.
    pub fn set_averaging_type(&mut self, code: u8) {
        self.spectrum_type = (self.spectrum_type & !(0xFF << 8)) | ((code as u32) << 8);
    }

    /// Gets the window time delta interpretation (bits 17..16 of the
    /// spectrum type word).
    pub fn window_time_delta_interpretation(&self) -> WindowTimeDeltaInterpretation {
        match (self.spectrum_type >> 16) & 0b11 {
            0 => WindowTimeDeltaInterpretation::NotControlled,
            1 => WindowTimeDeltaInterpretation::PercentOverlap,
            2 => WindowTimeDeltaInterpretation::Samples,
            _ => WindowTimeDeltaInterpretation::Time,
        }
    }
    /// Sets the window time delta interpretation.
    pub fn set_window_time_delta_interpretation(
        &mut self,
        interpretation: WindowTimeDeltaInterpretation,
    ) {
        self.spectrum_type =
            (self.spectrum_type & !(0b11 << 16)) | ((interpretation as u32) << 16);
    }

    /// The raw spectrum type word.
    pub fn spectrum_type_as_u32(&self) -> u32 {
        self.spectrum_type
    }

    /// Gets the raw window type code word (table 9.6.1-3).
    pub fn window_type(&self) -> u32 {
        self.window_type
    }
    /// Sets the raw window type code word.
    pub fn set_window_type(&mut self, code: u32) {
        self.window_type = code;
    }

    /// Gets the transform size (e.g. FFT size).
    pub fn num_transform_points(&self) -> u32 {
        self.num_transform_points
    }
    /// Sets the transform size.
    pub fn set_num_transform_points(&mut self, points: u32) {
        self.num_transform_points = points;
    }

    /// Gets the window size in points; may differ from the transform size
    /// when decimating algorithms are in use.
    pub fn num_window_points(&self) -> u32 {
        self.num_window_points
    }
    /// Sets the window size in points.
    pub fn set_num_window_points(&mut self, points: u32) {
        self.num_window_points = points;
    }

    /// Gets the spectral bin resolution in Hz.
    pub fn resolution_hz(&self) -> f64 {
        FixedI64::<U20>::from_bits(self.resolution).to_num()
    }
    /// Sets the spectral bin resolution in Hz.
    pub fn set_resolution_hz(&mut self, hz: f64) {
        self.resolution = FixedI64::<U20>::from_num(hz).to_bits();
    }

    /// Gets the spectral span in Hz (first point to last point).
    pub fn span_hz(&self) -> f64 {
        FixedI64::<U20>::from_bits(self.span).to_num()
    }
    /// Sets the spectral span in Hz.
    pub fn set_span_hz(&mut self, hz: f64) {
        self.span = FixedI64::<U20>::from_num(hz).to_bits();
    }

    /// Gets the number of averages applied.
    pub fn num_averages(&self) -> u32 {
        self.num_averages
    }
    /// Sets the number of averages applied.
    pub fn set_num_averages(&mut self, averages: u32) {
        self.num_averages = averages;
    }

    /// Gets the nonlinear averaging weighting factor.
    pub fn weighting_factor(&self) -> i32 {
        self.weighting_factor
    }
    /// Sets the nonlinear averaging weighting factor.
    pub fn set_weighting_factor(&mut self, factor: i32) {
        self.weighting_factor = factor;
    }

    /// Gets the left-side spectral subset index.
    pub fn f1_index(&self) -> i32 {
        self.f1_index
    }
    /// Sets the left-side spectral subset index.
    pub fn set_f1_index(&mut self, index: i32) {
        self.f1_index = index;
    }

    /// Gets the right-side spectral subset index.
    pub fn f2_index(&self) -> i32 {
        self.f2_index
    }
    /// Sets the right-side spectral subset index.
    pub fn set_f2_index(&mut self, index: i32) {
        self.f2_index = index;
    }

    /// Gets the raw window time delta word; interpret it per
    /// [`Spectrum::window_time_delta_interpretation`].
    pub fn window_time_delta(&self) -> u32 {
        self.window_time_delta
    }
    /// Sets the raw window time delta word.
    pub fn set_window_time_delta(&mut self, delta: u32) {
        self.window_time_delta = delta;
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Spectrum:")?;
        writeln!(f, "  Type: {:?}", self.spectrum_type())?;
        writeln!(f, "  Transform points: {}", self.num_transform_points())?;
        writeln!(f, "  Window points: {}", self.num_window_points())?;
        writeln!(f, "  Resolution: {} Hz", self.resolution_hz())?;
        writeln!(f, "  Span: {} Hz", self.span_hz())?;
        writeln!(f, "  F1..F2 index: {}..{}", self.f1_index(), self.f2_index())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_word_subfields() {
        let mut spectrum = Spectrum::default();
        spectrum.set_spectrum_type(SpectrumType::LogPowerDb);
        spectrum.set_averaging_type(0x1);
        spectrum.set_window_time_delta_interpretation(WindowTimeDeltaInterpretation::Samples);
        assert_eq!(spectrum.spectrum_type_as_u32(), 0x0002_0101);
        assert_eq!(spectrum.spectrum_type(), SpectrumType::LogPowerDb);
        assert_eq!(
            spectrum.window_time_delta_interpretation(),
            WindowTimeDeltaInterpretation::Samples
        );
    }

    #[test]
    fn resolution_uses_frequency_radix() {
        let mut spectrum = Spectrum::default();
        spectrum.set_resolution_hz(1.0);
        assert_eq!(spectrum.resolution, 1 << 20);
    }
}
