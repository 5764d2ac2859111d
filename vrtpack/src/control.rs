// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Control and cancellation command payloads (ANSI/VITA-49.2-2017 section
8). A control payload mirrors a context payload — the same CIF words and
fields — but travels the other direction: the controller is asking for
those values to be applied. A cancellation payload carries indicator
words only; it names the fields of an earlier control packet to revoke
without restating their values.
*/

use core::fmt;

use deku::prelude::*;

use crate::cif0::{Cif0, Cif0Fields, Cif0Manipulators};
use crate::cif1::{Cif1, Cif1Fields, Cif1Manipulators};
use crate::cif2::{Cif2, Cif2Fields, Cif2Manipulators};
use crate::cif3::{Cif3, Cif3Fields, Cif3Manipulators};
use crate::cif7::{Cif7, Cif7Opts};

/// Control command payload: CIF indicator words and the requested field
/// values.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Control {
    /// CIF0 indicator word.
    cif0: Cif0,
    /// CIF1 indicator word.
    #[deku(cond = "cif0.cif1_enabled()")]
    cif1: Option<Cif1>,
    /// CIF2 indicator word.
    #[deku(cond = "cif0.cif2_enabled()")]
    cif2: Option<Cif2>,
    /// CIF3 indicator word.
    #[deku(cond = "cif0.cif3_enabled()")]
    cif3: Option<Cif3>,
    /// CIF7 attribute indicator word.
    #[deku(cond = "cif0.cif7_enabled()")]
    pub cif7: Option<Cif7>,

    /// CIF0 data fields.
    #[deku(ctx = "cif0, Cif7Opts::from(cif7.as_ref())")]
    cif0_fields: Cif0Fields,
    /// CIF1 data fields.
    #[deku(
        cond = "cif0.cif1_enabled()",
        ctx = "cif1.as_ref(), Cif7Opts::from(cif7.as_ref())"
    )]
    cif1_fields: Option<Cif1Fields>,
    /// CIF2 data fields.
    #[deku(
        cond = "cif0.cif2_enabled()",
        ctx = "cif2.as_ref(), Cif7Opts::from(cif7.as_ref())"
    )]
    cif2_fields: Option<Cif2Fields>,
    /// CIF3 data fields.
    #[deku(
        cond = "cif0.cif3_enabled()",
        ctx = "cif3.as_ref(), Cif7Opts::from(cif7.as_ref())"
    )]
    cif3_fields: Option<Cif3Fields>,
}

impl Control {
    /// Creates a control payload with no fields requested.
    pub fn new() -> Control {
        Control::default()
    }

    /// Size of the control payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        let mut words = 1 + self.cif0_fields.size_words();
        if let Some(f) = &self.cif1_fields {
            words += 1 + f.size_words();
        }
        if let Some(f) = &self.cif2_fields {
            words += 1 + f.size_words();
        }
        if let Some(f) = &self.cif3_fields {
            words += 1 + f.size_words();
        }
        if self.cif0.cif7_enabled() {
            words += 1;
        }
        words
    }
}

impl Cif0Manipulators for Control {
    fn cif0(&self) -> &Cif0 {
        &self.cif0
    }
    fn cif0_mut(&mut self) -> &mut Cif0 {
        &mut self.cif0
    }
    fn cif0_fields(&self) -> &Cif0Fields {
        &self.cif0_fields
    }
    fn cif0_fields_mut(&mut self) -> &mut Cif0Fields {
        &mut self.cif0_fields
    }
}

impl Cif1Manipulators for Control {
    fn cif0(&self) -> &Cif0 {
        &self.cif0
    }
    fn cif0_mut(&mut self) -> &mut Cif0 {
        &mut self.cif0
    }
    fn cif1(&self) -> Option<&Cif1> {
        self.cif1.as_ref()
    }
    fn cif1_mut(&mut self) -> &mut Option<Cif1> {
        &mut self.cif1
    }
    fn cif1_fields(&self) -> Option<&Cif1Fields> {
        self.cif1_fields.as_ref()
    }
    fn cif1_fields_mut(&mut self) -> &mut Option<Cif1Fields> {
        &mut self.cif1_fields
    }
}

impl Cif2Manipulators for Control {
    fn cif0(&self) -> &Cif0 {
        &self.cif0
    }
    fn cif0_mut(&mut self) -> &mut Cif0 {
        &mut self.cif0
    }
    fn cif2(&self) -> Option<&Cif2> {
        self.cif2.as_ref()
    }
    fn cif2_mut(&mut self) -> &mut Option<Cif2> {
        &mut self.cif2
    }
    fn cif2_fields(&self) -> Option<&Cif2Fields> {
        self.cif2_fields.as_ref()
    }
    fn cif2_fields_mut(&mut self) -> &mut Option<Cif2Fields> {
        &mut self.cif2_fields
    }
}

impl Cif3Manipulators for Control {
    fn cif0(&self) -> &Cif0 {
        &self.cif0
    }
    fn cif0_mut(&mut self) -> &mut Cif0 {
        &mut self.cif0
    }
    fn cif3(&self) -> Option<&Cif3> {
        self.cif3.as_ref()
    }
    fn cif3_mut(&mut self) -> &mut Option<Cif3> {
        &mut self.cif3
    }
    fn cif3_fields(&self) -> Option<&Cif3Fields> {
        self.cif3_fields.as_ref()
    }
    fn cif3_fields_mut(&mut self) -> &mut Option<Cif3Fields> {
        &mut self.cif3_fields
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cif0)?;
        if let Some(bw) = self.bandwidth_hz() {
            writeln!(f, "Bandwidth: {bw} Hz")?;
        }
        if let Some(freq) = self.rf_ref_freq_hz() {
            writeln!(f, "RF reference frequency: {freq} Hz")?;
        }
        if let Some(rate) = self.sample_rate_sps() {
            writeln!(f, "Sample rate: {rate} sps")?;
        }
        Ok(())
    }
}

/// Cancellation command payload: indicator words only.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cancellation {
    /// CIF0 indicator word.
    cif0: Cif0,
    /// CIF1 indicator word.
    #[deku(cond = "cif0.cif1_enabled()")]
    cif1: Option<Cif1>,
    /// CIF2 indicator word.
    #[deku(cond = "cif0.cif2_enabled()")]
    cif2: Option<Cif2>,
    /// CIF3 indicator word.
    #[deku(cond = "cif0.cif3_enabled()")]
    cif3: Option<Cif3>,
}

impl Cancellation {
    /// Creates a cancellation payload with no fields named.
    pub fn new() -> Cancellation {
        Cancellation::default()
    }

    /// Size of the cancellation payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        let mut words = 1;
        if self.cif1.is_some() {
            words += 1;
        }
        if self.cif2.is_some() {
            words += 1;
        }
        if self.cif3.is_some() {
            words += 1;
        }
        words
    }

    /// Get a reference to the CIF0 indicator word.
    pub fn cif0(&self) -> &Cif0 {
        &self.cif0
    }
    /// Get a mutable reference to the CIF0 indicator word.
    pub fn cif0_mut(&mut self) -> &mut Cif0 {
        &mut self.cif0
    }
    /// Get a reference to the CIF1 indicator word, if present.
    pub fn cif1(&self) -> Option<&Cif1> {
        self.cif1.as_ref()
    }
    /// Get a mutable reference to the CIF1 indicator word. Remember to set
    /// CIF0 bit 1 when populating it.
    pub fn cif1_mut(&mut self) -> &mut Option<Cif1> {
        &mut self.cif1
    }
    /// Get a reference to the CIF2 indicator word, if present.
    pub fn cif2(&self) -> Option<&Cif2> {
        self.cif2.as_ref()
    }
    /// Get a mutable reference to the CIF2 indicator word. Remember to set
    /// CIF0 bit 2 when populating it.
    pub fn cif2_mut(&mut self) -> &mut Option<Cif2> {
        &mut self.cif2
    }
    /// Get a reference to the CIF3 indicator word, if present.
    pub fn cif3(&self) -> Option<&Cif3> {
        self.cif3.as_ref()
    }
    /// Get a mutable reference to the CIF3 indicator word. Remember to set
    /// CIF0 bit 3 when populating it.
    pub fn cif3_mut(&mut self) -> &mut Option<Cif3> {
        &mut self.cif3
    }
}

impl fmt::Display for Cancellation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cancellation of: {}", self.cif0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_mirrors_context_manipulators() {
        let mut control = Control::new();
        control.set_rf_ref_freq_hz(Some(100e6));
        assert_eq!(control.cif0.as_u32(), 0x0800_0000);
        control.set_bandwidth_hz(Some(8e6));
        assert_eq!(control.cif0.as_u32(), 0x2800_0000);
        assert_eq!(control.size_words(), 1 + 2 + 2);
    }

    #[test]
    fn cancellation_is_indicators_only() {
        let mut cancel = Cancellation::new();
        cancel.cif0_mut().set_bandwidth();
        assert_eq!(cancel.size_words(), 1);
        assert!(cancel.cif0().bandwidth());
    }
}
