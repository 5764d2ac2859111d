// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Context packet payloads (ANSI/VITA-49.2-2017 section 7): the CIF
indicator words followed by every enabled field in canonical order.
*/

use core::fmt;

use deku::prelude::*;

use crate::cif0::{Cif0, Cif0Fields, Cif0Manipulators};
use crate::cif1::{Cif1, Cif1Fields, Cif1Manipulators};
use crate::cif2::{Cif2, Cif2Fields, Cif2Manipulators};
use crate::cif3::{Cif3, Cif3Fields, Cif3Manipulators};
use crate::cif7::{Cif7, Cif7Opts};

/// Context packet payload: all CIF indicator words and data fields.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
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

impl Context {
    /// Creates a context payload with no CIF bits or fields set.
    pub fn new() -> Context {
        Context::default()
    }

    /// Returns true if the context field change indicator is set.
    pub fn context_changed(&self) -> bool {
        self.cif0.change_indicator()
    }
    /// Sets or clears the context field change indicator.
    pub fn set_context_changed(&mut self, changed: bool) {
        if changed {
            self.cif0.set_change_indicator();
        } else {
            self.cif0.unset_change_indicator();
        }
    }

    /// Size of the context payload in 32-bit words.
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

impl Cif0Manipulators for Context {
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

impl Cif1Manipulators for Context {
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

impl Cif2Manipulators for Context {
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

impl Cif3Manipulators for Context {
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

impl fmt::Display for Context {
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
        if let Some(device_id) = self.device_id() {
            write!(f, "{device_id}")?;
        }
        if let Some(spectrum) = self.spectrum() {
            write!(f, "{spectrum}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_track_cif_bits() {
        let mut context = Context::new();
        assert!(context.cif0.empty());
        context.set_bandwidth_hz(Some(8e6));
        assert!(context.cif0.bandwidth());
        assert_eq!(context.bandwidth_hz(), Some(8e6));
        context.set_bandwidth_hz(None);
        assert!(context.cif0.empty());
        assert_eq!(context.bandwidth_hz(), None);
    }

    #[test]
    fn optional_cif_words_appear_on_demand() {
        let mut context = Context::new();
        context.set_aux_frequency_hz(Some(2.4e9));
        assert!(context.cif0.cif1_enabled());
        assert!(context.cif1.unwrap().aux_frequency());
        assert_eq!(context.size_words(), 1 + 1 + 2);
        context.set_aux_frequency_hz(None);
        assert!(!context.cif0.cif1_enabled());
        assert!(context.cif1.is_none());
        assert_eq!(context.size_words(), 1);
    }

    #[test]
    fn size_words_sums_fields() {
        let mut context = Context::new();
        context.set_context_changed(true);
        assert_eq!(context.size_words(), 1);
        context.set_reference_point_id(Some(7));
        assert_eq!(context.size_words(), 2);
        context.set_bandwidth_hz(Some(1.0));
        assert_eq!(context.size_words(), 4);
        context.set_formatted_gps(Some(Default::default()));
        assert_eq!(context.size_words(), 15);
    }
}
