// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Acknowledge command payloads (ANSI/VITA-49.2-2017 section 8.3).

Validation and execution acknowledgements report faults: a warning
indicator set (WIF0..WIF3) and an error indicator set (EIF0..EIF3), each
shaped like the context CIF chain but gating
[`WarningErrorFields`](crate::WarningErrorFields) response words instead
of the original field types. Whether the warning and error sets are
present at all is governed by the CAM ack-W and ack-Er bits.

A query-state acknowledgement instead answers with the current device
state, so it looks exactly like a context payload.
*/

use core::fmt;

use deku::prelude::*;

use crate::cam::Cam;
use crate::cif0::{Cif0, Cif0AckFields, Cif0AckManipulators, Cif0Fields, Cif0Manipulators};
use crate::cif1::{Cif1, Cif1AckFields, Cif1AckManipulators, Cif1Fields, Cif1Manipulators};
use crate::cif2::{Cif2, Cif2AckFields, Cif2AckManipulators, Cif2Fields, Cif2Manipulators};
use crate::cif3::{Cif3, Cif3AckFields, Cif3AckManipulators, Cif3Fields, Cif3Manipulators};
use crate::cif7::{Cif7, Cif7Opts};

/// Whether an acknowledge response reports a warning or an error.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AckLevel {
    /// The response is a warning.
    Warning,
    /// The response is an error.
    Error,
}

/// Validation/execution acknowledge payload: warning and error indicator
/// sets with their response words.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian, cam: &Cam")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ack {
    /// WIF0 indicator word.
    #[deku(cond = "cam.ack_warnings_included()")]
    wif0: Option<Cif0>,
    /// WIF1 indicator word.
    #[deku(cond = "wif0.is_some_and(|w| w.cif1_enabled())")]
    wif1: Option<Cif1>,
    /// WIF2 indicator word.
    #[deku(cond = "wif0.is_some_and(|w| w.cif2_enabled())")]
    wif2: Option<Cif2>,
    /// WIF3 indicator word.
    #[deku(cond = "wif0.is_some_and(|w| w.cif3_enabled())")]
    wif3: Option<Cif3>,
    /// WIF7 attribute indicator word.
    #[deku(cond = "wif0.is_some_and(|w| w.cif7_enabled())")]
    pub wif7: Option<Cif7>,

    /// EIF0 indicator word.
    #[deku(cond = "cam.ack_errors_included()")]
    eif0: Option<Cif0>,
    /// EIF1 indicator word.
    #[deku(cond = "eif0.is_some_and(|e| e.cif1_enabled())")]
    eif1: Option<Cif1>,
    /// EIF2 indicator word.
    #[deku(cond = "eif0.is_some_and(|e| e.cif2_enabled())")]
    eif2: Option<Cif2>,
    /// EIF3 indicator word.
    #[deku(cond = "eif0.is_some_and(|e| e.cif3_enabled())")]
    eif3: Option<Cif3>,
    /// EIF7 attribute indicator word.
    #[deku(cond = "eif0.is_some_and(|e| e.cif7_enabled())")]
    pub eif7: Option<Cif7>,

    /// Warning response words for WIF0 fields.
    #[deku(
        cond = "wif0.is_some()",
        ctx = "wif0.as_ref(), Cif7Opts::from(wif7.as_ref())"
    )]
    wif0_fields: Option<Cif0AckFields>,
    /// Warning response words for WIF1 fields.
    #[deku(
        cond = "wif1.is_some()",
        ctx = "wif1.as_ref(), Cif7Opts::from(wif7.as_ref())"
    )]
    wif1_fields: Option<Cif1AckFields>,
    /// Warning response words for WIF2 fields.
    #[deku(
        cond = "wif2.is_some()",
        ctx = "wif2.as_ref(), Cif7Opts::from(wif7.as_ref())"
    )]
    wif2_fields: Option<Cif2AckFields>,
    /// Warning response words for WIF3 fields.
    #[deku(
        cond = "wif3.is_some()",
        ctx = "wif3.as_ref(), Cif7Opts::from(wif7.as_ref())"
    )]
    wif3_fields: Option<Cif3AckFields>,

    /// Error response words for EIF0 fields.
    #[deku(
        cond = "eif0.is_some()",
        ctx = "eif0.as_ref(), Cif7Opts::from(eif7.as_ref())"
    )]
    eif0_fields: Option<Cif0AckFields>,
    /// Error response words for EIF1 fields.
    #[deku(
        cond = "eif1.is_some()",
        ctx = "eif1.as_ref(), Cif7Opts::from(eif7.as_ref())"
    )]
    eif1_fields: Option<Cif1AckFields>,
    /// Error response words for EIF2 fields.
    #[deku(
        cond = "eif2.is_some()",
        ctx = "eif2.as_ref(), Cif7Opts::from(eif7.as_ref())"
    )]
    eif2_fields: Option<Cif2AckFields>,
    /// Error response words for EIF3 fields.
    #[deku(
        cond = "eif3.is_some()",
        ctx = "eif3.as_ref(), Cif7Opts::from(eif7.as_ref())"
    )]
    eif3_fields: Option<Cif3AckFields>,
}

impl Ack {
    /// Creates an acknowledge payload with no responses recorded.
    pub fn new() -> Ack {
        Ack::default()
    }

    /// Size of the acknowledge payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        let mut words = 0;
        if self.wif0.is_some() {
            words += 1;
        }
        if self.wif1.is_some() {
            words += 1;
        }
        if self.wif2.is_some() {
            words += 1;
        }
        if self.wif3.is_some() {
            words += 1;
        }
        if self.wif7.is_some() {
            words += 1;
        }
        if self.eif0.is_some() {
            words += 1;
        }
        if self.eif1.is_some() {
            words += 1;
        }
        if self.eif2.is_some() {
            words += 1;
        }
        if self.eif3.is_some() {
            words += 1;
        }
        if self.eif7.is_some() {
            words += 1;
        }
        for fields in [&self.wif0_fields, &self.eif0_fields].into_iter().flatten() {
            words += fields.size_words();
        }
        for fields in [&self.wif1_fields, &self.eif1_fields].into_iter().flatten() {
            words += fields.size_words();
        }
        for fields in [&self.wif2_fields, &self.eif2_fields].into_iter().flatten() {
            words += fields.size_words();
        }
        for fields in [&self.wif3_fields, &self.eif3_fields].into_iter().flatten() {
            words += fields.size_words();
        }
        words
    }

    /// True when the payload carries at least one warning response.
    pub fn has_warnings(&self) -> bool {
        self.wif0.is_some()
    }
    /// True when the payload carries at least one error response.
    pub fn has_errors(&self) -> bool {
        self.eif0.is_some()
    }
}

impl Cif0AckManipulators for Ack {
    fn wif0(&self) -> Option<&Cif0> {
        self.wif0.as_ref()
    }
    fn wif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.wif0
    }
    fn wif0_fields(&self) -> Option<&Cif0AckFields> {
        self.wif0_fields.as_ref()
    }
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.wif0_fields
    }
    fn eif0(&self) -> Option<&Cif0> {
        self.eif0.as_ref()
    }
    fn eif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.eif0
    }
    fn eif0_fields(&self) -> Option<&Cif0AckFields> {
        self.eif0_fields.as_ref()
    }
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.eif0_fields
    }
}

impl Cif1AckManipulators for Ack {
    fn wif0(&self) -> Option<&Cif0> {
        self.wif0.as_ref()
    }
    fn wif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.wif0
    }
    fn wif0_fields(&self) -> Option<&Cif0AckFields> {
        self.wif0_fields.as_ref()
    }
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.wif0_fields
    }
    fn eif0(&self) -> Option<&Cif0> {
        self.eif0.as_ref()
    }
    fn eif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.eif0
    }
    fn eif0_fields(&self) -> Option<&Cif0AckFields> {
        self.eif0_fields.as_ref()
    }
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.eif0_fields
    }
    fn wif1(&self) -> Option<&Cif1> {
        self.wif1.as_ref()
    }
    fn wif1_mut(&mut self) -> &mut Option<Cif1> {
        &mut self.wif1
    }
    fn wif1_fields(&self) -> Option<&Cif1AckFields> {
        self.wif1_fields.as_ref()
    }
    fn wif1_fields_mut(&mut self) -> &mut Option<Cif1AckFields> {
        &mut self.wif1_fields
    }
    fn eif1(&self) -> Option<&Cif1> {
        self.eif1.as_ref()
    }
    fn eif1_mut(&mut self) -> &mut Option<Cif1> {
        &mut self.eif1
    }
    fn eif1_fields(&self) -> Option<&Cif1AckFields> {
        self.eif1_fields.as_ref()
    }
    fn eif1_fields_mut(&mut self) -> &mut Option<Cif1AckFields> {
        &mut self.eif1_fields
    }
}

impl Cif2AckManipulators for Ack {
    fn wif0(&self) -> Option<&Cif0> {
        self.wif0.as_ref()
    }
    fn wif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.wif0
    }
    fn wif0_fields(&self) -> Option<&Cif0AckFields> {
        self.wif0_fields.as_ref()
    }
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.wif0_fields
    }
    fn eif0(&self) -> Option<&Cif0> {
        self.eif0.as_ref()
    }
    fn eif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.eif0
    }
    fn eif0_fields(&self) -> Option<&Cif0AckFields> {
        self.eif0_fields.as_ref()
    }
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.eif0_fields
    }
    fn wif2(&self) -> Option<&Cif2> {
        self.wif2.as_ref()
    }
    fn wif2_mut(&mut self) -> &mut Option<Cif2> {
        &mut self.wif2
    }
    fn wif2_fields(&self) -> Option<&Cif2AckFields> {
        self.wif2_fields.as_ref()
    }
    fn wif2_fields_mut(&mut self) -> &mut Option<Cif2AckFields> {
        &mut self.wif2_fields
    }
    fn eif2(&self) -> Option<&Cif2> {
        self.eif2.as_ref()
    }
    fn eif2_mut(&mut self) -> &mut Option<Cif2> {
        &mut self.eif2
    }
    fn eif2_fields(&self) -> Option<&Cif2AckFields> {
        self.eif2_fields.as_ref()
    }
    fn eif2_fields_mut(&mut self) -> &mut Option<Cif2AckFields> {
        &mut self.eif2_fields
    }
}

impl Cif3AckManipulators for Ack {
    fn wif0(&self) -> Option<&Cif0> {
        self.wif0.as_ref()
    }
    fn wif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.wif0
    }
    fn wif0_fields(&self) -> Option<&Cif0AckFields> {
        self.wif0_fields.as_ref()
    }
    fn wif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.wif0_fields
    }
    fn eif0(&self) -> Option<&Cif0> {
        self.eif0.as_ref()
    }
    fn eif0_mut(&mut self) -> &mut Option<Cif0> {
        &mut self.eif0
    }
    fn eif0_fields(&self) -> Option<&Cif0AckFields> {
        self.eif0_fields.as_ref()
    }
    fn eif0_fields_mut(&mut self) -> &mut Option<Cif0AckFields> {
        &mut self.eif0_fields
    }
    fn wif3(&self) -> Option<&Cif3> {
        self.wif3.as_ref()
    }
    fn wif3_mut(&mut self) -> &mut Option<Cif3> {
        &mut self.wif3
    }
    fn wif3_fields(&self) -> Option<&Cif3AckFields> {
        self.wif3_fields.as_ref()
    }
    fn wif3_fields_mut(&mut self) -> &mut Option<Cif3AckFields> {
        &mut self.wif3_fields
    }
    fn eif3(&self) -> Option<&Cif3> {
        self.eif3.as_ref()
    }
    fn eif3_mut(&mut self) -> &mut Option<Cif3> {
        &mut self.eif3
    }
    fn eif3_fields(&self) -> Option<&Cif3AckFields> {
        self.eif3_fields.as_ref()
    }
    fn eif3_fields_mut(&mut self) -> &mut Option<Cif3AckFields> {
        &mut self.eif3_fields
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ack:")?;
        if let Some(w) = &self.wif0 {
            writeln!(f, "Warnings: {w}")?;
        }
        if let Some(e) = &self.eif0 {
            writeln!(f, "Errors: {e}")?;
        }
        Ok(())
    }
}

/// Query-state acknowledge payload: the device's current state, shaped
/// like a context payload.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryAck {
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

impl QueryAck {
    /// Creates a query acknowledge payload with no state reported.
    pub fn new() -> QueryAck {
        QueryAck::default()
    }

    /// Size of the query acknowledge payload in 32-bit words.
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

impl Cif0Manipulators for QueryAck {
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

impl Cif1Manipulators for QueryAck {
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

impl Cif2Manipulators for QueryAck {
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

impl Cif3Manipulators for QueryAck {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning_error::WarningErrorFields;

    #[test]
    fn recording_a_warning_builds_the_wif_chain() {
        let mut ack = Ack::new();
        let mut resp = WarningErrorFields::default();
        resp.set_parameter_out_of_range();
        Cif0AckManipulators::set_bandwidth(&mut ack, AckLevel::Warning, Some(resp));
        assert!(ack.has_warnings());
        assert!(!ack.has_errors());
        assert!(ack.wif0.unwrap().bandwidth());
        let (level, got) = Cif0AckManipulators::bandwidth(&ack).unwrap();
        assert_eq!(level, AckLevel::Warning);
        assert!(got.parameter_out_of_range());
        assert_eq!(ack.size_words(), 2);
    }

    #[test]
    fn clearing_the_last_response_collapses_the_chain() {
        let mut ack = Ack::new();
        let resp = WarningErrorFields::default();
        Cif1AckManipulators::set_threshold(&mut ack, AckLevel::Error, Some(resp));
        assert!(ack.eif0.is_some());
        assert!(ack.eif1.is_some());
        assert_eq!(ack.size_words(), 2 + 1);
        Cif1AckManipulators::set_threshold(&mut ack, AckLevel::Error, None);
        assert!(ack.eif1.is_none());
        assert!(ack.eif0.is_some_and(|e| e.empty()));
    }

    #[test]
    fn query_ack_reports_state_like_context() {
        let mut query = QueryAck::new();
        query.set_sample_rate_sps(Some(10e6));
        assert_eq!(query.sample_rate_sps(), Some(10e6));
        assert_eq!(query.size_words(), 3);
    }
}
