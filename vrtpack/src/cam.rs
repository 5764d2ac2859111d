// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The Control/Acknowledge Mode (CAM) word family (ANSI/VITA-49.2-2017
section 8.2.1).

Control and acknowledge packets share most of the CAM layout — enables,
identifier formats, permissions, action mode, timing control — which lives
in the [`ControlAckMode`] trait. [`ControlCam`] adds the five
acknowledge-request flags of a control packet; [`AcknowledgeCam`] reuses
those bit positions as acknowledge-response flags and adds the
partial-action and scheduled-or-executed report bits.
*/

use deku::prelude::*;
use std::fmt;

/// Controllee/controller identifier format (table 8.3.1-1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdentifierFormat {
    /// 32-bit word identifier.
    #[default]
    Word,
    /// 128-bit UUID identifier.
    Uuid,
}

/// Control action mode (table 8.3.1.3-1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionMode {
    /// The controllee takes no action.
    #[default]
    NoAction,
    /// The controllee does not implement controls but acknowledges as
    /// though it had.
    DryRun,
    /// The controllee implements the command.
    Execute,
    /// Reserved encoding (0b11).
    Reserved,
}

/// Timestamp control mode (tables 8.3.1.3-1 and 8.3.1.7-1). Encodings
/// 0b101 and 0b110 are reserved.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimestampControlMode {
    /// Execute with no timestamp constraints.
    #[default]
    Ignore,
    /// Execute within the device timing precision window.
    Device,
    /// Device window, or late within the application timing window.
    Late,
    /// Device window, or early within the application timing window.
    Early,
    /// Execute within the application timing window, early or late.
    EarlyLate,
    /// Did not execute some controls at the specified time. The encoding
    /// is accepted anywhere but only meaningful in acknowledge packets.
    TimingIssues,
}

impl TimestampControlMode {
    fn to_bits(self) -> u32 {
        match self {
            TimestampControlMode::Ignore => 0b000,
            TimestampControlMode::Device => 0b001,
            TimestampControlMode::Late => 0b010,
            TimestampControlMode::Early => 0b011,
            TimestampControlMode::EarlyLate => 0b100,
            TimestampControlMode::TimingIssues => 0b111,
        }
    }

    fn from_bits(bits: u32) -> Option<TimestampControlMode> {
        match bits {
            0b000 => Some(TimestampControlMode::Ignore),
            0b001 => Some(TimestampControlMode::Device),
            0b010 => Some(TimestampControlMode::Late),
            0b011 => Some(TimestampControlMode::Early),
            0b100 => Some(TimestampControlMode::EarlyLate),
            0b111 => Some(TimestampControlMode::TimingIssues),
            _ => None,
        }
    }
}

macro_rules! cam_flag {
    ($name:ident, $set:ident, $unset:ident, $bit:literal, $doc:expr) => {
        #[doc = $doc]
        fn $name(&self) -> bool {
            self.as_u32() & (1 << $bit) != 0
        }
        #[doc = concat!("Sets the ", stringify!($name), " bit.")]
        fn $set(&mut self) {
            *self.as_u32_mut() |= 1 << $bit;
        }
        #[doc = concat!("Clears the ", stringify!($name), " bit.")]
        fn $unset(&mut self) {
            *self.as_u32_mut() &= !(1 << $bit);
        }
    };
}

/// Accessors for the CAM bits common to control and acknowledge packets.
pub trait ControlAckMode {
    /// The raw 32-bit CAM word.
    fn as_u32(&self) -> u32;
    /// Mutable access to the raw CAM word.
    fn as_u32_mut(&mut self) -> &mut u32;

    cam_flag!(controllee_enabled, enable_controllee, disable_controllee, 31,
        "Returns true if a controllee identifier follows the message ID.");
    cam_flag!(controller_enabled, enable_controller, disable_controller, 29,
        "Returns true if a controller identifier is included.");
    cam_flag!(partial_permitted, set_partial_permitted, unset_partial_permitted, 27,
        "Returns true if partial implementation of the packet is permitted.");
    cam_flag!(warnings_permitted, set_warnings_permitted, unset_warnings_permitted, 26,
        "Returns true if execution despite warnings is permitted.");
    cam_flag!(errors_permitted, set_errors_permitted, unset_errors_permitted, 25,
        "Returns true if execution despite errors is permitted.");
    cam_flag!(nack_only, set_nack_only, unset_nack_only, 22,
        "Returns true if acknowledgements are only wanted on warning or error.");

    /// Gets the controllee identifier format.
    fn controllee_format(&self) -> IdentifierFormat {
        if self.as_u32() & (1 << 30) != 0 {
            IdentifierFormat::Uuid
        } else {
            IdentifierFormat::Word
        }
    }
    /// Sets the controllee identifier format.
    fn set_controllee_format(&mut self, format: IdentifierFormat) {
        match format {
            IdentifierFormat::Word => *self.as_u32_mut() &= !(1 << 30),
            IdentifierFormat::Uuid => *self.as_u32_mut() |= 1 << 30,
        }
    }

    /// Gets the controller identifier format.
    fn controller_format(&self) -> IdentifierFormat {
        if self.as_u32() & (1 << 28) != 0 {
            IdentifierFormat::Uuid
        } else {
            IdentifierFormat::Word
        }
    }
    /// Sets the controller identifier format.
    fn set_controller_format(&mut self, format: IdentifierFormat) {
        match format {
            IdentifierFormat::Word => *self.as_u32_mut() &= !(1 << 28),
            IdentifierFormat::Uuid => *self.as_u32_mut() |= 1 << 28,
        }
    }

    /// Gets the action mode (bits 24..23).
    fn action_mode(&self) -> ActionMode {
        match (self.as_u32() >> 23) & 0b11 {
            0b00 => ActionMode::NoAction,
            0b01 => ActionMode::DryRun,
            0b10 => ActionMode::Execute,
            _ => ActionMode::Reserved,
        }
    }
    /// Sets the action mode (bits 24..23).
    fn set_action_mode(&mut self, mode: ActionMode) {
        let bits = match mode {
            ActionMode::NoAction => 0b00,
            ActionMode::DryRun => 0b01,
            ActionMode::Execute => 0b10,
            ActionMode::Reserved => 0b11,
        };
        *self.as_u32_mut() = (self.as_u32() & !(0b11 << 23)) | (bits << 23);
    }

    /// Gets the timestamp control mode (bits 14..12). Returns `None` for
    /// the two reserved encodings.
    fn timing_control(&self) -> Option<TimestampControlMode> {
        TimestampControlMode::from_bits((self.as_u32() >> 12) & 0b111)
    }
    /// Sets the timestamp control mode (bits 14..12).
    fn set_timing_control(&mut self, mode: TimestampControlMode) {
        *self.as_u32_mut() = (self.as_u32() & !(0b111 << 12)) | (mode.to_bits() << 12);
    }
}

/// The CAM word of a control or cancellation packet.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlCam(u32);

impl ControlAckMode for ControlCam {
    fn as_u32(&self) -> u32 {
        self.0
    }
    fn as_u32_mut(&mut self) -> &mut u32 {
        &mut self.0
    }
}

macro_rules! inherent_flag {
    ($name:ident, $set:ident, $unset:ident, $bit:literal, $doc:expr) => {
        #[doc = $doc]
        pub fn $name(&self) -> bool {
            self.0 & (1 << $bit) != 0
        }
        #[doc = concat!("Sets the ", stringify!($name), " bit.")]
        pub fn $set(&mut self) {
            self.0 |= 1 << $bit;
        }
        #[doc = concat!("Clears the ", stringify!($name), " bit.")]
        pub fn $unset(&mut self) {
            self.0 &= !(1 << $bit);
        }
    };
}

impl ControlCam {
    /// Size of the CAM word in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    inherent_flag!(req_validation, set_req_validation, unset_req_validation, 20,
        "Returns true if a validation acknowledge is requested.");
    inherent_flag!(req_execution, set_req_execution, unset_req_execution, 19,
        "Returns true if an execution acknowledge is requested.");
    inherent_flag!(req_state, set_req_state, unset_req_state, 18,
        "Returns true if a query-state acknowledge is requested.");
    inherent_flag!(req_warnings, set_req_warnings, unset_req_warnings, 17,
        "Returns true if warning details are requested in acknowledgements.");
    inherent_flag!(req_errors, set_req_errors, unset_req_errors, 16,
        "Returns true if error details are requested in acknowledgements.");
}

/// The CAM word of an acknowledge packet.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcknowledgeCam(u32);

impl ControlAckMode for AcknowledgeCam {
    fn as_u32(&self) -> u32 {
        self.0
    }
    fn as_u32_mut(&mut self) -> &mut u32 {
        &mut self.0
    }
}

impl AcknowledgeCam {
    /// Size of the CAM word in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    inherent_flag!(ack_validation, set_ack_validation, unset_ack_validation, 20,
        "Returns true if this packet is a validation acknowledge.");
    inherent_flag!(ack_execution, set_ack_execution, unset_ack_execution, 19,
        "Returns true if this packet is an execution acknowledge.");
    inherent_flag!(ack_state, set_ack_state, unset_ack_state, 18,
        "Returns true if this packet is a query-state acknowledge.");
    inherent_flag!(ack_warnings, set_ack_warnings, unset_ack_warnings, 17,
        "Returns true if warning indicator fields are included.");
    inherent_flag!(ack_errors, set_ack_errors, unset_ack_errors, 16,
        "Returns true if error indicator fields are included.");
    inherent_flag!(partial_action, set_partial_action, unset_partial_action, 11,
        "Returns true if only part of the requested action was taken.");
    inherent_flag!(scheduled_or_executed, set_scheduled_or_executed, unset_scheduled_or_executed, 10,
        "Returns true if the action was scheduled or executed.");
}

/// The CAM word of a command packet, typed by direction: control packets
/// carry a [`ControlCam`], acknowledge packets an [`AcknowledgeCam`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, is_ack: bool",
    id = "is_ack"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cam {
    /// Control/cancellation direction.
    #[deku(id = "false")]
    Control(ControlCam),
    /// Acknowledge direction.
    #[deku(id = "true")]
    Ack(AcknowledgeCam),
}

impl Default for Cam {
    fn default() -> Self {
        Cam::Control(ControlCam::default())
    }
}

impl Cam {
    /// Size of the CAM word in 32-bit words.
    pub fn size_words(&self) -> u16 {
        1
    }

    /// Access to the shared CAM bits regardless of direction.
    pub fn common(&self) -> &dyn ControlAckMode {
        match self {
            Cam::Control(c) => c,
            Cam::Ack(a) => a,
        }
    }
    /// Mutable access to the shared CAM bits regardless of direction.
    pub fn common_mut(&mut self) -> &mut dyn ControlAckMode {
        match self {
            Cam::Control(c) => c,
            Cam::Ack(a) => a,
        }
    }

    /// Gets the control-direction CAM word.
    pub fn control(&self) -> Option<&ControlCam> {
        match self {
            Cam::Control(c) => Some(c),
            _ => None,
        }
    }
    /// Gets the control-direction CAM word mutably.
    pub fn control_mut(&mut self) -> Option<&mut ControlCam> {
        match self {
            Cam::Control(c) => Some(c),
            _ => None,
        }
    }
    /// Gets the acknowledge-direction CAM word.
    pub fn ack(&self) -> Option<&AcknowledgeCam> {
        match self {
            Cam::Ack(a) => Some(a),
            _ => None,
        }
    }
    /// Gets the acknowledge-direction CAM word mutably.
    pub fn ack_mut(&mut self) -> Option<&mut AcknowledgeCam> {
        match self {
            Cam::Ack(a) => Some(a),
            _ => None,
        }
    }

    pub(crate) fn ack_warnings_included(&self) -> bool {
        matches!(self, Cam::Ack(a) if a.ack_warnings())
    }
    pub(crate) fn ack_errors_included(&self) -> bool {
        matches!(self, Cam::Ack(a) if a.ack_errors())
    }

    pub(crate) fn controllee_word_included(&self) -> bool {
        self.common().controllee_enabled()
            && self.common().controllee_format() == IdentifierFormat::Word
    }
    pub(crate) fn controllee_uuid_included(&self) -> bool {
        self.common().controllee_enabled()
            && self.common().controllee_format() == IdentifierFormat::Uuid
    }
    pub(crate) fn controller_word_included(&self) -> bool {
        self.common().controller_enabled()
            && self.common().controller_format() == IdentifierFormat::Word
    }
    pub(crate) fn controller_uuid_included(&self) -> bool {
        self.common().controller_enabled()
            && self.common().controller_format() == IdentifierFormat::Uuid
    }
}

impl fmt::Display for Cam {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.common();
        writeln!(f, "CAM:")?;
        writeln!(f, "  Controllee enabled: {}", c.controllee_enabled())?;
        writeln!(f, "  Controllee format: {:?}", c.controllee_format())?;
        writeln!(f, "  Controller enabled: {}", c.controller_enabled())?;
        writeln!(f, "  Controller format: {:?}", c.controller_format())?;
        writeln!(f, "  Partial permitted: {}", c.partial_permitted())?;
        writeln!(f, "  Warnings permitted: {}", c.warnings_permitted())?;
        writeln!(f, "  Errors permitted: {}", c.errors_permitted())?;
        writeln!(f, "  Action mode: {:?}", c.action_mode())?;
        writeln!(f, "  NACK only: {}", c.nack_only())?;
        writeln!(f, "  Timing control: {:?}", c.timing_control())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_bit_positions() {
        let mut cam = ControlCam::default();
        cam.enable_controllee();
        cam.set_controllee_format(IdentifierFormat::Uuid);
        cam.set_action_mode(ActionMode::Execute);
        cam.set_timing_control(TimestampControlMode::Device);
        assert_eq!(
            cam.as_u32(),
            (1 << 31) | (1 << 30) | (0b10 << 23) | (0b001 << 12)
        );
        assert_eq!(cam.timing_control(), Some(TimestampControlMode::Device));
        assert_eq!(cam.action_mode(), ActionMode::Execute);
    }

    #[test]
    fn reserved_timing_modes_read_as_none() {
        let mut cam = AcknowledgeCam::default();
        *cam.as_u32_mut() = 0b101 << 12;
        assert_eq!(cam.timing_control(), None);
        *cam.as_u32_mut() = 0b111 << 12;
        assert_eq!(cam.timing_control(), Some(TimestampControlMode::TimingIssues));
    }

    #[test]
    fn ack_report_bits() {
        let mut cam = AcknowledgeCam::default();
        cam.set_ack_execution();
        cam.set_partial_action();
        cam.set_scheduled_or_executed();
        assert_eq!(cam.as_u32(), (1 << 19) | (1 << 11) | (1 << 10));
    }
}
