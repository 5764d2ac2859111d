// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Command packet payloads (ANSI/VITA-49.2-2017 section 8).

Every command packet starts with a CAM word and a message identifier,
optionally followed by controllee and controller identifiers whose
presence and width (32-bit word or 128-bit UUID) the CAM declares. What
comes after depends on the direction and header bits:

```text
command packet ─┬─ control ──────┬─ control      (CIFs + field values)
                │  (header bit   └─ cancellation (CIFs only)
                │   26 clear)
                └─ acknowledge ──┬─ validation ack ┐ (WIF/EIF chains +
                   (header bit   ├─ execution ack  ┘  response words)
                    26 set)      └─ query ack      (CIFs + field values)
```
*/

use core::fmt;

use deku::prelude::*;

use crate::ack::{Ack, QueryAck};
use crate::cam::{AcknowledgeCam, Cam, ControlCam, IdentifierFormat};
use crate::control::{Cancellation, Control};
use crate::packet_header::PacketHeader;
use crate::VrtError;

/// Main command payload structure: the CAM/message-ID/identifier prologue
/// plus the direction-specific sub-payload.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, packet_header: &PacketHeader"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    /// Control/acknowledge mode word.
    #[deku(ctx = "packet_header.is_ack_packet().unwrap_or(false)")]
    cam: Cam,
    /// Message identifier echoed between control and acknowledge packets.
    message_id: u32,
    /// Controllee identifier (word form).
    #[deku(cond = "cam.controllee_word_included()")]
    controllee_id: Option<u32>,
    /// Controllee identifier (UUID form).
    #[deku(cond = "cam.controllee_uuid_included()")]
    controllee_uuid: Option<u128>,
    /// Controller identifier (word form).
    #[deku(cond = "cam.controller_word_included()")]
    controller_id: Option<u32>,
    /// Controller identifier (UUID form).
    #[deku(cond = "cam.controller_uuid_included()")]
    controller_uuid: Option<u128>,
    /// Direction-specific sub-payload.
    #[deku(ctx = "cam, packet_header")]
    payload: CommandPayload,
}

/// The sub-payload of a command packet, selected by the header ack and
/// cancellation bits plus the CAM acknowledge flags.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, cam: &Cam, packet_header: &PacketHeader",
    id = "CommandPayload::discriminant(cam, packet_header)"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandPayload {
    /// Control packet payload.
    #[deku(id = "0u8")]
    Control(Control),
    /// Cancellation packet payload.
    #[deku(id = "1u8")]
    Cancellation(Cancellation),
    /// Validation acknowledge payload.
    #[deku(id = "2u8")]
    ValidationAck(#[deku(ctx = "cam")] Ack),
    /// Execution acknowledge payload.
    #[deku(id = "3u8")]
    ExecAck(#[deku(ctx = "cam")] Ack),
    /// Query acknowledge payload.
    #[deku(id = "4u8")]
    QueryAck(QueryAck),
}

impl CommandPayload {
    /// Selects the sub-payload layout from the CAM word and header bits.
    /// An acknowledge CAM selects validation/execution/query by its ack-V,
    /// ack-S flags; an acknowledge with no flag set parses as an execution
    /// acknowledge, which carries no body unless the W/E bits say so.
    fn discriminant(cam: &Cam, packet_header: &PacketHeader) -> u8 {
        match cam {
            Cam::Control(_) => {
                if packet_header.is_cancellation_packet().unwrap_or(false) {
                    1
                } else {
                    0
                }
            }
            Cam::Ack(a) => {
                if a.ack_state() {
                    4
                } else if a.ack_validation() {
                    2
                } else {
                    3
                }
            }
        }
    }

    /// Size of the sub-payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        match self {
            CommandPayload::Control(p) => p.size_words(),
            CommandPayload::Cancellation(p) => p.size_words(),
            CommandPayload::ValidationAck(p) | CommandPayload::ExecAck(p) => p.size_words(),
            CommandPayload::QueryAck(p) => p.size_words(),
        }
    }

    /// Gets a reference to the control payload.
    ///
    /// # Errors
    /// Fails when run on a non-control command packet.
    pub fn control(&self) -> Result<&Control, VrtError> {
        match self {
            CommandPayload::Control(p) => Ok(p),
            _ => Err(VrtError::ControlOnly),
        }
    }
    /// Gets a mutable reference to the control payload.
    ///
    /// # Errors
    /// Fails when run on a non-control command packet.
    pub fn control_mut(&mut self) -> Result<&mut Control, VrtError> {
        match self {
            CommandPayload::Control(p) => Ok(p),
            _ => Err(VrtError::ControlOnly),
        }
    }

    /// Gets a reference to the cancellation payload.
    ///
    /// # Errors
    /// Fails when run on a non-cancellation command packet.
    pub fn cancellation(&self) -> Result<&Cancellation, VrtError> {
        match self {
            CommandPayload::Cancellation(p) => Ok(p),
            _ => Err(VrtError::CancellationOnly),
        }
    }
    /// Gets a mutable reference to the cancellation payload.
    ///
    /// # Errors
    /// Fails when run on a non-cancellation command packet.
    pub fn cancellation_mut(&mut self) -> Result<&mut Cancellation, VrtError> {
        match self {
            CommandPayload::Cancellation(p) => Ok(p),
            _ => Err(VrtError::CancellationOnly),
        }
    }

    /// Gets a reference to the validation or execution acknowledge
    /// payload.
    ///
    /// # Errors
    /// Fails when run on a non-acknowledge command packet.
    pub fn ack(&self) -> Result<&Ack, VrtError> {
        match self {
            CommandPayload::ValidationAck(p) | CommandPayload::ExecAck(p) => Ok(p),
            _ => Err(VrtError::AckOnly),
        }
    }
    /// Gets a mutable reference to the validation or execution acknowledge
    /// payload.
    ///
    /// # Errors
    /// Fails when run on a non-acknowledge command packet.
    pub fn ack_mut(&mut self) -> Result<&mut Ack, VrtError> {
        match self {
            CommandPayload::ValidationAck(p) | CommandPayload::ExecAck(p) => Ok(p),
            _ => Err(VrtError::AckOnly),
        }
    }

    /// Gets a reference to the query acknowledge payload.
    ///
    /// # Errors
    /// Fails when run on a non-query-acknowledge command packet.
    pub fn query_ack(&self) -> Result<&QueryAck, VrtError> {
        match self {
            CommandPayload::QueryAck(p) => Ok(p),
            _ => Err(VrtError::QueryAckOnly),
        }
    }
    /// Gets a mutable reference to the query acknowledge payload.
    ///
    /// # Errors
    /// Fails when run on a non-query-acknowledge command packet.
    pub fn query_ack_mut(&mut self) -> Result<&mut QueryAck, VrtError> {
        match self {
            CommandPayload::QueryAck(p) => Ok(p),
            _ => Err(VrtError::QueryAckOnly),
        }
    }
}

impl Command {
    /// Creates a control command payload.
    pub fn new_control() -> Command {
        Command {
            cam: Cam::Control(ControlCam::default()),
            message_id: 0,
            controllee_id: None,
            controllee_uuid: None,
            controller_id: None,
            controller_uuid: None,
            payload: CommandPayload::Control(Control::new()),
        }
    }

    /// Creates a cancellation command payload.
    pub fn new_cancellation() -> Command {
        Command {
            payload: CommandPayload::Cancellation(Cancellation::new()),
            ..Command::new_control()
        }
    }

    fn new_ack_with(cam: AcknowledgeCam, payload: CommandPayload) -> Command {
        Command {
            cam: Cam::Ack(cam),
            message_id: 0,
            controllee_id: None,
            controllee_uuid: None,
            controller_id: None,
            controller_uuid: None,
            payload,
        }
    }

    /// Creates a validation acknowledge payload.
    pub fn new_validation_ack() -> Command {
        let mut cam = AcknowledgeCam::default();
        cam.set_ack_validation();
        Command::new_ack_with(cam, CommandPayload::ValidationAck(Ack::new()))
    }

    /// Creates an execution acknowledge payload.
    pub fn new_exec_ack() -> Command {
        let mut cam = AcknowledgeCam::default();
        cam.set_ack_execution();
        Command::new_ack_with(cam, CommandPayload::ExecAck(Ack::new()))
    }

    /// Creates a query acknowledge payload.
    pub fn new_query_ack() -> Command {
        let mut cam = AcknowledgeCam::default();
        cam.set_ack_state();
        Command::new_ack_with(cam, CommandPayload::QueryAck(QueryAck::new()))
    }

    /// Gets the CAM word.
    pub fn cam(&self) -> &Cam {
        &self.cam
    }
    /// Gets the CAM word mutably. Switching a CAM between control and
    /// acknowledge directions without also replacing the sub-payload
    /// produces a packet that will not parse back as written.
    pub fn cam_mut(&mut self) -> &mut Cam {
        &mut self.cam
    }

    /// Gets the message identifier.
    pub fn message_id(&self) -> u32 {
        self.message_id
    }
    /// Sets the message identifier.
    pub fn set_message_id(&mut self, message_id: u32) {
        self.message_id = message_id;
    }

    /// Gets the 32-bit controllee identifier.
    pub fn controllee_id(&self) -> Option<u32> {
        self.controllee_id
    }
    /// Sets the 32-bit controllee identifier, updating the CAM enable and
    /// format bits. `None` removes the field.
    ///
    /// # Errors
    /// Fails with [`VrtError::IdFormatConflict`] while the UUID form is
    /// set.
    pub fn set_controllee_id(&mut self, id: Option<u32>) -> Result<(), VrtError> {
        if self.controllee_uuid.is_some() {
            return Err(VrtError::IdFormatConflict);
        }
        self.controllee_id = id;
        let cam = self.cam.common_mut();
        cam.set_controllee_format(IdentifierFormat::Word);
        if id.is_some() {
            cam.enable_controllee();
        } else {
            cam.disable_controllee();
        }
        Ok(())
    }

    /// Gets the 128-bit controllee UUID.
    pub fn controllee_uuid(&self) -> Option<u128> {
        self.controllee_uuid
    }
    /// Sets the 128-bit controllee UUID, updating the CAM enable and
    /// format bits. `None` removes the field.
    ///
    /// # Errors
    /// Fails with [`VrtError::IdFormatConflict`] while the word form is
    /// set.
    pub fn set_controllee_uuid(&mut self, uuid: Option<u128>) -> Result<(), VrtError> {
        if self.controllee_id.is_some() {
            return Err(VrtError::IdFormatConflict);
        }
        self.controllee_uuid = uuid;
        let cam = self.cam.common_mut();
        if uuid.is_some() {
            cam.set_controllee_format(IdentifierFormat::Uuid);
            cam.enable_controllee();
        } else {
            cam.set_controllee_format(IdentifierFormat::Word);
            cam.disable_controllee();
        }
        Ok(())
    }

    /// Gets the 32-bit controller identifier.
    pub fn controller_id(&self) -> Option<u32> {
        self.controller_id
    }
    /// Sets the 32-bit controller identifier, updating the CAM enable and
    /// format bits. `None` removes the field.
    ///
    /// # Errors
    /// Fails with [`VrtError::IdFormatConflict`] while the UUID form is
    /// set.
    pub fn set_controller_id(&mut self, id: Option<u32>) -> Result<(), VrtError> {
        if self.controller_uuid.is_some() {
            return Err(VrtError::IdFormatConflict);
        }
        self.controller_id = id;
        let cam = self.cam.common_mut();
        cam.set_controller_format(IdentifierFormat::Word);
        if id.is_some() {
            cam.enable_controller();
        } else {
            cam.disable_controller();
        }
        Ok(())
    }

    /// Gets the 128-bit controller UUID.
    pub fn controller_uuid(&self) -> Option<u128> {
        self.controller_uuid
    }
    /// Sets the 128-bit controller UUID, updating the CAM enable and
    /// format bits. `None` removes the field.
    ///
    /// # Errors
    /// Fails with [`VrtError::IdFormatConflict`] while the word form is
    /// set.
    pub fn set_controller_uuid(&mut self, uuid: Option<u128>) -> Result<(), VrtError> {
        if self.controller_id.is_some() {
            return Err(VrtError::IdFormatConflict);
        }
        self.controller_uuid = uuid;
        let cam = self.cam.common_mut();
        if uuid.is_some() {
            cam.set_controller_format(IdentifierFormat::Uuid);
            cam.enable_controller();
        } else {
            cam.set_controller_format(IdentifierFormat::Word);
            cam.disable_controller();
        }
        Ok(())
    }

    /// Gets a reference to the direction-specific sub-payload.
    pub fn payload(&self) -> &CommandPayload {
        &self.payload
    }
    /// Gets a mutable reference to the direction-specific sub-payload.
    pub fn payload_mut(&mut self) -> &mut CommandPayload {
        &mut self.payload
    }

    /// Size of the command payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        let mut words = self.cam.size_words() + 1;
        if self.controllee_id.is_some() {
            words += 1;
        } else if self.controllee_uuid.is_some() {
            words += 4;
        }
        if self.controller_id.is_some() {
            words += 1;
        } else if self.controller_uuid.is_some() {
            words += 4;
        }
        words + self.payload.size_words()
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::new_control()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cam)?;
        writeln!(f, "Message ID: {:#x}", self.message_id)?;
        if let Some(id) = self.controllee_id {
            writeln!(f, "Controllee ID: {id:#x}")?;
        }
        if let Some(uuid) = self.controllee_uuid {
            writeln!(f, "Controllee UUID: {uuid:#x}")?;
        }
        if let Some(id) = self.controller_id {
            writeln!(f, "Controller ID: {id:#x}")?;
        }
        if let Some(uuid) = self.controller_uuid {
            writeln!(f, "Controller UUID: {uuid:#x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cif0::Cif0Manipulators;

    #[test]
    fn control_fields_set_cif_bits() {
        let mut command = Command::new_control();
        command.set_message_id(123);
        let control = command.payload_mut().control_mut().unwrap();
        assert_eq!(Cif0Manipulators::cif0(control).as_u32(), 0);
        control.set_rf_ref_freq_hz(Some(100e6));
        assert_eq!(Cif0Manipulators::cif0(control).as_u32(), 0x0800_0000);
        control.set_bandwidth_hz(Some(8e6));
        assert_eq!(Cif0Manipulators::cif0(control).as_u32(), 0x2800_0000);
    }

    #[test]
    fn identifier_formats_are_exclusive() {
        let mut command = Command::new_control();
        command.set_controllee_id(Some(42)).unwrap();
        assert!(matches!(
            command.set_controllee_uuid(Some(0xDEAD)),
            Err(VrtError::IdFormatConflict)
        ));
        command.set_controllee_id(None).unwrap();
        command.set_controllee_uuid(Some(0xDEAD)).unwrap();
        assert!(command.cam().controllee_uuid_included());
        assert_eq!(command.size_words(), 1 + 1 + 4 + 1);
    }

    #[test]
    fn ack_constructors_select_payloads() {
        assert!(matches!(
            Command::new_validation_ack().payload(),
            CommandPayload::ValidationAck(_)
        ));
        assert!(matches!(
            Command::new_exec_ack().payload(),
            CommandPayload::ExecAck(_)
        ));
        assert!(matches!(
            Command::new_query_ack().payload(),
            CommandPayload::QueryAck(_)
        ));
    }
}
