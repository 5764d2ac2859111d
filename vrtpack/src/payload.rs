// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The payload enumeration: what follows a packet's prologue, selected by
the packet type code in the header.
*/

use deku::prelude::*;

use crate::command::Command;
use crate::context::Context;
use crate::packet_header::{PacketHeader, PacketType};
use crate::signal_data::SignalData;
use crate::VrtError;

/// Generic payload enumeration. Use the accessor helpers to reach the
/// packet-type-specific inner payload.
///
/// # Example
/// ```
/// use vrtpack::prelude::*;
/// # fn main() -> Result<(), VrtError> {
/// let mut packet = VrtPacket::new_context_packet();
/// let context = packet.payload_mut().context_mut()?;
/// context.set_bandwidth_hz(Some(8e6));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, packet_header: &PacketHeader",
    id = "packet_header.packet_type()"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::large_enum_variant)]
pub enum Payload {
    /// Context information.
    #[deku(id = "PacketType::Context | PacketType::ExtensionContext")]
    Context(Context),
    /// Command (control/cancellation/acknowledge) information.
    #[deku(id = "PacketType::Command | PacketType::ExtensionCommand")]
    Command(#[deku(ctx = "packet_header")] Command),
    /// Opaque signal data words.
    #[deku(id_pat = "_")]
    SignalData(#[deku(ctx = "packet_header")] SignalData),
}

impl Payload {
    /// Gets a reference to the signal data payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a signal data packet.
    pub fn signal_data(&self) -> Result<&SignalData, VrtError> {
        match self {
            Payload::SignalData(p) => Ok(p),
            _ => Err(VrtError::SignalDataOnly),
        }
    }
    /// Gets a mutable reference to the signal data payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a signal data packet.
    pub fn signal_data_mut(&mut self) -> Result<&mut SignalData, VrtError> {
        match self {
            Payload::SignalData(p) => Ok(p),
            _ => Err(VrtError::SignalDataOnly),
        }
    }

    /// Gets a reference to the context payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a context packet.
    pub fn context(&self) -> Result<&Context, VrtError> {
        match self {
            Payload::Context(p) => Ok(p),
            _ => Err(VrtError::ContextOnly),
        }
    }
    /// Gets a mutable reference to the context payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a context packet.
    pub fn context_mut(&mut self) -> Result<&mut Context, VrtError> {
        match self {
            Payload::Context(p) => Ok(p),
            _ => Err(VrtError::ContextOnly),
        }
    }

    /// Gets a reference to the command payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a command packet.
    pub fn command(&self) -> Result<&Command, VrtError> {
        match self {
            Payload::Command(p) => Ok(p),
            _ => Err(VrtError::CommandOnly),
        }
    }
    /// Gets a mutable reference to the command payload.
    ///
    /// # Errors
    /// Fails when run on a packet other than a command packet.
    pub fn command_mut(&mut self) -> Result<&mut Command, VrtError> {
        match self {
            Payload::Command(p) => Ok(p),
            _ => Err(VrtError::CommandOnly),
        }
    }

    /// Size of the payload in 32-bit words.
    pub fn size_words(&self) -> u16 {
        match self {
            Payload::SignalData(p) => p.size_words(),
            Payload::Context(p) => p.size_words(),
            Payload::Command(p) => p.size_words(),
        }
    }
}
