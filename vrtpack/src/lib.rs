// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![deny(missing_docs)]
#![deny(unstable_features, unused_import_braces, unreachable_pub)]
#![warn(rustdoc::unescaped_backticks)]
#![forbid(unsafe_code)]

mod ack;
mod cam;
mod cif0;
mod cif1;
mod cif2;
mod cif3;
mod cif7;
mod class_id;
mod command;
mod context;
mod context_assoc;
mod control;
mod device_id;
mod enums;
mod ephemeris;
mod errors;
mod gain;
mod geolocation;
mod gps_ascii;
mod packet_header;
mod payload;
mod payload_format;
mod signal_data;
mod spectrum;
mod state_event;
mod threshold;
mod trailer;
mod vrt;
mod warning_error;

// Public exports
pub use crate::ack::{Ack, AckLevel, QueryAck};
pub use crate::cam::{
    AcknowledgeCam, ActionMode, Cam, ControlAckMode, ControlCam, IdentifierFormat,
    TimestampControlMode,
};
pub use crate::cif0::*;
pub use crate::cif1::*;
pub use crate::cif2::*;
pub use crate::cif3::*;
pub use crate::cif7::{Belief, Cif7, Probability};
pub use crate::class_id::ClassIdentifier;
pub use crate::command::{Command, CommandPayload};
pub use crate::context::Context;
pub use crate::context_assoc::ContextAssociationLists;
pub use crate::control::{Cancellation, Control};
pub use crate::device_id::DeviceIdentifier;
pub use crate::enums::{EntrySize, V49StandardCompliance};
pub use crate::ephemeris::Ephemeris;
pub use crate::errors::VrtError;
pub use crate::gain::Gain;
pub use crate::geolocation::Geolocation;
pub use crate::gps_ascii::GpsAscii;
pub use crate::packet_header::*;
pub use crate::payload::Payload;
pub use crate::payload_format::{DataItemFormat, DataSampleType, PackingMethod, PayloadFormat};
pub use crate::signal_data::SignalData;
pub use crate::spectrum::{Spectrum, SpectrumType, WindowTimeDeltaInterpretation};
pub use crate::state_event::{AgcMode, StateEventIndicators};
pub use crate::threshold::Threshold;
pub use crate::trailer::{Ssi, Trailer};
pub use crate::vrt::VrtPacket;
pub use crate::warning_error::WarningErrorFields;

/// Standard imports for the most commonly used structures and traits in
/// the vrtpack crate.
pub mod prelude {
    pub use crate::cif0::{Cif0, Cif0Fields, Cif0Manipulators};
    pub use crate::cif1::{Cif1, Cif1Fields, Cif1Manipulators};
    pub use crate::cif2::{Cif2, Cif2Fields, Cif2Manipulators};
    pub use crate::cif3::{Cif3, Cif3Fields, Cif3Manipulators};
    pub use crate::cif7::Cif7;
    pub use crate::class_id::ClassIdentifier;
    pub use crate::context::Context;
    pub use crate::errors::VrtError;
    pub use crate::packet_header::*;
    pub use crate::payload::Payload;
    pub use crate::signal_data::SignalData;
    pub use crate::vrt::VrtPacket;
    pub use deku::writer::Writer;
    pub use deku::{DekuContainerRead, DekuContainerWrite, DekuReader, DekuWriter};
}

/// Imports for working with command packets: the CAM family, acknowledge
/// levels, and the warning/error manipulator traits.
pub mod command_prelude {
    pub use crate::ack::{Ack, AckLevel, QueryAck};
    pub use crate::cam::{
        AcknowledgeCam, ActionMode, Cam, ControlAckMode, ControlCam, IdentifierFormat,
        TimestampControlMode,
    };
    pub use crate::cif0::Cif0AckManipulators;
    pub use crate::cif1::Cif1AckManipulators;
    pub use crate::cif2::Cif2AckManipulators;
    pub use crate::cif3::Cif3AckManipulators;
    pub use crate::command::{Command, CommandPayload};
    pub use crate::control::{Cancellation, Control};
    pub use crate::warning_error::WarningErrorFields;
}
