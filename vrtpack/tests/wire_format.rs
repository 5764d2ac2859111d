// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Byte-exact wire format checks: every multi-byte quantity lands
//! big-endian at the offset the standard gives for it.

use vrtpack::command_prelude::*;
use vrtpack::prelude::*;
use vrtpack::{DataItemFormat, DataSampleType, Geolocation, PackingMethod, PayloadFormat};

fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn context_change_indicator_only() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_context_changed(true);
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 12);
    assert_eq!(&bytes[8..12], &[0x80, 0x00, 0x00, 0x00]);
}

#[test]
fn reference_point_id_is_big_endian() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_reference_point_id(Some(0x1234_5678));
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[8..12], &[0x40, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[12..16], &[0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn bandwidth_one_hertz() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_bandwidth_hz(Some(1.0));
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 20);
    // 1 Hz in the 64-bit radix-20 format
    assert_eq!(
        &bytes[12..20],
        &[0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00]
    );
}

#[test]
fn formatted_gps_latitude_max() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    let context = packet.payload_mut().context_mut().unwrap();
    let mut gps = Geolocation::default();
    gps.set_latitude_deg(Some(90.0));
    context.set_formatted_gps(Some(gps));
    context.set_ephemeris_ref_id(Some(0));
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 60);
    // hex(90 << 22) = 0x16800000
    assert_eq!(&bytes[28..32], &[0x16, 0x80, 0x00, 0x00]);
    // Unspecified timestamps serialize as all-ones...
    assert_eq!(&bytes[16..20], &[0xFF; 4]);
    assert_eq!(&bytes[20..28], &[0xFF; 8]);
    // ...and the untouched position subfields as the 0x7FFFFFFF sentinel.
    assert_eq!(&bytes[32..36], &[0x7F, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&bytes[52..56], &[0x7F, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn payload_format_wire_image() {
    log_init();
    let mut format = PayloadFormat::default();
    format.set_packing_method(PackingMethod::LinkEfficient);
    format.set_data_sample_type(DataSampleType::Real);
    format.set_data_item_format(DataItemFormat::Ieee754Single);
    format.set_event_tag_size(1);
    format.set_channel_tag_size(2);
    format.set_item_packing_field_size(4);
    format.set_data_item_size(8);
    format.set_repeat_count(0x1234);
    format.set_vector_size(0x5678);

    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_signal_data_payload_format(Some(format));
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 20);
    assert_eq!(
        &bytes[12..20],
        &[0x8E, 0x12, 0x00, 0xC7, 0x12, 0x33, 0x56, 0x77]
    );

    let parsed = VrtPacket::unpack(&bytes).unwrap();
    let got = parsed
        .payload()
        .context()
        .unwrap()
        .signal_data_payload_format()
        .unwrap();
    assert_eq!(got.packing_method(), PackingMethod::LinkEfficient);
    assert_eq!(got.data_sample_type(), Some(DataSampleType::Real));
    assert_eq!(got.data_item_format(), DataItemFormat::Ieee754Single);
    assert_eq!(got.event_tag_size(), 1);
    assert_eq!(got.channel_tag_size(), 2);
    assert_eq!(got.item_packing_field_size(), 4);
    assert_eq!(got.data_item_size(), 8);
    assert_eq!(got.repeat_count(), 0x1234);
    assert_eq!(got.vector_size(), 0x5678);
}

#[test]
fn control_cam_timing_device() {
    log_init();
    let mut packet = VrtPacket::new_control_packet();
    let command = packet.payload_mut().command_mut().unwrap();
    command.set_controllee_uuid(Some(0x0123_4567_89AB_CDEF)).unwrap();
    {
        let cam = command.cam_mut().control_mut().unwrap();
        cam.set_action_mode(ActionMode::Execute);
        cam.set_timing_control(TimestampControlMode::Device);
    }
    let bytes = packet.to_packed_bytes().unwrap();
    // header + stream ID + CAM + message ID + 128-bit UUID + CIF0
    assert_eq!(bytes.len(), 4 * (1 + 1 + 1 + 1 + 4 + 1));

    let parsed = VrtPacket::unpack(&bytes).unwrap();
    let command = parsed.payload().command().unwrap();
    let cam = command.cam().control().unwrap();
    assert!(cam.controllee_enabled());
    assert_eq!(cam.controllee_format(), IdentifierFormat::Uuid);
    assert_eq!(cam.action_mode(), ActionMode::Execute);
    assert_eq!(cam.timing_control(), Some(TimestampControlMode::Device));
    assert_eq!(command.controllee_uuid(), Some(0x0123_4567_89AB_CDEF));
}

#[test]
fn header_word_layout() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet.header_mut().set_packet_count(5);
    packet
        .set_integer_timestamp(Some(0x1122_3344), Tsi::Gps)
        .unwrap();
    let bytes = packet.to_packed_bytes().unwrap();
    assert_eq!(bytes.len(), 16);
    // type=0100, no class id, TSM coarse (bit 24), TSI=GPS, count=5, size=4
    assert_eq!(&bytes[0..4], &[0x41, 0x85, 0x00, 0x04]);
    assert_eq!(&bytes[8..12], &[0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn negative_frequency_offset_sign_extends() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_if_band_offset_hz(Some(-1.0));
    let bytes = packet.to_packed_bytes().unwrap();
    // -1 Hz in the 64-bit radix-20 format
    assert_eq!(
        &bytes[12..20],
        &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xF0, 0x00, 0x00]
    );
    let parsed = VrtPacket::unpack(&bytes).unwrap();
    assert_eq!(
        parsed.payload().context().unwrap().if_band_offset_hz(),
        Some(-1.0)
    );
}

#[test]
fn gps_ascii_pads_to_word_boundary() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_gps_ascii(Some(vrtpack::GpsAscii::new(0xAB_CDEF, "$GPGGA")));
    let bytes = packet.to_packed_bytes().unwrap();
    // header + sid + cif0 + (oui + count + 2 words of text)
    assert_eq!(bytes.len(), 12 + 16);
    assert_eq!(&bytes[12..16], &[0x00, 0xAB, 0xCD, 0xEF]);
    assert_eq!(&bytes[16..20], &[0x00, 0x00, 0x00, 0x02]);
    assert_eq!(&bytes[20..26], b"$GPGGA");
    assert_eq!(&bytes[26..28], &[0x00, 0x00]);
}
