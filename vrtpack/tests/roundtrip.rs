// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Round-trip checks: everything that packs must unpack to an equal
//! packet, and the serialized length must match `bytes_required()`.

use approx::assert_relative_eq;
use vrtpack::command_prelude::*;
use vrtpack::prelude::*;
use vrtpack::{
    AgcMode, ContextAssociationLists, DeviceIdentifier, Ephemeris, Gain, Geolocation, GpsAscii,
    Spectrum, SpectrumType, StateEventIndicators, Threshold, Trailer,
};

fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pack_and_unpack(packet: &mut VrtPacket) -> VrtPacket {
    let needed = {
        packet.update_packet_size();
        packet.bytes_required()
    };
    let mut buf = vec![0u8; needed];
    let written = packet.pack_into(&mut buf).unwrap();
    assert_eq!(written, needed);
    assert!(VrtPacket::matches(&buf));
    let parsed = VrtPacket::unpack(&buf).unwrap();
    assert_eq!(&parsed, packet);
    parsed
}

#[test]
fn signal_data_with_trailer() {
    log_init();
    let mut packet = VrtPacket::new_signal_data_packet();
    packet.set_stream_id(Some(0xDEAD_BEEF));
    packet
        .set_integer_timestamp(Some(1_700_000_000), Tsi::Utc)
        .unwrap();
    packet
        .set_fractional_timestamp(Some(123_456_789_000), Tsf::RealTimePs)
        .unwrap();
    packet.set_signal_payload(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let mut trailer = Trailer::default();
    trailer.set_valid_data(true);
    trailer.set_over_range(false);
    packet.set_trailer(Some(trailer)).unwrap();

    let parsed = pack_and_unpack(&mut packet);
    assert_eq!(parsed.signal_payload().unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(parsed.trailer().unwrap().valid_data(), Some(true));
    assert_eq!(parsed.trailer().unwrap().over_range(), Some(false));
    assert_eq!(parsed.trailer().unwrap().sample_loss(), None);
}

#[test]
fn signal_data_without_stream_id() {
    log_init();
    let mut packet = VrtPacket::new_signal_data_packet();
    packet.set_stream_id(None);
    packet.set_signal_payload(&[9, 9, 9, 9]).unwrap();
    assert_eq!(packet.bytes_required(), 8);
    let parsed = pack_and_unpack(&mut packet);
    assert_eq!(parsed.header().packet_type(), PacketType::SignalData);
}

#[test]
fn context_with_class_id_and_every_cif0_field() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet.set_stream_id(Some(7));
    packet.set_class_id(Some(ClassIdentifier::new(0x12_3456, 0x1111, 0x2222)));
    let context = packet.payload_mut().context_mut().unwrap();

    context.set_reference_point_id(Some(0xCAFE));
    context.set_bandwidth_hz(Some(8e6));
    context.set_if_ref_freq_hz(Some(70e6));
    context.set_rf_ref_freq_hz(Some(2.4e9));
    context.set_rf_ref_freq_offset_hz(Some(-10e3));
    context.set_if_band_offset_hz(Some(5e3));
    context.set_reference_level_dbm(Some(-20.5));
    context.set_gain(Some(Gain::new(30.0, -2.5)));
    context.set_over_range_count(Some(3));
    context.set_sample_rate_sps(Some(10e6));
    context.set_timestamp_adjustment_fs(Some(1_000_000));
    context.set_timestamp_cal_time(Some(1_600_000_000));
    context.set_temperature_c(Some(-40.25));
    context.set_device_id(Some(DeviceIdentifier::new(0xAB_CDEF, 0x42)));

    let mut indicators = StateEventIndicators::default();
    indicators.set_calibrated_time(true);
    indicators.set_agc_mgc(AgcMode::Agc);
    indicators.set_sample_loss(false);
    context.set_state_indicators(Some(indicators));

    let mut gps = Geolocation::default();
    gps.set_manufacturer_oui(0x00_1234);
    gps.set_latitude_deg(Some(37.402));
    gps.set_longitude_deg(Some(-122.048));
    gps.set_altitude_m(Some(30.5));
    gps.set_speed_over_ground_mps(Some(2.75));
    context.set_formatted_gps(Some(gps));

    let mut ephemeris = Ephemeris::default();
    ephemeris.set_position_x_m(Some(-2700000.0));
    ephemeris.set_position_y_m(Some(-4300000.0));
    ephemeris.set_position_z_m(Some(3800000.0));
    ephemeris.set_velocity_dx_mps(Some(-1.5));
    context.set_ecef_ephemeris(Some(ephemeris));

    context.set_ephemeris_ref_id(Some(99));
    context.set_gps_ascii(Some(GpsAscii::new(0x9A_BCDE, "$GPRMC,081836,A")));

    let mut lists = ContextAssociationLists::default();
    lists.set_source_list(vec![1, 2]).unwrap();
    lists.set_system_list(vec![3]).unwrap();
    lists
        .set_async_channel_list(vec![10, 20, 30], Some(vec![101, 102, 103]))
        .unwrap();
    context.set_context_association_lists(Some(lists));

    let parsed = pack_and_unpack(&mut packet);
    let context = parsed.payload().context().unwrap();
    assert_eq!(context.bandwidth_hz(), Some(8e6));
    assert_eq!(context.rf_ref_freq_offset_hz(), Some(-10e3));
    assert_relative_eq!(context.reference_level_dbm().unwrap(), -20.5);
    assert_relative_eq!(context.temperature_c().unwrap(), -40.25);
    assert_eq!(
        context.state_indicators().unwrap().agc_mgc(),
        Some(AgcMode::Agc)
    );
    assert_eq!(context.state_indicators().unwrap().detected_signal(), None);
    let gps = context.formatted_gps().unwrap();
    assert_relative_eq!(gps.latitude_deg().unwrap(), 37.402, epsilon = 1e-6);
    assert_relative_eq!(gps.longitude_deg().unwrap(), -122.048, epsilon = 1e-6);
    assert_eq!(gps.heading_angle_deg(), None);
    assert_eq!(
        context.gps_ascii().unwrap().sentence(),
        "$GPRMC,081836,A"
    );
    let lists = context.context_association_lists().unwrap();
    assert_eq!(lists.async_channel_list(), &[10, 20, 30]);
    assert_eq!(lists.async_channel_tag_list(), Some(&[101, 102, 103][..]));
}

#[test]
fn context_with_cif1_cif2_cif3_fields() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    let context = packet.payload_mut().context_mut().unwrap();

    context.set_phase_offset_deg(Some(12.5));
    context.set_threshold(Some(Threshold::new(-60.0, -55.0)));
    context.set_aux_frequency_hz(Some(1.57542e9));
    context.set_aux_gain(Some(Gain::new(10.0, 0.0)));
    let mut spectrum = Spectrum::default();
    spectrum.set_spectrum_type(SpectrumType::LogPowerDb);
    spectrum.set_num_transform_points(1024);
    spectrum.set_resolution_hz(1000.0);
    spectrum.set_f1_index(-512);
    spectrum.set_f2_index(511);
    context.set_spectrum(Some(spectrum));
    context.set_discrete_io_32(Some(0xAAAA_5555));

    context.set_track_id(Some(0x1010));
    context.set_controllee_uuid(Some(0xFEED_FACE_DEAD_BEEF_0123_4567_89AB_CDEF));

    context.set_rise_time_ps(Some(2_500));
    context.set_air_temperature_c(Some(21.5));
    context.set_network_id(Some(0x55));

    assert!(context.cif1().is_some());
    assert!(context.cif2().is_some());
    assert!(context.cif3().is_some());

    let parsed = pack_and_unpack(&mut packet);
    let context = parsed.payload().context().unwrap();
    assert_relative_eq!(context.phase_offset_deg().unwrap(), 12.5);
    assert_relative_eq!(context.threshold().unwrap().stage_2_db(), -55.0);
    assert_eq!(context.spectrum().unwrap().num_transform_points(), 1024);
    assert_eq!(context.spectrum().unwrap().f1_index(), -512);
    assert_eq!(
        context.controllee_uuid().copied(),
        Some(0xFEED_FACE_DEAD_BEEF_0123_4567_89AB_CDEF)
    );
    assert_eq!(context.rise_time_ps().copied(), Some(2_500));
    assert_relative_eq!(context.air_temperature_c().unwrap(), 21.5);
}

#[test]
fn clearing_a_field_shrinks_the_packet() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    let context = packet.payload_mut().context_mut().unwrap();
    context.set_bandwidth_hz(Some(1e6));
    context.set_sample_rate_sps(Some(2e6));
    packet.update_packet_size();
    let full = packet.bytes_required();

    let context = packet.payload_mut().context_mut().unwrap();
    context.set_bandwidth_hz(None);
    assert_eq!(context.bandwidth_hz(), None);
    packet.update_packet_size();
    assert_eq!(packet.bytes_required(), full - 8);
    pack_and_unpack(&mut packet);
}

#[test]
fn control_packet_with_identifiers() {
    log_init();
    let mut packet = VrtPacket::new_control_packet();
    packet.set_stream_id(Some(0x100));
    let command = packet.payload_mut().command_mut().unwrap();
    command.set_message_id(0x31416);
    command.set_controllee_id(Some(0x10)).unwrap();
    command.set_controller_id(Some(0x20)).unwrap();
    {
        let cam = command.cam_mut().control_mut().unwrap();
        cam.set_action_mode(ActionMode::DryRun);
        cam.set_req_execution();
        cam.set_req_warnings();
        cam.set_partial_permitted();
    }
    let control = command.payload_mut().control_mut().unwrap();
    control.set_bandwidth_hz(Some(5e6));
    control.set_sample_rate_sps(Some(6.25e6));

    let parsed = pack_and_unpack(&mut packet);
    let command = parsed.payload().command().unwrap();
    assert_eq!(command.message_id(), 0x31416);
    assert_eq!(command.controllee_id(), Some(0x10));
    assert_eq!(command.controller_id(), Some(0x20));
    let cam = command.cam().control().unwrap();
    assert_eq!(cam.action_mode(), ActionMode::DryRun);
    assert!(cam.req_execution());
    assert!(cam.req_warnings());
    let control = command.payload().control().unwrap();
    assert_eq!(control.bandwidth_hz(), Some(5e6));
}

#[test]
fn cancellation_packet_names_fields_only() {
    log_init();
    let mut packet = VrtPacket::new_cancellation_packet();
    let command = packet.payload_mut().command_mut().unwrap();
    command.set_message_id(0xC0FFEE);
    let cancel = command.payload_mut().cancellation_mut().unwrap();
    cancel.cif0_mut().set_bandwidth();
    cancel.cif0_mut().set_sample_rate();

    // header + sid + cam + message id + cif0
    assert_eq!(packet.bytes_required(), 4 * 5);
    let parsed = pack_and_unpack(&mut packet);
    let cancel = parsed
        .payload()
        .command()
        .unwrap()
        .payload()
        .cancellation()
        .unwrap();
    assert!(cancel.cif0().bandwidth());
    assert!(cancel.cif0().sample_rate());
    assert!(!cancel.cif0().gain());
}

#[test]
fn exec_ack_with_warning_and_error_responses() {
    log_init();
    let mut packet = VrtPacket::new_exec_ack_packet();
    let command = packet.payload_mut().command_mut().unwrap();
    command.set_message_id(0xAC40);
    {
        let cam = command.cam_mut().ack_mut().unwrap();
        cam.set_ack_warnings();
        cam.set_ack_errors();
        cam.set_scheduled_or_executed();
        cam.set_timing_control(TimestampControlMode::TimingIssues);
    }
    let ack = command.payload_mut().ack_mut().unwrap();
    let mut warn = WarningErrorFields::default();
    warn.set_parameter_out_of_range();
    Cif0AckManipulators::set_bandwidth(ack, AckLevel::Warning, Some(warn));
    let mut err = WarningErrorFields::default();
    err.set_device_failure();
    err.set_field_not_executed();
    Cif0AckManipulators::set_sample_rate(ack, AckLevel::Error, Some(err));

    let parsed = pack_and_unpack(&mut packet);
    let command = parsed.payload().command().unwrap();
    let cam = command.cam().ack().unwrap();
    assert!(cam.scheduled_or_executed());
    assert_eq!(
        cam.timing_control(),
        Some(TimestampControlMode::TimingIssues)
    );
    let ack = command.payload().ack().unwrap();
    let (level, warn) = Cif0AckManipulators::bandwidth(ack).unwrap();
    assert_eq!(level, AckLevel::Warning);
    assert!(warn.parameter_out_of_range());
    let (level, err) = Cif0AckManipulators::sample_rate(ack).unwrap();
    assert_eq!(level, AckLevel::Error);
    assert!(err.device_failure());
    assert_eq!(Cif0AckManipulators::gain(ack), None);
}

#[test]
fn query_ack_reports_state() {
    log_init();
    let mut packet = VrtPacket::new_query_ack_packet();
    let command = packet.payload_mut().command_mut().unwrap();
    let query = command.payload_mut().query_ack_mut().unwrap();
    query.set_bandwidth_hz(Some(40e6));
    query.set_rf_ref_freq_hz(Some(5.8e9));

    let parsed = pack_and_unpack(&mut packet);
    let query = parsed
        .payload()
        .command()
        .unwrap()
        .payload()
        .query_ack()
        .unwrap();
    assert_eq!(query.bandwidth_hz(), Some(40e6));
    assert_eq!(query.rf_ref_freq_hz(), Some(5.8e9));
}

#[test]
fn validation_ack_round_trips_empty() {
    log_init();
    let mut packet = VrtPacket::new_validation_ack_packet();
    // No warnings or errors recorded: just CAM + message ID
    assert_eq!(packet.bytes_required(), 4 * 4);
    pack_and_unpack(&mut packet);
}

#[test]
fn fixed_point_quantities_survive_within_one_lsb() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    let context = packet.payload_mut().context_mut().unwrap();
    let bandwidth = 12_345_678.901;
    let level = -73.33_f32;
    context.set_bandwidth_hz(Some(bandwidth));
    context.set_reference_level_dbm(Some(level));

    let parsed = pack_and_unpack(&mut packet);
    let context = parsed.payload().context().unwrap();
    // One LSB is 2^-20 Hz for bandwidth, 2^-7 dBm for reference level
    assert_relative_eq!(
        context.bandwidth_hz().unwrap(),
        bandwidth,
        epsilon = 1.0 / (1 << 20) as f64
    );
    assert_relative_eq!(
        context.reference_level_dbm().unwrap(),
        level,
        epsilon = 1.0 / 128.0
    );
}

#[test]
fn default_geolocation_is_fully_unspecified_after_round_trip() {
    log_init();
    let mut packet = VrtPacket::new_context_packet();
    packet
        .payload_mut()
        .context_mut()
        .unwrap()
        .set_formatted_ins(Some(Geolocation::default()));
    let parsed = pack_and_unpack(&mut packet);
    let ins = parsed.payload().context().unwrap().formatted_ins().unwrap();
    assert_eq!(ins.latitude_deg(), None);
    assert_eq!(ins.track_angle_deg(), None);
    assert_eq!(ins.integer_timestamp(), None);
    assert_eq!(ins.fractional_timestamp(), None);
}
