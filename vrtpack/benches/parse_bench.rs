// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use vrtpack::prelude::*;
use vrtpack::{DeviceIdentifier, Gain, Geolocation};

fn context_packet_bytes() -> Vec<u8> {
    let mut packet = VrtPacket::new_context_packet();
    packet.set_stream_id(Some(1));
    let context = packet.payload_mut().context_mut().unwrap();
    context.set_bandwidth_hz(Some(8e6));
    context.set_rf_ref_freq_hz(Some(2.4e9));
    context.set_sample_rate_sps(Some(10e6));
    context.set_gain(Some(Gain::new(20.0, 5.0)));
    context.set_device_id(Some(DeviceIdentifier::new(0x12_3456, 7)));
    context.set_formatted_gps(Some(Geolocation::default()));
    packet.to_packed_bytes().unwrap()
}

fn signal_data_packet_bytes() -> Vec<u8> {
    let mut packet = VrtPacket::new_signal_data_packet();
    packet.set_stream_id(Some(2));
    packet.set_signal_payload(&vec![0u8; 4096]).unwrap();
    packet.to_packed_bytes().unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let context_bytes = context_packet_bytes();
    c.bench_function("parse context packet", |b| {
        b.iter(|| VrtPacket::unpack(&context_bytes).unwrap())
    });

    let signal_bytes = signal_data_packet_bytes();
    c.bench_function("parse 4 KiB signal data packet", |b| {
        b.iter(|| VrtPacket::unpack(&signal_bytes).unwrap())
    });

    c.bench_function("pack context packet", |b| {
        let mut packet = VrtPacket::new_context_packet();
        packet
            .payload_mut()
            .context_mut()
            .unwrap()
            .set_bandwidth_hz(Some(8e6));
        let mut buf = [0u8; 64];
        b.iter(|| packet.pack_into(&mut buf).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
