//! BER encoding/decoding benchmarks.
//!
//! Covers the hot paths: OIDs, single values, and whole community messages.

use std::hint::black_box;

use bytes::Bytes;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use snmp_ber::{
    CommunityMessage, Counter64, Integer, OctetString, Oid, Pdu, SnmpObject, TimeTicks, VarBind,
};
use snmp_ber::error::ErrorStatus;

fn common_oids() -> Vec<(&'static str, Oid)> {
    vec![
        ("sysDescr", Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0])),
        ("ifIndex", Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 1])),
        (
            "long_oid",
            Oid::from_slice(&[1, 3, 6, 1, 4, 1, 9, 9, 42, 1, 2, 3, 4, 5, 6, 7]),
        ),
    ]
}

fn bench_oid(c: &mut Criterion) {
    let mut group = c.benchmark_group("oid");

    for (name, oid) in common_oids() {
        group.bench_with_input(BenchmarkId::new("to_ber", name), &oid, |b, oid| {
            b.iter(|| black_box(oid.to_ber()))
        });

        let encoded = oid.to_ber();
        group.bench_with_input(BenchmarkId::new("from_ber", name), &encoded, |b, data| {
            b.iter(|| black_box(Oid::from_ber(data, 0)))
        });

        let text = oid.to_string();
        group.bench_with_input(BenchmarkId::new("parse", name), &text, |b, s| {
            b.iter(|| black_box(Oid::parse(s)))
        });
    }

    group.finish();
}

fn bench_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("value");

    let values: Vec<(&str, SnmpObject)> = vec![
        ("integer", Integer::new(-123_456).into()),
        ("big_integer", Integer::new(u64::MAX).into()),
        ("counter64", Counter64::new(u64::MAX - 1).into()),
        ("octet_string", OctetString::from("Linux router 5.15.0").into()),
    ];

    for (name, value) in values {
        group.bench_with_input(BenchmarkId::new("encode", name), &value, |b, v| {
            b.iter(|| black_box(v.encode().unwrap()))
        });

        let encoded = value.encode().unwrap();
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, data| {
            b.iter(|| black_box(SnmpObject::decode_bytes(data.clone())))
        });
    }

    group.finish();
}

fn response_message(count: usize) -> CommunityMessage {
    let varbinds = (0..count)
        .map(|i| {
            let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10, i as u32 + 1]);
            VarBind::new(oid, TimeTicks::new(i as u32 * 1000))
        })
        .collect();
    CommunityMessage::v2c("public", Pdu::response(1, ErrorStatus::NoError, 0, varbinds))
}

fn bench_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("message");

    for count in [1usize, 10, 50] {
        let msg = response_message(count);
        let encoded: Bytes = msg.encode().unwrap();
        group.throughput(Throughput::Bytes(encoded.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", count), &msg, |b, msg| {
            b.iter(|| black_box(msg.encode().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode", count), &encoded, |b, data| {
            b.iter(|| black_box(CommunityMessage::decode(data.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_oid, bench_values, bench_message);
criterion_main!(benches);
