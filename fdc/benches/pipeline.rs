// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use fdc::{Decoder, Encoder, FdcResult, measure_entropy};
use std::{hint::black_box, time::Duration};

const SMALL: usize = 4 * 1024;
const LARGE: usize = 4 * 1024 * 1024;

fn text(len: usize) -> Vec<u8> {
    b"Call me Ishmael. Some years ago, never mind how long precisely, having little money. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn round_trip(encoder: &Encoder, decoder: &Decoder, raw: &[u8]) -> FdcResult<usize> {
    let encoded = encoder.encode("moby-dick.txt", raw)?;
    Ok(decoder.decode(&encoded.container)?.data.len())
}

fn bench_entropy(c: &mut Criterion) {
    let raw = text(LARGE);
    let mut group = c.benchmark_group("entropy");
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("measure_entropy 4MiB", |b| {
        b.iter(|| measure_entropy(black_box(&raw)))
    });
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let encoder = Encoder::builder().fixed_timestamp(0).build();
    let decoder = Decoder::default();

    let mut group = c.benchmark_group("round trip");
    for len in [SMALL, LARGE] {
        let raw = text(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("encode+decode {len} bytes"), |b| {
            b.iter(|| round_trip(&encoder, &decoder, black_box(&raw)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let raw = text(LARGE);
    let encoded = Encoder::default().encode("moby-dick.txt", &raw).unwrap();
    let decoder = Decoder::default();
    c.bench_function("decode 4MiB", |b| {
        b.iter(|| decoder.decode(black_box(&encoded.container)).unwrap())
    });
}

criterion_group!(benches, bench_entropy, bench_decode);

criterion_group!(
    name = long_benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = bench_round_trip
);

criterion_main!(benches, long_benches);
