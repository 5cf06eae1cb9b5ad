// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use blockcodec::BLOCK_DIM;
use blockcodec::dct::{Block, forward_dct, inverse_dct};
use blockcodec::quant::{ChannelClass, Quality, QuantTable};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn test_block() -> Block<f64> {
    std::array::from_fn(|y| std::array::from_fn(|x| ((x * 37 + y * 11) % 256) as f64 - 128.0))
}

fn dct_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("block");
    let block = test_block();
    let coefficients = forward_dct(&block);

    group.bench_function(BenchmarkId::new("forward_dct", BLOCK_DIM), |b| {
        b.iter(|| forward_dct(black_box(&block)))
    });
    group.bench_function(BenchmarkId::new("inverse_dct", BLOCK_DIM), |b| {
        b.iter(|| inverse_dct(black_box(&coefficients)))
    });

    for quality in [10, 50, 90] {
        let table = QuantTable::new(Quality::new(quality).unwrap(), ChannelClass::Luma);
        group.bench_function(BenchmarkId::new("quantize", quality), |b| {
            b.iter(|| table.quantize(black_box(&coefficients)))
        });
    }
    group.finish();
}

criterion_group!(benches, dct_benches);
criterion_main!(benches);
