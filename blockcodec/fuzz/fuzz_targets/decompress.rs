// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use blockcodec::{
    CodecOptions, CompressedData, CompressedImage, CompressionMeta, Image, ImageTriple, Quality,
    decompress,
};
use libfuzzer_sys::fuzz_target;

// Layout: width, height, padded width, padded height, quality, then one little-endian i32 per
// coefficient of the (padded) grid.
fuzz_target!(|data: &[u8]| {
    let [width, height, padded_width, padded_height, quality, coefficients @ ..] = data else {
        return;
    };
    let Ok(quality) = Quality::new(*quality as u32) else {
        return;
    };
    let meta = CompressionMeta {
        width: *width as usize,
        height: *height as usize,
        padded_width: *padded_width as usize,
        padded_height: *padded_height as usize,
        quality,
    };
    let size = (meta.padded_width.max(1), meta.padded_height.max(1));
    let mut values = coefficients
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]));
    let mut channel = || {
        let data: Vec<i32> = (0..size.0 * size.1)
            .map(|_| values.next().unwrap_or(0))
            .collect();
        Image::from_vec(size, data).unwrap()
    };
    let grids = ImageTriple::new([channel(), channel(), channel()]).unwrap();
    let compressed = CompressedImage {
        data: CompressedData::Coefficients(grids),
        meta,
    };
    if let Ok(rgb) = decompress(compressed, &CodecOptions::default()) {
        assert_eq!(rgb.size(), (meta.width, meta.height));
    }
});
