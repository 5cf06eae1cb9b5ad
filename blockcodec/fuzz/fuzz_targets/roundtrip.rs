// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use blockcodec::{CodecOptions, ImageTriple, roundtrip};
use libfuzzer_sys::fuzz_target;

// Layout: width, height, quality, then interleaved RGB samples.
fuzz_target!(|data: &[u8]| {
    let [width, height, quality, pixels @ ..] = data else {
        return;
    };
    let size = (*width as usize % 64 + 1, *height as usize % 64 + 1);
    let len = size.0 * size.1 * 3;
    if pixels.len() < len {
        return;
    }
    let rgb = ImageTriple::from_interleaved(size, &pixels[..len]).unwrap();
    let options = CodecOptions::default().with_pixel_limit(1 << 12);
    if let Ok(back) = roundtrip(rgb, *quality as u32, &options) {
        assert_eq!(back.size(), size);
    }
});
