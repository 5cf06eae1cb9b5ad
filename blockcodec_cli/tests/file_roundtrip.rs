// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;

use blockcodec::{CodecOptions, ImageTriple, roundtrip};
use blockcodec_cli::{load_image, save_image};
use blockcodec_test_utils::{assert_almost_eq, mean_abs_error};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockcodec_cli_{}_{name}", std::process::id()))
}

#[test]
fn compress_files() {
    let size = (37, 21);
    let data: Vec<u8> = (0..size.1)
        .flat_map(|y| (0..size.0).flat_map(move |x| [(x * 6) as u8, (y * 12) as u8, 90]))
        .collect();
    let input = temp_path("input.png");
    let output = temp_path("output.ppm");
    save_image(
        &ImageTriple::from_interleaved(size, &data).unwrap(),
        &input,
    )
    .unwrap();

    let rgb = load_image(&input).unwrap();
    let reconstructed = roundtrip(rgb, 75, &CodecOptions::default()).unwrap();
    save_image(&reconstructed, &output).unwrap();
    let reloaded = load_image(&output).unwrap();

    std::fs::remove_file(&input).unwrap();
    std::fs::remove_file(&output).unwrap();

    assert_eq!(reloaded.size(), size);
    let error = mean_abs_error(&data, &reloaded.to_interleaved().unwrap());
    assert_almost_eq!(error, 0.0, 3.0);
}
