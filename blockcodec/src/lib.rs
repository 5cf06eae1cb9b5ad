// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod codec;
pub mod color;
pub mod dct;
pub mod error;
pub mod image;
pub mod options;
pub mod padding;
pub mod quant;
pub mod util;

pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;

pub use codec::{
    CompressedData, CompressedImage, CompressionMeta, CompressionStats, compress,
    compress_with_defaults, decompress, decompress_with_defaults, roundtrip,
};
pub use error::{Error, Result};
pub use image::{Image, ImageTriple};
pub use options::{CancellationToken, CodecOptions};
pub use quant::Quality;
