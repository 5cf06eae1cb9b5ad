// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use blockcodec::ImageTriple;

use crate::error::{ImageIoError, Result};

/// Encodes an RGB image as an 8-bit, non-interlaced PNG.
pub fn to_png<Writer: Write>(image: &ImageTriple<u8>, buf: &mut Writer) -> Result<()> {
    let (width, height) = image.size();
    let too_large = || ImageIoError::Codec(blockcodec::Error::ImageSizeTooLarge(width, height));
    let mut encoder = png::Encoder::new(
        buf,
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
    );
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_interleaved()?)?;
    writer.finish()?;
    Ok(())
}
