// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Readers for the 8-bit RGB inputs the codec accepts.

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use blockcodec::ImageTriple;
use tracing::debug;

use crate::error::{ImageIoError, Result};

pub mod pnm;

pub use pnm::decode_ppm;

/// Decodes an 8-bit RGB PNG. Other color types and bit depths are rejected rather than
/// converted.
pub fn decode_png(data: &[u8]) -> Result<ImageTriple<u8>> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;
    let (width, height, color_type, bit_depth) = {
        let info = reader.info();
        (info.width, info.height, info.color_type, info.bit_depth)
    };
    if color_type != png::ColorType::Rgb || bit_depth != png::BitDepth::Eight {
        return Err(ImageIoError::UnsupportedFormat(format!(
            "PNG with color type {color_type:?} and bit depth {bit_depth:?}, expected 8-bit RGB"
        )));
    }
    let size = (width as usize, height as usize);
    let mut buf = vec![];
    buf.try_reserve_exact(size.0 * size.1 * 3)
        .map_err(blockcodec::Error::from)?;
    buf.resize(size.0 * size.1 * 3, 0);
    reader.next_frame(&mut buf)?;
    Ok(ImageTriple::from_interleaved(size, &buf)?)
}

/// Reads a PNG or binary PPM file, chosen by content.
pub fn load_image(path: &Path) -> Result<ImageTriple<u8>> {
    let data = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ImageIoError::FileNotFound(path.to_path_buf()),
        _ => ImageIoError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let image = if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        decode_png(&data)?
    } else if data.starts_with(b"P6") {
        decode_ppm(&data)?
    } else {
        return Err(ImageIoError::UnsupportedFormat(format!(
            "{} is neither PNG nor binary PPM",
            path.display()
        )));
    };
    debug!(size = ?image.size(), "loaded {}", path.display());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enc::png::to_png;

    fn rgb_image() -> ImageTriple<u8> {
        let data: Vec<u8> = (0..5 * 3 * 3).map(|v| (v * 5) as u8).collect();
        ImageTriple::from_interleaved((5, 3), &data).unwrap()
    }

    #[test]
    fn png_roundtrip() -> Result<()> {
        let image = rgb_image();
        let mut bytes = vec![];
        to_png(&image, &mut bytes)?;
        let decoded = decode_png(&bytes)?;
        assert!(decoded == image);
        Ok(())
    }

    #[test]
    fn rgba_png_is_unsupported() -> Result<()> {
        let mut bytes = vec![];
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 2);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&[0; 16])?;
            writer.finish()?;
        }
        assert!(matches!(
            decode_png(&bytes),
            Err(ImageIoError::UnsupportedFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn sixteen_bit_png_is_unsupported() -> Result<()> {
        let mut bytes = vec![];
        {
            let mut encoder = png::Encoder::new(&mut bytes, 1, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&[0; 6])?;
            writer.finish()?;
        }
        assert!(matches!(
            decode_png(&bytes),
            Err(ImageIoError::UnsupportedFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn missing_file() {
        let path = Path::new("this/file/does/not/exist.png");
        assert!(matches!(
            load_image(path),
            Err(ImageIoError::FileNotFound(p)) if p == path
        ));
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let image = rgb_image();
        let path = std::env::temp_dir().join(format!("blockcodec_load_{}.ppm", std::process::id()));
        std::fs::write(&path, crate::enc::pnm::to_ppm(&image)?).unwrap();
        let loaded = load_image(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(loaded? == image);
        Ok(())
    }
}
