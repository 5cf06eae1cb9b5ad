// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The encode and decode pipelines.
//!
//! Encoding converts RGB to Y/Cr/Cb, pads every channel to whole blocks, level shifts, and
//! transforms and quantizes each 8x8 block. Decoding runs the same chain backwards and ends
//! with a rounded, clipped RGB image of the original size.

use crate::{
    BLOCK_DIM,
    color::{rgb_to_ycrcb, ycrcb_to_rgb},
    dct::{copy_block, forward_dct, inverse_dct, load_block, store_block},
    error::{Error, Result},
    image::{Image, ImageDataType, ImageTriple, RowBandMut},
    options::CodecOptions,
    padding::{crop, pad, padded_size},
    quant::{ChannelClass, Quality, QuantTable, QuantTableSet},
    util::tracing_wrappers::*,
};

/// Offset between unsigned 8-bit samples and the zero-centered transform input.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Dimensions and quality needed to invert a compression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionMeta {
    pub width: usize,
    pub height: usize,
    pub padded_width: usize,
    pub padded_height: usize,
    pub quality: Quality,
}

impl CompressionMeta {
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn padded_size(&self) -> (usize, usize) {
        (self.padded_width, self.padded_height)
    }

    fn check(&self, bypass: bool) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidImageSize(self.width, self.height));
        }
        let expected = if bypass {
            self.size()
        } else {
            padded_size(self.size())?
        };
        if self.padded_size() != expected {
            return Err(Error::InvalidPaddedSize(
                self.width,
                self.height,
                self.padded_width,
                self.padded_height,
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum CompressedData {
    /// Quantized coefficient grids, in `[Y, Cr, Cb]` order, of the padded size.
    Coefficients(ImageTriple<i32>),
    /// The untouched RGB input, for qualities above the bypass threshold.
    Bypass(ImageTriple<u8>),
}

#[derive(Debug)]
pub struct CompressedImage {
    pub data: CompressedData,
    pub meta: CompressionMeta,
}

impl CompressedImage {
    pub fn is_bypass(&self) -> bool {
        matches!(self.data, CompressedData::Bypass(_))
    }

    pub fn coefficients(&self) -> Option<&ImageTriple<i32>> {
        match &self.data {
            CompressedData::Coefficients(c) => Some(c),
            CompressedData::Bypass(_) => None,
        }
    }

    /// Coefficient statistics; `None` for bypassed images.
    pub fn stats(&self) -> Option<CompressionStats> {
        self.coefficients().map(CompressionStats::from_coefficients)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of coefficients in each channel.
    pub coefficients_per_channel: usize,
    pub nonzero: [usize; 3],
}

impl CompressionStats {
    pub fn from_coefficients(coefficients: &ImageTriple<i32>) -> CompressionStats {
        let (xsize, ysize) = coefficients.size();
        let nonzero = [0, 1, 2].map(|c| {
            coefficients
                .channel(c)
                .as_rect()
                .iter()
                .filter(|v| *v != 0)
                .count()
        });
        CompressionStats {
            coefficients_per_channel: xsize * ysize,
            nonzero,
        }
    }

    pub fn total(&self) -> usize {
        self.coefficients_per_channel * 3
    }

    pub fn total_nonzero(&self) -> usize {
        self.nonzero.iter().sum()
    }

    /// Fraction of zero coefficients in channel `c`.
    pub fn channel_sparsity(&self, c: usize) -> f64 {
        1.0 - self.nonzero[c] as f64 / self.coefficients_per_channel as f64
    }

    /// Fraction of zero coefficients over all channels.
    pub fn sparsity(&self) -> f64 {
        1.0 - self.total_nonzero() as f64 / self.total() as f64
    }
}

/// Runs `process` on every 8-row band of `image`, on the rayon pool if requested. Stops
/// scheduling bands once cancellation is requested.
fn for_each_band<T: ImageDataType>(
    image: &mut Image<T>,
    options: &CodecOptions,
    process: impl Fn(RowBandMut<'_, T>) -> Result<()> + Send + Sync,
) -> Result<()> {
    #[cfg(feature = "parallel")]
    if options.parallel {
        use rayon::prelude::*;
        return image
            .par_row_bands_mut(BLOCK_DIM)
            .try_for_each(|band| {
                options.check_cancelled()?;
                process(band)
            });
    }
    image.row_bands_mut(BLOCK_DIM).try_for_each(|band| {
        options.check_cancelled()?;
        process(band)
    })
}

fn check_block_aligned(size: (usize, usize)) -> Result<()> {
    if size.0 % BLOCK_DIM != 0 || size.1 % BLOCK_DIM != 0 {
        return Err(Error::NotBlockAligned(size.0, size.1));
    }
    Ok(())
}

/// Level shifts, transforms and quantizes every block of a padded channel.
#[cfg_attr(
    feature = "tracing",
    instrument(skip_all, err, fields(class = ?table.class(), size = ?channel.size()))
)]
pub fn encode_channel(
    channel: &Image<f64>,
    table: &QuantTable,
    options: &CodecOptions,
) -> Result<Image<i32>> {
    check_block_aligned(channel.size())?;
    let mut coefficients = Image::new(channel.size())?;
    let input = channel.as_rect();
    for_each_band(&mut coefficients, options, |mut band| {
        let y0 = band.first_row();
        for x0 in (0..band.size().0).step_by(BLOCK_DIM) {
            let mut block = load_block(input.rect((x0, y0), (BLOCK_DIM, BLOCK_DIM))?)?;
            block.iter_mut().flatten().for_each(|v| *v -= LEVEL_SHIFT);
            store_block(&table.quantize(&forward_dct(&block)), &mut band, x0)?;
        }
        Ok(())
    })?;
    Ok(coefficients)
}

/// Inverse of [`encode_channel`]: dequantizes, inverse transforms and undoes the level shift.
/// The result keeps the padded size and is neither clipped nor rounded.
#[cfg_attr(
    feature = "tracing",
    instrument(skip_all, err, fields(class = ?table.class(), size = ?coefficients.size()))
)]
pub fn decode_channel(
    coefficients: &Image<i32>,
    table: &QuantTable,
    options: &CodecOptions,
) -> Result<Image<f64>> {
    check_block_aligned(coefficients.size())?;
    let mut channel = Image::new(coefficients.size())?;
    let input = coefficients.as_rect();
    for_each_band(&mut channel, options, |mut band| {
        let y0 = band.first_row();
        for x0 in (0..band.size().0).step_by(BLOCK_DIM) {
            let quantized = copy_block(input.rect((x0, y0), (BLOCK_DIM, BLOCK_DIM))?)?;
            let mut block = inverse_dct(&table.dequantize(&quantized));
            block.iter_mut().flatten().for_each(|v| *v += LEVEL_SHIFT);
            store_block(&block, &mut band, x0)?;
        }
        Ok(())
    })?;
    Ok(channel)
}

/// Compresses an RGB image into quantized `[Y, Cr, Cb]` coefficient grids.
///
/// `quality` must be in `[1, 100]`; qualities above
/// [`BYPASS_QUALITY_THRESHOLD`](crate::quant::BYPASS_QUALITY_THRESHOLD) return the input as is.
/// Parameters are validated before any pixel is touched.
#[cfg_attr(feature = "tracing", instrument(skip(rgb, options), err))]
pub fn compress(
    rgb: ImageTriple<u8>,
    quality: u32,
    options: &CodecOptions,
) -> Result<CompressedImage> {
    let quality = Quality::new(quality)?;
    let (width, height) = rgb.size();
    options.check_pixel_limit((width, height))?;
    options.check_cancelled()?;

    if quality.is_bypass() {
        debug!(%quality, "bypassing compression");
        return Ok(CompressedImage {
            data: CompressedData::Bypass(rgb),
            meta: CompressionMeta {
                width,
                height,
                padded_width: width,
                padded_height: height,
                quality,
            },
        });
    }

    let (padded_width, padded_height) = padded_size((width, height))?;
    debug!(
        width,
        height, padded_width, padded_height, "compressing {} blocks per channel",
        (padded_width / BLOCK_DIM) * (padded_height / BLOCK_DIM)
    );
    let tables = QuantTableSet::new(quality);
    let ycrcb = rgb_to_ycrcb(rgb.map_channels(|_, channel| channel.map(f64::from))?);
    let coefficients = ycrcb.map_channels(|c, channel| {
        let padded = pad(channel, (padded_width, padded_height))?;
        encode_channel(
            &padded,
            tables.for_class(ChannelClass::for_channel(c)),
            options,
        )
    })?;

    Ok(CompressedImage {
        data: CompressedData::Coefficients(coefficients),
        meta: CompressionMeta {
            width,
            height,
            padded_width,
            padded_height,
            quality,
        },
    })
}

/// Reconstructs an RGB image from the output of [`compress`].
///
/// The metadata is checked against the data before decoding starts.
#[cfg_attr(feature = "tracing", instrument(skip_all, err, fields(meta = ?compressed.meta)))]
pub fn decompress(
    compressed: CompressedImage,
    options: &CodecOptions,
) -> Result<ImageTriple<u8>> {
    let CompressedImage { data, meta } = compressed;
    meta.check(matches!(data, CompressedData::Bypass(_)))?;
    options.check_pixel_limit(meta.size())?;
    options.check_cancelled()?;

    let coefficients = match data {
        CompressedData::Bypass(rgb) => {
            if rgb.size() != meta.size() {
                let (xsize, ysize) = rgb.size();
                return Err(Error::CoefficientSizeMismatch(
                    xsize,
                    ysize,
                    meta.width,
                    meta.height,
                ));
            }
            debug!("returning bypassed image");
            return Ok(rgb);
        }
        CompressedData::Coefficients(coefficients) => coefficients,
    };
    if coefficients.size() != meta.padded_size() {
        let (xsize, ysize) = coefficients.size();
        return Err(Error::CoefficientSizeMismatch(
            xsize,
            ysize,
            meta.padded_width,
            meta.padded_height,
        ));
    }

    let tables = QuantTableSet::new(meta.quality);
    let ycrcb = coefficients.map_channels(|c, channel| {
        let decoded = decode_channel(
            &channel,
            tables.for_class(ChannelClass::for_channel(c)),
            options,
        )?;
        crop(decoded, meta.size())
    })?;
    ycrcb_to_rgb(ycrcb).map_channels(|_, channel| channel.map(|v| v.round() as u8))
}

pub fn compress_with_defaults(rgb: ImageTriple<u8>, quality: u32) -> Result<CompressedImage> {
    compress(rgb, quality, &CodecOptions::default())
}

pub fn decompress_with_defaults(compressed: CompressedImage) -> Result<ImageTriple<u8>> {
    decompress(compressed, &CodecOptions::default())
}

/// Compresses and immediately reconstructs `rgb`, i.e. applies the codec loss.
pub fn roundtrip(
    rgb: ImageTriple<u8>,
    quality: u32,
    options: &CodecOptions,
) -> Result<ImageTriple<u8>> {
    let compressed = compress(rgb, quality, options)?;
    decompress(compressed, options)
}
