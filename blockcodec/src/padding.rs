// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    BLOCK_DIM,
    error::{Error, Result},
    image::{Image, ImageDataType},
    util::{RoundUpTo, tracing_wrappers::*},
};

/// Smallest size `>= size` whose dimensions are multiples of the block size.
pub fn padded_size(size: (usize, usize)) -> Result<(usize, usize)> {
    match (size.0.round_up_to(BLOCK_DIM), size.1.round_up_to(BLOCK_DIM)) {
        (Some(xsize), Some(ysize)) => Ok((xsize, ysize)),
        _ => Err(Error::ImageSizeTooLarge(size.0, size.1)),
    }
}

/// Extends `channel` to `target` (width, height) by edge replication.
///
/// The last row is replicated downwards first, then the last column is replicated rightwards
/// across every row, including the new ones; added corner samples thus equal the original
/// bottom-right sample. If `channel` already has the target size it is returned as is.
#[cfg_attr(feature = "tracing", instrument(skip(channel), err))]
pub fn pad<T: ImageDataType>(channel: Image<T>, target: (usize, usize)) -> Result<Image<T>> {
    let (xsize, ysize) = channel.size();
    if target.0 < xsize || target.1 < ysize {
        return Err(Error::InvalidPaddingTarget(xsize, ysize, target.0, target.1));
    }
    if target == (xsize, ysize) {
        return Ok(channel);
    }
    debug!("padding {xsize}x{ysize} channel to {}x{}", target.0, target.1);
    let mut out = Image::new(target)?;
    let src = channel.as_rect();
    let mut dst = out.as_rect_mut();
    for y in 0..target.1 {
        let src_row = src.row(y.min(ysize - 1));
        let dst_row = dst.row(y);
        dst_row[..xsize].copy_from_slice(src_row);
        dst_row[xsize..].fill(src_row[xsize - 1]);
    }
    Ok(out)
}

/// Pads to the next multiple of the block size in both directions.
pub fn pad_to_blocks<T: ImageDataType>(channel: Image<T>) -> Result<Image<T>> {
    let target = padded_size(channel.size())?;
    pad(channel, target)
}

/// Reverse of [`pad`]: keeps the top-left `size` samples.
#[cfg_attr(feature = "tracing", instrument(skip(channel), err))]
pub fn crop<T: ImageDataType>(channel: Image<T>, size: (usize, usize)) -> Result<Image<T>> {
    let (xsize, ysize) = channel.size();
    if size.0 > xsize || size.1 > ysize || size.0 == 0 || size.1 == 0 {
        return Err(Error::InvalidPaddingTarget(xsize, ysize, size.0, size.1));
    }
    if size == (xsize, ysize) {
        return Ok(channel);
    }
    channel.as_rect().rect((0, 0), size)?.to_image()
}
