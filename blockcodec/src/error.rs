// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Dimension mismatches.
    #[error("Channel {0} has size {1}x{2}, expected {3}x{4}")]
    ChannelSizeMismatch(usize, usize, usize, usize, usize),
    #[error("Invalid block size {0}x{1}, expected 8x8")]
    InvalidBlockSize(usize, usize),
    #[error("Trying to copy from a {0}x{1} source to a {2}x{3} destination")]
    CopyOfDifferentSize(usize, usize, usize, usize),
    #[error("Coefficient grid of size {0}x{1} does not match the padded size {2}x{3}")]
    CoefficientSizeMismatch(usize, usize, usize, usize),
    #[error("Channel size {0}x{1} is not a multiple of the block size")]
    NotBlockAligned(usize, usize),
    #[error("Rect out of bounds: {0}x{1}+{2}+{3} rect in {4}x{5} view")]
    RectOutOfBounds(usize, usize, usize, usize, usize, usize),
    // Invalid parameters.
    #[error("Invalid quality {0}, must be in [1, 100]")]
    InvalidQuality(u32),
    #[error("Cannot pad or crop a {0}x{1} channel to {2}x{3}")]
    InvalidPaddingTarget(usize, usize, usize, usize),
    #[error("Invalid padded size {2}x{3} for an image of size {0}x{1}")]
    InvalidPaddedSize(usize, usize, usize, usize),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Image has {0} pixels, more than the limit of {1}")]
    PixelLimitExceeded(usize, usize),
    // Unsupported input.
    #[error("Unsupported number of channels: {0}, expected 3")]
    UnsupportedChannelCount(usize),
    // Resources.
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    // Generic arithmetic overflow. Prefer using other errors if possible.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Operation was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
