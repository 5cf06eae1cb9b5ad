// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use blockcodec::ImageTriple;
use blockcodec::error::{Error, Result};

const MAGIC_STRING: [u8; 8] = [0x93, b'N', b'U', b'M', b'P', b'Y', 0x01, 0x00];

fn numpy_header(xsize: usize, ysize: usize, num_channels: usize) -> Result<Vec<u8>> {
    // '<i4' is little-endian 32-bit signed integer.
    let mut header_dict_str = format!(
        "{{'descr': '<i4', 'fortran_order': False, 'shape': ({num_channels}, {ysize}, {xsize}), }}"
    );
    // The magic string, the two length bytes, the dictionary and its trailing newline must add up
    // to a multiple of 16; the padding is made of spaces.
    let unpadded = MAGIC_STRING.len() + 2 + header_dict_str.len() + 1;
    header_dict_str.push_str(&" ".repeat((16 - unpadded % 16) % 16));
    header_dict_str.push('\n');
    let header_len = u16::try_from(header_dict_str.len()).map_err(|_| Error::ArithmeticOverflow)?;

    let mut header = Vec::with_capacity(MAGIC_STRING.len() + 2 + header_dict_str.len());
    header.extend_from_slice(&MAGIC_STRING);
    header.extend_from_slice(&header_len.to_le_bytes());
    header.extend_from_slice(header_dict_str.as_bytes());
    Ok(header)
}

/// Serializes quantized coefficient grids in .npy format. The array has shape
/// `(3, height, width)`, channel-major, in the order the grids are stored.
pub fn to_numpy(coefficients: &ImageTriple<i32>) -> Result<Vec<u8>> {
    let (width, height) = coefficients.size();
    let mut ret = numpy_header(width, height, 3)?;
    ret.try_reserve_exact(width * height * 3 * 4)?;
    for channel in coefficients.channels() {
        ret.extend(channel.as_rect().iter().flat_map(i32::to_le_bytes));
    }
    Ok(ret)
}
