// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use blockcodec::ImageTriple;

use crate::error::Result;

/// Binary PPM (`P6`) with a maximum value of 255.
pub fn to_ppm(image: &ImageTriple<u8>) -> Result<Vec<u8>> {
    let (width, height) = image.size();
    let mut ret = format!("P6\n{width} {height}\n255\n").into_bytes();
    ret.extend(image.to_interleaved()?);
    Ok(ret)
}
