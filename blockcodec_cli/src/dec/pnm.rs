// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use blockcodec::ImageTriple;

use crate::error::{ImageIoError, Result};

struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderReader<'_> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while self.data.get(self.pos).is_some_and(|&c| c != b'\n') {
                    self.pos += 1;
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<usize> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ImageIoError::InvalidPpm(format!("expected a number at byte {start}")))
    }
}

/// Decodes a binary (`P6`) PPM with a maximum value of 255.
pub fn decode_ppm(data: &[u8]) -> Result<ImageTriple<u8>> {
    if !data.starts_with(b"P6") {
        return Err(ImageIoError::UnsupportedFormat(
            "only binary PPM (P6) is supported".to_string(),
        ));
    }
    let mut reader = HeaderReader { data, pos: 2 };
    let width = reader.read_number()?;
    let height = reader.read_number()?;
    let maxval = reader.read_number()?;
    if maxval != 255 {
        return Err(ImageIoError::UnsupportedFormat(format!(
            "PPM with maximum value {maxval}, expected 255"
        )));
    }
    // Exactly one whitespace byte separates the header from the samples.
    if !data.get(reader.pos).is_some_and(u8::is_ascii_whitespace) {
        return Err(ImageIoError::InvalidPpm("missing separator after header".into()));
    }
    let samples = &data[reader.pos + 1..];
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(blockcodec::Error::ImageSizeTooLarge(width, height))?;
    if samples.len() < expected {
        return Err(ImageIoError::InvalidPpm(format!(
            "expected {expected} bytes of samples, found {}",
            samples.len()
        )));
    }
    Ok(ImageTriple::from_interleaved(
        (width, height),
        &samples[..expected],
    )?)
}
