// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

use array_init::array_init;

use crate::{
    dct::Block,
    error::{Error, Result},
};

/// Qualities strictly above this value skip compression altogether.
pub const BYPASS_QUALITY_THRESHOLD: u32 = 95;

pub const MIN_QUANT_VALUE: u16 = 1;
pub const MAX_QUANT_VALUE: u16 = 255;

/// Luma table of the JPEG standard (ITU-T T.81 Annex K), i.e. quality 50.
#[rustfmt::skip]
pub const LUMA_BASE_TABLE: Block<u16> = [
    [16, 11, 10, 16, 24, 40, 51, 61],
    [12, 12, 14, 19, 26, 58, 60, 55],
    [14, 13, 16, 24, 40, 57, 69, 56],
    [14, 17, 22, 29, 51, 87, 80, 62],
    [18, 22, 37, 56, 68, 109, 103, 77],
    [24, 36, 55, 64, 81, 104, 113, 92],
    [49, 64, 78, 87, 103, 121, 120, 101],
    [72, 92, 95, 98, 112, 100, 103, 99],
];

/// Chroma table of the JPEG standard (ITU-T T.81 Annex K), i.e. quality 50.
#[rustfmt::skip]
pub const CHROMA_BASE_TABLE: Block<u16> = [
    [17, 18, 24, 47, 99, 99, 99, 99],
    [18, 21, 26, 66, 99, 99, 99, 99],
    [24, 26, 56, 99, 99, 99, 99, 99],
    [47, 66, 99, 99, 99, 99, 99, 99],
    [99, 99, 99, 99, 99, 99, 99, 99],
    [99, 99, 99, 99, 99, 99, 99, 99],
    [99, 99, 99, 99, 99, 99, 99, 99],
    [99, 99, 99, 99, 99, 99, 99, 99],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    Luma,
    Chroma,
}

impl ChannelClass {
    /// Channel 0 of a Y/Cr/Cb triple is luma, the other two are chroma.
    pub fn for_channel(c: usize) -> ChannelClass {
        if c == 0 {
            ChannelClass::Luma
        } else {
            ChannelClass::Chroma
        }
    }

    fn base_table(self) -> &'static Block<u16> {
        match self {
            ChannelClass::Luma => &LUMA_BASE_TABLE,
            ChannelClass::Chroma => &CHROMA_BASE_TABLE,
        }
    }
}

/// Compression strength, from 1 (smallest output, most loss) to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u32);

impl Quality {
    pub fn new(quality: u32) -> Result<Quality> {
        if !(1..=100).contains(&quality) {
            return Err(Error::InvalidQuality(quality));
        }
        Ok(Quality(quality))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Factor applied to the base tables: `(100 - q) / 50` for `q >= 50`, `50 / q` otherwise.
    pub fn scaling_ratio(self) -> f64 {
        let q = self.0 as f64;
        if self.0 >= 50 {
            (100.0 - q) / 50.0
        } else {
            50.0 / q
        }
    }

    /// Whether the codec passes images through untouched at this quality.
    pub fn is_bypass(self) -> bool {
        self.0 > BYPASS_QUALITY_THRESHOLD
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality(50)
    }
}

impl TryFrom<u32> for Quality {
    type Error = Error;

    fn try_from(value: u32) -> Result<Quality> {
        Quality::new(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantTable {
    class: ChannelClass,
    values: Block<u16>,
}

impl QuantTable {
    pub fn new(quality: Quality, class: ChannelClass) -> QuantTable {
        let ratio = quality.scaling_ratio();
        let base = class.base_table();
        let values = array_init(|y| {
            array_init(|x| {
                let scaled = (base[y][x] as f64 * ratio).round();
                scaled.clamp(MIN_QUANT_VALUE as f64, MAX_QUANT_VALUE as f64) as u16
            })
        });
        QuantTable { class, values }
    }

    pub fn class(&self) -> ChannelClass {
        self.class
    }

    pub fn values(&self) -> &Block<u16> {
        &self.values
    }

    /// Divides each coefficient by its table entry and rounds to the nearest integer, halves
    /// away from zero.
    pub fn quantize(&self, block: &Block<f64>) -> Block<i32> {
        array_init(|y| array_init(|x| (block[y][x] / self.values[y][x] as f64).round() as i32))
    }

    /// Lossy inverse of [`QuantTable::quantize`].
    pub fn dequantize(&self, block: &Block<i32>) -> Block<f64> {
        array_init(|y| array_init(|x| block[y][x] as f64 * self.values[y][x] as f64))
    }
}

/// The luma and chroma tables for one quality.
#[derive(Clone, Debug)]
pub struct QuantTableSet {
    quality: Quality,
    luma: QuantTable,
    chroma: QuantTable,
}

impl QuantTableSet {
    pub fn new(quality: Quality) -> QuantTableSet {
        QuantTableSet {
            quality,
            luma: QuantTable::new(quality, ChannelClass::Luma),
            chroma: QuantTable::new(quality, ChannelClass::Chroma),
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn for_class(&self, class: ChannelClass) -> &QuantTable {
        match class {
            ChannelClass::Luma => &self.luma,
            ChannelClass::Chroma => &self.chroma,
        }
    }
}
