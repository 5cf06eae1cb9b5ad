// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::{
    error::{Error, Result},
    util::tracing_wrappers::*,
};

mod private {
    pub trait Sealed {}
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DataTypeTag {
    U8,
    I32,
    F64,
}

pub trait ImageDataType:
    private::Sealed + Copy + Default + 'static + Debug + PartialEq + Send + Sync
{
    /// ID of this data type. Different types *must* have different values.
    const DATA_TYPE_ID: DataTypeTag;

    fn from_f64(f: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_image_data_type {
    ($ty: ty, $id: ident) => {
        impl private::Sealed for $ty {}
        impl ImageDataType for $ty {
            const DATA_TYPE_ID: DataTypeTag = DataTypeTag::$id;
            fn from_f64(f: f64) -> $ty {
                f as $ty
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_image_data_type!(u8, U8);
impl_image_data_type!(i32, I32);
// Used for all the intermediate stages of the codec.
impl_image_data_type!(f64, F64);

/// A single channel of samples, stored row-major. Sizes are `(width, height)`.
pub struct Image<T: ImageDataType> {
    size: (usize, usize),
    data: Vec<T>,
}

#[derive(Clone, Copy)]
pub struct ImageRect<'a, T: ImageDataType> {
    origin: (usize, usize),
    size: (usize, usize),
    image: &'a Image<T>,
}

pub struct ImageRectMut<'a, T: ImageDataType> {
    origin: (usize, usize),
    size: (usize, usize),
    image: &'a mut Image<T>,
}

/// A horizontal band of full-width rows, borrowed exclusively from an [`Image`].
/// Bands handed out by [`Image::row_bands_mut`] never overlap.
pub struct RowBandMut<'a, T: ImageDataType> {
    first_row: usize,
    width: usize,
    data: &'a mut [T],
}

impl<T: ImageDataType> Debug for Image<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}x{}", T::DATA_TYPE_ID, self.size.0, self.size.1)
    }
}

impl<T: ImageDataType> Debug for ImageRect<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {}x{}+{}+{}",
            T::DATA_TYPE_ID,
            self.size.0,
            self.size.1,
            self.origin.0,
            self.origin.1
        )
    }
}

impl<T: ImageDataType> Debug for ImageRectMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mut {:?} {}x{}+{}+{}",
            T::DATA_TYPE_ID,
            self.size.0,
            self.size.1,
            self.origin.0,
            self.origin.1
        )
    }
}

impl<T: ImageDataType> Image<T> {
    #[cfg_attr(feature = "tracing", instrument(err))]
    pub fn new(size: (usize, usize)) -> Result<Image<T>> {
        let (xsize, ysize) = size;
        // These limits let us not worry about overflows.
        if xsize as u64 >= i64::MAX as u64 / 4 || ysize as u64 >= i64::MAX as u64 / 4 {
            return Err(Error::ImageSizeTooLarge(xsize, ysize));
        }
        let total_size = xsize
            .checked_mul(ysize)
            .ok_or(Error::ImageSizeTooLarge(xsize, ysize))?;
        if xsize == 0 || ysize == 0 {
            return Err(Error::InvalidImageSize(xsize, ysize));
        }
        trace!("trying to allocate image");
        let mut data = vec![];
        data.try_reserve_exact(total_size)?;
        data.resize(total_size, T::default());
        Ok(Image {
            size: (xsize, ysize),
            data,
        })
    }

    pub fn new_with_value(size: (usize, usize), value: T) -> Result<Image<T>> {
        let mut ret = Self::new(size)?;
        ret.fill(value);
        Ok(ret)
    }

    /// Wraps row-major `data`; `data.len()` must be exactly `size.0 * size.1`.
    pub fn from_vec(size: (usize, usize), data: Vec<T>) -> Result<Image<T>> {
        if size.0 == 0 || size.1 == 0 {
            return Err(Error::InvalidImageSize(size.0, size.1));
        }
        let expected = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        if data.len() != expected {
            return Err(Error::CopyOfDifferentSize(data.len(), 1, size.0, size.1));
        }
        Ok(Image { size, data })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }

    pub fn try_clone(&self) -> Result<Self> {
        let mut data = vec![];
        data.try_reserve_exact(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Image {
            size: self.size,
            data,
        })
    }

    /// Returns a new image of the same size with `f` applied to every sample.
    pub fn map<U: ImageDataType>(&self, f: impl Fn(T) -> U) -> Result<Image<U>> {
        let mut data = vec![];
        data.try_reserve_exact(self.data.len())?;
        data.extend(self.data.iter().map(|v| f(*v)));
        Ok(Image {
            size: self.size,
            data,
        })
    }

    /// Applies `f` to every sample in place.
    pub fn apply(&mut self, f: impl FnMut(&mut T)) {
        self.data.iter_mut().for_each(f);
    }

    pub fn as_rect(&self) -> ImageRect<'_, T> {
        ImageRect {
            origin: (0, 0),
            size: self.size,
            image: self,
        }
    }

    pub fn as_rect_mut(&mut self) -> ImageRectMut<'_, T> {
        ImageRectMut {
            origin: (0, 0),
            size: self.size,
            image: self,
        }
    }

    /// Splits the image in non-overlapping bands of `band_height` rows (the last band may be
    /// shorter).
    pub fn row_bands_mut(
        &mut self,
        band_height: usize,
    ) -> impl Iterator<Item = RowBandMut<'_, T>> + '_ {
        let width = self.size.0;
        self.data
            .chunks_mut(width * band_height)
            .enumerate()
            .map(move |(i, data)| RowBandMut {
                first_row: i * band_height,
                width,
                data,
            })
    }

    /// Parallel version of [`Image::row_bands_mut`].
    #[cfg(feature = "parallel")]
    pub fn par_row_bands_mut(
        &mut self,
        band_height: usize,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = RowBandMut<'_, T>> + '_ {
        use rayon::prelude::*;
        let width = self.size.0;
        self.data
            .par_chunks_mut(width * band_height)
            .enumerate()
            .map(move |(i, data)| RowBandMut {
                first_row: i * band_height,
                width,
                data,
            })
    }
}

fn rect_size_check(
    origin: (usize, usize),
    size: (usize, usize),
    ssize: (usize, usize),
) -> Result<()> {
    if origin
        .0
        .checked_add(size.0)
        .ok_or(Error::ArithmeticOverflow)?
        > ssize.0
        || origin
            .1
            .checked_add(size.1)
            .ok_or(Error::ArithmeticOverflow)?
            > ssize.1
    {
        Err(Error::RectOutOfBounds(
            size.0, size.1, origin.0, origin.1, ssize.0, ssize.1,
        ))
    } else {
        Ok(())
    }
}

impl<'a, T: ImageDataType> ImageRect<'a, T> {
    pub fn rect(self, origin: (usize, usize), size: (usize, usize)) -> Result<ImageRect<'a, T>> {
        rect_size_check(origin, size, self.size)?;
        Ok(ImageRect {
            origin: (origin.0 + self.origin.0, origin.1 + self.origin.1),
            size,
            image: self.image,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn row(&self, row: usize) -> &'a [T] {
        debug_assert!(row < self.size.1);
        let start = (row + self.origin.1) * self.image.size.0 + self.origin.0;
        &self.image.data[start..start + self.size.0]
    }

    pub fn to_image(&self) -> Result<Image<T>> {
        let total_size = self.size.0 * self.size.1;
        let mut data = vec![];
        data.try_reserve_exact(total_size)?;
        data.extend((0..self.size.1).flat_map(|x| self.row(x).iter()));
        Image::from_vec(self.size, data)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.size.1).flat_map(|x| self.row(x).iter().cloned())
    }
}

impl<'a, T: ImageDataType> PartialEq<ImageRect<'a, T>> for ImageRect<'a, T> {
    fn eq(&self, other: &ImageRect<'a, T>) -> bool {
        self.size == other.size && self.iter().zip(other.iter()).all(|(x, y)| x == y)
    }
}

impl<T: ImageDataType + Eq> Eq for ImageRect<'_, T> {}

impl<T: ImageDataType> PartialEq for Image<T> {
    fn eq(&self, other: &Image<T>) -> bool {
        self.size == other.size && self.data == other.data
    }
}

impl<'a, T: ImageDataType> ImageRectMut<'a, T> {
    pub fn rect(
        &'a mut self,
        origin: (usize, usize),
        size: (usize, usize),
    ) -> Result<ImageRectMut<'a, T>> {
        rect_size_check(origin, size, self.size)?;
        Ok(ImageRectMut {
            origin: (origin.0 + self.origin.0, origin.1 + self.origin.1),
            size,
            image: self.image,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn row(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.size.1);
        let start = (row + self.origin.1) * self.image.size.0 + self.origin.0;
        &mut self.image.data[start..start + self.size.0]
    }

    pub fn as_rect(&self) -> ImageRect<'_, T> {
        ImageRect {
            origin: self.origin,
            size: self.size,
            image: self.image,
        }
    }
}

impl<T: ImageDataType> RowBandMut<'_, T> {
    /// Index of the first image row covered by this band.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.data.len() / self.width)
    }

    pub fn row(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.size().1);
        &mut self.data[row * self.width..(row + 1) * self.width]
    }
}

/// Three channels of identical size. The meaning of the channels (RGB or Y/Cr/Cb) depends on the
/// pipeline stage that produced the triple.
pub struct ImageTriple<T: ImageDataType> {
    channels: [Image<T>; 3],
}

impl<T: ImageDataType> Debug for ImageTriple<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} x3", self.channels[0])
    }
}

impl<T: ImageDataType> PartialEq for ImageTriple<T> {
    fn eq(&self, other: &ImageTriple<T>) -> bool {
        self.channels == other.channels
    }
}

impl<T: ImageDataType> ImageTriple<T> {
    pub fn new(channels: [Image<T>; 3]) -> Result<ImageTriple<T>> {
        let size = channels[0].size();
        for (c, channel) in channels.iter().enumerate().skip(1) {
            if channel.size() != size {
                return Err(Error::ChannelSizeMismatch(
                    c,
                    channel.size().0,
                    channel.size().1,
                    size.0,
                    size.1,
                ));
            }
        }
        Ok(ImageTriple { channels })
    }

    /// Builds a triple from packed, pixel-interleaved samples (e.g. RGBRGB...).
    pub fn from_interleaved(size: (usize, usize), data: &[T]) -> Result<ImageTriple<T>> {
        let num_pixels = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        if num_pixels == 0 || data.len() % num_pixels != 0 {
            return Err(Error::CopyOfDifferentSize(data.len(), 1, size.0, size.1));
        }
        let num_channels = data.len() / num_pixels;
        if num_channels != 3 {
            return Err(Error::UnsupportedChannelCount(num_channels));
        }
        let mut channels = [Image::new(size)?, Image::new(size)?, Image::new(size)?];
        for (c, channel) in channels.iter_mut().enumerate() {
            for (dst, src) in channel.data.iter_mut().zip(data.iter().skip(c).step_by(3)) {
                *dst = *src;
            }
        }
        Ok(ImageTriple { channels })
    }

    pub fn to_interleaved(&self) -> Result<Vec<T>> {
        let mut ret = vec![];
        ret.try_reserve_exact(self.channels[0].data.len() * 3)?;
        let [a, b, c] = &self.channels;
        ret.extend(
            a.data
                .iter()
                .zip(b.data.iter())
                .zip(c.data.iter())
                .flat_map(|((a, b), c)| [*a, *b, *c]),
        );
        Ok(ret)
    }

    pub fn size(&self) -> (usize, usize) {
        self.channels[0].size()
    }

    pub fn channel(&self, c: usize) -> &Image<T> {
        &self.channels[c]
    }

    pub fn channels(&self) -> &[Image<T>; 3] {
        &self.channels
    }

    pub fn try_clone(&self) -> Result<Self> {
        let [a, b, c] = &self.channels;
        Ok(ImageTriple {
            channels: [a.try_clone()?, b.try_clone()?, c.try_clone()?],
        })
    }

    /// Runs a fallible per-channel stage, consuming this triple. The stage receives the channel
    /// index; the results must again agree in size.
    pub fn map_channels<U: ImageDataType>(
        self,
        mut f: impl FnMut(usize, Image<T>) -> Result<Image<U>>,
    ) -> Result<ImageTriple<U>> {
        let [a, b, c] = self.channels;
        ImageTriple::new([f(0, a)?, f(1, b)?, f(2, c)?])
    }

    /// Runs `f` on every pixel, passing the three samples of that pixel.
    pub fn apply_pixelwise(&mut self, f: impl Fn(&mut T, &mut T, &mut T)) {
        let [a, b, c] = &mut self.channels;
        a.data
            .iter_mut()
            .zip(b.data.iter_mut())
            .zip(c.data.iter_mut())
            .for_each(|((a, b), c)| f(a, b, c));
    }
}
