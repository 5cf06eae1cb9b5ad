// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Orthonormal 8x8 DCT-II and its inverse, computed as `C * M * C^T` and `C^T * M * C` with the
//! cosine basis `C` kept at full double precision.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::OnceLock;

use array_init::array_init;

use crate::{
    BLOCK_DIM, BLOCK_SIZE,
    error::{Error, Result},
    image::{ImageDataType, ImageRect, RowBandMut},
};

pub type Block<T> = [[T; BLOCK_DIM]; BLOCK_DIM];

#[inline(always)]
fn alpha(u: usize) -> f64 {
    if u == 0 { FRAC_1_SQRT_2 } else { 1.0 }
}

/// Row `u` holds the `u`-th cosine basis vector; row 0 is the constant `1/sqrt(8)`.
pub fn dct_basis() -> &'static Block<f64> {
    static BASIS: OnceLock<Block<f64>> = OnceLock::new();
    BASIS.get_or_init(|| {
        let scale = (2.0 / BLOCK_DIM as f64).sqrt();
        array_init(|u| {
            array_init(|x| {
                alpha(u)
                    * scale
                    * ((2 * x + 1) as f64 * u as f64 * PI / (2 * BLOCK_DIM) as f64).cos()
            })
        })
    })
}

// a * b
fn mul(a: &Block<f64>, b: &Block<f64>) -> Block<f64> {
    array_init(|i| array_init(|j| (0..BLOCK_DIM).map(|k| a[i][k] * b[k][j]).sum()))
}

// a * b^T
fn mul_transposed_rhs(a: &Block<f64>, b: &Block<f64>) -> Block<f64> {
    array_init(|i| array_init(|j| (0..BLOCK_DIM).map(|k| a[i][k] * b[j][k]).sum()))
}

// a^T * b
fn mul_transposed_lhs(a: &Block<f64>, b: &Block<f64>) -> Block<f64> {
    array_init(|i| array_init(|j| (0..BLOCK_DIM).map(|k| a[k][i] * b[k][j]).sum()))
}

/// Spatial samples to frequency coefficients. Coefficient `[0][0]` is the DC term.
pub fn forward_dct(block: &Block<f64>) -> Block<f64> {
    let basis = dct_basis();
    mul_transposed_rhs(&mul(basis, block), basis)
}

/// Exact inverse of [`forward_dct`], up to floating point error.
pub fn inverse_dct(block: &Block<f64>) -> Block<f64> {
    let basis = dct_basis();
    mul(&mul_transposed_lhs(basis, block), basis)
}

/// Copies an image view into a block of the same sample type. The view must be exactly 8x8.
pub fn copy_block<T: ImageDataType>(rect: ImageRect<'_, T>) -> Result<Block<T>> {
    let (xsize, ysize) = rect.size();
    if xsize != BLOCK_DIM || ysize != BLOCK_DIM {
        return Err(Error::InvalidBlockSize(xsize, ysize));
    }
    Ok(array_init(|y| {
        let row = rect.row(y);
        array_init(|x| row[x])
    }))
}

/// Like [`copy_block`], converting the samples to `f64`.
pub fn load_block<T: ImageDataType>(rect: ImageRect<'_, T>) -> Result<Block<f64>> {
    Ok(copy_block(rect)?.map(|row| row.map(|v| v.to_f64())))
}

/// Writes `block` into the 8 rows of `band`, starting at column `x0`.
pub fn store_block<T: ImageDataType>(
    block: &Block<T>,
    band: &mut RowBandMut<'_, T>,
    x0: usize,
) -> Result<()> {
    let (xsize, ysize) = band.size();
    if ysize != BLOCK_DIM {
        return Err(Error::InvalidBlockSize(BLOCK_DIM, ysize));
    }
    let x1 = x0.checked_add(BLOCK_DIM).ok_or(Error::ArithmeticOverflow)?;
    if x1 > xsize {
        return Err(Error::RectOutOfBounds(
            BLOCK_DIM,
            BLOCK_DIM,
            x0,
            band.first_row(),
            xsize,
            ysize,
        ));
    }
    for (y, row) in block.iter().enumerate() {
        band.row(y)[x0..x1].copy_from_slice(row);
    }
    Ok(())
}

/// Builds a block from a row-major slice of `rows * cols` samples, which must describe an 8x8
/// block.
pub fn block_from_slice(data: &[f64], rows: usize, cols: usize) -> Result<Block<f64>> {
    if rows != BLOCK_DIM || cols != BLOCK_DIM || data.len() != BLOCK_SIZE {
        return Err(Error::InvalidBlockSize(cols, rows));
    }
    Ok(array_init(|y| array_init(|x| data[y * BLOCK_DIM + x])))
}
