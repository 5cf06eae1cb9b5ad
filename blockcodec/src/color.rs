// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Full-range BT.601 conversion between RGB and Y/Cr/Cb, as defined by JFIF. Triples are always
//! ordered `[Y, Cr, Cb]` on the luma/chroma side.

use crate::{image::ImageTriple, util::tracing_wrappers::*};

pub const CHROMA_OFFSET: f64 = 128.0;
pub const MAX_SAMPLE: f64 = 255.0;

#[inline]
fn clip(v: f64) -> f64 {
    v.clamp(0.0, MAX_SAMPLE)
}

/// Converts one RGB pixel to `[Y, Cr, Cb]`. Saturated inputs can land up to half a step outside
/// `[0, 255]`; the values are left unclipped.
#[inline]
pub fn rgb_to_ycrcb_pixel([r, g, b]: [f64; 3]) -> [f64; 3] {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = 0.5 * r - 0.4187 * g - 0.0813 * b + CHROMA_OFFSET;
    let cb = -0.1687 * r - 0.3317 * g + 0.5 * b + CHROMA_OFFSET;
    [y, cr, cb]
}

/// Converts one `[Y, Cr, Cb]` pixel back to RGB, clipped to `[0, 255]`.
#[inline]
pub fn ycrcb_to_rgb_pixel([y, cr, cb]: [f64; 3]) -> [f64; 3] {
    let cr = cr - CHROMA_OFFSET;
    let cb = cb - CHROMA_OFFSET;
    let r = cr.mul_add(1.403, y);
    let g = cr.mul_add(-0.7141, cb.mul_add(-0.344, y));
    let b = cb.mul_add(1.773, y);
    [clip(r), clip(g), clip(b)]
}

/// RGB to `[Y, Cr, Cb]`, in place.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub fn rgb_to_ycrcb(mut rgb: ImageTriple<f64>) -> ImageTriple<f64> {
    debug!(size = ?rgb.size(), "converting RGB to YCrCb");
    rgb.apply_pixelwise(|r, g, b| {
        [*r, *g, *b] = rgb_to_ycrcb_pixel([*r, *g, *b]);
    });
    rgb
}

/// `[Y, Cr, Cb]` to RGB, in place. The result is clipped to `[0, 255]` but not rounded.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub fn ycrcb_to_rgb(mut ycrcb: ImageTriple<f64>) -> ImageTriple<f64> {
    debug!(size = ?ycrcb.size(), "converting YCrCb to RGB");
    ycrcb.apply_pixelwise(|y, cr, cb| {
        [*y, *cr, *cb] = ycrcb_to_rgb_pixel([*y, *cr, *cb]);
    });
    ycrcb
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::error::Result;
    use crate::image::Image;
    use crate::util::test::{assert_all_almost_eq, assert_almost_eq};

    fn roundtrip_pixel(rgb: [u8; 3]) -> [u8; 3] {
        let ycc = rgb_to_ycrcb_pixel(rgb.map(|v| v as f64));
        ycrcb_to_rgb_pixel(ycc).map(|v| v.round() as u8)
    }

    #[test]
    fn gray_has_neutral_chroma() {
        for v in [0.0, 17.0, 128.0, 255.0] {
            let [y, cr, cb] = rgb_to_ycrcb_pixel([v, v, v]);
            assert_almost_eq!(y, v, 1e-9);
            assert_almost_eq!(cr, 128.0, 1e-9);
            assert_almost_eq!(cb, 128.0, 0.11);
        }
    }

    #[test]
    fn primaries() {
        assert_all_almost_eq!(
            rgb_to_ycrcb_pixel([255.0, 0.0, 0.0]),
            [76.245, 255.5, 84.9815],
            1e-9
        );
        assert_all_almost_eq!(
            rgb_to_ycrcb_pixel([0.0, 0.0, 255.0]),
            [29.07, 107.2685, 255.5],
            1e-9
        );
    }

    #[test]
    fn forward_is_not_clipped() {
        let [_, cr, cb] = rgb_to_ycrcb_pixel([0.0, 255.0, 0.0]);
        assert_almost_eq!(cr, 21.2315, 1e-9);
        assert_almost_eq!(cb, 43.4165, 1e-9);
        let [_, _, cb] = rgb_to_ycrcb_pixel([0.0, 0.0, 255.0]);
        assert!(cb > MAX_SAMPLE);
    }

    #[test]
    fn inverse_is_clipped() {
        let rgb = ycrcb_to_rgb_pixel([255.0, 255.0, 255.0]);
        assert_eq!(rgb[0], 255.0);
        assert_eq!(rgb[2], 255.0);
        let rgb = ycrcb_to_rgb_pixel([0.0, 0.0, 0.0]);
        assert_eq!(rgb[0], 0.0);
        assert_eq!(rgb[2], 0.0);
    }

    #[test]
    fn roundtrip_is_within_two() {
        arbtest::arbtest(|u| {
            let rgb: [u8; 3] = u.arbitrary()?;
            let back = roundtrip_pixel(rgb);
            for c in 0..3 {
                assert_almost_eq!(back[c] as i32, rgb[c] as i32, 2);
            }
            Ok(())
        });
    }

    #[test]
    fn roundtrip_sweep() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = [r as u8, g as u8, b as u8];
                    let back = roundtrip_pixel(rgb);
                    for c in 0..3 {
                        assert_almost_eq!(back[c] as i32, rgb[c] as i32, 2);
                    }
                }
            }
        }
    }

    #[test]
    fn whole_image() -> Result<()> {
        let rgb = ImageTriple::new([
            Image::new_with_value((3, 2), 255.0)?,
            Image::new_with_value((3, 2), 0.0)?,
            Image::new_with_value((3, 2), 0.0)?,
        ])?;
        let ycc = rgb_to_ycrcb(rgb);
        assert_all_almost_eq!(ycc.channel(0).as_rect().row(1), [76.245; 3], 1e-9);
        assert_all_almost_eq!(ycc.channel(1).as_rect().row(1), [255.5; 3], 1e-9);
        let back = ycrcb_to_rgb(ycc);
        assert_eq!(back.size(), (3, 2));
        for x in 0..3 {
            assert_almost_eq!(back.channel(0).as_rect().row(0)[x], 255.0, 1.0);
            assert_almost_eq!(back.channel(1).as_rect().row(0)[x], 0.0, 1.0);
            assert_almost_eq!(back.channel(2).as_rect().row(0)[x], 0.0, 1.0);
        }
        Ok(())
    }
}
