// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[macro_export]
macro_rules! assert_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let diff = if *left_val > *right_val {
                    *left_val - *right_val
                } else {
                    *right_val - *left_val
                };
                if !(diff <= $max_error) {
                    panic!(
                        "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                        left_val, right_val, $max_error
                    );
                }
            }
        }
    };
}

/// Mean absolute difference between two sample buffers of equal length.
pub fn mean_abs_error(left: &[u8], right: &[u8]) -> f64 {
    assert_eq!(left.len(), right.len(), "buffers differ in length");
    if left.is_empty() {
        return 0.0;
    }
    let total: u64 = left
        .iter()
        .zip(right)
        .map(|(l, r)| l.abs_diff(*r) as u64)
        .sum();
    total as f64 / left.len() as f64
}

/// Peak signal-to-noise ratio in dB for 8-bit samples; infinite for identical buffers.
pub fn psnr(left: &[u8], right: &[u8]) -> f64 {
    assert_eq!(left.len(), right.len(), "buffers differ in length");
    let squared: u64 = left
        .iter()
        .zip(right)
        .map(|(l, r)| (l.abs_diff(*r) as u64).pow(2))
        .sum();
    if squared == 0 {
        return f64::INFINITY;
    }
    let mse = squared as f64 / left.len() as f64;
    10.0 * (255.0 * 255.0 / mse).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_floats() {
        assert_almost_eq!(1.0000001f64, 1.0000002, 0.000001);
        assert_almost_eq!(1.0, 1.1, 0.2);
    }

    #[test]
    fn test_with_integers() {
        assert_almost_eq!(100, 101, 2);
        assert_almost_eq!(777u32, 770, 7);
    }

    #[test]
    #[should_panic]
    fn test_panic() {
        assert_almost_eq!(100, 105, 2);
    }

    #[test]
    fn test_mean_abs_error() {
        assert_eq!(mean_abs_error(&[], &[]), 0.0);
        assert_eq!(mean_abs_error(&[0, 10, 255], &[2, 10, 251]), 2.0);
    }

    #[test]
    fn test_psnr() {
        assert_eq!(psnr(&[1, 2, 3], &[1, 2, 3]), f64::INFINITY);
        // A uniform error of 1 gives 20 * log10(255).
        assert_almost_eq!(psnr(&[0; 16], &[1; 16]), 48.1308, 1e-4);
    }
}
