// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(test)]
pub mod test;
pub mod tracing_wrappers;

/// Rounds `self` up to the next multiple of `multiple`; `None` on overflow.
pub trait RoundUpTo: Sized {
    fn round_up_to(self, multiple: Self) -> Option<Self>;
}

impl RoundUpTo for usize {
    fn round_up_to(self, multiple: usize) -> Option<usize> {
        self.div_ceil(multiple).checked_mul(multiple)
    }
}
