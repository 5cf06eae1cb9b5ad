// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::{Error, Result};

/// Shared flag used to stop scheduling further blocks. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CodecOptions {
    /// Process independent blocks on the rayon thread pool. Has no effect unless the `parallel`
    /// feature is enabled. The output does not depend on this setting.
    pub parallel: bool,
    /// Fail with [`Error::PixelLimitExceeded`] on images with more than this number of pixels,
    /// before any pixel is processed.
    pub pixel_limit: Option<usize>,
    /// When the token is cancelled, no more blocks are scheduled and the call returns
    /// [`Error::Cancelled`].
    pub cancel: Option<CancellationToken>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            pixel_limit: None,
            cancel: None,
        }
    }
}

impl CodecOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    pub fn with_pixel_limit(mut self, limit: usize) -> Self {
        self.pixel_limit = Some(limit);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn check_pixel_limit(&self, size: (usize, usize)) -> Result<()> {
        let Some(limit) = self.pixel_limit else {
            return Ok(());
        };
        let pixels = size
            .0
            .checked_mul(size.1)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        if pixels > limit {
            return Err(Error::PixelLimitExceeded(pixels, limit));
        }
        Ok(())
    }

    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pixel_limit() {
        let options = CodecOptions::default().with_pixel_limit(64);
        assert!(options.check_pixel_limit((8, 8)).is_ok());
        assert!(matches!(
            options.check_pixel_limit((8, 9)),
            Err(Error::PixelLimitExceeded(72, 64))
        ));
        assert!(CodecOptions::default().check_pixel_limit((1 << 20, 1 << 20)).is_ok());
    }

    #[test]
    fn cancellation_is_shared() {
        let token = CancellationToken::new();
        let options = CodecOptions::sequential().with_cancellation(token.clone());
        assert!(options.check_cancelled().is_ok());
        token.cancel();
        assert!(matches!(options.check_cancelled(), Err(Error::Cancelled)));
    }
}
