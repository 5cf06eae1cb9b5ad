// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub use tracing::{debug, error, info, instrument, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)+) => {};
    }
    macro_rules! error {
        ($($arg:tt)+) => {};
    }
    macro_rules! info {
        ($($arg:tt)+) => {};
    }
    macro_rules! trace {
        ($($arg:tt)+) => {};
    }
    macro_rules! warn_ {
        ($($arg:tt)+) => {};
    }
    #[allow(unused_imports)]
    pub(crate) use {debug, error, info, trace, warn_ as warn};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop::{debug, error, info, trace, warn};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn macros_accept_fields() {
        let size = (3usize, 4usize);
        let quality = 50u32;
        trace!("allocating {}x{}", size.0, size.1);
        debug!(?size, %quality, "compressing");
        info!(quality, "done");
        warn!("quality {quality} bypasses compression");
        error!(?size, "failed");
        // Without the `tracing` feature the macros expand to nothing.
        let _ = (size, quality);
    }
}
