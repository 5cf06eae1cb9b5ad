// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod dec;
pub mod enc;
pub mod error;
pub mod report;

pub use dec::load_image;
pub use enc::save_image;
pub use error::ImageIoError;
