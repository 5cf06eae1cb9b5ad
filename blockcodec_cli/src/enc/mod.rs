// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::Path;

use blockcodec::ImageTriple;
use tracing::debug;

use crate::error::{ImageIoError, Result};

pub mod numpy;
pub mod png;
pub mod pnm;

/// Writes an RGB image as `.png` or `.ppm`, depending on the extension of `path`.
pub fn save_image(image: &ImageTriple<u8>, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let bytes = match extension.as_deref() {
        Some("png") => {
            let mut bytes = vec![];
            self::png::to_png(image, &mut bytes)?;
            bytes
        }
        Some("ppm") => self::pnm::to_ppm(image)?,
        _ => {
            return Err(ImageIoError::UnsupportedFormat(format!(
                "cannot write {}, expected a .png or .ppm extension",
                path.display()
            )));
        }
    };
    std::fs::write(path, bytes).map_err(|source| ImageIoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(size = ?image.size(), "saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec::load_image;

    fn image() -> ImageTriple<u8> {
        let data: Vec<u8> = (0..4 * 4 * 3).map(|v| (v * 3) as u8).collect();
        ImageTriple::from_interleaved((4, 4), &data).unwrap()
    }

    #[test]
    fn unsupported_extension() {
        let res = save_image(&image(), Path::new("out.jpg"));
        assert!(matches!(res, Err(ImageIoError::UnsupportedFormat(_))));
    }

    #[test]
    fn save_and_load() -> Result<()> {
        for extension in ["png", "ppm", "PNG"] {
            let path = std::env::temp_dir().join(format!(
                "blockcodec_save_{}.{extension}",
                std::process::id()
            ));
            save_image(&image(), &path)?;
            let loaded = load_image(&path);
            std::fs::remove_file(&path).unwrap();
            assert!(loaded? == image());
        }
        Ok(())
    }

    #[test]
    fn unwritable_path() {
        let res = save_image(&image(), Path::new("/nonexistent/dir/out.png"));
        assert!(matches!(res, Err(ImageIoError::Write { .. })));
    }
}
