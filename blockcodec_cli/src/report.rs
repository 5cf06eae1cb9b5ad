// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;
use std::time::Duration;

use blockcodec::{CompressionMeta, CompressionStats};

const CHANNEL_NAMES: [&str; 3] = ["Y", "Cr", "Cb"];

/// On-disk sizes of the input and the reconstructed output, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileSizes {
    pub input: u64,
    pub output: u64,
}

impl FileSizes {
    /// Output size divided by input size.
    pub fn ratio(&self) -> f64 {
        self.output as f64 / (self.input as f64).max(1.0)
    }
}

/// Summary of one compress/decompress run.
pub struct Report {
    pub meta: CompressionMeta,
    pub bypass: bool,
    pub elapsed: Duration,
    pub stats: Option<CompressionStats>,
    pub files: Option<FileSizes>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.meta;
        writeln!(f, "Image size: {} x {}", meta.width, meta.height)?;
        writeln!(
            f,
            "Padded size: {} x {}",
            meta.padded_width, meta.padded_height
        )?;
        writeln!(f, "Quality: {}", meta.quality)?;
        writeln!(f, "Bypassed: {}", if self.bypass { "yes" } else { "no" })?;
        if let Some(files) = &self.files {
            writeln!(
                f,
                "File size: {} bytes in, {} bytes out (ratio {:.3})",
                files.input,
                files.output,
                files.ratio()
            )?;
        }
        let pixels = meta.width * meta.height;
        let seconds = self.elapsed.as_secs_f64();
        write!(
            f,
            "Processed {pixels} pixels in {seconds:.3} seconds ({:.2} MP/s)",
            pixels as f64 / seconds.max(1e-9) / 1e6
        )?;
        if let Some(stats) = &self.stats {
            write!(
                f,
                "\nNon-zero coefficients: {} of {} (sparsity {:.2}%)",
                stats.total_nonzero(),
                stats.total(),
                stats.sparsity() * 100.0
            )?;
            for (c, name) in CHANNEL_NAMES.iter().enumerate() {
                write!(
                    f,
                    "\n  {name}: {} non-zero, sparsity {:.2}%",
                    stats.nonzero[c],
                    stats.channel_sparsity(c) * 100.0
                )?;
            }
        }
        Ok(())
    }
}
