// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;
use std::time::Instant;

use blockcodec::{CodecOptions, compress, decompress};
use blockcodec_cli::enc::numpy::to_numpy;
use blockcodec_cli::report::{FileSizes, Report};
use blockcodec_cli::{load_image, save_image};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

#[derive(Parser)]
#[command(version, about = "Compresses an image and writes its reconstruction")]
struct Opt {
    /// Input image, an 8-bit RGB .png or binary .ppm
    input: PathBuf,

    /// Reconstructed image, should end in .png or .ppm
    output: PathBuf,

    /// Compression quality; values above 95 leave the image untouched
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: u32,

    /// If specified, writes the quantized Y, Cr and Cb coefficients as a .npy array
    #[arg(long)]
    coefficients_out: Option<PathBuf>,

    /// Process blocks on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Reject images with more pixels than this
    #[arg(long)]
    pixel_limit: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();

    let mut options = if opt.sequential {
        CodecOptions::sequential()
    } else {
        CodecOptions::default()
    };
    if let Some(limit) = opt.pixel_limit {
        options = options.with_pixel_limit(limit);
    }

    let rgb = load_image(&opt.input)?;

    let start = Instant::now();
    let compressed = compress(rgb, opt.quality, &options)?;
    let mut elapsed = start.elapsed();

    let stats = compressed.stats();
    let bypass = compressed.is_bypass();
    let meta = compressed.meta;
    if let Some(path) = &opt.coefficients_out {
        match compressed.coefficients() {
            Some(coefficients) => std::fs::write(path, to_numpy(coefficients)?)
                .wrap_err_with(|| format!("writing {}", path.display()))?,
            None => tracing::warn!(
                "quality {} bypasses compression, not writing {}",
                meta.quality,
                path.display()
            ),
        }
    }

    let start = Instant::now();
    let reconstructed = decompress(compressed, &options)?;
    elapsed += start.elapsed();

    save_image(&reconstructed, &opt.output)?;

    let files = FileSizes {
        input: std::fs::metadata(&opt.input)
            .wrap_err_with(|| format!("reading metadata of {}", opt.input.display()))?
            .len(),
        output: std::fs::metadata(&opt.output)
            .wrap_err_with(|| format!("reading metadata of {}", opt.output.display()))?
            .len(),
    };

    println!(
        "{}",
        Report {
            meta,
            bypass,
            elapsed,
            stats,
            files: Some(files),
        }
    );
    Ok(())
}
