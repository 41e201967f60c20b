//! Bounded image resizing ahead of video submission.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::error::AppResult;

/// Produce a copy of `src` in `dest_dir` under the same filename, constrained
/// to fit within `max`x`max` while preserving aspect ratio. Sources already
/// inside the bound are copied unchanged (no upscaling). An existing output
/// of the same name is overwritten.
pub fn resize_to_fit(src: &Path, dest_dir: &Path, max: u32) -> AppResult<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name"))?;
    let output = dest_dir.join(file_name);

    let (width, height) = image::image_dimensions(src)?;
    if width <= max && height <= max {
        fs::copy(src, &output)?;
        return Ok(output);
    }

    let resized = image::open(src)?.resize(max, max, FilterType::Lanczos3);
    resized.save(&output)?;
    tracing::debug!("resized {} ({}x{}) to fit {}x{}", src.display(), width, height, max, max);
    Ok(output)
}
