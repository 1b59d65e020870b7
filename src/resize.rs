//! Batch image resizing.
//!
//! The per-image transform sits behind [`ImageResizer`] so the batch loop can be
//! exercised without real image codecs. The default [`LanczosResizer`] uses the
//! `image` crate and stretches to the exact target size (aspect ratio is not kept).

use anyhow::{Context, Result};
use image::imageops::FilterType;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::DataPrepError;
use crate::fs_ops::{io_error_with_help, list_regular_files, matches_extension, BatchReport, ItemOutcome};
use crate::utils::ensure_source_dir;

/// Target size in pixels. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    width: u32,
    height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Result<Self, DataPrepError> {
        if width == 0 || height == 0 {
            return Err(DataPrepError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resize one image from `src` into `dest`.
pub trait ImageResizer {
    fn resize(&self, src: &Path, dest: &Path, size: ImageSize) -> Result<()>;
}

/// Lanczos3 resampling; output format follows the destination extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl ImageResizer for LanczosResizer {
    fn resize(&self, src: &Path, dest: &Path, size: ImageSize) -> Result<()> {
        let img = image::open(src).with_context(|| format!("decode image '{}'", src.display()))?;
        img.resize_exact(size.width, size.height, FilterType::Lanczos3)
            .save(dest)
            .with_context(|| format!("encode image '{}'", dest.display()))?;
        Ok(())
    }
}

/// Resize every image in `source_dir` whose name ends with one of `extensions`,
/// writing the result under the same name in `dest_dir`.
///
/// A missing source fails before `dest_dir` is created. Per-image failures are
/// logged and recorded in the report; the batch continues.
pub fn resize_images(
    source_dir: &Path,
    dest_dir: &Path,
    size: ImageSize,
    extensions: &[String],
    resizer: &dyn ImageResizer,
    dry_run: bool,
) -> Result<BatchReport> {
    ensure_source_dir(source_dir)?;

    if dry_run {
        info!(action = "mkdir -p", path = %dest_dir.display(), "dry-run");
    } else {
        fs::create_dir_all(dest_dir)
            .map_err(io_error_with_help("create destination directory", dest_dir))?;
    }
    info!(
        src = %source_dir.display(),
        dest = %dest_dir.display(),
        size = %size,
        "Resizing images"
    );

    let images: Vec<_> = list_regular_files(source_dir)?
        .into_iter()
        .filter(|f| extensions.iter().any(|ext| matches_extension(&f.name, ext)))
        .collect();

    let mut report = BatchReport::default();
    for entry in &images {
        let dest = dest_dir.join(entry.path.file_name().unwrap_or_else(|| OsStr::new(&entry.name)));
        let outcome = if dry_run {
            info!(src = %entry.path.display(), dest = %dest.display(), "dry-run: would resize");
            ItemOutcome::Planned { dest }
        } else {
            match resizer.resize(&entry.path, &dest, size) {
                Ok(()) => {
                    info!(name = %entry.name, dest = %dest.display(), "Resized image");
                    ItemOutcome::Done { dest }
                }
                Err(e) => {
                    let error = format!("{e:#}");
                    warn!(name = %entry.name, error = %error, "Failed to resize image");
                    ItemOutcome::Failed { error }
                }
            }
        };
        report.push(entry.name.clone(), entry.path.clone(), outcome);
    }

    info!(done = report.done(), failed = report.failed(), "Completed resizing images");
    Ok(report)
}
