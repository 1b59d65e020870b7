//! Safe copy-and-rename helper:
//! - Copies to a temp file in the destination directory
//! - Ensures data durability (io_copy::copy_streaming fsyncs the temp file)
//! - Atomically renames temp -> dest, replacing an existing dest
//! - Fsyncs the destination directory (Unix; handled in atomic::try_atomic_move)
//!
//! Readers of `dest` therefore see either the old file or the complete new one.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::{io_copy, metadata, util};

/// Copy src -> temp in dest dir, then atomic rename temp -> dest. Returns bytes copied.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    Ok(bytes)
}

/// Safe copy, then carry timestamps/permissions (and xattrs when enabled) over if requested.
pub fn safe_copy_and_rename_with_metadata(src: &Path, dest: &Path, preserve: bool) -> Result<u64> {
    // Stat before copying so the source's atime is not the one we just bumped.
    let meta = if preserve {
        Some(fs::metadata(src).with_context(|| format!("stat {}", src.display()))?)
    } else {
        None
    };
    let bytes = safe_copy_and_rename(src, dest)?;
    if let Some(meta) = meta {
        metadata::preserve_metadata(dest, &meta);
        metadata::preserve_xattrs(src, dest);
    }
    Ok(bytes)
}
