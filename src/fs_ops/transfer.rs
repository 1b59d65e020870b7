//! Single-file transfer: move (rename, falling back to copy+remove) or copy.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Config, ConflictPolicy};
use crate::utils::unique_destination;

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename_with_metadata;
use super::helpers::io_error_with_help;
use super::report::ItemOutcome;
use super::select::FileEntry;
use super::util::is_cross_device;

/// How a selected file reaches the destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Relocate: the file no longer exists at the source afterwards
    #[default]
    Move,
    /// Duplicate: the source is left untouched
    Copy,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransferMode::Move => "move",
            TransferMode::Copy => "copy",
        })
    }
}

/// Knobs that apply to every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    pub dry_run: bool,
    pub on_conflict: ConflictPolicy,
    pub preserve_metadata: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            on_conflict: ConflictPolicy::Overwrite,
            preserve_metadata: true,
        }
    }
}

impl From<&Config> for TransferOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            dry_run: cfg.dry_run,
            on_conflict: cfg.on_conflict,
            preserve_metadata: cfg.preserve_metadata,
        }
    }
}

/// Pick the destination path for `entry`, or None when the skip policy applies.
fn resolve_destination(entry: &FileEntry, dest_dir: &Path, policy: ConflictPolicy) -> Option<PathBuf> {
    let file_name = entry
        .path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| entry.name.clone().into());
    let candidate = dest_dir.join(file_name);
    if !candidate.exists() {
        return Some(candidate);
    }
    match policy {
        ConflictPolicy::Overwrite => Some(candidate),
        ConflictPolicy::Rename => Some(unique_destination(&candidate)),
        ConflictPolicy::Skip => None,
    }
}

/// Transfer one file into `dest_dir`. Errors are per-item; the caller records them.
pub fn transfer_file(
    entry: &FileEntry,
    dest_dir: &Path,
    mode: TransferMode,
    opts: &TransferOptions,
) -> Result<ItemOutcome> {
    let Some(dest) = resolve_destination(entry, dest_dir, opts.on_conflict) else {
        debug!(name = %entry.name, dest_dir = %dest_dir.display(), "destination exists; skipping");
        return Ok(ItemOutcome::Skipped {
            reason: "destination exists".into(),
        });
    };

    if opts.dry_run {
        info!(action = %mode, src = %entry.path.display(), dest = %dest.display(), "dry-run");
        return Ok(ItemOutcome::Planned { dest });
    }

    match mode {
        TransferMode::Move => move_file(&entry.path, &dest, opts.preserve_metadata)?,
        TransferMode::Copy => {
            safe_copy_and_rename_with_metadata(&entry.path, &dest, opts.preserve_metadata)?;
        }
    }
    info!(action = %mode, src = %entry.path.display(), dest = %dest.display(), "transferred");
    Ok(ItemOutcome::Done { dest })
}

/// Rename when possible; otherwise copy (with metadata) and remove the source.
fn move_file(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<()> {
    match try_atomic_move(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file atomically");
            Ok(())
        }
        Err(e) => {
            let hint = if is_cross_device(&e) {
                "cross-filesystem; will copy instead"
            } else {
                "falling back to copy"
            };
            warn!(error = %e, hint, "atomic rename failed, using safe copy+remove");
            safe_copy_and_rename_with_metadata(src, dest, preserve_metadata)?;
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(())
        }
    }
}
