//! CSV manifest writer.
//!
//! A manifest maps file names to an optional label, one row per regular file of
//! a directory. It is append-only:
//! - missing manifest: a header row (the caller's columns) is written first;
//! - existing manifest: no header, rows are appended, nothing is rewritten.
//!
//! Rows are written one by one; an interrupted run leaves a prefix of the rows.

use anyhow::Result;
use fs2::FileExt;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::errors::DataPrepError;
use crate::fs_ops::{io_error_with_help, list_regular_files};
use crate::utils::ensure_source_dir;

/// Summary of one append call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub path: PathBuf,
    /// True when this call created the manifest and wrote its header
    pub header_written: bool,
    pub rows: usize,
}

/// Append one row per regular file in `source_dir` to the manifest at `manifest_path`.
///
/// `columns` is required (with at least one non-blank name) when the manifest does
/// not exist yet and ignored otherwise. Each row is `[file name]`, plus `[label]`
/// when one is given. With `dry_run` the planned header and rows are logged, the
/// file is never opened, and `header_written` stays false.
pub fn append_manifest(
    manifest_path: &Path,
    source_dir: &Path,
    columns: Option<&[String]>,
    label: Option<&str>,
    dry_run: bool,
) -> Result<ManifestReport> {
    ensure_source_dir(source_dir)?;

    let exists = manifest_path.is_file();
    let header = if exists {
        if columns.is_some() {
            debug!(path = %manifest_path.display(), "manifest exists; ignoring columns");
        }
        None
    } else {
        match columns {
            Some(cols) if cols.iter().any(|c| !c.trim().is_empty()) => Some(cols),
            _ => {
                error!(path = %manifest_path.display(), "Column headers must be provided when creating a new manifest");
                return Err(DataPrepError::ColumnsRequired(manifest_path.to_path_buf()).into());
            }
        }
    };

    // A manifest kept inside `source_dir` is never one of its own rows.
    let manifest_real = dunce::canonicalize(manifest_path).ok();
    let entries: Vec<_> = list_regular_files(source_dir)?
        .into_iter()
        .filter(|e| manifest_real.is_none() || dunce::canonicalize(&e.path).ok() != manifest_real)
        .collect();

    if dry_run {
        if let Some(cols) = header {
            info!(manifest = %manifest_path.display(), columns = ?cols, "dry-run: would create manifest");
        }
        for entry in &entries {
            info!(name = %entry.name, label = label.unwrap_or(""), "dry-run: would add row");
        }
        return Ok(ManifestReport {
            path: manifest_path.to_path_buf(),
            header_written: false,
            rows: entries.len(),
        });
    }

    info!(
        manifest = %manifest_path.display(),
        src = %source_dir.display(),
        create = !exists,
        "Writing manifest"
    );

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(manifest_path)
        .map_err(io_error_with_help("open manifest", manifest_path))?;
    // Released when `file` is closed.
    file.lock_exclusive()
        .map_err(io_error_with_help("lock manifest", manifest_path))?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&file);

    if let Some(cols) = header {
        writer.write_record(cols)?;
        info!(columns = ?cols, "Created manifest with columns");
    }

    for entry in &entries {
        match label {
            Some(l) => writer.write_record([entry.name.as_str(), l])?,
            None => writer.write_record([entry.name.as_str()])?,
        }
        debug!(name = %entry.name, "Added row to manifest");
    }
    writer.flush()?;

    info!(rows = entries.len(), "Completed manifest");
    Ok(ManifestReport {
        path: manifest_path.to_path_buf(),
        header_written: header.is_some(),
        rows: entries.len(),
    })
}
