//! Partitioning: select, optionally sample, then move or copy into a destination.
//!
//! Validation (source exists, percentage in range, distinct directories) happens
//! before anything is created or moved. After that, each file is independent:
//! a failure is logged, recorded in the report, and the batch goes on.

use anyhow::Result;
use rand::Rng;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::utils::{ensure_distinct_dirs, ensure_source_dir};

use super::helpers::io_error_with_help;
use super::report::{BatchReport, ItemOutcome};
use super::sample::{sample, validate_percentage};
use super::select::select_files;
use super::transfer::{transfer_file, TransferMode, TransferOptions};

/// One partition run: which files go where, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionRequest {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Case-insensitive suffix filter; None selects every regular file
    pub extension: Option<String>,
    /// Share of the selection to draw, in [0, 100]; None takes the whole selection
    pub percentage: Option<f64>,
    pub mode: TransferMode,
}

impl PartitionRequest {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>, mode: TransferMode) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            extension: None,
            percentage: None,
            mode,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }
}

/// Run a partition with an injected random source.
pub fn partition<R: Rng + ?Sized>(
    request: &PartitionRequest,
    opts: &TransferOptions,
    rng: &mut R,
) -> Result<BatchReport> {
    let src = &request.source_dir;
    let dest = &request.dest_dir;

    ensure_source_dir(src)?;
    if let Some(p) = request.percentage {
        validate_percentage(p)?;
    }
    ensure_distinct_dirs(src, dest)?;

    if opts.dry_run {
        info!(action = "mkdir -p", path = %dest.display(), "dry-run");
    } else {
        fs::create_dir_all(dest).map_err(io_error_with_help("create destination directory", dest))?;
    }

    info!(
        src = %src.display(),
        dest = %dest.display(),
        extension = request.extension.as_deref().unwrap_or("<any>"),
        percentage = ?request.percentage,
        mode = %request.mode,
        "Partitioning files"
    );

    let selected = select_files(src, request.extension.as_deref())?;
    let chosen = match request.percentage {
        Some(p) => sample(&selected, p, rng)?,
        None => selected,
    };

    let mut report = BatchReport::default();
    for entry in &chosen {
        let outcome = match transfer_file(entry, dest, request.mode, opts) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Failed to {} file", request.mode);
                ItemOutcome::Failed {
                    error: format!("{e:#}"),
                }
            }
        };
        report.push(entry.name.clone(), entry.path.clone(), outcome);
    }

    info!(
        chosen = chosen.len(),
        done = report.done(),
        planned = report.planned(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Completed partitioning"
    );
    Ok(report)
}

/// Convenience wrapper drawing from the thread-local generator.
pub fn partition_with_thread_rng(request: &PartitionRequest, opts: &TransferOptions) -> Result<BatchReport> {
    partition(request, opts, &mut rand::thread_rng())
}
