//! Small helpers shared by the batch operations.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::error;

use crate::errors::DataPrepError;

fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
}

/// `candidate` when free, else a sibling named `<stem>-<millis>-<pid>[-<n>].<ext>`.
/// Non-UTF-8 stems survive untouched.
pub(crate) fn unique_destination(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let tag = format!("{}-{}", since_epoch().as_millis(), std::process::id());
    let stem = candidate.file_stem().unwrap_or(OsStr::new("file"));
    let sibling = |suffix: &str| {
        let mut name = OsString::from(stem);
        name.push("-");
        name.push(suffix);
        if let Some(ext) = candidate.extension() {
            name.push(".");
            name.push(ext);
        }
        candidate.with_file_name(name)
    };

    std::iter::once(tag.clone())
        .chain((2..=9).map(|n| format!("{tag}-{n}")))
        .map(|suffix| sibling(&suffix))
        .find(|p| !p.exists())
        .unwrap_or_else(|| sibling(&format!("{tag}-{}", since_epoch().subsec_nanos())))
}

/// Fail with `SourceNotFound` unless `dir` is an existing directory.
pub(crate) fn ensure_source_dir(dir: &Path) -> Result<(), DataPrepError> {
    if dir.is_dir() {
        Ok(())
    } else {
        error!(path = %dir.display(), "Source directory does not exist");
        Err(DataPrepError::SourceNotFound(dir.to_path_buf()))
    }
}

/// Reject a destination that resolves (through symlinks, `.` and `..`) to the source.
/// A destination that does not exist yet is always distinct.
pub(crate) fn ensure_distinct_dirs(src: &Path, dest: &Path) -> Result<(), DataPrepError> {
    let Ok(dest_real) = dunce::canonicalize(dest) else {
        return Ok(());
    };
    let src_real = dunce::canonicalize(src).unwrap_or_else(|_| src.to_path_buf());
    if src_real == dest_real {
        error!(path = %src_real.display(), "Source and destination are the same directory");
        return Err(DataPrepError::SameDirectory(src_real));
    }
    Ok(())
}
