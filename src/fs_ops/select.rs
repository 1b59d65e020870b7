//! Directory listing and extension filtering.
//!
//! Only the top level of the directory is scanned. Entries are resolved through
//! symlinks (a link to a regular file counts as a file), and results are sorted
//! by file name so that a seeded random source picks the same sample every run.
//! Callers should still treat the order as unspecified.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::utils::ensure_source_dir;

/// A regular file discovered in a source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name (lossy UTF-8 for names the OS gives us as raw bytes)
    pub name: String,
    /// Full path inside the scanned directory
    pub path: PathBuf,
}

/// Case-insensitive suffix match, e.g. `"A.JPG"` matches `".jpg"`.
pub fn matches_extension(name: &str, extension: &str) -> bool {
    name.to_lowercase().ends_with(&extension.to_lowercase())
}

/// List every regular file directly inside `dir`.
pub fn list_regular_files(dir: &Path) -> Result<Vec<FileEntry>> {
    ensure_source_dir(dir)?;

    let entries: Vec<FileEntry> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|res| match res {
            Ok(e) => Some(e),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| FileEntry {
            name: e.file_name().to_string_lossy().into_owned(),
            path: e.into_path(),
        })
        .collect();

    trace!(dir = %dir.display(), count = entries.len(), "listed regular files");
    Ok(entries)
}

/// Select regular files in `source_dir`, optionally filtered by a case-insensitive suffix.
/// `None` selects every regular file.
pub fn select_files(source_dir: &Path, extension: Option<&str>) -> Result<Vec<FileEntry>> {
    let mut files = list_regular_files(source_dir)?;
    if let Some(ext) = extension {
        files.retain(|f| matches_extension(&f.name, ext));
    }
    debug!(
        dir = %source_dir.display(),
        extension = extension.unwrap_or("<any>"),
        selected = files.len(),
        "selected files"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DataPrepError;
    use assert_fs::prelude::*;

    fn names(files: &[FileEntry]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn selects_all_regular_files_without_extension() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("a.jpg").touch().unwrap();
        dir.child("b.PNG").touch().unwrap();
        dir.child("nested").create_dir_all().unwrap();
        dir.child("nested/deep.jpg").touch().unwrap();

        let files = select_files(dir.path(), None).unwrap();
        assert_eq!(names(&files), vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("a.jpg").touch().unwrap();
        dir.child("B.JPG").touch().unwrap();
        dir.child("c.jpeg").touch().unwrap();
        dir.child("d.png").touch().unwrap();

        let files = select_files(dir.path(), Some(".Jpg")).unwrap();
        assert_eq!(names(&files), vec!["B.JPG", "a.jpg"]);
    }

    #[test]
    fn missing_directory_is_source_not_found() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = select_files(&dir.path().join("nope"), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataPrepError>(),
            Some(DataPrepError::SourceNotFound(_))
        ));
    }

    #[test]
    fn file_path_is_not_a_source_directory() {
        let dir = assert_fs::TempDir::new().unwrap();
        let f = dir.child("plain.txt");
        f.touch().unwrap();
        assert!(select_files(f.path(), None).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_counts_but_symlinked_dir_does_not() {
        let dir = assert_fs::TempDir::new().unwrap();
        let other = assert_fs::TempDir::new().unwrap();
        other.child("real.jpg").touch().unwrap();
        std::os::unix::fs::symlink(other.child("real.jpg").path(), dir.child("link.jpg").path())
            .unwrap();
        std::os::unix::fs::symlink(other.path(), dir.child("linkdir").path()).unwrap();

        let files = select_files(dir.path(), None).unwrap();
        assert_eq!(names(&files), vec!["link.jpg"]);
    }
}
