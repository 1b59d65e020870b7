//! Windows implementations of platform helpers (best-effort, no ACL management).

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::temp::tmp_config_sibling_name;

/// Append-mode handle on `path`; std offers no reparse-point refusal here.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Stage under a sibling temp name, then hard-link into place (fails if `path` exists).
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = tmp_config_sibling_name(path);
    let published = (|| -> Result<()> {
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .with_context(|| format!("create temp '{}'", tmp.display()))?;
        f.write_all(contents)?;
        f.sync_all()?;
        drop(f);
        fs::hard_link(&tmp, path).with_context(|| format!("publish config '{}'", path.display()))
    })();
    let _ = fs::remove_file(&tmp);
    published
}

/// POSIX directory modes do not apply.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// POSIX file modes do not apply.
pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}
