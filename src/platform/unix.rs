//! Unix implementations of platform helpers.
//!
//! Files we create (log, config) are owner-only. Neither path is allowed to be
//! a symlink at the final component: logs open with O_NOFOLLOW, and the config
//! is published with link(2), which never follows or replaces the target.

use super::temp::tmp_config_sibling_name;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

const OWNER_RW: u32 = 0o600;
const OWNER_RWX: u32 = 0o700;

/// Append-mode handle on `path`. A new file is created 0600; an existing one
/// keeps whatever mode the user gave it.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let created = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(OWNER_RW)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)?;
    if created {
        // mode() is filtered through the umask; pin it.
        file.set_permissions(fs::Permissions::from_mode(OWNER_RW))?;
    }
    Ok(file)
}

/// Publish `contents` at `path` as a new 0600 file.
///
/// The bytes are written and fsynced under a sibling temp name, then hard-linked
/// into place, so `path` is either absent or complete, and an existing file
/// (or a symlink planted there) makes the call fail instead of being replaced.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let tmp = tmp_config_sibling_name(path);
    let staged = stage_private_file(&tmp, contents);
    let published = staged.and_then(|()| {
        fs::hard_link(&tmp, path)
            .with_context(|| format!("publish config '{}'", path.display()))
    });
    let _ = fs::remove_file(&tmp);
    published?;

    File::open(parent)
        .and_then(|dir| dir.sync_all())
        .with_context(|| format!("fsync dir '{}'", parent.display()))
}

fn stage_private_file(tmp: &Path, contents: &[u8]) -> Result<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(OWNER_RW)
        .open(tmp)
        .with_context(|| format!("create temp '{}'", tmp.display()))?;
    f.set_permissions(fs::Permissions::from_mode(OWNER_RW))?;
    f.write_all(contents).context("write temp")?;
    f.sync_all().context("fsync temp")?;
    Ok(())
}

pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(OWNER_RWX))
}

pub fn set_file_mode_0600(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(OWNER_RW))
}
