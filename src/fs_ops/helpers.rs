//! I/O helper utilities.
//!
//! Small adapters that enrich io::Error with the operation, the path and an
//! actionable hint, usable with map_err in both io::Result and anyhow::Result code.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str("; permission denied, check ownership and write permissions");
                }
                libc::EXDEV => {
                    msg.push_str("; cross-filesystem, atomic rename not possible");
                }
                libc::ENOENT => {
                    msg.push_str("; path not found, verify it exists");
                }
                libc::ENOSPC => {
                    msg.push_str("; insufficient space on device");
                }
                libc::EROFS => {
                    msg.push_str("; read-only filesystem");
                }
                libc::EISDIR => {
                    msg.push_str("; target is a directory");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str("; filename or path too long");
                }
                libc::EMFILE | libc::ENFILE => {
                    msg.push_str("; too many open files");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str("; access denied, check permissions"),
                17 => msg.push_str("; not same device, cross-filesystem move"),
                32 => msg.push_str("; sharing violation, file is in use"),
                2 | 3 => msg.push_str("; path not found, verify it exists"),
                112 => msg.push_str("; insufficient disk space"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str("; permission denied, check ownership and write permissions");
            }
            io::ErrorKind::NotFound => {
                msg.push_str("; path not found, verify it exists");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str("; already exists");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
