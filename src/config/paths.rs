//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.
//!
//! When `DATAPREP_CONFIG` is set it wins: a directory gets `config.xml` appended,
//! a relative path is resolved against the current directory, and the default log
//! file is colocated with the config.

use anyhow::{anyhow, Context, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

fn env_config_path() -> Result<Option<PathBuf>> {
    let Some(raw) = env::var_os(CONFIG_ENV) else {
        return Ok(None);
    };
    let mut p = PathBuf::from(raw);
    if p.is_relative() {
        let cwd = env::current_dir().context("resolve current directory for relative config path")?;
        p = cwd.join(p);
    }
    if p.is_dir() {
        p.push("config.xml");
    }
    Ok(Some(p))
}

/// OS-appropriate default config path (or the `DATAPREP_CONFIG` override).
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env_config_path()? {
        return Ok(p);
    }
    if let Some(mut base) = config_dir() {
        base.push("dataprep");
        base.push("config.xml");
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| PathBuf::from(h).join(".config").join("dataprep").join("config.xml"))
        .map_err(|_| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// OS-appropriate default log file path (data dir, or next to an explicit config).
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(cfg) = env_config_path()? {
        let parent = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(parent.join("dataprep.log"));
    }
    if let Some(mut base) = data_dir() {
        base.push("dataprep");
        base.push("dataprep.log");
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("dataprep")
                .join("dataprep.log")
        })
        .map_err(|_| anyhow!("cannot determine a data directory (no data dir and no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
