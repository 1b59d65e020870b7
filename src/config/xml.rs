//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`dataprep init-config`).
//!
//! Notes:
//! - Unknown XML fields are rejected so misspelled settings surface early.
//! - A missing file is not an error: callers fall back to defaults.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, ConflictPolicy, LogLevel};
use super::DEFAULT_IMAGE_EXTENSIONS;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "dry_run", default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
    #[serde(rename = "on_conflict")]
    on_conflict: Option<String>,
    #[serde(rename = "preserve_metadata", default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_metadata: Option<bool>,
    /// Comma-separated suffix list, e.g. ".jpg,.png"
    #[serde(rename = "image_extensions")]
    image_extensions: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional bools
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }))
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref().and_then(non_empty) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = parsed
        .log_file
        .as_deref()
        .and_then(non_empty)
        .map(PathBuf::from);
    if let Some(s) = parsed.on_conflict.as_deref().and_then(non_empty) {
        cfg.on_conflict = s
            .parse::<ConflictPolicy>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = parsed.dry_run {
        cfg.dry_run = v;
    }
    if let Some(v) = parsed.preserve_metadata {
        cfg.preserve_metadata = v;
    }
    if let Some(list) = parsed.image_extensions.as_deref().and_then(non_empty) {
        let exts: Vec<String> = list
            .split(',')
            .filter_map(non_empty)
            .map(normalize_extension)
            .collect();
        if !exts.is_empty() {
            cfg.image_extensions = exts;
        }
    }

    Ok(cfg)
}

/// "JPG" and ".jpg" both become ".jpg" so suffix matching stays predictable.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_ascii_lowercase();
    if lower.starts_with('.') { lower } else { format!(".{lower}") }
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the config from `explicit` or the default location.
/// Returns Ok(None) when the file does not exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(Some(cfg))
}

/// Create a template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/dataprep.log".into());

    let content = format!(
        "<!--\n  dataprep configuration (XML)\n\n  log_level          -> quiet | normal | info | debug\n  log_file           -> path to log file (optional; stdout still used)\n  dry_run            -> true/false; report planned transfers without touching files\n  on_conflict        -> overwrite | rename | skip (existing destination names)\n  preserve_metadata  -> true/false; copy timestamps + permissions onto copies\n  image_extensions   -> comma-separated suffixes picked up by `resize`\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <dry_run>false</dry_run>\n  <on_conflict>overwrite</on_conflict>\n  <preserve_metadata>true</preserve_metadata>\n  <image_extensions>{}</image_extensions>\n</config>\n",
        suggested_log,
        DEFAULT_IMAGE_EXTENSIONS.join(","),
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
