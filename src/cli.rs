//! CLI definition and parsing.
//! Defines Args/Command and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, ConflictPolicy, LogLevel};
use crate::fs_ops::TransferMode;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Resize, partition and catalogue image datasets for training splits"
)]
pub struct Args {
    /// Explicit config file (otherwise DATAPREP_CONFIG or the per-user default).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs and the final summary as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Show what would be done, but do not modify files/directories.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print the config file location used by dataprep and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resize every image in SOURCE_DIR to WIDTHxHEIGHT, writing into DEST_DIR.
    Resize {
        #[arg(value_hint = ValueHint::DirPath)]
        source_dir: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        dest_dir: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
    },

    /// Move or copy files (optionally a random percentage of them) into DEST_DIR.
    Partition {
        #[arg(value_hint = ValueHint::DirPath)]
        source_dir: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        dest_dir: PathBuf,
        /// Only files ending with this suffix (case-insensitive), e.g. ".jpg".
        #[arg(long = "ext")]
        extension: Option<String>,
        /// Share of the selected files to transfer, 0-100.
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        percentage: Option<f64>,
        #[arg(long, value_enum, default_value_t = TransferMode::Move)]
        mode: TransferMode,
        /// What to do when DEST_DIR already has a file with the same name.
        #[arg(long, value_enum)]
        on_conflict: Option<ConflictPolicy>,
        /// Seed the sampler for a reproducible selection.
        #[arg(long)]
        seed: Option<u64>,
        /// Do not carry timestamps/permissions onto copies.
        #[arg(long)]
        no_preserve_metadata: bool,
    },

    /// Append one row per file in SOURCE_DIR to the CSV MANIFEST (created if missing).
    Manifest {
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        source_dir: PathBuf,
        /// Header columns, comma-separated; required when MANIFEST does not exist yet.
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
        /// Label written next to every file name.
        #[arg(long)]
        label: Option<String>,
    },

    /// Write a commented template config file to the config location.
    InitConfig,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(Command::Partition {
            on_conflict,
            no_preserve_metadata,
            ..
        }) = &self.command
        {
            if let Some(policy) = on_conflict {
                cfg.on_conflict = *policy;
            }
            if *no_preserve_metadata {
                cfg.preserve_metadata = false;
            }
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_on_commas() {
        let args = Args::try_parse_from([
            "dataprep", "manifest", "m.csv", "imgs", "--columns", "filename,label", "--label", "cat",
        ])
        .unwrap();
        match args.command {
            Some(Command::Manifest { columns, label, .. }) => {
                assert_eq!(columns, Some(vec!["filename".to_string(), "label".to_string()]));
                assert_eq!(label.as_deref(), Some("cat"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn partition_defaults_to_move_and_accepts_negative_percentage() {
        let args = Args::try_parse_from(["dataprep", "partition", "a", "b", "--percentage", "-5"]).unwrap();
        match args.command {
            Some(Command::Partition { mode, percentage, seed, .. }) => {
                assert_eq!(mode, TransferMode::Move);
                assert_eq!(percentage, Some(-5.0));
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let args = Args::try_parse_from(["dataprep", "partition", "a", "b", "--dry-run", "--json"]).unwrap();
        assert!(args.dry_run);
        assert!(args.json);
    }

    #[test]
    fn overrides_beat_config_values() {
        let args = Args::try_parse_from([
            "dataprep",
            "--debug",
            "--log-level",
            "quiet",
            "partition",
            "a",
            "b",
            "--on-conflict",
            "skip",
            "--no-preserve-metadata",
        ])
        .unwrap();
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.on_conflict, ConflictPolicy::Skip);
        assert!(!cfg.preserve_metadata);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn unset_flags_leave_config_alone() {
        let args = Args::try_parse_from(["dataprep", "manifest", "m.csv", "imgs"]).unwrap();
        let mut cfg = Config {
            on_conflict: ConflictPolicy::Rename,
            dry_run: true,
            ..Config::default()
        };
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.on_conflict, ConflictPolicy::Rename);
        assert!(cfg.dry_run);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }
}
