//! Core library for `dataprep`.
//!
//! Prepares image/file collections for ML training splits:
//! - `resize`: batch-resize images into a target shape
//! - `fs_ops`: select files by extension, sample a percentage, move or copy them
//! - `manifest`: create or extend a CSV mapping file names to a label
//!
//! Fatal input problems are reported as [`DataPrepError`] before anything on disk
//! changes; per-file problems end up in a [`BatchReport`] and the batch goes on.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod manifest;
pub mod output;
pub mod platform;
pub mod resize;
mod utils;

pub use config::{
    create_template_config, default_config_path, default_log_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor, Config, ConflictPolicy, LogLevel,
};
pub use errors::DataPrepError;
pub use fs_ops::{
    partition, partition_with_thread_rng, sample, select_files, BatchReport, FileEntry,
    ItemOutcome, PartitionRequest, TransferMode, TransferOptions,
};
pub use manifest::{append_manifest, ManifestReport};
pub use resize::{resize_images, ImageResizer, ImageSize, LanczosResizer};

/// Convenience re-exports for callers that want the whole surface in one import.
pub mod prelude {
    pub use crate::config::{Config, ConflictPolicy, LogLevel};
    pub use crate::errors::DataPrepError as Error;
    pub use crate::fs_ops::{
        partition, partition_with_thread_rng, sample, select_files, BatchReport, FileEntry,
        ItemOutcome, PartitionRequest, TransferMode, TransferOptions,
    };
    pub use crate::manifest::{append_manifest, ManifestReport};
    pub use crate::resize::{resize_images, ImageResizer, ImageSize, LanczosResizer};
    pub type DPResult<T> = anyhow::Result<T>;
}
