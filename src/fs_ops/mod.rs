//! Filesystem operations: selection, sampling and transfers.

mod atomic;
mod copy;
mod helpers;
mod io_copy;
mod metadata;
pub mod partition;
pub mod report;
pub mod sample;
pub mod select;
pub mod transfer;
mod util;

pub use copy::{safe_copy_and_rename, safe_copy_and_rename_with_metadata};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use partition::{partition, partition_with_thread_rng, PartitionRequest};
pub use report::{BatchReport, ItemOutcome, ItemReport};
pub use sample::{sample, sample_count, validate_percentage};
pub use select::{list_regular_files, matches_extension, select_files, FileEntry};
pub use transfer::{transfer_file, TransferMode, TransferOptions};
