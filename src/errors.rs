//! Typed error definitions for dataprep.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! All of these are raised before any filesystem mutation. Per-file failures
//! inside a batch are not errors; they are recorded in a `BatchReport`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataPrepError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("percentage must be between 0 and 100 (got {0})")]
    InvalidPercentage(f64),

    #[error("columns required when creating a new manifest: {0}")]
    ColumnsRequired(PathBuf),

    #[error("target size must be non-zero (got {width}x{height})")]
    InvalidSize { width: u32, height: u32 },

    #[error("source and destination resolve to the same directory: {0}")]
    SameDirectory(PathBuf),
}

impl DataPrepError {
    /// Stable numeric code used in structured logs and as the process exit status.
    pub fn code(&self) -> i32 {
        match self {
            DataPrepError::SourceNotFound(_) => 2,
            DataPrepError::InvalidPercentage(_) => 3,
            DataPrepError::ColumnsRequired(_) => 4,
            DataPrepError::InvalidSize { .. } => 5,
            DataPrepError::SameDirectory(_) => 6,
        }
    }

    /// Short machine-friendly name for the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DataPrepError::SourceNotFound(_) => "source_not_found",
            DataPrepError::InvalidPercentage(_) => "invalid_percentage",
            DataPrepError::ColumnsRequired(_) => "columns_required",
            DataPrepError::InvalidSize { .. } => "invalid_size",
            DataPrepError::SameDirectory(_) => "same_directory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errs = [
            DataPrepError::SourceNotFound(PathBuf::from("/x")),
            DataPrepError::InvalidPercentage(101.0),
            DataPrepError::ColumnsRequired(PathBuf::from("m.csv")),
            DataPrepError::InvalidSize { width: 0, height: 1 },
            DataPrepError::SameDirectory(PathBuf::from("/y")),
        ];
        let mut codes: Vec<i32> = errs.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
        assert!(codes.iter().all(|c| *c > 1));
    }

    #[test]
    fn percentage_message_matches_contract() {
        let msg = DataPrepError::InvalidPercentage(-5.0).to_string();
        assert!(msg.starts_with("percentage must be between 0 and 100"));
    }
}
