use dataprep::prelude::*;
use std::path::{Path, PathBuf};

#[test]
fn prelude_exports_expected_items() {
    let mut cfg = Config::default();
    let _ = LogLevel::Debug;
    let _err = Error::InvalidPercentage(120.0);
    // Signatures are visible through the prelude.
    let _select_fn: fn(&Path, Option<&str>) -> DPResult<Vec<FileEntry>> = select_files;
    let _manifest_fn: fn(&Path, &Path, Option<&[String]>, Option<&str>, bool) -> DPResult<ManifestReport> =
        append_manifest;
    let _partition_fn: fn(&PartitionRequest, &TransferOptions) -> DPResult<BatchReport> =
        partition_with_thread_rng;
    let req = PartitionRequest::new("in", PathBuf::from("out"), TransferMode::Copy).with_percentage(10.0);
    assert_eq!(req.percentage, Some(10.0));
    let _ = ImageSize::new(1, 1).unwrap();
    cfg.on_conflict = ConflictPolicy::Skip;
    assert_eq!(TransferOptions::from(&cfg).on_conflict, ConflictPolicy::Skip);
}
