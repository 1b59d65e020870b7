//! Per-item results for batch operations (partition, resize).
//!
//! A failing item never aborts the batch; it is logged and recorded here so
//! callers can count successes and failures without scraping logs.

use serde::Serialize;
use std::path::PathBuf;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Written to `dest`
    Done { dest: PathBuf },
    /// Dry-run: would have been written to `dest`
    Planned { dest: PathBuf },
    /// Left alone on purpose (e.g. destination name taken under the skip policy)
    Skipped { reason: String },
    /// The transfer or transform failed; the rest of the batch went on
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Ordered list of `(item, outcome)` for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn push(&mut self, name: impl Into<String>, source: impl Into<PathBuf>, outcome: ItemOutcome) {
        self.items.push(ItemReport {
            name: name.into(),
            source: source.into(),
            outcome,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn done(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Done { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Planned { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    /// Items whose outcome is `Failed`.
    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, ItemOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.outcome)).count()
    }
}
