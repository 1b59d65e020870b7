//! Percentage-based random sampling.
//!
//! The random source is supplied by the caller so that tests (and `--seed`)
//! can make a draw reproducible.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::DataPrepError;

/// Reject percentages outside [0, 100] (NaN included).
pub fn validate_percentage(percentage: f64) -> Result<(), DataPrepError> {
    if (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(DataPrepError::InvalidPercentage(percentage))
    }
}

/// Number of items drawn from `len` at `percentage`.
///
/// `floor(len * percentage / 100)`, raised to 1 when that floors to zero for a
/// non-empty input and a non-zero percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn sample_count(len: usize, percentage: f64) -> usize {
    let raw = (len as f64 * percentage / 100.0).floor() as usize;
    if raw == 0 && len > 0 && percentage > 0.0 {
        1
    } else {
        raw.min(len)
    }
}

/// Draw a uniform random subset (without replacement) of `items`.
/// Result order is unspecified.
pub fn sample<T, R>(items: &[T], percentage: f64, rng: &mut R) -> Result<Vec<T>, DataPrepError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    validate_percentage(percentage)?;
    let count = sample_count(items.len(), percentage);
    Ok(items.choose_multiple(rng, count).cloned().collect())
}
