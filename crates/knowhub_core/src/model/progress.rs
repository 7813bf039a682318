//! Notebook progress derivation rule.
//!
//! # Responsibility
//! - Derive a notebook's completion percent and status from its document
//!   count.
//! - Stay pure: persistence of the result belongs to repository write paths.
//!
//! # Invariants
//! - Percent is `min(100, count * 10)` and monotonic in the count.
//! - Status thresholds: 0 documents -> not started, 10 or more -> completed.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Percent contributed by each document.
pub const PERCENT_PER_DOCUMENT: i64 = 10;

/// Document count at which a notebook counts as completed.
pub const COMPLETED_THRESHOLD: i64 = 10;

/// Coarse notebook lifecycle label derived from the document count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotebookStatus {
    /// No documents yet.
    NotStarted,
    /// At least one document, fewer than the completion threshold.
    InProgress,
    /// Document count reached [`COMPLETED_THRESHOLD`].
    Completed,
}

/// Derived progress pair persisted onto the owning notebook record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion percent in `0..=100`.
    pub percent: u8,
    /// Lifecycle label consistent with `percent` at derivation time.
    pub status: NotebookStatus,
}

/// Error for invalid progress inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressError {
    /// Document counts come from `COUNT(*)` and can never be negative; a
    /// negative value means the caller is broken, so fail fast.
    NegativeDocumentCount(i64),
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeDocumentCount(count) => {
                write!(f, "document count cannot be negative, got {count}")
            }
        }
    }
}

impl Error for ProgressError {}

/// Derives progress percent and status from a post-mutation document count.
///
/// # Contract
/// - Callers pass the owning notebook's document count *after* the mutation.
/// - At exactly [`COMPLETED_THRESHOLD`] documents both the 100% percent and
///   the completed status hold; that is the intended boundary, not a
///   conflict.
///
/// # Errors
/// - [`ProgressError::NegativeDocumentCount`] when `document_count < 0`.
pub fn compute_progress(document_count: i64) -> Result<ProgressSnapshot, ProgressError> {
    if document_count < 0 {
        return Err(ProgressError::NegativeDocumentCount(document_count));
    }

    let percent = (document_count * PERCENT_PER_DOCUMENT).min(100) as u8;
    let status = if document_count == 0 {
        NotebookStatus::NotStarted
    } else if document_count >= COMPLETED_THRESHOLD {
        NotebookStatus::Completed
    } else {
        NotebookStatus::InProgress
    };

    Ok(ProgressSnapshot { percent, status })
}

#[cfg(test)]
mod tests {
    use super::{compute_progress, NotebookStatus, ProgressError};

    #[test]
    fn zero_documents_is_not_started() {
        let snapshot = compute_progress(0).unwrap();
        assert_eq!(snapshot.percent, 0);
        assert_eq!(snapshot.status, NotebookStatus::NotStarted);
    }

    #[test]
    fn partial_counts_are_in_progress() {
        let one = compute_progress(1).unwrap();
        assert_eq!(one.percent, 10);
        assert_eq!(one.status, NotebookStatus::InProgress);

        let nine = compute_progress(9).unwrap();
        assert_eq!(nine.percent, 90);
        assert_eq!(nine.status, NotebookStatus::InProgress);
    }

    #[test]
    fn threshold_count_is_completed_at_full_percent() {
        let snapshot = compute_progress(10).unwrap();
        assert_eq!(snapshot.percent, 100);
        assert_eq!(snapshot.status, NotebookStatus::Completed);
    }

    #[test]
    fn percent_clamps_above_threshold() {
        let snapshot = compute_progress(25).unwrap();
        assert_eq!(snapshot.percent, 100);
        assert_eq!(snapshot.status, NotebookStatus::Completed);
    }

    #[test]
    fn percent_is_monotonic_in_document_count() {
        let mut previous = 0;
        for count in 0..=30 {
            let snapshot = compute_progress(count).unwrap();
            assert_eq!(snapshot.percent as i64, (count * 10).min(100));
            assert!(snapshot.percent >= previous);
            previous = snapshot.percent;
        }
    }

    #[test]
    fn negative_count_fails_fast() {
        let err = compute_progress(-1).unwrap_err();
        assert_eq!(err, ProgressError::NegativeDocumentCount(-1));
        assert!(err.to_string().contains("negative"));
    }
}
