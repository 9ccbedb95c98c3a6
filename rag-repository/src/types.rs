//! Result types for vector store operations.

/// Outcome of an index deletion.
///
/// Deleting an index that does not exist is not an error: the cleanup is
/// idempotent and "nothing to delete" counts as success. The two success
/// cases stay distinguishable so callers can still log what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The index existed and was deleted.
    Deleted,
    /// The index did not exist; nothing to delete.
    NotFound,
}

/// Summary of a bulk write containing aggregate statistics.
///
/// The bulk API reports a per-document success/failure split rather than
/// raising on individual failures. Callers accumulate these counts across
/// flushes to produce run-level totals.
#[derive(Debug, Clone, Default)]
pub struct BulkSummary {
    /// Number of documents indexed successfully.
    pub succeeded: usize,
    /// Number of documents that failed to index.
    pub failed: usize,
    /// Error details for failed documents.
    pub errors: Vec<String>,
}

impl BulkSummary {
    /// Create a summary where every document succeeded.
    pub fn all_succeeded(count: usize) -> Self {
        Self {
            succeeded: count,
            failed: 0,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_outcome_not_found_is_distinct() {
        assert_ne!(DeleteOutcome::Deleted, DeleteOutcome::NotFound);
    }

    #[test]
    fn test_all_succeeded() {
        let summary = BulkSummary::all_succeeded(42);
        assert_eq!(summary.succeeded, 42);
        assert_eq!(summary.failed, 0);
        assert!(summary.errors.is_empty());
    }
}
