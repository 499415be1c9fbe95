//! Hash table overlays.

use algolens_core::{StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the hash-table view, keyed by entry key within the active
/// bucket. All transient.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashOverlay {
    /// Bucket the operation is working in.
    pub bucket: Option<usize>,
    /// Chain entry under the cursor.
    pub chain_entry: Option<String>,
    /// Entries already scanned during this operation, shown dimmed.
    pub visited_entries: Vec<String>,
    /// Entry the search just located.
    pub found_entry: Option<String>,
}

impl HashOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "hash overlay replay");
        let mut overlay = Self::default();
        let Some(step) = crate::prefix(steps, target).last() else {
            return overlay;
        };
        match &step.kind {
            StepKind::HashCalculate { bucket, .. }
            | StepKind::BucketLookup { bucket }
            | StepKind::HashInsert { bucket, .. }
            | StepKind::HashUpdate { bucket, .. } => overlay.bucket = Some(*bucket),
            StepKind::ChainTraverse {
                bucket,
                entry,
                visited,
            } => {
                overlay.bucket = Some(*bucket);
                overlay.chain_entry = Some(entry.clone());
                overlay.visited_entries = visited.clone();
            }
            StepKind::HashDelete { bucket, entry } => {
                overlay.bucket = Some(*bucket);
                overlay.chain_entry = Some(entry.clone());
            }
            StepKind::HashFound { bucket, entry } => {
                overlay.bucket = Some(*bucket);
                overlay.found_entry = Some(entry.clone());
            }
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_structures::HashTable;

    #[test]
    fn test_bucket_follows_hash_calculation() {
        let mut table = HashTable::new(10);
        let trace = table.insert("apple", 1).unwrap();
        let overlay = HashOverlay::at(trace.as_slice(), Some(0));
        assert_eq!(overlay.bucket, Some(4));
    }

    #[test]
    fn test_found_entry_set_only_at_find_step() {
        let mut table = HashTable::new(10);
        table.insert("apple", 1).unwrap();
        let (trace, _) = table.search("apple").unwrap();
        let found_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::HashFound { .. }))
            .unwrap();
        let overlay = HashOverlay::at(trace.as_slice(), Some(found_at));
        assert_eq!(overlay.found_entry.as_deref(), Some("apple"));
        let before = HashOverlay::at(trace.as_slice(), Some(found_at - 1));
        assert_eq!(before.found_entry, None);
    }

    #[test]
    fn test_chain_traverse_dims_scanned_entries() {
        let mut table = HashTable::new(1);
        table.insert("a", 1).unwrap();
        table.insert("b", 2).unwrap();
        let (trace, _) = table.search("b").unwrap();
        let last_traverse = trace
            .iter()
            .rposition(|s| matches!(s.kind, StepKind::ChainTraverse { .. }))
            .unwrap();
        let overlay = HashOverlay::at(trace.as_slice(), Some(last_traverse));
        assert_eq!(overlay.chain_entry.as_deref(), Some("b"));
        assert_eq!(overlay.visited_entries, vec!["a".to_string()]);
    }
}
