//! Prefix-replay overlay reconstruction.
//!
//! Playback renders a trace one step at a time, and the view at step `i`
//! must look exactly as if the algorithm had run that far and stopped. Each
//! overlay here is a pure fold over `steps[..=i]`: transient fields (the
//! node being compared, the edge under consideration) come only from the
//! record at `i`, while persistent fields (the sorted boundary, the distance
//! table, the accumulated MST) come from the most recent record that set
//! them. Folding the same prefix twice yields the same overlay, so stepping
//! backwards is just folding a shorter prefix.

mod grid;
mod hash;
mod list;
mod mst;
mod queue_stack;
mod recursion;
mod sorting;
mod sssp;
mod tree;

pub use grid::GridOverlay;
pub use hash::HashOverlay;
pub use list::ListOverlay;
pub use mst::MstOverlay;
pub use queue_stack::QueueStackOverlay;
pub use recursion::RecursionOverlay;
pub use sorting::SortingOverlay;
pub use sssp::SsspOverlay;
pub use tree::TreeOverlay;

use algolens_core::StepRecord;

/// The records up to and including `target`, clamped to the trace length.
/// `None` selects the empty prefix (the state before playback starts).
pub(crate) fn prefix(steps: &[StepRecord], target: Option<usize>) -> &[StepRecord] {
    match target {
        None => &[],
        Some(i) => &steps[..steps.len().min(i + 1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_core::StepRecord;

    #[test]
    fn test_prefix_selects_inclusive_range() {
        let steps = vec![
            StepRecord::message("a", 1),
            StepRecord::message("b", 2),
            StepRecord::message("c", 3),
        ];
        assert!(prefix(&steps, None).is_empty());
        assert_eq!(prefix(&steps, Some(0)).len(), 1);
        assert_eq!(prefix(&steps, Some(2)).len(), 3);
        assert_eq!(prefix(&steps, Some(99)).len(), 3);
    }
}
