//! Sorting overlays.

use algolens_core::{StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the array view.
///
/// `array` and `sorted_boundary` are persistent: they come from the most
/// recent [`StepKind::Swap`] and [`StepKind::SortedBoundary`] in the prefix,
/// so the bars keep their positions between mutations. The index highlights
/// are transient.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingOverlay {
    /// Array contents after the last mutation, `None` before the first one.
    pub array: Option<Vec<i64>>,
    /// Most recently announced sorted-region frontier.
    pub sorted_boundary: Option<usize>,
    /// Pair under comparison at the target step.
    pub compared: Option<(usize, usize)>,
    /// Slots that just moved at the target step.
    pub swapped: Option<Vec<usize>>,
    /// Marked slots (running minimum, selected key) at the target step.
    pub marked: Option<Vec<usize>>,
    /// Pivot slot at the target step.
    pub pivot: Option<usize>,
}

impl SortingOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "sorting overlay replay");
        let mut overlay = Self::default();
        let prefix = crate::prefix(steps, target);

        for step in prefix.iter().rev() {
            if let StepKind::Swap { array, .. } = &step.kind {
                overlay.array = Some(array.clone());
                break;
            }
        }
        for step in prefix.iter().rev() {
            if let StepKind::SortedBoundary { boundary } = step.kind {
                overlay.sorted_boundary = Some(boundary);
                break;
            }
        }

        match prefix.last().map(|s| &s.kind) {
            Some(StepKind::CompareIndices { left, right }) => {
                overlay.compared = Some((*left, *right));
            }
            Some(StepKind::Swap { indices, .. }) => overlay.swapped = Some(indices.clone()),
            Some(StepKind::MarkIndices { indices }) => overlay.marked = Some(indices.clone()),
            Some(StepKind::SetPivot { index }) => overlay.pivot = Some(*index),
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_algorithms::sorting::bubble_sort;

    #[test]
    fn test_array_persists_after_swap() {
        let (trace, sorted) = bubble_sort(&[2, 1]).unwrap();
        let swap_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::Swap { .. }))
            .unwrap();
        // At the swap itself and at every later step the array stays swapped.
        for i in swap_at..trace.len() {
            let overlay = SortingOverlay::at(trace.as_slice(), Some(i));
            assert_eq!(overlay.array.as_ref(), Some(&sorted));
        }
    }

    #[test]
    fn test_array_is_unset_before_first_swap() {
        let (trace, _) = bubble_sort(&[2, 1]).unwrap();
        let overlay = SortingOverlay::at(trace.as_slice(), Some(0));
        assert_eq!(overlay.array, None);
    }

    #[test]
    fn test_boundary_persists_while_highlights_reset() {
        let (trace, _) = bubble_sort(&[3, 1, 2]).unwrap();
        let boundary_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::SortedBoundary { .. }))
            .unwrap();
        let after = SortingOverlay::at(trace.as_slice(), Some(boundary_at + 1));
        assert!(after.sorted_boundary.is_some());
        let at_compare = SortingOverlay::at(trace.as_slice(), Some(1));
        assert!(at_compare.compared.is_some());
        let next = SortingOverlay::at(trace.as_slice(), Some(2));
        assert_ne!(next.compared, at_compare.compared);
    }

    #[test]
    fn test_same_prefix_folds_to_same_overlay() {
        let (trace, _) = bubble_sort(&[4, 3, 2, 1]).unwrap();
        let i = trace.len() / 2;
        assert_eq!(
            SortingOverlay::at(trace.as_slice(), Some(i)),
            SortingOverlay::at(trace.as_slice(), Some(i))
        );
    }

    #[test]
    fn test_overlay_round_trips_through_json() {
        let (trace, _) = bubble_sort(&[3, 1, 2]).unwrap();
        let overlay = SortingOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        let json = serde_json::to_string(&overlay).unwrap();
        let restored: SortingOverlay = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, overlay);
    }
}
