//! Tree overlays (BST and AVL).

use algolens_core::{NodeId, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the tree view. All fields are transient: they reflect only
/// the record at the target index, because the tree snapshot itself carries
/// the persistent state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeOverlay {
    /// Node being compared against and, for successor scans, its peer.
    pub compared: Option<(NodeId, Option<NodeId>)>,
    /// Edge being descended, as `(from, to)`.
    pub traversed: Option<(NodeId, Option<NodeId>)>,
    /// Node on the visited path (in-order visit or a located target).
    pub path_node: Option<NodeId>,
    /// Pivot of an in-flight rotation or balance check.
    pub rotation_node: Option<NodeId>,
}

impl TreeOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "tree overlay replay");
        let mut overlay = Self::default();
        let Some(step) = crate::prefix(steps, target).last() else {
            return overlay;
        };
        match step.kind {
            StepKind::Compare { node, target } => overlay.compared = Some((node, target)),
            StepKind::Traverse { from, to } => overlay.traversed = Some((from, to)),
            StepKind::Visit { node } | StepKind::Found { node } => {
                overlay.path_node = Some(node);
            }
            StepKind::RotateLeft { node }
            | StepKind::RotateRight { node }
            | StepKind::BalanceCheck { node, .. } => overlay.rotation_node = Some(node),
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_structures::BinarySearchTree;

    #[test]
    fn test_compare_step_highlights_node() {
        let mut bst = BinarySearchTree::new();
        bst.insert(50);
        let trace = bst.insert(30);
        let compare_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::Compare { .. }))
            .unwrap();
        let overlay = TreeOverlay::at(trace.as_slice(), Some(compare_at));
        assert_eq!(overlay.compared, Some((NodeId(50), None)));
        assert_eq!(overlay.traversed, None);
    }

    #[test]
    fn test_overlay_is_empty_before_playback() {
        let mut bst = BinarySearchTree::new();
        let trace = bst.insert(50);
        assert_eq!(
            TreeOverlay::at(trace.as_slice(), None),
            TreeOverlay::default()
        );
    }

    #[test]
    fn test_overlay_forgets_previous_highlight() {
        let mut bst = BinarySearchTree::new();
        bst.insert(50);
        let trace = bst.insert(30);
        // The final step is the insert record, so the compare highlight from
        // earlier in the trace must be gone.
        let overlay = TreeOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        assert_eq!(overlay.compared, None);
    }
}
