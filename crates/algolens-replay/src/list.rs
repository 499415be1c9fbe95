//! Singly linked list overlays.

use algolens_core::{NodeId, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the linked-list view. All transient; the list snapshot
/// carries the persistent structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOverlay {
    /// Node under comparison or being left during traversal.
    pub active_node: Option<NodeId>,
    /// A next pointer being rewired, as `(from, to)`.
    pub pointer: Option<(NodeId, Option<NodeId>)>,
    /// Node visited while walking (the entry point of a scan).
    pub path_node: Option<NodeId>,
    /// Node just allocated by an insert.
    pub inserted: Option<NodeId>,
    /// Node just unlinked by a delete.
    pub deleted: Option<NodeId>,
    /// Node just promoted to head.
    pub new_head: Option<NodeId>,
}

impl ListOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "list overlay replay");
        let mut overlay = Self::default();
        let Some(step) = crate::prefix(steps, target).last() else {
            return overlay;
        };
        match &step.kind {
            StepKind::Compare { node, .. } => overlay.active_node = Some(*node),
            StepKind::Traverse { from, .. } => overlay.active_node = Some(*from),
            StepKind::PointerMove { from, to } => overlay.pointer = Some((*from, *to)),
            StepKind::Visit { node } | StepKind::Found { node } => {
                overlay.path_node = Some(*node);
            }
            StepKind::ListInsert { node } => overlay.inserted = Some(node.id),
            StepKind::ListDelete { node } => overlay.deleted = Some(*node),
            StepKind::SetHead { node } => overlay.new_head = Some(*node),
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_structures::SinglyLinkedList;

    #[test]
    fn test_insert_then_sethead_highlights() {
        let mut list = SinglyLinkedList::new();
        let trace = list.insert_at_head(7);
        let insert_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::ListInsert { .. }))
            .unwrap();
        let overlay = ListOverlay::at(trace.as_slice(), Some(insert_at));
        assert!(overlay.inserted.is_some());

        let head_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::SetHead { .. }))
            .unwrap();
        let overlay = ListOverlay::at(trace.as_slice(), Some(head_at));
        assert!(overlay.new_head.is_some());
        assert_eq!(overlay.inserted, None);
    }

    #[test]
    fn test_pointer_move_carries_both_ends() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_head(1);
        list.insert_at_head(2);
        list.insert_at_head(3);
        let trace = list.delete(1);
        let pointer_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::PointerMove { .. }))
            .unwrap();
        let overlay = ListOverlay::at(trace.as_slice(), Some(pointer_at));
        let (_, to) = overlay.pointer.unwrap();
        assert_eq!(to, None);
    }
}
