//! Queue and stack overlays.

use algolens_core::{NodeId, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the queue/stack view.
///
/// A removal step refers to an element that is already gone from the
/// structure snapshot, so it is highlighted only when the prefix contains
/// the matching [`StepKind::Peek`] that announced it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStackOverlay {
    /// Element just added.
    pub added: Option<NodeId>,
    /// Element being read or about to be removed.
    pub focused: Option<NodeId>,
}

impl QueueStackOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "queue/stack overlay replay");
        let mut overlay = Self::default();
        let prefix = crate::prefix(steps, target);
        let Some(step) = prefix.last() else {
            return overlay;
        };
        match &step.kind {
            StepKind::Enqueue { element } | StepKind::Push { element } => {
                overlay.added = Some(element.id);
            }
            StepKind::Peek { id } => overlay.focused = Some(*id),
            StepKind::Dequeue { id } | StepKind::Pop { id } => {
                let announced = prefix
                    .iter()
                    .any(|s| matches!(s.kind, StepKind::Peek { id: peeked } if peeked == *id));
                if announced {
                    overlay.focused = Some(*id);
                }
            }
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_structures::{Queue, Stack};

    #[test]
    fn test_enqueue_highlights_new_element() {
        let mut queue = Queue::new();
        let trace = queue.enqueue(5);
        let overlay = QueueStackOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        assert!(overlay.added.is_some());
    }

    #[test]
    fn test_pop_highlight_requires_prior_peek() {
        let mut stack = Stack::new();
        stack.push(1);
        let (trace, popped) = stack.pop();
        let overlay = QueueStackOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        assert_eq!(overlay.focused, popped.map(|e| e.id));
    }

    #[test]
    fn test_dequeue_without_peek_in_prefix_has_no_focus() {
        let mut queue = Queue::new();
        queue.enqueue(1);
        let (trace, dequeued) = queue.dequeue();
        // Drop the peek record, keeping only the removal.
        let tail = &trace.as_slice()[1..];
        let overlay = QueueStackOverlay::at(tail, Some(0));
        assert!(dequeued.is_some());
        assert_eq!(overlay.focused, None);
    }
}
