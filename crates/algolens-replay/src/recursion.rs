//! Recursion tree overlays.

use algolens_core::{StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the call-graph view.
///
/// For the naive variant node keys are call ids; when `merged` is set (the
/// memoized graph collapses calls by label) the keys are labels instead, so
/// they match the merged node ids.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionOverlay {
    /// Node whose call just started.
    pub current: Option<String>,
    /// Node that just returned, with its value.
    pub returned: Option<(String, u64)>,
    /// Node resolved from the memo table, with the cached value.
    pub memo_hit: Option<(String, u64)>,
}

impl RecursionOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>, merged: bool) -> Self {
        debug!(?target, merged, "recursion overlay replay");
        let mut overlay = Self::default();
        let Some(step) = crate::prefix(steps, target).last() else {
            return overlay;
        };
        let key = |id: &str, label: &str| {
            if merged {
                label.to_string()
            } else {
                id.to_string()
            }
        };
        match &step.kind {
            StepKind::RecursiveCall { id, label } => overlay.current = Some(key(id, label)),
            StepKind::RecursiveReturn { id, label, value } => {
                overlay.returned = Some((key(id, label), *value));
            }
            StepKind::MemoHit { id, label, value } => {
                overlay.memo_hit = Some((key(id, label), *value));
            }
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_algorithms::recursion::{fibonacci, fibonacci_memoized};

    #[test]
    fn test_naive_overlay_uses_call_ids() {
        let (trace, _, _) = fibonacci(3);
        let overlay = RecursionOverlay::at(trace.as_slice(), Some(0), false);
        assert_eq!(overlay.current.as_deref(), Some("fib-3-0"));
    }

    #[test]
    fn test_merged_overlay_uses_labels() {
        let (trace, graph, _) = fibonacci_memoized(4);
        let hit_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::MemoHit { .. }))
            .unwrap();
        let overlay = RecursionOverlay::at(trace.as_slice(), Some(hit_at), true);
        let (key, _) = overlay.memo_hit.unwrap();
        assert!(graph.nodes.iter().any(|n| n.id == key));
    }

    #[test]
    fn test_return_overlay_carries_value() {
        let (trace, _, value) = fibonacci(5);
        let overlay = RecursionOverlay::at(trace.as_slice(), Some(trace.len() - 1), false);
        let (_, returned) = overlay.returned.unwrap();
        assert_eq!(returned, value);
    }
}
