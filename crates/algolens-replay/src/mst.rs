//! Minimum spanning tree overlays.

use algolens_core::{Edge, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the MST view. The accepted edge list is persistent; the
/// considered and rejected edges are transient.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstOverlay {
    /// Edges accepted so far.
    pub mst: Vec<Edge>,
    /// Edge under consideration at the target step.
    pub current_edge: Option<Edge>,
    /// Edge rejected at the target step because it would close a cycle.
    pub rejected_edge: Option<Edge>,
}

impl MstOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "mst overlay replay");
        let mut overlay = Self::default();
        let prefix = crate::prefix(steps, target);

        for step in prefix.iter().rev() {
            match &step.kind {
                StepKind::AddToMst { mst, .. } | StepKind::FormCycle { mst, .. } => {
                    overlay.mst = mst.clone();
                    break;
                }
                _ => {}
            }
        }
        match prefix.last().map(|s| &s.kind) {
            Some(StepKind::HighlightEdge { edge }) => overlay.current_edge = Some(*edge),
            Some(StepKind::AddToMst { edge, .. }) => overlay.current_edge = Some(*edge),
            Some(StepKind::FormCycle { edge, .. }) => {
                overlay.current_edge = Some(*edge);
                overlay.rejected_edge = Some(*edge);
            }
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_algorithms::mst::kruskal;
    use algolens_core::Graph;

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.add_undirected_edge(0, 1, 1);
        g.add_undirected_edge(1, 2, 2);
        g.add_undirected_edge(0, 2, 3);
        g
    }

    #[test]
    fn test_mst_edges_persist_between_steps() {
        let (trace, finals) = kruskal(&sample());
        let last_add = trace
            .iter()
            .rposition(|s| matches!(s.kind, StepKind::AddToMst { .. }))
            .unwrap();
        for i in last_add..trace.len() {
            let overlay = MstOverlay::at(trace.as_slice(), Some(i));
            assert_eq!(overlay.mst, finals);
        }
    }

    #[test]
    fn test_rejected_edge_is_transient() {
        let (trace, _) = kruskal(&sample());
        let cycle_at = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::FormCycle { .. }));
        // The 3-cycle sample rejects exactly one edge.
        let cycle_at = cycle_at.unwrap();
        let at = MstOverlay::at(trace.as_slice(), Some(cycle_at));
        assert!(at.rejected_edge.is_some());
        let after = MstOverlay::at(trace.as_slice(), Some(cycle_at + 1));
        assert_eq!(after.rejected_edge, None);
        assert_eq!(after.mst, at.mst);
    }

    #[test]
    fn test_empty_prefix_has_no_mst() {
        let (trace, _) = kruskal(&sample());
        let overlay = MstOverlay::at(trace.as_slice(), None);
        assert!(overlay.mst.is_empty());
    }
}
