//! Shortest-path overlays.

use algolens_core::{DistanceMap, Edge, NodeId, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highlights for the shortest-path view.
///
/// The distance table is persistent: any step after the first
/// [`StepKind::UpdateDistances`] sees the most recent full map, so scrubbing
/// backwards rewinds the table to what the algorithm knew at that point.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsspOverlay {
    /// Most recent full distance table, `None` before initialization.
    pub distances: Option<DistanceMap>,
    /// Node being expanded at the target step.
    pub current_node: Option<NodeId>,
    /// Edge being relaxed at the target step.
    pub current_edge: Option<Edge>,
}

impl SsspOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "shortest-path overlay replay");
        let mut overlay = Self::default();
        let prefix = crate::prefix(steps, target);

        for step in prefix.iter().rev() {
            if let StepKind::UpdateDistances { distances } = &step.kind {
                overlay.distances = Some(distances.clone());
                break;
            }
        }
        match prefix.last().map(|s| &s.kind) {
            Some(StepKind::HighlightNode { node }) => overlay.current_node = Some(*node),
            Some(StepKind::HighlightEdge { edge }) => overlay.current_edge = Some(*edge),
            _ => {}
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_algorithms::sssp::dijkstra;
    use algolens_core::{Distance, Graph};

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.add_edge(0, 1, 4);
        g.add_edge(0, 2, 1);
        g.add_edge(2, 1, 2);
        g
    }

    #[test]
    fn test_distances_persist_past_update_step() {
        let (trace, _) = dijkstra(&sample(), NodeId(0)).unwrap();
        // Step 1 is the initialization update; step 2 highlights a node.
        let at_init = SsspOverlay::at(trace.as_slice(), Some(1));
        let after = SsspOverlay::at(trace.as_slice(), Some(2));
        assert_eq!(after.distances, at_init.distances);
        assert!(after.current_node.is_some());
    }

    #[test]
    fn test_scrubbing_back_rewinds_the_table() {
        let (trace, finals) = dijkstra(&sample(), NodeId(0)).unwrap();
        let last = SsspOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        assert_eq!(last.distances, Some(finals));
        let early = SsspOverlay::at(trace.as_slice(), Some(1));
        let early_map = early.distances.unwrap();
        assert_eq!(early_map[&NodeId(1)], Distance::Infinite);
    }

    #[test]
    fn test_no_distances_before_initialization() {
        let (trace, _) = dijkstra(&sample(), NodeId(0)).unwrap();
        let overlay = SsspOverlay::at(trace.as_slice(), Some(0));
        assert_eq!(overlay.distances, None);
    }
}
