//! Minimum spanning tree construction.
//!
//! Prim grows from a start node with a sorted-list edge frontier; Kruskal
//! sorts the global edge list and unions components through a
//! path-compressing disjoint set. Both emit [`StepKind::AddToMst`] with the
//! accumulated edge list so any trace prefix carries the partial tree.

use algolens_core::{Edge, Graph, NodeId, StepKind, StepRecord, StepTrace};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::error::{AlgorithmError, AlgorithmResult};

/// Disjoint set over node ids with path compression. Union by arbitrary
/// root, matching the simple visual presentation rather than union-by-rank.
struct DisjointSet {
    parent: BTreeMap<NodeId, NodeId>,
}

impl DisjointSet {
    fn new(nodes: impl Iterator<Item = NodeId>) -> Self {
        Self {
            parent: nodes.map(|n| (n, n)).collect(),
        }
    }

    fn find(&mut self, id: NodeId) -> NodeId {
        let parent = self.parent.get(&id).copied().unwrap_or(id);
        if parent == id {
            return id;
        }
        let root = self.find(parent);
        self.parent.insert(id, root);
        root
    }

    /// Merges the two components. False if already connected.
    fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        self.parent.insert(root_a, root_b);
        true
    }
}

/// Prim's algorithm from `start`.
///
/// The frontier holds concrete edges sorted by weight; edges whose target is
/// already in the tree emit [`StepKind::FormCycle`] and are skipped. On a
/// disconnected graph only the start component is spanned.
pub fn prim(graph: &Graph, start: NodeId) -> AlgorithmResult<(StepTrace, Vec<Edge>)> {
    if !graph.contains(start) {
        return Err(AlgorithmError::UnknownNode(start));
    }
    debug!(%start, nodes = graph.node_count(), "prim");
    let mut trace = StepTrace::new();
    let mut mst: Vec<Edge> = Vec::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    visited.insert(start);
    let mut frontier: Vec<Edge> = Vec::new();

    trace.push_message(format!("Starting Prim's Algorithm from node {start}."), 1);

    for &(target, weight) in graph.neighbors(start) {
        frontier.push(Edge::new(start, target, weight));
    }
    frontier.sort_by_key(|e| e.weight);
    trace.push_message(
        format!("Adding all edges from node {start} to the priority queue."),
        6,
    );

    while !frontier.is_empty() && visited.len() < graph.node_count() {
        let edge = frontier.remove(0);
        trace.push(StepRecord::new(
            StepKind::HighlightEdge { edge },
            format!(
                "Extracting min edge ({}, {}) with weight {} from PQ.",
                edge.source, edge.target, edge.weight
            ),
            10,
        ));

        if visited.contains(&edge.target) {
            trace.push(StepRecord::new(
                StepKind::FormCycle {
                    edge,
                    mst: mst.clone(),
                },
                format!(
                    "Node {} is already in the MST. Skipping to avoid a cycle.",
                    edge.target
                ),
                12,
            ));
            continue;
        }

        visited.insert(edge.target);
        mst.push(edge);
        trace.push(StepRecord::new(
            StepKind::AddToMst {
                edge,
                mst: mst.clone(),
            },
            format!("Adding edge ({}, {}) to the MST.", edge.source, edge.target),
            15,
        ));

        for &(target, weight) in graph.neighbors(edge.target) {
            if !visited.contains(&target) {
                frontier.push(Edge::new(edge.target, target, weight));
            }
        }
        frontier.sort_by_key(|e| e.weight);
        trace.push_message(
            format!("Adding outgoing edges from new node {} to PQ.", edge.target),
            18,
        );
    }

    trace.push_message("Prim's Algorithm complete.", 24);
    Ok((trace, mst))
}

/// Kruskal's algorithm over the whole edge list.
///
/// Edges are scanned in weight order (stable, so equal weights keep
/// insertion order); the scan stops once the tree holds `|V| - 1` edges.
pub fn kruskal(graph: &Graph) -> (StepTrace, Vec<Edge>) {
    debug!(edges = graph.edges().len(), "kruskal");
    let mut trace = StepTrace::new();
    let mut mst: Vec<Edge> = Vec::new();

    let mut sorted_edges = graph.edges().to_vec();
    sorted_edges.sort_by_key(|e| e.weight);
    let mut dsu = DisjointSet::new(graph.nodes());

    trace.push_message("Starting Kruskal's Algorithm. Edges sorted by weight.", 1);

    for edge in sorted_edges {
        trace.push(StepRecord::new(
            StepKind::HighlightEdge { edge },
            format!(
                "Considering edge ({}, {}) with weight {}.",
                edge.source, edge.target, edge.weight
            ),
            5,
        ));

        if dsu.union(edge.source, edge.target) {
            mst.push(edge);
            trace.push(StepRecord::new(
                StepKind::AddToMst {
                    edge,
                    mst: mst.clone(),
                },
                format!(
                    "Nodes {} and {} are not connected. Adding edge to MST.",
                    edge.source, edge.target
                ),
                7,
            ));
        } else {
            trace.push(StepRecord::new(
                StepKind::FormCycle {
                    edge,
                    mst: mst.clone(),
                },
                format!(
                    "Edge ({}, {}) would form a cycle. Skipping.",
                    edge.source, edge.target
                ),
                6,
            ));
        }

        if mst.len() + 1 == graph.node_count() {
            break;
        }
    }

    trace.push_message("Kruskal's Algorithm complete.", 10);
    (trace, mst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_graph() -> Graph {
        // Undirected square with one diagonal: MST weight 1 + 2 + 3 = 6.
        let mut g = Graph::new();
        g.add_undirected_edge(0, 1, 1);
        g.add_undirected_edge(1, 2, 2);
        g.add_undirected_edge(2, 3, 3);
        g.add_undirected_edge(3, 0, 4);
        g.add_undirected_edge(0, 2, 5);
        g
    }

    fn total_weight(mst: &[Edge]) -> i64 {
        mst.iter().map(|e| e.weight).sum()
    }

    #[test]
    fn test_prim_spans_square_with_minimum_weight() {
        let (_, mst) = prim(&square_graph(), NodeId(0)).unwrap();
        assert_eq!(mst.len(), 3);
        assert_eq!(total_weight(&mst), 6);
    }

    #[test]
    fn test_kruskal_matches_prim_total_weight() {
        let g = square_graph();
        let (_, by_prim) = prim(&g, NodeId(0)).unwrap();
        let (_, by_kruskal) = kruskal(&g);
        assert_eq!(total_weight(&by_prim), total_weight(&by_kruskal));
    }

    #[test]
    fn test_prim_unknown_start_is_error() {
        assert_eq!(
            prim(&square_graph(), NodeId(99)),
            Err(AlgorithmError::UnknownNode(NodeId(99)))
        );
    }

    #[test]
    fn test_prim_emits_form_cycle_for_visited_target() {
        // Triangle plus a pendant: edge (1, 2) is still queued when both
        // endpoints are already in the tree.
        let mut g = Graph::new();
        g.add_undirected_edge(0, 1, 1);
        g.add_undirected_edge(0, 2, 2);
        g.add_undirected_edge(1, 2, 3);
        g.add_undirected_edge(2, 3, 10);
        let (trace, mst) = prim(&g, NodeId(0)).unwrap();
        assert!(trace
            .iter()
            .any(|s| matches!(s.kind, StepKind::FormCycle { .. })));
        assert_eq!(mst.len(), 3);
    }

    #[test]
    fn test_kruskal_rejected_edge_keeps_accumulated_mst() {
        let (trace, _) = kruskal(&square_graph());
        let mut seen_len = 0;
        for step in trace.iter() {
            match &step.kind {
                StepKind::AddToMst { mst, .. } => seen_len = mst.len(),
                StepKind::FormCycle { mst, .. } => assert_eq!(mst.len(), seen_len),
                _ => {}
            }
        }
    }

    #[test]
    fn test_kruskal_stops_at_spanning_size() {
        let (trace, mst) = kruskal(&square_graph());
        assert_eq!(mst.len(), 3);
        // Scan stops before the two heaviest undirected pairs are considered.
        let considered = trace
            .iter()
            .filter(|s| matches!(s.kind, StepKind::HighlightEdge { .. }))
            .count();
        assert!(considered < square_graph().edges().len());
    }

    #[test]
    fn test_disjoint_set_union_reports_connectivity() {
        let mut dsu = DisjointSet::new((0..4).map(NodeId));
        assert!(dsu.union(NodeId(0), NodeId(1)));
        assert!(dsu.union(NodeId(2), NodeId(3)));
        assert!(dsu.union(NodeId(1), NodeId(3)));
        assert!(!dsu.union(NodeId(0), NodeId(2)));
    }

    #[test]
    fn test_prim_on_disconnected_graph_spans_start_component() {
        let mut g = square_graph();
        g.add_undirected_edge(10, 11, 1);
        let (_, mst) = prim(&g, NodeId(0)).unwrap();
        assert_eq!(mst.len(), 3);
        assert!(mst.iter().all(|e| e.target.0 < 10));
    }
}
