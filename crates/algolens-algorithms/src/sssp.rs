//! Single-source shortest paths.
//!
//! Three generators over the same [`Graph`] model: Dijkstra with a
//! sorted-list frontier, Bellman-Ford with a trailing negative-cycle check,
//! and relaxation in topological order for DAGs. Each one emits
//! [`StepKind::UpdateDistances`] with the complete map every time any entry
//! changes, so any prefix of the trace ends on a consistent distance table.

use algolens_core::{Distance, DistanceMap, Edge, Graph, NodeId, StepKind, StepRecord, StepTrace};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

use crate::error::{AlgorithmError, AlgorithmResult};

/// Sorted-list frontier. `push` keeps the list ordered by priority with a
/// stable sort, so equal priorities dequeue in insertion order.
struct Frontier {
    elements: Vec<(NodeId, i64)>,
}

impl Frontier {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    fn push(&mut self, node: NodeId, priority: i64) {
        self.elements.push((node, priority));
        self.elements.sort_by_key(|&(_, p)| p);
    }

    fn pop(&mut self) -> Option<NodeId> {
        if self.elements.is_empty() {
            None
        } else {
            Some(self.elements.remove(0).0)
        }
    }
}

/// New distance for `v` if the edge `(u, v, weight)` improves on the current
/// entry. Infinite `u` never relaxes anything.
fn relaxed(distances: &DistanceMap, u: NodeId, v: NodeId, weight: i64) -> Option<i64> {
    let dist_u = distances.get(&u).copied().unwrap_or(Distance::Infinite).finite()?;
    let candidate = dist_u + weight;
    match distances.get(&v).copied().unwrap_or(Distance::Infinite) {
        Distance::Infinite => Some(candidate),
        Distance::Finite(dist_v) if candidate < dist_v => Some(candidate),
        Distance::Finite(_) => None,
    }
}

fn push_update(trace: &mut StepTrace, distances: &DistanceMap, message: String, code_line: u32) {
    trace.push(StepRecord::new(
        StepKind::UpdateDistances {
            distances: distances.clone(),
        },
        message,
        code_line,
    ));
}

/// Dijkstra's algorithm from `start`.
///
/// Every edge inspection emits a [`StepKind::HighlightEdge`] whether or not
/// it relaxes. Negative weights are not rejected; with them present the
/// final distances are not guaranteed shortest.
pub fn dijkstra(graph: &Graph, start: NodeId) -> AlgorithmResult<(StepTrace, DistanceMap)> {
    if !graph.contains(start) {
        return Err(AlgorithmError::UnknownNode(start));
    }
    debug!(%start, nodes = graph.node_count(), "dijkstra");
    let mut trace = StepTrace::new();
    let mut frontier = Frontier::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();

    trace.push_message(format!("Starting Dijkstra's Algorithm from node {start}."), 1);

    let mut distances = graph.infinite_distances();
    distances.insert(start, Distance::Finite(0));
    push_update(
        &mut trace,
        &distances,
        "Initialize all distances to infinity, and source to 0.".to_string(),
        7,
    );

    frontier.push(start, 0);

    while let Some(u) = frontier.pop() {
        if !visited.insert(u) {
            continue;
        }

        trace.push(StepRecord::new(
            StepKind::HighlightNode { node: u },
            format!("Visiting node {u}. Exploring neighbors."),
            13,
        ));

        for &(v, weight) in graph.neighbors(u) {
            trace.push(StepRecord::new(
                StepKind::HighlightEdge {
                    edge: Edge::new(u, v, weight),
                },
                format!("Checking edge from {u} to {v} with weight {weight}."),
                16,
            ));

            if let Some(new_dist) = relaxed(&distances, u, v, weight) {
                distances.insert(v, Distance::Finite(new_dist));
                frontier.push(v, new_dist);
                push_update(
                    &mut trace,
                    &distances,
                    format!("Distance to {v} updated to {new_dist}."),
                    19,
                );
            }
        }
    }

    trace.push_message("Dijkstra's Algorithm complete. Final distances calculated.", 24);
    Ok((trace, distances))
}

/// Bellman-Ford from `start`: `|V| - 1` relaxation passes over the edge
/// list, then one detection pass.
///
/// On a negative cycle the run stops with `None`; the distances accumulated
/// so far are in the trace but are not claimed final.
pub fn bellman_ford(
    graph: &Graph,
    start: NodeId,
) -> AlgorithmResult<(StepTrace, Option<DistanceMap>)> {
    if !graph.contains(start) {
        return Err(AlgorithmError::UnknownNode(start));
    }
    debug!(%start, edges = graph.edges().len(), "bellman-ford");
    let mut trace = StepTrace::new();

    trace.push_message(
        format!("Starting Bellman-Ford Algorithm from node {start}."),
        1,
    );

    let mut distances = graph.infinite_distances();
    distances.insert(start, Distance::Finite(0));
    push_update(
        &mut trace,
        &distances,
        "Initialize all distances to infinity, and source to 0.".to_string(),
        6,
    );

    for pass in 1..graph.node_count() {
        trace.push_message(format!("--- Relaxation Pass {pass} ---"), 9);
        for edge in graph.edges() {
            trace.push(StepRecord::new(
                StepKind::HighlightEdge { edge: *edge },
                format!(
                    "Relaxing edge ({}, {}) with weight {}.",
                    edge.source, edge.target, edge.weight
                ),
                11,
            ));
            if let Some(new_dist) = relaxed(&distances, edge.source, edge.target, edge.weight) {
                distances.insert(edge.target, Distance::Finite(new_dist));
                push_update(
                    &mut trace,
                    &distances,
                    format!("Distance to {} updated to {new_dist}.", edge.target),
                    12,
                );
            }
        }
    }

    trace.push_message("Checking for negative weight cycles...", 17);
    for edge in graph.edges() {
        if relaxed(&distances, edge.source, edge.target, edge.weight).is_some() {
            trace.push(StepRecord::new(
                StepKind::HighlightEdge { edge: *edge },
                format!(
                    "Negative weight cycle detected at edge ({}, {})!",
                    edge.source, edge.target
                ),
                20,
            ));
            trace.push_message("Bellman-Ford Algorithm complete.", 24);
            return Ok((trace, None));
        }
    }

    trace.push_message("No negative weight cycles found.", 24);
    trace.push_message("Bellman-Ford Algorithm complete.", 24);
    Ok((trace, Some(distances)))
}

/// FIFO Kahn's algorithm. `None` when the graph has a cycle.
fn topological_order(graph: &Graph) -> Option<Vec<NodeId>> {
    let mut in_degree: BTreeMap<NodeId, usize> = graph.nodes().map(|n| (n, 0)).collect();
    for edge in graph.edges() {
        if let Some(d) = in_degree.get_mut(&edge.target) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .filter(|n| in_degree.get(n) == Some(&0))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(u) = queue.pop_front() {
        order.push(u);
        for &(v, _) in graph.neighbors(u) {
            if let Some(d) = in_degree.get_mut(&v) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(v);
                }
            }
        }
    }

    (order.len() == graph.node_count()).then_some(order)
}

/// Shortest paths on a DAG: topological sort, then one relaxation sweep.
///
/// A cyclic graph aborts with a single message step and `None` before any
/// distance is computed.
pub fn dag_shortest_path(
    graph: &Graph,
    start: NodeId,
) -> AlgorithmResult<(StepTrace, Option<DistanceMap>)> {
    if !graph.contains(start) {
        return Err(AlgorithmError::UnknownNode(start));
    }
    debug!(%start, "dag shortest path");
    let mut trace = StepTrace::new();

    let Some(order) = topological_order(graph) else {
        trace.push_message("Graph is not a DAG! Cannot run algorithm.", 1);
        return Ok((trace, None));
    };

    let order_list = order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    trace.push_message(format!("Topological sort complete. Order: {order_list}"), 3);

    let mut distances = graph.infinite_distances();
    distances.insert(start, Distance::Finite(0));
    push_update(&mut trace, &distances, "Initialize distances.".to_string(), 8);

    for u in order {
        trace.push(StepRecord::new(
            StepKind::HighlightNode { node: u },
            format!("Processing node {u} from topological order."),
            10,
        ));
        for &(v, weight) in graph.neighbors(u) {
            trace.push(StepRecord::new(
                StepKind::HighlightEdge {
                    edge: Edge::new(u, v, weight),
                },
                format!("Relaxing edge ({u}, {v})."),
                13,
            ));
            if let Some(new_dist) = relaxed(&distances, u, v, weight) {
                distances.insert(v, Distance::Finite(new_dist));
                push_update(
                    &mut trace,
                    &distances,
                    format!("Distance to {v} updated to {new_dist}."),
                    14,
                );
            }
        }
    }

    trace.push_message("DAG Shortest Path complete.", 18);
    Ok((trace, Some(distances)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // 0 → 1 (4), 0 → 2 (1), 2 → 1 (2), 1 → 3 (1), 2 → 3 (5)
        let mut g = Graph::new();
        g.add_edge(0, 1, 4);
        g.add_edge(0, 2, 1);
        g.add_edge(2, 1, 2);
        g.add_edge(1, 3, 1);
        g.add_edge(2, 3, 5);
        g
    }

    fn finite(distances: &DistanceMap, id: i64) -> Option<i64> {
        distances.get(&NodeId(id)).and_then(Distance::finite)
    }

    #[test]
    fn test_dijkstra_diamond_distances() {
        let (trace, distances) = dijkstra(&diamond(), NodeId(0)).unwrap();
        assert_eq!(finite(&distances, 0), Some(0));
        assert_eq!(finite(&distances, 1), Some(3));
        assert_eq!(finite(&distances, 2), Some(1));
        assert_eq!(finite(&distances, 3), Some(4));
        assert!(matches!(trace[0].kind, StepKind::Message));
        assert!(matches!(trace[1].kind, StepKind::UpdateDistances { .. }));
    }

    #[test]
    fn test_dijkstra_unreachable_stays_infinite() {
        let mut g = diamond();
        g.add_node(9);
        let (_, distances) = dijkstra(&g, NodeId(0)).unwrap();
        assert!(distances[&NodeId(9)].is_infinite());
    }

    #[test]
    fn test_dijkstra_unknown_start_is_error() {
        assert_eq!(
            dijkstra(&diamond(), NodeId(42)),
            Err(AlgorithmError::UnknownNode(NodeId(42)))
        );
    }

    #[test]
    fn test_dijkstra_every_distance_update_carries_full_map() {
        let (trace, _) = dijkstra(&diamond(), NodeId(0)).unwrap();
        for step in trace.iter() {
            if let StepKind::UpdateDistances { distances } = &step.kind {
                assert_eq!(distances.len(), 4);
            }
        }
    }

    #[test]
    fn test_bellman_ford_matches_dijkstra_on_nonnegative() {
        let g = diamond();
        let (_, dj) = dijkstra(&g, NodeId(0)).unwrap();
        let (_, bf) = bellman_ford(&g, NodeId(0)).unwrap();
        assert_eq!(bf, Some(dj));
    }

    #[test]
    fn test_bellman_ford_handles_negative_edge() {
        let mut g = Graph::new();
        g.add_edge(0, 1, 4);
        g.add_edge(0, 2, 5);
        g.add_edge(2, 1, -3);
        let (_, distances) = bellman_ford(&g, NodeId(0)).unwrap();
        let distances = distances.unwrap();
        assert_eq!(finite(&distances, 1), Some(2));
    }

    #[test]
    fn test_bellman_ford_detects_negative_cycle() {
        let mut g = Graph::new();
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, -3);
        g.add_edge(2, 1, 1);
        let (trace, distances) = bellman_ford(&g, NodeId(0)).unwrap();
        assert_eq!(distances, None);
        assert!(trace
            .iter()
            .any(|s| s.message.contains("Negative weight cycle detected")));
    }

    #[test]
    fn test_bellman_ford_runs_v_minus_one_passes() {
        let (trace, _) = bellman_ford(&diamond(), NodeId(0)).unwrap();
        let passes = trace
            .iter()
            .filter(|s| s.message.starts_with("--- Relaxation Pass"))
            .count();
        assert_eq!(passes, 3);
    }

    #[test]
    fn test_dag_shortest_path_diamond() {
        let (_, distances) = dag_shortest_path(&diamond(), NodeId(0)).unwrap();
        let distances = distances.unwrap();
        assert_eq!(finite(&distances, 3), Some(4));
    }

    #[test]
    fn test_dag_rejects_cyclic_graph_with_single_step() {
        let mut g = Graph::new();
        g.add_edge(0, 1, 1);
        g.add_edge(1, 0, 1);
        let (trace, distances) = dag_shortest_path(&g, NodeId(0)).unwrap();
        assert_eq!(distances, None);
        assert_eq!(trace.len(), 1);
        assert!(trace[0].message.contains("not a DAG"));
    }

    #[test]
    fn test_frontier_ties_break_by_insertion_order() {
        let mut f = Frontier::new();
        f.push(NodeId(5), 2);
        f.push(NodeId(7), 2);
        f.push(NodeId(1), 1);
        assert_eq!(f.pop(), Some(NodeId(1)));
        assert_eq!(f.pop(), Some(NodeId(5)));
        assert_eq!(f.pop(), Some(NodeId(7)));
    }
}
