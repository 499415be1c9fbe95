//! Directed weighted graph model shared by the algorithm suite.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};

/// Identifier for nodes across all Algolens structures and graphs.
///
/// Trees derive ids from node values; lists, queues and stacks hand out
/// monotonically increasing ids. Either way an id is stable for the duration
/// of one trace.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Tentative distance of a node from the source.
///
/// `Infinite` is the sentinel for "not yet reached"; it is distinct from any
/// finite value and consumers must branch on it before doing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Finite(i64),
    Infinite,
}

impl Distance {
    /// True if this is the unreached sentinel.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Distance::Infinite)
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Infinite => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Distance::*;
        match (self, other) {
            (Finite(a), Finite(b)) => a.cmp(b),
            (Finite(_), Infinite) => std::cmp::Ordering::Less,
            (Infinite, Finite(_)) => std::cmp::Ordering::Greater,
            (Infinite, Infinite) => std::cmp::Ordering::Equal,
        }
    }
}

/// Full distance mapping emitted on every change, sentinel included.
pub type DistanceMap = BTreeMap<NodeId, Distance>;

/// A directed weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: i64,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: i64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Node set, directed adjacency and a flat edge list mirroring it.
///
/// The adjacency keeps per-node insertion order; the edge list exists for
/// algorithms that iterate edges globally (Bellman-Ford, Kruskal). Both
/// endpoints of an edge are recorded in the node set before the edge is.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: BTreeSet<NodeId>,
    adj: BTreeMap<NodeId, Vec<(NodeId, i64)>>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if not already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) {
        let id = id.into();
        if self.nodes.insert(id) {
            self.adj.insert(id, Vec::new());
        }
    }

    /// Adds a directed edge, registering both endpoints first.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>, weight: i64) {
        let (source, target) = (source.into(), target.into());
        self.add_node(source);
        self.add_node(target);
        if let Some(out) = self.adj.get_mut(&source) {
            out.push((target, weight));
        }
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
    }

    /// Adds both directions with equal weight, modeling an undirected edge.
    pub fn add_undirected_edge(
        &mut self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        weight: i64,
    ) {
        let (a, b) = (a.into(), b.into());
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Whether the node is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// All node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing `(target, weight)` pairs of a node, in insertion order.
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, i64)] {
        self.adj.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The flat edge list, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Distance map with every node at the infinite sentinel.
    pub fn infinite_distances(&self) -> DistanceMap {
        self.nodes
            .iter()
            .map(|&id| (id, Distance::Infinite))
            .collect()
    }

    /// Convert to a petgraph [`StableDiGraph`] for external analysis/layout.
    /// Returns the graph and a mapping from `NodeId` to petgraph index.
    pub fn to_petgraph(&self) -> (StableDiGraph<NodeId, i64>, BTreeMap<NodeId, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = BTreeMap::new();

        for &id in &self.nodes {
            let idx = graph.add_node(id);
            id_to_index.insert(id, idx);
        }
        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (
                id_to_index.get(&edge.source),
                id_to_index.get(&edge.target),
            ) {
                graph.add_edge(from, to, edge.weight);
            }
        }

        (graph, id_to_index)
    }
}
