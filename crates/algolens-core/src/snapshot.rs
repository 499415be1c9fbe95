//! Render-ready snapshot types embedded in step payloads.
//!
//! These are plain data: the UI and narration collaborators consume them as
//! opaque values and never hand anything back that affects the engines.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// A tree node and its children, as handed to renderers.
///
/// `height` and `balance_factor` are populated by the self-balancing tree
/// only; the plain BST leaves them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeSnapshot {
    pub id: NodeId,
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_factor: Option<i32>,
    pub children: Vec<TreeNodeSnapshot>,
}

impl TreeNodeSnapshot {
    /// A leaf snapshot without AVL metadata.
    pub fn leaf(value: i64) -> Self {
        Self {
            id: NodeId(value),
            value,
            height: None,
            balance_factor: None,
            children: Vec::new(),
        }
    }
}

/// A singly linked list node: id, value and the id of the next node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListNodeSnapshot {
    pub id: NodeId,
    pub value: i64,
    pub next: Option<NodeId>,
}

/// An element of a queue or stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: NodeId,
    pub value: i64,
}

/// A key/value entry in a hash table chain. The key doubles as the entry id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashEntry {
    pub key: String,
    pub value: i64,
}

/// A `(row, col)` grid coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One cell of a pathfinding grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
}

impl GridCell {
    pub fn open(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            ..Default::default()
        }
    }
}
