//! Plain binary search tree with full step instrumentation.
//!
//! Nodes live in an arena indexed by `usize`; child links are indices, not
//! owning pointers, which keeps traversal order identical to a pointer-based
//! tree without any ownership cycles. Node ids are derived from values, so
//! values are assumed unique (duplicates are rejected with a message step).

use algolens_core::{NodeId, StepKind, StepRecord, StepTrace, TreeNodeSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BstNode {
    value: i64,
    left: Option<usize>,
    right: Option<usize>,
}

impl BstNode {
    fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    fn id(&self) -> NodeId {
        NodeId(self.value)
    }
}

/// Arena-backed binary search tree emitting a [`StepTrace`] per operation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarySearchTree {
    nodes: Vec<BstNode>,
    root: Option<usize>,
}

impl BinarySearchTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, value: i64) -> usize {
        self.nodes.push(BstNode::new(value));
        self.nodes.len() - 1
    }

    fn id_of(&self, idx: Option<usize>) -> Option<NodeId> {
        idx.map(|i| self.nodes[i].id())
    }

    /// Inserts `value`, returning the trace of every decision made.
    pub fn insert(&mut self, value: i64) -> StepTrace {
        debug!(value, "bst insert");
        let mut trace = StepTrace::new();
        match self.root {
            None => {
                let root = self.alloc(value);
                self.root = Some(root);
                trace.push(StepRecord::new(
                    StepKind::SetRoot {
                        node: self.snapshot_at(root),
                    },
                    format!("Tree is empty. Setting {value} as the root."),
                    2,
                ));
            }
            Some(root) => self.insert_at(root, value, &mut trace),
        }
        trace
    }

    fn insert_at(&mut self, idx: usize, value: i64, trace: &mut StepTrace) {
        let node_value = self.nodes[idx].value;
        let node_id = self.nodes[idx].id();
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: node_id,
                target: None,
            },
            format!("Comparing new value {value} with node {node_value}."),
            1,
        ));

        if value < node_value {
            let left = self.nodes[idx].left;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(left),
                },
                format!("{value} < {node_value}, so we go left."),
                6,
            ));
            match left {
                None => {
                    let child = self.alloc(value);
                    self.nodes[idx].left = Some(child);
                    trace.push(StepRecord::new(
                        StepKind::Insert {
                            parent: Some(node_id),
                            node: self.snapshot_at(child),
                        },
                        format!("Left child is null. Inserting {value} here."),
                        2,
                    ));
                }
                Some(left) => self.insert_at(left, value, trace),
            }
        } else if value > node_value {
            let right = self.nodes[idx].right;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(right),
                },
                format!("{value} > {node_value}, so we go right."),
                8,
            ));
            match right {
                None => {
                    let child = self.alloc(value);
                    self.nodes[idx].right = Some(child);
                    trace.push(StepRecord::new(
                        StepKind::Insert {
                            parent: Some(node_id),
                            node: self.snapshot_at(child),
                        },
                        format!("Right child is null. Inserting {value} here."),
                        2,
                    ));
                }
                Some(right) => self.insert_at(right, value, trace),
            }
        } else {
            trace.push_message(
                format!("Value {value} already exists in the tree. No changes made."),
                10,
            );
        }
    }

    /// Searches for `value`; the result is the found value or `None`.
    pub fn search(&self, value: i64) -> (StepTrace, Option<i64>) {
        debug!(value, "bst search");
        let mut trace = StepTrace::new();
        let found = self.search_at(self.root, value, &mut trace);
        (trace, found)
    }

    fn search_at(&self, idx: Option<usize>, value: i64, trace: &mut StepTrace) -> Option<i64> {
        let Some(idx) = idx else {
            trace.push_message(format!("Reached a null node. Value {value} not found."), 2);
            return None;
        };
        let node_value = self.nodes[idx].value;
        let node_id = self.nodes[idx].id();
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: node_id,
                target: None,
            },
            format!("Comparing target {value} with node {node_value}."),
            2,
        ));

        if node_value == value {
            trace.push(StepRecord::new(
                StepKind::Found { node: node_id },
                format!("Found {value}!"),
                2,
            ));
            return Some(node_value);
        }

        if value < node_value {
            let left = self.nodes[idx].left;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(left),
                },
                format!("{value} < {node_value}, searching left."),
                6,
            ));
            self.search_at(left, value, trace)
        } else {
            let right = self.nodes[idx].right;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(right),
                },
                format!("{value} > {node_value}, searching right."),
                10,
            ));
            self.search_at(right, value, trace)
        }
    }

    /// Deletes `value`. Emits a terminal message so playback has a final frame.
    pub fn delete(&mut self, value: i64) -> StepTrace {
        debug!(value, "bst delete");
        let mut trace = StepTrace::new();
        self.root = self.delete_at(self.root, value, &mut trace);
        let ends_with_message = matches!(
            trace.last(),
            Some(StepRecord {
                kind: StepKind::Message,
                ..
            })
        );
        if trace.is_empty() || !ends_with_message {
            trace.push_message(format!("Deletion of {value} complete."), 0);
        }
        trace
    }

    fn delete_at(
        &mut self,
        idx: Option<usize>,
        value: i64,
        trace: &mut StepTrace,
    ) -> Option<usize> {
        let Some(idx) = idx else {
            trace.push_message(format!("Value {value} not found for deletion."), 2);
            return None;
        };
        let node_value = self.nodes[idx].value;
        let node_id = self.nodes[idx].id();
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: node_id,
                target: None,
            },
            format!("Searching for {value} to delete. Current node: {node_value}."),
            1,
        ));

        if value < node_value {
            let left = self.nodes[idx].left;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(left),
                },
                format!("{value} < {node_value}, going left."),
                4,
            ));
            self.nodes[idx].left = self.delete_at(left, value, trace);
            Some(idx)
        } else if value > node_value {
            let right = self.nodes[idx].right;
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(right),
                },
                format!("{value} > {node_value}, going right."),
                6,
            ));
            self.nodes[idx].right = self.delete_at(right, value, trace);
            Some(idx)
        } else {
            trace.push(StepRecord::new(
                StepKind::Found { node: node_id },
                format!("Found node {value} to delete."),
                7,
            ));

            let right_idx = match (self.nodes[idx].left, self.nodes[idx].right) {
                (None, right) => {
                    trace.push(StepRecord::new(
                        StepKind::Delete { node: node_id },
                        "Node has no left child. Replaced with right child.",
                        9,
                    ));
                    return right;
                }
                (left, None) => {
                    trace.push(StepRecord::new(
                        StepKind::Delete { node: node_id },
                        "Node has no right child. Replaced with left child.",
                        11,
                    ));
                    return left;
                }
                (Some(_), Some(right_idx)) => right_idx,
            };

            // Two children: copy in the in-order successor, then delete it
            // from the right subtree.
            let successor = self.min_value_at(right_idx, trace);
            let successor_value = self.nodes[successor].value;
            let successor_id = self.nodes[successor].id();
            trace.push(StepRecord::new(
                StepKind::Compare {
                    node: successor_id,
                    target: Some(node_id),
                },
                format!("Found inorder successor: {successor_value}."),
                15,
            ));
            trace.push(StepRecord::new(
                StepKind::Replace {
                    node: node_id,
                    value: successor_value,
                },
                format!("Replacing {node_value} with {successor_value}."),
                16,
            ));
            self.nodes[idx].value = successor_value;

            trace.push_message(
                format!(
                    "Now, deleting the original successor node {successor_value} from the right subtree."
                ),
                17,
            );
            self.nodes[idx].right = self.delete_at(Some(right_idx), successor_value, trace);
            Some(idx)
        }
    }

    fn min_value_at(&self, mut idx: usize, trace: &mut StepTrace) -> usize {
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: self.nodes[idx].id(),
                target: None,
            },
            format!(
                "Finding minimum value in subtree. Start at {}.",
                self.nodes[idx].value
            ),
            15,
        ));
        while let Some(left) = self.nodes[idx].left {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: self.nodes[idx].id(),
                    to: Some(self.nodes[left].id()),
                },
                "Going left to find minimum.",
                15,
            ));
            idx = left;
        }
        idx
    }

    /// Emits an in-order traversal trace; visits come out in sorted order.
    pub fn inorder(&self) -> StepTrace {
        let mut trace = StepTrace::new();
        trace.push_message("Starting In-order Traversal.", 1);
        self.inorder_at(self.root, &mut trace);
        trace.push_message("In-order Traversal complete.", 6);
        trace
    }

    fn inorder_at(&self, idx: Option<usize>, trace: &mut StepTrace) {
        if let Some(idx) = idx {
            let node_value = self.nodes[idx].value;
            trace.push_message(
                format!("Recursively calling on left child of {node_value}."),
                3,
            );
            self.inorder_at(self.nodes[idx].left, trace);

            trace.push(StepRecord::new(
                StepKind::Visit {
                    node: self.nodes[idx].id(),
                },
                format!("Visiting node {node_value}."),
                4,
            ));

            trace.push_message(
                format!("Recursively calling on right child of {node_value}."),
                5,
            );
            self.inorder_at(self.nodes[idx].right, trace);
        }
    }

    /// Render-ready snapshot of the whole tree.
    pub fn tree(&self) -> Option<TreeNodeSnapshot> {
        self.root.map(|root| self.snapshot_at(root))
    }

    fn snapshot_at(&self, idx: usize) -> TreeNodeSnapshot {
        let node = &self.nodes[idx];
        let mut children = Vec::new();
        if let Some(left) = node.left {
            children.push(self.snapshot_at(left));
        }
        if let Some(right) = node.right {
            children.push(self.snapshot_at(right));
        }
        TreeNodeSnapshot {
            id: node.id(),
            value: node.value,
            height: None,
            balance_factor: None,
            children,
        }
    }

    /// In-order value sequence, for assertions and render labels.
    pub fn inorder_values(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.collect_inorder(self.root, &mut out);
        out
    }

    fn collect_inorder(&self, idx: Option<usize>, out: &mut Vec<i64>) {
        if let Some(idx) = idx {
            self.collect_inorder(self.nodes[idx].left, out);
            out.push(self.nodes[idx].value);
            self.collect_inorder(self.nodes[idx].right, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(values: &[i64]) -> BinarySearchTree {
        let mut tree = BinarySearchTree::new();
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn test_insert_emits_set_root_then_descent() {
        let mut tree = BinarySearchTree::new();
        let trace = tree.insert(50);
        assert_eq!(trace.len(), 1);
        assert!(matches!(trace[0].kind, StepKind::SetRoot { .. }));

        let trace = tree.insert(30);
        assert!(matches!(
            trace[0].kind,
            StepKind::Compare {
                node: NodeId(50),
                ..
            }
        ));
        assert!(matches!(
            trace.last().unwrap().kind,
            StepKind::Insert {
                parent: Some(NodeId(50)),
                ..
            }
        ));
    }

    #[test]
    fn test_inorder_values_sorted() {
        let tree = build(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.inorder_values(), vec![20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn test_duplicate_insert_is_rejected_with_message() {
        let mut tree = build(&[10, 5]);
        let before = tree.tree();
        let trace = tree.insert(5);
        assert!(matches!(trace.last().unwrap().kind, StepKind::Message));
        assert_eq!(tree.tree(), before);
    }

    #[test]
    fn test_search_miss_emits_terminal_message() {
        let tree = build(&[10, 5, 15]);
        let (trace, found) = tree.search(99);
        assert_eq!(found, None);
        assert!(!trace.is_empty());
        assert!(matches!(trace.last().unwrap().kind, StepKind::Message));
    }

    #[test]
    fn test_delete_leaf_and_single_child() {
        let mut tree = build(&[10, 5, 15, 3]);
        tree.delete(15); // leaf
        assert_eq!(tree.inorder_values(), vec![3, 5, 10]);
        tree.delete(5); // one child
        assert_eq!(tree.inorder_values(), vec![3, 10]);
    }

    #[test]
    fn test_delete_two_children_uses_inorder_successor() {
        let mut tree = build(&[50, 30, 70, 60, 80]);
        let trace = tree.delete(50);
        assert_eq!(tree.inorder_values(), vec![30, 60, 70, 80]);
        assert!(trace
            .iter()
            .any(|s| matches!(s.kind, StepKind::Replace { value: 60, .. })));
        // Root now carries the successor value.
        assert_eq!(tree.tree().unwrap().value, 60);
    }

    #[test]
    fn test_delete_missing_value_leaves_tree_unchanged() {
        let mut tree = build(&[10, 5]);
        let before = tree.tree();
        let trace = tree.delete(42);
        assert_eq!(tree.tree(), before);
        assert!(matches!(trace.last().unwrap().kind, StepKind::Message));
    }

    #[test]
    fn test_inorder_trace_visits_in_sorted_order() {
        let tree = build(&[20, 10, 30]);
        let trace = tree.inorder();
        let visited: Vec<NodeId> = trace
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::Visit { node } => Some(node),
                _ => None,
            })
            .collect();
        assert_eq!(visited, vec![NodeId(10), NodeId(20), NodeId(30)]);
    }

    #[test]
    fn test_engine_round_trips_through_json() {
        let tree = build(&[8, 3, 10]);
        let json = serde_json::to_string(&tree).unwrap();
        let restored: BinarySearchTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.inorder_values(), vec![3, 8, 10]);
    }
}
