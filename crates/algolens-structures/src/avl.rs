//! Self-balancing (AVL) binary search tree with rotation instrumentation.
//!
//! Same arena layout as the plain BST, plus a stored `height` per node. The
//! balance factor is always derived on demand (`height(left) −
//! height(right)`), never stored. After every insert/delete the tree upholds
//! `balance ∈ {-1, 0, 1}` and `height = 1 + max(child heights)` at every
//! node.
//!
//! Rotations are pure pointer transfers over arena indices: the pivot's
//! opposite-side child is relinked under the old subtree root, then both
//! touched nodes recompute their heights (demoted node first, new subtree
//! root second) without allocating or re-traversing anything.

use algolens_core::{NodeId, StepKind, StepRecord, StepTrace, TreeNodeSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AvlNode {
    value: i64,
    height: u32,
    left: Option<usize>,
    right: Option<usize>,
}

impl AvlNode {
    fn new(value: i64) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn id(&self) -> NodeId {
        NodeId(self.value)
    }
}

/// Arena-backed AVL tree emitting a [`StepTrace`] per operation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvlTree {
    nodes: Vec<AvlNode>,
    root: Option<usize>,
}

impl AvlTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, value: i64) -> usize {
        self.nodes.push(AvlNode::new(value));
        self.nodes.len() - 1
    }

    fn height(&self, idx: Option<usize>) -> u32 {
        idx.map(|i| self.nodes[i].height).unwrap_or(0)
    }

    fn balance(&self, idx: Option<usize>) -> i32 {
        match idx {
            Some(i) => {
                self.height(self.nodes[i].left) as i32 - self.height(self.nodes[i].right) as i32
            }
            None => 0,
        }
    }

    fn update_height(&mut self, idx: usize) {
        self.nodes[idx].height = 1 + self
            .height(self.nodes[idx].left)
            .max(self.height(self.nodes[idx].right));
    }

    fn id_of(&self, idx: Option<usize>) -> Option<NodeId> {
        idx.map(|i| self.nodes[i].id())
    }

    /// Right rotation pivoting at `y`. Caller guarantees a left child.
    fn rotate_right(&mut self, y: usize, trace: &mut StepTrace) -> usize {
        trace.push(StepRecord::new(
            StepKind::RotateRight {
                node: self.nodes[y].id(),
            },
            format!("Performing Right Rotation on node {}.", self.nodes[y].value),
            20,
        ));
        let Some(x) = self.nodes[y].left else {
            return y;
        };
        let t2 = self.nodes[x].right;

        self.nodes[x].right = Some(y);
        self.nodes[y].left = t2;

        self.update_height(y);
        self.update_height(x);
        trace.push(StepRecord::new(
            StepKind::UpdateHeight {
                node: self.nodes[y].id(),
            },
            "Updated heights after rotation.",
            11,
        ));
        trace.push(StepRecord::new(
            StepKind::UpdateHeight {
                node: self.nodes[x].id(),
            },
            "",
            11,
        ));

        x
    }

    /// Left rotation pivoting at `x`. Caller guarantees a right child.
    fn rotate_left(&mut self, x: usize, trace: &mut StepTrace) -> usize {
        trace.push(StepRecord::new(
            StepKind::RotateLeft {
                node: self.nodes[x].id(),
            },
            format!("Performing Left Rotation on node {}.", self.nodes[x].value),
            18,
        ));
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        let t2 = self.nodes[y].left;

        self.nodes[y].left = Some(x);
        self.nodes[x].right = t2;

        self.update_height(x);
        self.update_height(y);
        trace.push(StepRecord::new(
            StepKind::UpdateHeight {
                node: self.nodes[x].id(),
            },
            "Updated heights after rotation.",
            11,
        ));
        trace.push(StepRecord::new(
            StepKind::UpdateHeight {
                node: self.nodes[y].id(),
            },
            "",
            11,
        ));

        y
    }

    /// Inserts `value`, rebalancing on the unwind.
    pub fn insert(&mut self, value: i64) -> StepTrace {
        debug!(value, "avl insert");
        let mut trace = StepTrace::new();
        self.root = Some(self.insert_at(self.root, value, &mut trace));
        trace
    }

    fn insert_at(&mut self, idx: Option<usize>, value: i64, trace: &mut StepTrace) -> usize {
        // 1. Standard BST descent.
        let Some(idx) = idx else {
            let new = self.alloc(value);
            trace.push(StepRecord::new(
                StepKind::Insert {
                    parent: None,
                    node: self.snapshot_at(new),
                },
                "Node inserted.",
                3,
            ));
            return new;
        };

        let node_value = self.nodes[idx].value;
        let node_id = self.nodes[idx].id();
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: node_id,
                target: None,
            },
            format!("Comparing {value} with {node_value}."),
            4,
        ));

        if value < node_value {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(self.nodes[idx].left),
                },
                "Going left.",
                5,
            ));
            let new_left = self.insert_at(self.nodes[idx].left, value, trace);
            self.nodes[idx].left = Some(new_left);
        } else if value > node_value {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(self.nodes[idx].right),
                },
                "Going right.",
                6,
            ));
            let new_right = self.insert_at(self.nodes[idx].right, value, trace);
            self.nodes[idx].right = Some(new_right);
        } else {
            trace.push_message(format!("{value} already exists."), 7);
            return idx;
        }

        // 2. Update height on the unwind.
        self.update_height(idx);
        trace.push(StepRecord::new(
            StepKind::UpdateHeight { node: node_id },
            format!("Updating height of {node_value} as we backtrack."),
            10,
        ));

        // 3. Balance factor of this ancestor.
        let balance = self.balance(Some(idx));
        trace.push(StepRecord::new(
            StepKind::BalanceCheck {
                node: node_id,
                balance,
            },
            format!("Balance factor of {node_value} is {balance}."),
            13,
        ));

        // 4. Classify by the inserted value's position below the heavy child.
        let left = self.nodes[idx].left;
        let right = self.nodes[idx].right;
        let left_value = left.map(|i| self.nodes[i].value);
        let right_value = right.map(|i| self.nodes[i].value);

        if balance > 1 && left_value.is_some_and(|lv| value < lv) {
            debug!(node = node_value, "left-left imbalance");
            trace.push_message("Tree unbalanced (Left-Left Case).", 16);
            return self.rotate_right(idx, trace);
        }
        if balance < -1 && right_value.is_some_and(|rv| value > rv) {
            debug!(node = node_value, "right-right imbalance");
            trace.push_message("Tree unbalanced (Right-Right Case).", 18);
            return self.rotate_left(idx, trace);
        }
        if balance > 1 && left_value.is_some_and(|lv| value > lv) {
            debug!(node = node_value, "left-right imbalance");
            trace.push_message("Tree unbalanced (Left-Right Case).", 20);
            if let Some(left) = left {
                let new_left = self.rotate_left(left, trace);
                self.nodes[idx].left = Some(new_left);
            }
            return self.rotate_right(idx, trace);
        }
        if balance < -1 && right_value.is_some_and(|rv| value < rv) {
            debug!(node = node_value, "right-left imbalance");
            trace.push_message("Tree unbalanced (Right-Left Case).", 25);
            if let Some(right) = right {
                let new_right = self.rotate_right(right, trace);
                self.nodes[idx].right = Some(new_right);
            }
            return self.rotate_left(idx, trace);
        }

        idx
    }

    /// Deletes `value`, rebalancing on the unwind.
    ///
    /// The rotation trigger on the way back up uses the heavy child's own
    /// balance-factor sign rather than a key comparison, because deletion can
    /// unbalance a subtree without offering a new key to compare against.
    pub fn delete(&mut self, value: i64) -> StepTrace {
        debug!(value, "avl delete");
        let mut trace = StepTrace::new();
        self.root = self.delete_at(self.root, value, &mut trace);
        trace
    }

    fn delete_at(
        &mut self,
        idx: Option<usize>,
        value: i64,
        trace: &mut StepTrace,
    ) -> Option<usize> {
        // 1. Standard BST delete.
        let Some(idx) = idx else {
            trace.push_message(format!("Value {value} not found."), 3);
            return None;
        };
        let node_value = self.nodes[idx].value;
        let node_id = self.nodes[idx].id();
        trace.push(StepRecord::new(
            StepKind::Compare {
                node: node_id,
                target: None,
            },
            format!("Searching for {value}, current: {node_value}."),
            4,
        ));

        let result = if value < node_value {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(self.nodes[idx].left),
                },
                "Going left.",
                5,
            ));
            let new_left = self.delete_at(self.nodes[idx].left, value, trace);
            self.nodes[idx].left = new_left;
            Some(idx)
        } else if value > node_value {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: node_id,
                    to: self.id_of(self.nodes[idx].right),
                },
                "Going right.",
                6,
            ));
            let new_right = self.delete_at(self.nodes[idx].right, value, trace);
            self.nodes[idx].right = new_right;
            Some(idx)
        } else {
            trace.push(StepRecord::new(
                StepKind::Found { node: node_id },
                format!("Found {value}."),
                7,
            ));
            match (self.nodes[idx].left, self.nodes[idx].right) {
                (None, child) | (child, None) => child,
                (Some(_), Some(right_idx)) => {
                    let successor = self.min_value_at(right_idx, trace);
                    let successor_value = self.nodes[successor].value;
                    trace.push(StepRecord::new(
                        StepKind::Replace {
                            node: node_id,
                            value: successor_value,
                        },
                        format!("Replacing with inorder successor {successor_value}."),
                        9,
                    ));
                    self.nodes[idx].value = successor_value;
                    let new_right = self.delete_at(Some(right_idx), successor_value, trace);
                    self.nodes[idx].right = new_right;
                    Some(idx)
                }
            }
        };

        let idx = result?;

        // 2. Update height on the unwind.
        self.update_height(idx);
        let node_id = self.nodes[idx].id();
        let node_value = self.nodes[idx].value;
        trace.push(StepRecord::new(
            StepKind::UpdateHeight { node: node_id },
            format!("Updating height of {node_value} as we backtrack."),
            14,
        ));

        // 3. Balance factor of this ancestor.
        let balance = self.balance(Some(idx));
        trace.push(StepRecord::new(
            StepKind::BalanceCheck {
                node: node_id,
                balance,
            },
            format!("Balance factor of {node_value} is {balance}."),
            17,
        ));

        // 4. Rebalance by the heavy child's balance sign.
        let left = self.nodes[idx].left;
        let right = self.nodes[idx].right;

        if balance > 1 && self.balance(left) >= 0 {
            return Some(self.rotate_right(idx, trace));
        }
        if balance > 1 && self.balance(left) < 0 {
            if let Some(left) = left {
                let new_left = self.rotate_left(left, trace);
                self.nodes[idx].left = Some(new_left);
            }
            return Some(self.rotate_right(idx, trace));
        }
        if balance < -1 && self.balance(right) <= 0 {
            return Some(self.rotate_left(idx, trace));
        }
        if balance < -1 && self.balance(right) > 0 {
            if let Some(right) = right {
                let new_right = self.rotate_right(right, trace);
                self.nodes[idx].right = Some(new_right);
            }
            return Some(self.rotate_left(idx, trace));
        }

        Some(idx)
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
            8,
        ));
        while let Some(left) = self.nodes[idx].left {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: self.nodes[idx].id(),
                    to: Some(self.nodes[left].id()),
                },
                "Going left to find minimum.",
                8,
            ));
            idx = left;
        }
        idx
    }

    /// Render-ready snapshot including heights and derived balance factors.
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
            height: Some(node.height),
            balance_factor: Some(self.balance(Some(idx))),
            children,
        }
    }

    /// In-order value sequence.
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

    /// True if every reachable node satisfies the AVL invariants.
    pub fn is_balanced(&self) -> bool {
        self.root.is_none() || self.check_at(self.root).is_some()
    }

    // Returns the verified height of the subtree, or None on violation.
    fn check_at(&self, idx: Option<usize>) -> Option<u32> {
        let idx = idx?;
        let node = &self.nodes[idx];
        let left = match node.left {
            Some(_) => self.check_at(node.left)?,
            None => 0,
        };
        let right = match node.right {
            Some(_) => self.check_at(node.right)?,
            None => 0,
        };
        let balance = left as i32 - right as i32;
        if !(-1..=1).contains(&balance) || node.height != 1 + left.max(right) {
            return None;
        }
        Some(node.height)
    }
}
