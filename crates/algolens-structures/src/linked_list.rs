//! Singly linked list with pointer-move instrumentation.
//!
//! Nodes live in an arena; `next` is an index, and ids are handed out from a
//! monotonically increasing counter so a node keeps its identity across
//! clones of the engine.

use algolens_core::{ListNodeSnapshot, NodeId, StepKind, StepRecord, StepTrace};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LlNode {
    id: NodeId,
    value: i64,
    next: Option<usize>,
}

/// Arena-backed singly linked list emitting a [`StepTrace`] per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinglyLinkedList {
    nodes: Vec<LlNode>,
    head: Option<usize>,
    next_id: i64,
}

impl Default for SinglyLinkedList {
    fn default() -> Self {
        Self::new()
    }
}

impl SinglyLinkedList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            next_id: 1,
        }
    }

    fn alloc(&mut self, value: i64) -> usize {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(LlNode {
            id,
            value,
            next: None,
        });
        self.nodes.len() - 1
    }

    fn snapshot_at(&self, idx: usize) -> ListNodeSnapshot {
        let node = &self.nodes[idx];
        ListNodeSnapshot {
            id: node.id,
            value: node.value,
            next: node.next.map(|n| self.nodes[n].id),
        }
    }

    /// Render-ready snapshot: nodes in head-to-tail order.
    pub fn list(&self) -> Vec<ListNodeSnapshot> {
        let mut out = Vec::new();
        let mut current = self.head;
        while let Some(idx) = current {
            out.push(self.snapshot_at(idx));
            current = self.nodes[idx].next;
        }
        out
    }

    /// Inserts at the head: allocate, aim the new node at the old head,
    /// reassign the head.
    pub fn insert_at_head(&mut self, value: i64) -> StepTrace {
        debug!(value, "list insert at head");
        let mut trace = StepTrace::new();
        let new = self.alloc(value);
        trace.push_message(format!("Creating new node with value {value}."), 2);
        trace.push(StepRecord::new(
            StepKind::ListInsert {
                node: self.snapshot_at(new),
            },
            format!("New node {value} is created."),
            2,
        ));

        trace.push(StepRecord::new(
            StepKind::PointerMove {
                from: self.nodes[new].id,
                to: self.head.map(|h| self.nodes[h].id),
            },
            "Set new node's next to point to current head.",
            3,
        ));
        self.nodes[new].next = self.head;

        trace.push(StepRecord::new(
            StepKind::SetHead {
                node: self.nodes[new].id,
            },
            "Set head to be the new node.",
            4,
        ));
        self.head = Some(new);

        trace
    }

    /// Inserts at the tail, walking the whole list to find it.
    pub fn insert_at_tail(&mut self, value: i64) -> StepTrace {
        debug!(value, "list insert at tail");
        let mut trace = StepTrace::new();
        let new = self.alloc(value);
        trace.push_message(format!("Creating new node with value {value}."), 2);
        trace.push(StepRecord::new(
            StepKind::ListInsert {
                node: self.snapshot_at(new),
            },
            format!("New node {value} created."),
            2,
        ));

        let Some(head) = self.head else {
            trace.push(StepRecord::new(
                StepKind::SetHead {
                    node: self.nodes[new].id,
                },
                "List is empty. Setting new node as head.",
                4,
            ));
            self.head = Some(new);
            return trace;
        };

        let mut current = head;
        trace.push(StepRecord::new(
            StepKind::Visit {
                node: self.nodes[current].id,
            },
            "Starting from head to find the tail.",
            8,
        ));

        while let Some(next) = self.nodes[current].next {
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: self.nodes[current].id,
                    to: Some(self.nodes[next].id),
                },
                "Moving to next node.",
                10,
            ));
            current = next;
        }

        trace.push(StepRecord::new(
            StepKind::Found {
                node: self.nodes[current].id,
            },
            format!("Found the tail node: {}.", self.nodes[current].value),
            9,
        ));
        trace.push(StepRecord::new(
            StepKind::PointerMove {
                from: self.nodes[current].id,
                to: Some(self.nodes[new].id),
            },
            "Set tail's next to point to the new node.",
            12,
        ));
        self.nodes[current].next = Some(new);

        trace
    }

    /// Deletes the first node holding `value`; the head is a special case
    /// checked before the walk begins.
    pub fn delete(&mut self, value: i64) -> StepTrace {
        debug!(value, "list delete");
        let mut trace = StepTrace::new();
        let Some(head) = self.head else {
            trace.push_message("List is empty. Cannot delete.", 2);
            return trace;
        };

        trace.push(StepRecord::new(
            StepKind::Compare {
                node: self.nodes[head].id,
                target: None,
            },
            format!(
                "Checking if head node {} is the one to delete.",
                self.nodes[head].value
            ),
            4,
        ));
        if self.nodes[head].value == value {
            trace.push(StepRecord::new(
                StepKind::ListDelete {
                    node: self.nodes[head].id,
                },
                format!("Head is {value}. Deleting head."),
                5,
            ));
            self.head = self.nodes[head].next;
            return trace;
        }

        let mut current = head;
        trace.push(StepRecord::new(
            StepKind::Visit {
                node: self.nodes[current].id,
            },
            "Starting search from head.",
            9,
        ));

        while let Some(next) = self.nodes[current].next {
            if self.nodes[next].value == value {
                break;
            }
            trace.push(StepRecord::new(
                StepKind::Compare {
                    node: self.nodes[next].id,
                    target: None,
                },
                format!("Checking next node {}.", self.nodes[next].value),
                10,
            ));
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: self.nodes[current].id,
                    to: Some(self.nodes[next].id),
                },
                "Moving to next node.",
                11,
            ));
            current = next;
        }

        match self.nodes[current].next {
            Some(target) => {
                trace.push(StepRecord::new(
                    StepKind::Compare {
                        node: self.nodes[target].id,
                        target: None,
                    },
                    format!("Found node to delete: {}.", self.nodes[target].value),
                    10,
                ));
                let deleted = self.nodes[target].id;
                let bypass = self.nodes[target].next;
                trace.push(StepRecord::new(
                    StepKind::PointerMove {
                        from: self.nodes[current].id,
                        to: bypass.map(|b| self.nodes[b].id),
                    },
                    format!("Bypassing node {} to delete it.", self.nodes[target].value),
                    15,
                ));
                self.nodes[current].next = bypass;
                trace.push(StepRecord::new(
                    StepKind::ListDelete { node: deleted },
                    format!("Node {value} deleted."),
                    15,
                ));
            }
            None => {
                trace.push_message(format!("Value {value} not found in the list."), 14);
            }
        }

        trace
    }

    /// Searches for `value`; the result is the matching node's id or `None`.
    pub fn search(&self, value: i64) -> (StepTrace, Option<NodeId>) {
        debug!(value, "list search");
        let mut trace = StepTrace::new();
        trace.push_message(format!("Starting search for value {value}."), 2);

        let mut current = self.head;
        while let Some(idx) = current {
            trace.push(StepRecord::new(
                StepKind::Compare {
                    node: self.nodes[idx].id,
                    target: None,
                },
                format!("Comparing with node {}.", self.nodes[idx].value),
                4,
            ));
            if self.nodes[idx].value == value {
                trace.push(StepRecord::new(
                    StepKind::Found {
                        node: self.nodes[idx].id,
                    },
                    format!("Found {value}!"),
                    5,
                ));
                return (trace, Some(self.nodes[idx].id));
            }
            trace.push(StepRecord::new(
                StepKind::Traverse {
                    from: self.nodes[idx].id,
                    to: self.nodes[idx].next.map(|n| self.nodes[n].id),
                },
                "Moving to next node.",
                7,
            ));
            current = self.nodes[idx].next;
        }

        trace.push_message(format!("Value {value} not found. Reached end of list."), 9);
        (trace, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_insert_order_of_steps() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_head(1);
        let trace = list.insert_at_head(2);
        let kinds: Vec<&StepKind> = trace.iter().map(|s| &s.kind).collect();
        assert!(matches!(kinds[0], StepKind::Message));
        assert!(matches!(kinds[1], StepKind::ListInsert { .. }));
        assert!(matches!(
            kinds[2],
            StepKind::PointerMove {
                to: Some(NodeId(1)),
                ..
            }
        ));
        assert!(matches!(kinds[3], StepKind::SetHead { .. }));
        let values: Vec<i64> = list.list().iter().map(|n| n.value).collect();
        assert_eq!(values, vec![2, 1]);
    }

    #[test]
    fn test_tail_insert_walks_with_traverse_steps() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_tail(1);
        list.insert_at_tail(2);
        let trace = list.insert_at_tail(3);
        let hops = trace
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Traverse { .. }))
            .count();
        assert_eq!(hops, 1); // one hop from node 1 to node 2
        let values: Vec<i64> = list.list().iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_delete_head_is_special_cased() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_tail(1);
        list.insert_at_tail(2);
        let trace = list.delete(1);
        assert!(matches!(trace[0].kind, StepKind::Compare { .. }));
        assert!(matches!(trace[1].kind, StepKind::ListDelete { .. }));
        let values: Vec<i64> = list.list().iter().map(|n| n.value).collect();
        assert_eq!(values, vec![2]);
    }

    #[test]
    fn test_delete_middle_emits_bypass_before_removal() {
        let mut list = SinglyLinkedList::new();
        for v in [1, 2, 3] {
            list.insert_at_tail(v);
        }
        let trace = list.delete(2);
        let kinds: Vec<&StepKind> = trace.iter().map(|s| &s.kind).collect();
        let bypass = kinds
            .iter()
            .position(|k| matches!(k, StepKind::PointerMove { .. }))
            .unwrap();
        let removal = kinds
            .iter()
            .position(|k| matches!(k, StepKind::ListDelete { .. }))
            .unwrap();
        assert!(bypass < removal);
        let values: Vec<i64> = list.list().iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_value_keeps_list() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_tail(1);
        let trace = list.delete(9);
        assert!(matches!(trace.last().unwrap().kind, StepKind::Message));
        assert_eq!(list.list().len(), 1);
    }

    #[test]
    fn test_search_hit_and_miss() {
        let mut list = SinglyLinkedList::new();
        for v in [5, 6, 7] {
            list.insert_at_tail(v);
        }
        let (trace, found) = list.search(6);
        assert!(found.is_some());
        assert!(matches!(
            trace.last().unwrap().kind,
            StepKind::Found { .. }
        ));

        let (trace, found) = list.search(99);
        assert_eq!(found, None);
        assert!(matches!(trace.last().unwrap().kind, StepKind::Message));
    }

    #[test]
    fn test_ids_survive_clone() {
        let mut list = SinglyLinkedList::new();
        list.insert_at_tail(1);
        let mut cloned = list.clone();
        cloned.insert_at_tail(2);
        // The clone continues the id sequence; the original is untouched.
        assert_eq!(cloned.list()[1].id, NodeId(2));
        assert_eq!(list.list().len(), 1);
    }
}
