//! The step-trace protocol: records, kinds and the append-only trace.
//!
//! Every algorithm invocation returns `(result, StepTrace)`. Steps are
//! appended in the exact chronological order decisions were made; a record is
//! immutable once appended, and the trace is rebuilt from scratch on the next
//! operation. Operations that change nothing still emit a terminal
//! [`StepKind::Message`] so playback always has at least one frame.

use serde::{Deserialize, Serialize};

use crate::graph::{DistanceMap, Edge, NodeId};
use crate::snapshot::{Cell, Element, HashEntry, ListNodeSnapshot, TreeNodeSnapshot};

/// The tagged payload of one instrumentation event.
///
/// One payload shape per step kind keeps the replay fold exhaustive: adding a
/// kind forces every reconstruction to decide what it means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepKind {
    // -- Trees (BST and AVL) --------------------------------------------
    /// The tree was empty; `node` becomes the root.
    SetRoot { node: TreeNodeSnapshot },
    /// Comparing the operand against `node`; `target` is a second node
    /// involved in the comparison (e.g. the in-order successor's parent).
    Compare {
        node: NodeId,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<NodeId>,
    },
    /// Descending from `from` to `to` (`None` when the child slot is empty).
    Traverse {
        from: NodeId,
        to: Option<NodeId>,
    },
    /// A new leaf attached under `parent` (`None` for a root insert).
    Insert {
        parent: Option<NodeId>,
        node: TreeNodeSnapshot,
    },
    /// The node leaves the structure.
    Delete { node: NodeId },
    /// Two-children delete: `node`'s value is overwritten by `value`.
    Replace { node: NodeId, value: i64 },
    /// In-order traversal visits `node`.
    Visit { node: NodeId },
    /// Search/delete located its target.
    Found { node: NodeId },
    /// Height recomputed while unwinding.
    UpdateHeight { node: NodeId },
    /// Balance factor computed while unwinding.
    BalanceCheck { node: NodeId, balance: i32 },
    /// Left rotation pivoting at `node`, emitted before relinking.
    RotateLeft { node: NodeId },
    /// Right rotation pivoting at `node`, emitted before relinking.
    RotateRight { node: NodeId },

    // -- Sorting --------------------------------------------------------
    /// Comparing two array slots.
    CompareIndices { left: usize, right: usize },
    /// Array mutated; `array` is the full snapshot after the mutation.
    Swap {
        indices: Vec<usize>,
        array: Vec<i64>,
    },
    /// Transient marker on array slots (current minimum, selected key).
    MarkIndices { indices: Vec<usize> },
    /// Everything at/beyond (bubble) or at/before (insertion, selection)
    /// `boundary` is final. Quicksort marks single pivot positions.
    SortedBoundary { boundary: usize },
    /// Quicksort chose the pivot for the current partition.
    SetPivot { index: usize },

    // -- Singly linked list ---------------------------------------------
    /// A node was allocated (not yet linked).
    ListInsert { node: ListNodeSnapshot },
    /// The node was unlinked.
    ListDelete { node: NodeId },
    /// `node` becomes the new head.
    SetHead { node: NodeId },
    /// `from`'s next pointer now aims at `to`.
    PointerMove {
        from: NodeId,
        to: Option<NodeId>,
    },

    // -- Queue / stack --------------------------------------------------
    Enqueue { element: Element },
    Dequeue { id: NodeId },
    Push { element: Element },
    Pop { id: NodeId },
    /// Identifies the element about to be read or removed, so replay can
    /// highlight it before it disappears.
    Peek { id: NodeId },

    // -- Hash table -----------------------------------------------------
    /// Key hashed to `bucket`.
    HashCalculate { key: String, bucket: usize },
    /// Accessing the bucket's chain.
    BucketLookup { bucket: usize },
    /// Scanning `entry` within the chain; `visited` are the keys already
    /// scanned during this operation (replay dims them).
    ChainTraverse {
        bucket: usize,
        entry: String,
        visited: Vec<String>,
    },
    HashInsert { bucket: usize, entry: HashEntry },
    HashUpdate {
        bucket: usize,
        key: String,
        value: i64,
        entry: String,
    },
    HashDelete { bucket: usize, entry: String },
    HashFound { bucket: usize, entry: String },

    // -- Grid pathfinding -----------------------------------------------
    EnqueueCell { cell: Cell },
    DequeueCell { cell: Cell },
    PushCell { cell: Cell },
    PopCell { cell: Cell },
    /// Final path cell, emitted in root-to-end order.
    MarkPath { cell: Cell },

    // -- Shortest paths / MST -------------------------------------------
    /// The algorithm's attention is on `node` (finalized in Dijkstra,
    /// processed-in-topo-order for the DAG pass).
    HighlightNode { node: NodeId },
    /// A relax attempt or greedy consideration of `edge`.
    HighlightEdge { edge: Edge },
    /// The entire current distance mapping after a change.
    UpdateDistances { distances: DistanceMap },
    /// `edge` accepted; `mst` is the running MST edge list so far.
    AddToMst { edge: Edge, mst: Vec<Edge> },
    /// `edge` rejected because it would close a cycle.
    FormCycle { edge: Edge, mst: Vec<Edge> },

    // -- Recursion tree -------------------------------------------------
    RecursiveCall { id: String, label: String },
    RecursiveReturn {
        id: String,
        label: String,
        value: u64,
    },
    MemoHit {
        id: String,
        label: String,
        value: u64,
    },

    // -- Generic --------------------------------------------------------
    /// Pure narration; the text lives in [`StepRecord::message`].
    Message,
}

/// One instrumentation event: the tagged payload plus narration fields.
///
/// `code_line` points at the line of the pedagogical pseudocode shown next to
/// the visualization; it never influences algorithm behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(flatten)]
    pub kind: StepKind,
    pub message: String,
    pub code_line: u32,
}

impl StepRecord {
    /// Builds a record from a payload, message and pseudocode line.
    pub fn new(kind: StepKind, message: impl Into<String>, code_line: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            code_line,
        }
    }

    /// Shorthand for a pure [`StepKind::Message`] record.
    pub fn message(message: impl Into<String>, code_line: u32) -> Self {
        Self::new(StepKind::Message, message, code_line)
    }
}

/// Append-only ordered sequence of step records for one operation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace {
    steps: Vec<StepRecord>,
}

impl StepTrace {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Records already in the trace are never touched.
    pub fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    /// Appends a [`StepKind::Message`] record.
    pub fn push_message(&mut self, message: impl Into<String>, code_line: u32) {
        self.steps.push(StepRecord::message(message, code_line));
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no record has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recently appended record.
    pub fn last(&self) -> Option<&StepRecord> {
        self.steps.last()
    }

    /// The records as a slice, for replay folds.
    pub fn as_slice(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Consumes the trace, yielding the owned records.
    pub fn into_vec(self) -> Vec<StepRecord> {
        self.steps
    }

    /// Iterates the records in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.steps.iter()
    }
}

impl std::ops::Index<usize> for StepTrace {
    type Output = StepRecord;

    fn index(&self, index: usize) -> &StepRecord {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for StepTrace {
    type Item = StepRecord;
    type IntoIter = std::vec::IntoIter<StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
