//! Fibonacci call-tree builder.
//!
//! Each invocation gets a unique id of the form `fib-<n>-<counter>` so the
//! naive variant renders every call as its own node. The memoized variant
//! collapses calls by label instead, merging all `fib(k)` nodes into one and
//! deduplicating the edges between them.

use algolens_core::{StepKind, StepRecord, StepTrace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One rendered call node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionGraphNode {
    pub id: String,
    pub label: String,
}

/// A caller-to-callee edge between rendered nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionGraphLink {
    pub source: String,
    pub target: String,
}

/// Render-ready call graph: a tree for the naive variant, a DAG with merged
/// nodes for the memoized one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionGraph {
    pub nodes: Vec<RecursionGraphNode>,
    pub links: Vec<RecursionGraphLink>,
}

struct CallNode {
    id: String,
    label: String,
    children: Vec<CallNode>,
}

struct FibonacciTracer {
    trace: StepTrace,
    memo: BTreeMap<u32, u64>,
    memoized: bool,
    call_counter: usize,
}

impl FibonacciTracer {
    fn new(memoized: bool) -> Self {
        Self {
            trace: StepTrace::new(),
            memo: BTreeMap::new(),
            memoized,
            call_counter: 0,
        }
    }

    fn build(&mut self, n: u32) -> (CallNode, u64) {
        let id = format!("fib-{n}-{}", self.call_counter);
        self.call_counter += 1;
        let label = format!("fib({n})");
        let mut node = CallNode {
            id: id.clone(),
            label: label.clone(),
            children: Vec::new(),
        };

        self.trace.push(StepRecord::new(
            StepKind::RecursiveCall {
                id: id.clone(),
                label: label.clone(),
            },
            format!("Calling fib({n})."),
            2,
        ));

        if self.memoized {
            if let Some(&value) = self.memo.get(&n) {
                self.trace.push(StepRecord::new(
                    StepKind::MemoHit {
                        id,
                        label,
                        value,
                    },
                    format!("fib({n}) found in memo. Returning {value}."),
                    3,
                ));
                return (node, value);
            }
        }

        if n <= 1 {
            let value = u64::from(n);
            self.trace.push(StepRecord::new(
                StepKind::RecursiveReturn { id, label, value },
                format!("Base case: fib({n}) returns {value}."),
                if self.memoized { 6 } else { 3 },
            ));
            if self.memoized {
                self.memo.insert(n, value);
            }
            return (node, value);
        }

        self.trace.push_message(
            format!("Calculating fib({}) + fib({})", n - 1, n - 2),
            if self.memoized { 9 } else { 6 },
        );

        let (left_node, left) = self.build(n - 1);
        node.children.push(left_node);
        let (right_node, right) = self.build(n - 2);
        node.children.push(right_node);

        let value = left + right;
        if self.memoized {
            self.memo.insert(n, value);
        }

        self.trace.push(StepRecord::new(
            StepKind::RecursiveReturn { id, label, value },
            format!("fib({n}) returns {left} + {right} = {value}."),
            if self.memoized { 11 } else { 8 },
        ));

        (node, value)
    }
}

fn tree_to_graph(root: &CallNode) -> RecursionGraph {
    let mut graph = RecursionGraph::default();
    fn walk(node: &CallNode, graph: &mut RecursionGraph) {
        graph.nodes.push(RecursionGraphNode {
            id: node.id.clone(),
            label: node.label.clone(),
        });
        for child in &node.children {
            graph.links.push(RecursionGraphLink {
                source: node.id.clone(),
                target: child.id.clone(),
            });
            walk(child, graph);
        }
    }
    walk(root, &mut graph);
    graph
}

fn tree_to_merged_graph(root: &CallNode) -> RecursionGraph {
    let mut graph = RecursionGraph::default();
    fn walk(node: &CallNode, graph: &mut RecursionGraph) {
        // Labels double as ids so repeated calls collapse into one node.
        if !graph.nodes.iter().any(|n| n.id == node.label) {
            graph.nodes.push(RecursionGraphNode {
                id: node.label.clone(),
                label: node.label.clone(),
            });
        }
        for child in &node.children {
            let link = RecursionGraphLink {
                source: node.label.clone(),
                target: child.label.clone(),
            };
            if !graph.links.contains(&link) {
                graph.links.push(link);
            }
            walk(child, graph);
        }
    }
    walk(root, &mut graph);
    graph
}

/// Naive exponential Fibonacci. The graph is the full call tree.
pub fn fibonacci(n: u32) -> (StepTrace, RecursionGraph, u64) {
    debug!(n, "fibonacci");
    let mut tracer = FibonacciTracer::new(false);
    let (root, value) = tracer.build(n);
    (tracer.trace, tree_to_graph(&root), value)
}

/// Memoized Fibonacci. Repeat calls emit [`StepKind::MemoHit`] instead of
/// recursing, and the graph merges nodes by label.
pub fn fibonacci_memoized(n: u32) -> (StepTrace, RecursionGraph, u64) {
    debug!(n, "fibonacci memoized");
    let mut tracer = FibonacciTracer::new(true);
    let (root, value) = tracer.build(n);
    (tracer.trace, tree_to_merged_graph(&root), value)
}
