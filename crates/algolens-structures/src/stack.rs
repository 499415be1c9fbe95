//! LIFO stack over an ordered sequence.

use algolens_core::{Element, NodeId, StepKind, StepRecord, StepTrace};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Instrumented stack. Like [`crate::Queue`], removal emits a
/// [`StepKind::Peek`] before the removal marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    items: Vec<Element>,
    next_id: i64,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Render-ready snapshot, bottom first.
    pub fn items(&self) -> &[Element] {
        &self.items
    }

    /// Pushes `value` onto the top.
    pub fn push(&mut self, value: i64) -> StepTrace {
        debug!(value, "stack push");
        let mut trace = StepTrace::new();
        let element = Element {
            id: NodeId(self.next_id),
            value,
        };
        self.next_id += 1;

        trace.push_message(format!("Creating new element with value {value}."), 3);
        self.items.push(element);
        trace.push(StepRecord::new(
            StepKind::Push { element },
            format!("Pushing {value} onto the top of the stack."),
            4,
        ));
        trace
    }

    /// Removes the top element, if any.
    pub fn pop(&mut self) -> (StepTrace, Option<Element>) {
        debug!("stack pop");
        let mut trace = StepTrace::new();
        match self.items.pop() {
            None => {
                trace.push_message("Stack is empty. Cannot pop.", 4);
                (trace, None)
            }
            Some(top) => {
                trace.push(StepRecord::new(
                    StepKind::Peek { id: top.id },
                    format!("About to pop {} from the top.", top.value),
                    7,
                ));
                trace.push(StepRecord::new(
                    StepKind::Pop { id: top.id },
                    format!("Element {} has been popped.", top.value),
                    7,
                ));
                (trace, Some(top))
            }
        }
    }

    /// Reads the top element without removing it.
    pub fn peek(&self) -> (StepTrace, Option<Element>) {
        let mut trace = StepTrace::new();
        match self.items.last() {
            None => {
                trace.push_message("Stack is empty. Cannot peek.", 4);
                (trace, None)
            }
            Some(top) => {
                trace.push(StepRecord::new(
                    StepKind::Peek { id: top.id },
                    format!("Peeking at the top element: {}.", top.value),
                    7,
                ));
                (trace, Some(*top))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        let (_, top) = stack.pop();
        assert_eq!(top.map(|e| e.value), Some(2));
        assert_eq!(stack.items().len(), 1);
    }

    #[test]
    fn test_pop_emits_peek_before_removal() {
        let mut stack = Stack::new();
        stack.push(3);
        let (trace, _) = stack.pop();
        assert!(matches!(trace[0].kind, StepKind::Peek { .. }));
        assert!(matches!(trace[1].kind, StepKind::Pop { .. }));
    }

    #[test]
    fn test_empty_operations_emit_single_message() {
        let mut stack = Stack::new();
        let (trace, element) = stack.pop();
        assert_eq!(trace.len(), 1);
        assert!(element.is_none());
        let (trace, element) = stack.peek();
        assert_eq!(trace.len(), 1);
        assert!(element.is_none());
    }
}
