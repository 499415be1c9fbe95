//! FIFO queue over an ordered sequence.

use algolens_core::{Element, NodeId, StepKind, StepRecord, StepTrace};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Instrumented queue. Removal emits a [`StepKind::Peek`] identifying the
/// departing element before the removal marker, so replay can highlight the
/// element that is about to disappear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    items: Vec<Element>,
    next_id: i64,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Queue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Render-ready snapshot, front first.
    pub fn items(&self) -> &[Element] {
        &self.items
    }

    /// Adds `value` to the rear.
    pub fn enqueue(&mut self, value: i64) -> StepTrace {
        debug!(value, "queue enqueue");
        let mut trace = StepTrace::new();
        let element = Element {
            id: NodeId(self.next_id),
            value,
        };
        self.next_id += 1;

        trace.push_message(format!("Creating new element with value {value}."), 3);
        self.items.push(element);
        trace.push(StepRecord::new(
            StepKind::Enqueue { element },
            format!("Adding {value} to the rear of the queue."),
            4,
        ));
        trace
    }

    /// Removes the front element, if any.
    pub fn dequeue(&mut self) -> (StepTrace, Option<Element>) {
        debug!("queue dequeue");
        let mut trace = StepTrace::new();
        if self.items.is_empty() {
            trace.push_message("Queue is empty. Cannot dequeue.", 4);
            return (trace, None);
        }

        let front = self.items.remove(0);
        trace.push(StepRecord::new(
            StepKind::Peek { id: front.id },
            format!("About to remove {} from the front.", front.value),
            7,
        ));
        trace.push(StepRecord::new(
            StepKind::Dequeue { id: front.id },
            format!("Element {} has been removed.", front.value),
            7,
        ));
        (trace, Some(front))
    }

    /// Reads the front element without removing it.
    pub fn peek(&self) -> (StepTrace, Option<Element>) {
        let mut trace = StepTrace::new();
        match self.items.first() {
            None => {
                trace.push_message("Queue is empty. Cannot peek.", 4);
                (trace, None)
            }
            Some(front) => {
                trace.push(StepRecord::new(
                    StepKind::Peek { id: front.id },
                    format!("Peeking at the front element: {}.", front.value),
                    7,
                ));
                (trace, Some(*front))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_dequeue_is_fifo() {
        let mut queue = Queue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        let (_, first) = queue.dequeue();
        assert_eq!(first.map(|e| e.value), Some(1));
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn test_dequeue_emits_peek_before_removal() {
        let mut queue = Queue::new();
        queue.enqueue(7);
        let (trace, _) = queue.dequeue();
        assert!(matches!(trace[0].kind, StepKind::Peek { .. }));
        assert!(matches!(trace[1].kind, StepKind::Dequeue { .. }));
    }

    #[test]
    fn test_empty_operations_emit_single_message() {
        let mut queue = Queue::new();
        let (trace, element) = queue.dequeue();
        assert_eq!(trace.len(), 1);
        assert!(element.is_none());
        let (trace, element) = queue.peek();
        assert_eq!(trace.len(), 1);
        assert!(element.is_none());
    }
}
