//! Instrumented data-structure engines.
//!
//! Each engine owns its nodes in an arena (integer indices, no owning
//! pointers) and executes one operation at a time, appending step records to
//! a fresh [`algolens_core::StepTrace`] while it works. Engines are `Clone`;
//! a caller that needs the previous shape to stay inspectable clones the
//! engine before mutating, and hands the returned trace plus a render
//! snapshot to the history/playback layer.
//!
//! Engines in dependency-free isolation:
//!
//! - [`BinarySearchTree`]: plain BST with insert/search/delete/in-order
//! - [`AvlTree`]: self-balancing variant with rotation instrumentation
//! - [`SinglyLinkedList`]: head/tail insert, delete, search
//! - [`Queue`] / [`Stack`]: FIFO/LIFO over an ordered sequence
//! - [`HashTable`]: fixed bucket count, separate chaining

mod avl;
mod bst;
mod error;
mod hash_table;
mod linked_list;
mod queue;
mod stack;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use error::{StructureError, StructureResult};
pub use hash_table::HashTable;
pub use linked_list::SinglyLinkedList;
pub use queue::Queue;
pub use stack::Stack;
