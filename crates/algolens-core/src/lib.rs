//! Core domain types shared across the entire Algolens workspace.
//!
//! Algolens is an instrumented algorithm execution and replay engine: every
//! structure operation and graph algorithm emits an ordered trace of discrete
//! step records describing each internal decision (comparison, pointer move,
//! rotation, relaxation, enqueue/dequeue, memo hit). A generic replay layer
//! later folds over a prefix of that trace to reconstruct the renderable
//! overlay state for any index, without touching the structure itself.
//!
//! This crate defines the vocabulary everything else speaks:
//!
//! - **StepRecord / StepKind / StepTrace**: the emission protocol
//! - **NodeId / Distance / DistanceMap**: shared identifiers and the
//!   infinite-distance sentinel
//! - **Graph / Edge**: the shared directed weighted graph model
//! - Render-ready snapshot types embedded in step payloads (tree nodes,
//!   list nodes, queue/stack elements, hash entries, grid cells)

mod graph;
mod snapshot;
mod step;

pub use graph::{Distance, DistanceMap, Edge, Graph, NodeId};
pub use snapshot::{Cell, Element, GridCell, HashEntry, ListNodeSnapshot, TreeNodeSnapshot};
pub use step::{StepKind, StepRecord, StepTrace};
