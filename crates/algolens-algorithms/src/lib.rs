//! Instrumented algorithm suite.
//!
//! Every generator takes validated inputs, runs to completion synchronously
//! and returns its result together with the full [`algolens_core::StepTrace`].
//! There is no streaming emission and no suspension mid-algorithm.
//!
//! - [`sssp`]: single-source shortest paths (Dijkstra, Bellman-Ford, DAG order)
//! - [`mst`]: minimum spanning tree (Prim, Kruskal)
//! - [`sorting`]: in-place sorting step generators
//! - [`pathfinding`]: wall-aware grid BFS/DFS
//! - [`recursion`]: Fibonacci call-tree builder, plain and memoized

mod error;
pub mod mst;
pub mod pathfinding;
pub mod recursion;
pub mod sorting;
pub mod sssp;

pub use error::{AlgorithmError, AlgorithmResult};
