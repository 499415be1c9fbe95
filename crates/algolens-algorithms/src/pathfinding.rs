//! Grid pathfinding over a rectangular wall grid.
//!
//! BFS explores up, down, left, right and marks cells visited when they are
//! enqueued, so the reconstructed path is shortest by hop count. DFS
//! explores down, right, up, left, defers the visited check to pop time and
//! allows duplicate stack entries, so its path follows the last push wins
//! parent assignment. Both finish by replaying the parent chain from the end
//! cell as [`StepKind::MarkPath`] steps, start first.

use algolens_core::{Cell, GridCell, StepKind, StepRecord, StepTrace};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

use crate::error::{AlgorithmError, AlgorithmResult};

fn check_bounds(grid: &[Vec<GridCell>], cell: Cell) -> AlgorithmResult<()> {
    if cell.row >= grid.len() || grid.get(cell.row).map_or(true, |r| cell.col >= r.len()) {
        return Err(AlgorithmError::CellOutOfBounds {
            row: cell.row,
            col: cell.col,
        });
    }
    Ok(())
}

/// In-bounds, non-wall neighbors of `cell` in the given relative order.
fn open_neighbors(
    grid: &[Vec<GridCell>],
    cell: Cell,
    order: &[(i64, i64)],
) -> Vec<Cell> {
    let rows = grid.len() as i64;
    let cols = grid.first().map_or(0, Vec::len) as i64;
    order
        .iter()
        .filter_map(|&(dr, dc)| {
            let (r, c) = (cell.row as i64 + dr, cell.col as i64 + dc);
            if r >= 0 && r < rows && c >= 0 && c < cols {
                let cell = Cell {
                    row: r as usize,
                    col: c as usize,
                };
                (!grid[cell.row][cell.col].is_wall).then_some(cell)
            } else {
                None
            }
        })
        .collect()
}

/// Parent chain from `end` back to the root, returned start first.
fn reconstruct(parents: &BTreeMap<Cell, Cell>, end: Cell) -> Vec<Cell> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

fn mark_path(trace: &mut StepTrace, path: &[Cell], message_suffix: &str, line: u32) {
    for &cell in path {
        trace.push(StepRecord::new(
            StepKind::MarkPath { cell },
            format!("Marking {cell} as part of {message_suffix}."),
            line,
        ));
    }
}

/// Breadth-first search from `start` to `end`.
///
/// Returns the shortest wall-free path, or `None` with the trace ending in a
/// no-path message.
pub fn bfs(
    grid: &[Vec<GridCell>],
    start: Cell,
    end: Cell,
) -> AlgorithmResult<(StepTrace, Option<Vec<Cell>>)> {
    check_bounds(grid, start)?;
    check_bounds(grid, end)?;
    debug!(rows = grid.len(), %start, %end, "bfs");
    let mut trace = StepTrace::new();

    let mut queue: VecDeque<Cell> = VecDeque::from([start]);
    let mut visited: BTreeSet<Cell> = BTreeSet::from([start]);
    let mut parents: BTreeMap<Cell, Cell> = BTreeMap::new();

    trace.push_message("Starting Breadth-First Search (BFS).", 1);
    trace.push(StepRecord::new(
        StepKind::EnqueueCell { cell: start },
        format!("Adding start node {start} to the queue."),
        2,
    ));

    let mut path_found = false;

    while let Some(cell) = queue.pop_front() {
        trace.push(StepRecord::new(
            StepKind::DequeueCell { cell },
            format!("Dequeued node {cell}. Exploring its neighbors."),
            7,
        ));

        if cell == end {
            path_found = true;
            trace.push_message(format!("End node {cell} found! Reconstructing path."), 9);
            break;
        }

        for neighbor in open_neighbors(grid, cell, &[(-1, 0), (1, 0), (0, -1), (0, 1)]) {
            if visited.insert(neighbor) {
                parents.insert(neighbor, cell);
                queue.push_back(neighbor);
                trace.push(StepRecord::new(
                    StepKind::EnqueueCell { cell: neighbor },
                    format!("Visiting and enqueuing neighbor {neighbor}."),
                    15,
                ));
            }
        }
    }

    let path = if path_found {
        let path = reconstruct(&parents, end);
        mark_path(&mut trace, &path, "the shortest path", 9);
        Some(path)
    } else {
        trace.push_message("No path found to the end node.", 18);
        None
    };

    trace.push_message("BFS Complete.", 19);
    Ok((trace, path))
}

/// Depth-first search from `start` to `end`.
///
/// The path is whatever branch reached the end first, not necessarily
/// shortest.
pub fn dfs(
    grid: &[Vec<GridCell>],
    start: Cell,
    end: Cell,
) -> AlgorithmResult<(StepTrace, Option<Vec<Cell>>)> {
    check_bounds(grid, start)?;
    check_bounds(grid, end)?;
    debug!(rows = grid.len(), %start, %end, "dfs");
    let mut trace = StepTrace::new();

    let mut stack: Vec<Cell> = vec![start];
    let mut visited: BTreeSet<Cell> = BTreeSet::new();
    let mut parents: BTreeMap<Cell, Cell> = BTreeMap::new();

    trace.push_message("Starting Depth-First Search (DFS).", 1);
    trace.push(StepRecord::new(
        StepKind::PushCell { cell: start },
        format!("Pushing start node {start} onto the stack."),
        2,
    ));

    let mut path_found = false;

    while let Some(cell) = stack.pop() {
        if !visited.insert(cell) {
            trace.push_message(format!("Node {cell} already visited. Skipping."), 7);
            continue;
        }

        trace.push(StepRecord::new(
            StepKind::PopCell { cell },
            format!("Popped node {cell}. Marking as visited."),
            5,
        ));

        if cell == end {
            path_found = true;
            trace.push_message(format!("End node {cell} found!"), 11);
            break;
        }

        for neighbor in open_neighbors(grid, cell, &[(1, 0), (0, 1), (-1, 0), (0, -1)]) {
            if !visited.contains(&neighbor) {
                // Later pushes overwrite the parent; the branch that actually
                // pops the cell wins.
                parents.insert(neighbor, cell);
                stack.push(neighbor);
                trace.push(StepRecord::new(
                    StepKind::PushCell { cell: neighbor },
                    format!("Pushing neighbor {neighbor} onto the stack."),
                    15,
                ));
            }
        }
    }

    let path = if path_found {
        let path = reconstruct(&parents, end);
        mark_path(&mut trace, &path, "the path", 11);
        Some(path)
    } else {
        trace.push_message("No path found to the end node.", 18);
        None
    };

    trace.push_message("DFS Complete.", 19);
    Ok((trace, path))
}
