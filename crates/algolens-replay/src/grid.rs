//! Grid pathfinding overlays.

use algolens_core::{Cell, StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Reconstruction of the grid view: visited and path cells accumulate over
/// the whole prefix, and the live frontier contents are replayed from the
/// enqueue/dequeue (push/pop) pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOverlay {
    /// Cells discovered so far. BFS marks on enqueue, DFS on pop.
    pub visited: BTreeSet<Cell>,
    /// Final path cells marked so far.
    pub path: BTreeSet<Cell>,
    /// Queue contents at this point of a BFS run, front first.
    pub queue: Vec<Cell>,
    /// Stack contents at this point of a DFS run, bottom first.
    pub stack: Vec<Cell>,
    /// Cell the search is currently expanding.
    pub current: Option<Cell>,
}

impl GridOverlay {
    /// Overlay for the view at `target` (`None` before playback starts).
    pub fn at(steps: &[StepRecord], target: Option<usize>) -> Self {
        debug!(?target, "grid overlay replay");
        let mut overlay = Self::default();
        for step in crate::prefix(steps, target) {
            match step.kind {
                StepKind::EnqueueCell { cell } => {
                    overlay.visited.insert(cell);
                    overlay.queue.push(cell);
                }
                StepKind::DequeueCell { cell } => {
                    overlay.current = Some(cell);
                    if !overlay.queue.is_empty() {
                        overlay.queue.remove(0);
                    }
                }
                StepKind::PushCell { cell } => overlay.stack.push(cell),
                StepKind::PopCell { cell } => {
                    overlay.current = Some(cell);
                    overlay.visited.insert(cell);
                    overlay.stack.pop();
                }
                StepKind::MarkPath { cell } => {
                    overlay.path.insert(cell);
                }
                _ => {}
            }
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolens_algorithms::pathfinding::{bfs, dfs};
    use algolens_core::GridCell;

    fn open_grid(rows: usize, cols: usize) -> Vec<Vec<GridCell>> {
        (0..rows)
            .map(|row| (0..cols).map(|col| GridCell::open(row, col)).collect())
            .collect()
    }

    fn cell(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    #[test]
    fn test_visited_set_grows_monotonically() {
        let grid = open_grid(3, 3);
        let (trace, _) = bfs(&grid, cell(0, 0), cell(2, 2)).unwrap();
        let mut previous = 0;
        for i in 0..trace.len() {
            let overlay = GridOverlay::at(trace.as_slice(), Some(i));
            assert!(overlay.visited.len() >= previous);
            previous = overlay.visited.len();
        }
    }

    #[test]
    fn test_queue_drains_by_the_final_step() {
        let grid = open_grid(2, 2);
        let (trace, _) = bfs(&grid, cell(0, 0), cell(1, 1)).unwrap();
        let overlay = GridOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        // The end cell was dequeued last, so at most the cells enqueued after
        // it remain.
        assert!(overlay.queue.len() <= 1);
        assert_eq!(overlay.current, Some(cell(1, 1)));
    }

    #[test]
    fn test_path_cells_appear_only_after_mark_path() {
        let grid = open_grid(2, 2);
        let (trace, path) = bfs(&grid, cell(0, 0), cell(1, 1)).unwrap();
        let first_mark = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::MarkPath { .. }))
            .unwrap();
        let before = GridOverlay::at(trace.as_slice(), Some(first_mark - 1));
        assert!(before.path.is_empty());
        let at_end = GridOverlay::at(trace.as_slice(), Some(trace.len() - 1));
        assert_eq!(at_end.path.len(), path.unwrap().len());
    }

    #[test]
    fn test_dfs_stack_replay_tracks_pushes_and_pops() {
        let grid = open_grid(2, 2);
        let (trace, _) = dfs(&grid, cell(0, 0), cell(1, 1)).unwrap();
        let first_pop = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::PopCell { .. }))
            .unwrap();
        let before = GridOverlay::at(trace.as_slice(), Some(first_pop - 1));
        let after = GridOverlay::at(trace.as_slice(), Some(first_pop));
        assert_eq!(after.stack.len() + 1, before.stack.len());
        assert_eq!(after.current, Some(cell(0, 0)));
    }
}
