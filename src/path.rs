use crate::engine::SearchNode;
use crate::error::SearchError;
use crate::grid::{Cell, Cost, Grid};
use serde::{Deserialize, Serialize};

/// A finished route from start to goal, both inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub cells: Vec<Cell>,
    pub total_cost: Cost,
}

impl Path {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the number of cells
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }
}

/// Walk parent links from `goal` back to `start` and return them start-first.
///
/// `nodes` is indexed by [`Grid::index`]. The walk is bounded by the node count
/// so a corrupt parent chain fails with `NoPath` instead of looping.
pub fn reconstruct(
    grid: &Grid,
    nodes: &[SearchNode],
    start: Cell,
    goal: Cell,
) -> Result<Path, SearchError> {
    let mut cells = vec![goal];
    let mut total_cost: Cost = 0;
    let mut current = goal;

    while current != start {
        if cells.len() > nodes.len() {
            return Err(SearchError::NoPath);
        }
        let parent = grid
            .index(current)
            .and_then(|id| nodes.get(id))
            .and_then(|node| node.parent)
            .ok_or(SearchError::NoPath)?;
        total_cost += grid.connectivity().step_cost(parent, current);
        cells.push(parent);
        current = parent;
    }

    cells.reverse();
    Ok(Path { cells, total_cost })
}

/// Format path for display
pub fn format_path(path: &Path) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
