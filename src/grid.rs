use serde::{Deserialize, Serialize};
use std::fmt;

/// Movement cost unit shared by the grid, heuristics and the engine
pub type Cost = u32;

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    fn offset(&self, d_row: i32, d_col: i32) -> Cell {
        Cell::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Movement policy: which moves are legal and what they cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Up/down/left/right, every step costs 1
    #[default]
    FourWay,
    /// Adds diagonals. Straight steps cost 10, diagonal steps cost 14
    EightWay,
}

pub const EIGHT_WAY_STRAIGHT: Cost = 10;
pub const EIGHT_WAY_DIAGONAL: Cost = 14;

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Connectivity {
    /// Cost of moving between two adjacent cells under this policy
    pub fn step_cost(&self, from: Cell, to: Cell) -> Cost {
        let diagonal = from.row != to.row && from.col != to.col;
        match (self, diagonal) {
            (Connectivity::FourWay, _) => 1,
            (Connectivity::EightWay, false) => EIGHT_WAY_STRAIGHT,
            (Connectivity::EightWay, true) => EIGHT_WAY_DIAGONAL,
        }
    }
}

/// Obstacle lattice.
/// Cells are stored row-major; `true` means blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    blocked: Vec<bool>,
    connectivity: Connectivity,
}

impl Grid {
    /// Create a grid with every cell free
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Grid {
            rows,
            cols,
            blocked: vec![false; rows as usize * cols as usize],
            connectivity: Connectivity::default(),
        }
    }

    /// Create a grid with specific blocked cells. Out-of-bounds entries are ignored.
    pub fn with_blocked(rows: i32, cols: i32, blocked: &[Cell]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &cell in blocked {
            grid.set_blocked(cell, true);
        }
        grid
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    /// Out of bounds is considered blocked
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(id) => self.blocked[id],
            None => true,
        }
    }

    /// Set or clear an obstacle. Returns false if the cell is out of bounds.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> bool {
        match self.index(cell) {
            Some(id) => {
                self.blocked[id] = blocked;
                true
            }
            None => false,
        }
    }

    /// Flat row-major index of a cell
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::index`]
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index / cols) as i32, (index % cols) as i32)
    }

    /// `rows * cols` when the grid is non-empty and every cell index fits in `i32`
    pub fn checked_size(rows: i32, cols: i32) -> Option<usize> {
        if rows <= 0 || cols <= 0 {
            return None;
        }
        rows.checked_mul(cols).map(|n| n as usize)
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// All blocked cells in row-major order
    pub fn blocked_cells(&self) -> Vec<Cell> {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(id, _)| self.cell_at(id))
            .collect()
    }

    /// Passable neighbors in a fixed order: up, down, left, right, then diagonals.
    ///
    /// A diagonal move is only offered when both cells it squeezes between are free.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut result: Vec<Cell> = ORTHOGONAL
            .iter()
            .map(|&(dr, dc)| cell.offset(dr, dc))
            .filter(|&n| !self.is_blocked(n))
            .collect();

        if self.connectivity == Connectivity::EightWay {
            for &(dr, dc) in &DIAGONAL {
                let n = cell.offset(dr, dc);
                if self.is_blocked(n) {
                    continue;
                }
                if self.is_blocked(cell.offset(dr, 0)) || self.is_blocked(cell.offset(0, dc)) {
                    continue;
                }
                result.push(n);
            }
        }

        result
    }
}
