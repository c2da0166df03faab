//! Grid plus endpoints, and the plain-text layout format.
//!
//! Format (one grid row per line):
//! - `S`: start
//! - `G`: goal
//! - `#` or `■`: blocked cell
//! - `.` or `□`: free cell

use crate::error::{Endpoint, LayoutError};
use crate::grid::{Cell, Connectivity, Grid};
use crate::path::Path;
use std::fs;

/// What a cell shows as, once start and goal are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Free,
    Blocked,
    Start,
    Goal,
}

/// A grid with exactly one start and one goal, neither blocked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub grid: Grid,
    pub start: Cell,
    pub goal: Cell,
}

impl GridLayout {
    pub fn new(grid: Grid, start: Cell, goal: Cell) -> Result<Self, LayoutError> {
        if Grid::checked_size(grid.rows, grid.cols).is_none() {
            return Err(LayoutError::InvalidDimensions {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        for (role, cell) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if grid.is_blocked(cell) {
                return Err(LayoutError::BadEndpoint { role, cell });
            }
        }
        Ok(GridLayout { grid, start, goal })
    }

    pub fn cell_state(&self, cell: Cell) -> CellState {
        if cell == self.start {
            CellState::Start
        } else if cell == self.goal {
            CellState::Goal
        } else if self.grid.is_blocked(cell) {
            CellState::Blocked
        } else {
            CellState::Free
        }
    }

    /// Toggle an obstacle. Start and goal cells are never blocked.
    pub fn toggle_blocked(&mut self, cell: Cell) -> bool {
        if cell == self.start || cell == self.goal || !self.grid.in_bounds(cell) {
            return false;
        }
        let blocked = self.grid.is_blocked(cell);
        self.grid.set_blocked(cell, !blocked)
    }

    /// Parse a layout from text
    pub fn parse(text: &str, connectivity: Connectivity) -> Result<Self, LayoutError> {
        let mut lines: Vec<&str> = text.lines().map(|line| line.trim_end()).collect();
        // Only trailing blank lines are ignored; a blank row inside the grid is ragged
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = lines[0].chars().count();
        let mut blocked = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                match ch {
                    'S' => {
                        if start.replace(cell).is_some() {
                            return Err(LayoutError::DuplicateEndpoint(Endpoint::Start));
                        }
                    }
                    'G' => {
                        if goal.replace(cell).is_some() {
                            return Err(LayoutError::DuplicateEndpoint(Endpoint::Goal));
                        }
                    }
                    '#' | '■' => blocked.push(cell),
                    '.' | '□' => {}
                    _ => return Err(LayoutError::UnknownChar { ch, row, col }),
                }
            }
        }

        let start = start.ok_or(LayoutError::MissingEndpoint(Endpoint::Start))?;
        let goal = goal.ok_or(LayoutError::MissingEndpoint(Endpoint::Goal))?;
        let grid = Grid::with_blocked(lines.len() as i32, width as i32, &blocked)
            .with_connectivity(connectivity);

        GridLayout::new(grid, start, goal)
    }

    /// Load a layout file from disk
    pub fn load_from_file(path: &str, connectivity: Connectivity) -> crate::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text, connectivity)?)
    }

    /// Render back to the text format. `parse(to_text())` reproduces the layout.
    pub fn to_text(&self) -> String {
        self.render(|_| None)
    }

    /// Render with `*` on the free cells of `path`
    pub fn render_with_path(&self, path: &Path) -> String {
        self.render(|cell| path.contains(&cell).then_some('*'))
    }

    fn render(&self, overlay: impl Fn(Cell) -> Option<char>) -> String {
        let mut result = String::new();
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let cell = Cell::new(row, col);
                let symbol = match self.cell_state(cell) {
                    CellState::Start => 'S',
                    CellState::Goal => 'G',
                    CellState::Blocked => '#',
                    CellState::Free => overlay(cell).unwrap_or('.'),
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
