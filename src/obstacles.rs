use crate::error::LayoutError;
use crate::grid::{Cell, Connectivity, Grid};
use crate::layout::GridLayout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Random obstacle placement.
///
/// Draws `floor(rows * cols * density)` cells uniformly with replacement, so the
/// blocked fraction ends up somewhat below `density`. Start and goal are never
/// blocked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleGenerator {
    pub density: f64,
    /// Fixed seed for reproducible grids. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl ObstacleGenerator {
    pub fn new(density: f64, seed: Option<u64>) -> Result<Self, LayoutError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LayoutError::InvalidDensity(density));
        }
        Ok(ObstacleGenerator { density, seed })
    }

    /// Blocked cells for a `rows x cols` grid, sorted row-major
    pub fn generate(&self, rows: i32, cols: i32, start: Cell, goal: Cell) -> Result<Vec<Cell>, LayoutError> {
        let total = Grid::checked_size(rows, cols)
            .ok_or(LayoutError::InvalidDimensions { rows, cols })?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let draws = (total as f64 * self.density).floor() as usize;
        let mut blocked = vec![false; total];

        for _ in 0..draws {
            let id = rng.random_range(0..total);
            let cell = Cell::new(id as i32 / cols, id as i32 % cols);
            if cell != start && cell != goal {
                blocked[id] = true;
            }
        }

        let cells: Vec<Cell> = blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(id, _)| Cell::new(id as i32 / cols, id as i32 % cols))
            .collect();

        debug!(
            "[ObstacleGenerator] {}x{} density={} seed={:?}: {} blocked",
            rows,
            cols,
            self.density,
            self.seed,
            cells.len()
        );
        Ok(cells)
    }

    /// Build a complete layout with random obstacles
    pub fn layout(
        &self,
        rows: i32,
        cols: i32,
        connectivity: Connectivity,
        start: Cell,
        goal: Cell,
    ) -> Result<GridLayout, LayoutError> {
        let blocked = self.generate(rows, cols, start, goal)?;
        let grid = Grid::with_blocked(rows, cols, &blocked).with_connectivity(connectivity);
        GridLayout::new(grid, start, goal)
    }
}
