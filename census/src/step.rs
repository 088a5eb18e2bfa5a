use itertools::Itertools;

use crate::grid::{Cell, Grid};

/// Advances `grid` one generation under B3/S23.
///
/// Every neighbour count is taken from `grid` itself, so all cells update
/// simultaneously; the input is left untouched.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::dead(grid.width(), grid.height());
    for (row, col) in (0..grid.height()).cartesian_product(0..grid.width()) {
        let count = grid.alive_neighbours(row, col);
        let alive = grid.cell(row, col).is_alive();
        if let (2 | 3, true) | (3, false) = (count, alive) {
            next.cells[row * grid.width() + col] = Cell::Alive;
        }
    }
    next
}

impl Grid {
    pub fn step(&self) -> Self {
        step(self)
    }
}
