//! Fixed-size cell matrix
//!
//! Row 0 is the floor side of the well; a falling piece decrements its row
//! index every tick. All accessors bound-check and panic on violation:
//! an out-of-range coordinate is a logic error in the caller.

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::piece::Footprint;

/// State of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    #[default]
    Empty,
    /// Descending piece, drawn as an outline this frame
    Active,
    /// Descending piece, to be erased once the current frame is drawn
    Falling,
    /// Settled stack
    Static,
}

impl Cell {
    /// Whether the cell belongs to the descending piece
    pub fn is_piece(self) -> bool {
        matches!(self, Cell::Active | Cell::Falling)
    }
}

/// One row of cells
pub type Row = [Cell; GRID_WIDTH];

/// The well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const fn new() -> Self {
        Self {
            rows: [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub const fn height(&self) -> usize {
        GRID_HEIGHT
    }

    pub const fn width(&self) -> usize {
        GRID_WIDTH
    }

    fn check(row: usize, col: usize) {
        assert!(
            row < GRID_HEIGHT && col < GRID_WIDTH,
            "grid access out of bounds: ({}, {})",
            row,
            col
        );
    }

    /// Read a cell
    ///
    /// # Panics
    /// If `(row, col)` is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        Self::check(row, col);
        self.rows[row][col]
    }

    /// Write a cell
    ///
    /// # Panics
    /// If `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        Self::check(row, col);
        self.rows[row][col] = cell;
    }

    /// Reset every cell to `Empty`
    pub fn clear_all(&mut self) {
        self.rows = [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT];
    }

    /// Write `cell` at every footprint cell anchored at `(row, col)`
    pub fn paint(&mut self, footprint: &Footprint, row: usize, col: usize, cell: Cell) {
        for (dr, dc) in footprint.iter() {
            self.set(row + dr as usize, col + dc as usize, cell);
        }
    }

    /// Turn cells marked for erasure back into `Empty`
    pub fn sweep(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            if *cell == Cell::Falling {
                *cell = Cell::Empty;
            }
        }
    }

    /// Whether every cell of `row` is `Static`
    pub fn is_row_full(&self, row: usize) -> bool {
        Self::check(row, 0);
        self.rows[row].iter().all(|&cell| cell == Cell::Static)
    }

    /// Remove `row`, moving every row above it down by one
    ///
    /// The top row is refilled with `Empty` cells.
    pub fn collapse_row(&mut self, row: usize) {
        Self::check(row, 0);
        self.rows.copy_within(row + 1.., row);
        self.rows[GRID_HEIGHT - 1] = [Cell::Empty; GRID_WIDTH];
    }

    /// Rows from the floor up
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Every cell with its coordinates, floor row first
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &cell)| (r, c, cell))
        })
    }

    /// Number of cells in a given state
    pub fn count(&self, state: Cell) -> usize {
        self.rows.iter().flatten().filter(|&&cell| cell == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{footprint, PieceKind, Variation};

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.count(Cell::Empty), GRID_HEIGHT * GRID_WIDTH);
    }

    #[test]
    fn test_set_get() {
        let mut grid = Grid::new();
        grid.set(3, 7, Cell::Static);
        assert_eq!(grid.get(3, 7), Cell::Static);
        assert_eq!(grid.get(7, 3), Cell::Empty);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut grid = Grid::new();
        grid.set(GRID_HEIGHT, 0, Cell::Static);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let grid = Grid::new();
        grid.get(0, GRID_WIDTH);
    }

    #[test]
    fn test_paint_and_sweep() {
        let mut grid = Grid::new();
        let fp = footprint(PieceKind::O, Variation::new(0));
        grid.paint(&fp, 4, 2, Cell::Falling);
        assert_eq!(grid.count(Cell::Falling), 4);
        assert_eq!(grid.get(5, 3), Cell::Falling);

        grid.set(0, 0, Cell::Static);
        grid.sweep();
        assert_eq!(grid.count(Cell::Falling), 0);
        assert_eq!(grid.get(0, 0), Cell::Static);
    }

    #[test]
    fn test_collapse_row_shifts_rows_down() {
        let mut grid = Grid::new();
        for col in 0..GRID_WIDTH {
            grid.set(2, col, Cell::Static);
        }
        grid.set(3, 4, Cell::Static);
        grid.set(GRID_HEIGHT - 1, 0, Cell::Static);

        grid.collapse_row(2);

        assert!(!grid.is_row_full(2));
        assert_eq!(grid.get(2, 4), Cell::Static);
        assert_eq!(grid.get(3, 4), Cell::Empty);
        assert_eq!(grid.get(GRID_HEIGHT - 2, 0), Cell::Static);
        assert_eq!(grid.get(GRID_HEIGHT - 1, 0), Cell::Empty);
    }

    #[test]
    fn test_clear_all() {
        let mut grid = Grid::new();
        grid.set(0, 0, Cell::Static);
        grid.set(10, 5, Cell::Active);
        grid.clear_all();
        assert_eq!(grid, Grid::new());
    }
}
