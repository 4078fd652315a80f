//! Grid rendering
//!
//! The panel is mounted rotated: a grid row maps to the display X axis and
//! a column to the Y axis, so the well runs along the long edge.

use crate::config::CELL_SIZE_PX;
use crate::grid::{Cell, Grid};
use crate::traits::{Color, DisplayBackend, DisplayError};

/// Top-left pixel of a grid cell
pub fn cell_origin(row: usize, col: usize) -> (u16, u16) {
    (row as u16 * CELL_SIZE_PX, col as u16 * CELL_SIZE_PX)
}

/// Draw one cell
pub fn draw_cell<D: DisplayBackend>(
    display: &mut D,
    row: usize,
    col: usize,
    cell: Cell,
) -> Result<(), DisplayError> {
    let (x, y) = cell_origin(row, col);
    match cell {
        Cell::Static => display.draw_box(x, y, CELL_SIZE_PX, Color::White),
        Cell::Active => display.draw_frame(x, y, CELL_SIZE_PX),
        Cell::Empty | Cell::Falling => display.draw_box(x, y, CELL_SIZE_PX, Color::Black),
    }
}

/// Draw every cell of the grid
///
/// Keeps drawing after a failed cell and reports the first error.
pub fn draw_grid<D: DisplayBackend>(grid: &Grid, display: &mut D) -> Result<(), DisplayError> {
    let mut first_error = None;
    for (row, col, cell) in grid.cells() {
        if let Err(e) = draw_cell(display, row, col, cell) {
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}
