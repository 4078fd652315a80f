//! Collision and placement rules

use crate::grid::{Cell, Grid};
use crate::piece::Piece;

/// Whether the descending piece rests on the stack
///
/// True iff some cell of the piece (`Active` or `Falling`) has a `Static`
/// cell directly beneath it, one row closer to the floor. Cells on the
/// floor row have nothing beneath them and never collide.
pub fn would_collide(grid: &Grid) -> bool {
    grid.cells()
        .filter(|&(row, _, cell)| row > 0 && cell.is_piece())
        .any(|(row, col, _)| grid.get(row - 1, col) == Cell::Static)
}

/// Whether a settled piece ended the session
///
/// A piece that rests at the row it spawned at never moved down: the stack
/// has reached the top of the well.
pub fn has_reached_top(spawn_row: usize, rest_row: usize) -> bool {
    spawn_row == rest_row
}

/// Whether `piece` anchored at `(row, col)` lies inside the grid without
/// overlapping the stack
pub fn fits(grid: &Grid, piece: &Piece, row: usize, col: usize) -> bool {
    piece.footprint().iter().all(|(dr, dc)| {
        let r = row + dr as usize;
        let c = col + dc as usize;
        r < grid.height() && c < grid.width() && grid.get(r, c) != Cell::Static
    })
}
