//! Line clearing
//!
//! A single pass removes the lowest run of contiguous full rows. The scan
//! starts at the floor, skips rows until it meets the first full one, then
//! keeps collapsing while the row at the scan index is still full. The first
//! non-full row after a clear halts the pass, so a full row separated from
//! that run by a gap survives until the next pass.
//!
//! The top row is never a candidate.

use crate::config::GRID_HEIGHT;
use crate::grid::Grid;

/// Clear the lowest run of full rows
///
/// Returns the number of rows removed.
pub fn clear_lines(grid: &mut Grid) -> u8 {
    let last_candidate = GRID_HEIGHT - 2;

    let Some(mut row) = (0..=last_candidate).find(|&row| grid.is_row_full(row)) else {
        return 0;
    };

    let mut cleared = 0;
    while row <= last_candidate && grid.is_row_full(row) {
        grid.collapse_row(row);
        cleared += 1;
        // The same index now holds the row that was above it. Stop once
        // every candidate row has been pulled through.
        if cleared as usize > last_candidate - row {
            break;
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRID_WIDTH;
    use crate::grid::Cell;

    fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..GRID_WIDTH {
            grid.set(row, col, Cell::Static);
        }
    }

    #[test]
    fn test_no_full_rows() {
        let mut grid = Grid::new();
        grid.set(0, 0, Cell::Static);
        let before = grid.clone();
        assert_eq!(clear_lines(&mut grid), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_single_full_row_on_floor() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 0);
        grid.set(1, 3, Cell::Static);

        assert_eq!(clear_lines(&mut grid), 1);
        assert_eq!(grid.get(0, 3), Cell::Static);
        assert_eq!(grid.count(Cell::Static), 1);
    }

    #[test]
    fn test_contiguous_rows_clear_together() {
        let mut grid = Grid::new();
        grid.set(0, 0, Cell::Static);
        fill_row(&mut grid, 3);
        fill_row(&mut grid, 4);
        grid.set(5, 9, Cell::Static);
        grid.set(7, 2, Cell::Static);

        assert_eq!(clear_lines(&mut grid), 2);
        assert!(!grid.is_row_full(3));
        // Everything above moved down by two
        assert_eq!(grid.get(3, 9), Cell::Static);
        assert_eq!(grid.get(5, 2), Cell::Static);
        assert_eq!(grid.get(7, 2), Cell::Empty);
        assert_eq!(grid.get(0, 0), Cell::Static);
    }

    #[test]
    fn test_gap_halts_the_pass() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 2);
        grid.set(3, 5, Cell::Static);
        fill_row(&mut grid, 4);

        assert_eq!(clear_lines(&mut grid), 1);
        // Old row 3 dropped to 2, old row 4 dropped to 3 and is still full
        assert_eq!(grid.get(2, 5), Cell::Static);
        assert!(!grid.is_row_full(2));
        assert!(grid.is_row_full(3));

        // The next pass picks it up
        assert_eq!(clear_lines(&mut grid), 1);
        assert!(!grid.is_row_full(3));
        assert_eq!(grid.get(2, 5), Cell::Static);
    }

    #[test]
    fn test_top_row_is_never_cleared() {
        let mut grid = Grid::new();
        fill_row(&mut grid, GRID_HEIGHT - 1);
        assert_eq!(clear_lines(&mut grid), 0);
        assert!(grid.is_row_full(GRID_HEIGHT - 1));
    }

    #[test]
    fn test_full_row_below_top_pulls_top_row_down() {
        let mut grid = Grid::new();
        fill_row(&mut grid, GRID_HEIGHT - 2);
        fill_row(&mut grid, GRID_HEIGHT - 1);

        // The top row drops into the last candidate slot but is not examined
        // again in the same pass
        assert_eq!(clear_lines(&mut grid), 1);
        assert!(grid.is_row_full(GRID_HEIGHT - 2));
        assert_eq!(grid.count(Cell::Static), GRID_WIDTH);
    }
}
