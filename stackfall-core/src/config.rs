//! Game rules and board geometry
//!
//! These are compile-time constants; the firmware's `game.toml` only
//! covers wiring and the player name.

/// Number of rows in the well
pub const GRID_HEIGHT: usize = 20;

/// Number of columns in the well
pub const GRID_WIDTH: usize = 10;

/// Row a new piece is spawned at
///
/// Leaves room for the tallest footprint (four rows).
pub const SPAWN_ROW: usize = GRID_HEIGHT - 4;

/// Edge length of one cell in display pixels
pub const CELL_SIZE_PX: u16 = 6;

/// Points awarded for every piece that lands without ending the session
pub const SCORE_PER_PIECE: u32 = 4;

/// Game loop period: one descent step per tick
pub const TICK_INTERVAL_MS: u64 = 100;

/// Per-button window after an accepted press during which presses are ignored
pub const REFRACTORY_MS: u64 = 500;

/// Score text position (rotated text column right of the well)
pub const SCORE_TEXT_X: u16 = 120;
pub const SCORE_TEXT_Y: u16 = 1;
