//! Game state machine
//!
//! One call to [`Game::tick`] advances the descending piece by one frame:
//!
//! 1. Resolve the placement from the control counters (falls back to the
//!    previous placement when the request does not fit).
//! 2. Paint the piece `Active`, draw the grid and sweep erased cells.
//! 3. Paint it `Static` on the floor row, `Falling` elsewhere; draw the score.
//! 4. If the piece rests on the stack, settle it.
//!
//! A settled piece triggers line clearing and scoring, or ends the session
//! when it never left its spawn row. The caller flushes the display and
//! waits one tick interval between calls.

use crate::collision::{fits, has_reached_top, would_collide};
use crate::config::{SCORE_PER_PIECE, SCORE_TEXT_X, SCORE_TEXT_Y, SPAWN_ROW};
use crate::grid::{Cell, Grid};
use crate::input::Controls;
use crate::line_clear::clear_lines;
use crate::piece::{Piece, PieceKind};
use crate::render::draw_grid;
use crate::score::{ScorePublisher, ScoreReport, ScoreSink};
use crate::traits::{DisplayBackend, DisplayError, DisplayExt};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Piece drawn at `row` and still falling
    Descending { row: usize },
    /// Piece settled; session continues
    Landed {
        rest_row: usize,
        lines_cleared: u8,
        score: u32,
    },
    /// Piece settled at its spawn row; grid cleared, score reset
    GameOver { final_score: u32 },
}

/// Where the descending piece is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Placement {
    pub piece: Piece,
    pub col: usize,
}

/// Per-piece descent state
#[derive(Debug, Clone, Copy)]
struct Descent {
    spawn_row: usize,
    row: usize,
    /// Placement drawn on the previous tick
    placement: Option<Placement>,
    /// Control column not yet reset for this piece
    fresh: bool,
}

impl Descent {
    const fn spawn() -> Self {
        Self {
            spawn_row: SPAWN_ROW,
            row: SPAWN_ROW,
            placement: None,
            fresh: true,
        }
    }
}

/// The game: grid, session score and the piece in flight
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    kind: PieceKind,
    score: u32,
    descent: Descent,
    sessions: u32,
    lines_cleared: u32,
    display_errors: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// New game starting with the T piece
    pub const fn new() -> Self {
        Self::starting_with(PieceKind::T)
    }

    /// New game starting with a given piece kind
    pub const fn starting_with(kind: PieceKind) -> Self {
        Self {
            grid: Grid::new(),
            kind,
            score: 0,
            descent: Descent::spawn(),
            sessions: 0,
            lines_cleared: 0,
            display_errors: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, for setting up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Score of the current session
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Kind of the piece in flight
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Row the piece in flight will be drawn at next
    pub fn row(&self) -> usize {
        self.descent.row
    }

    pub fn spawn_row(&self) -> usize {
        self.descent.spawn_row
    }

    /// Placement drawn on the last tick, if the piece has been drawn yet
    pub fn placement(&self) -> Option<Placement> {
        self.descent.placement
    }

    /// Sessions finished since power-on
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Rows cleared since power-on
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Draw calls that failed since power-on
    pub fn display_errors(&self) -> u32 {
        self.display_errors
    }

    /// Advance the game by one frame
    pub fn tick<D, S>(
        &mut self,
        controls: &Controls,
        display: &mut D,
        scores: &mut ScorePublisher<S>,
    ) -> TickOutcome
    where
        D: DisplayBackend,
        S: ScoreSink,
    {
        if self.descent.fresh {
            controls.reset_column();
            self.descent.fresh = false;
        }

        let row = self.descent.row;
        let Some(placement) = self.resolve_placement(controls) else {
            // Nowhere to draw the piece: it is stuck where it is
            return self.settle(row, display, scores);
        };
        self.descent.placement = Some(placement);

        let footprint = placement.piece.footprint();
        self.grid.paint(&footprint, row, placement.col, Cell::Active);
        let drawn = draw_grid(&self.grid, display);
        self.note(drawn);
        self.grid.sweep();

        if row == 0 {
            self.grid.paint(&footprint, row, placement.col, Cell::Static);
        } else {
            self.grid.paint(&footprint, row, placement.col, Cell::Falling);
        }
        let drawn = display.draw_score(SCORE_TEXT_X, SCORE_TEXT_Y, self.score);
        self.note(drawn);

        if row == 0 {
            return self.settle(row, display, scores);
        }

        if would_collide(&self.grid) {
            self.grid.paint(&footprint, row, placement.col, Cell::Static);
            return self.settle(row, display, scores);
        }

        self.descent.row = row - 1;
        TickOutcome::Descending { row }
    }

    /// Placement for this tick: the requested one if legal, else the last one
    fn resolve_placement(&self, controls: &Controls) -> Option<Placement> {
        let row = self.descent.row;
        let requested = Placement {
            piece: Piece::new(self.kind, controls.variation()),
            col: controls.column() as usize,
        };

        if fits(&self.grid, &requested.piece, row, requested.col) {
            return Some(requested);
        }
        self.descent
            .placement
            .filter(|previous| fits(&self.grid, &previous.piece, row, previous.col))
    }

    /// Finish the piece in flight at `rest_row`
    fn settle<D, S>(
        &mut self,
        rest_row: usize,
        display: &mut D,
        scores: &mut ScorePublisher<S>,
    ) -> TickOutcome
    where
        D: DisplayBackend,
        S: ScoreSink,
    {
        let lines = clear_lines(&mut self.grid);
        self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);

        let outcome = if has_reached_top(self.descent.spawn_row, rest_row) {
            let final_score = self.score;
            self.grid.clear_all();
            let cleared = display.clear();
            self.note(cleared);
            scores.publish(ScoreReport::final_score(final_score));
            self.score = 0;
            self.sessions = self.sessions.saturating_add(1);
            TickOutcome::GameOver { final_score }
        } else {
            self.score = self.score.saturating_add(SCORE_PER_PIECE);
            scores.publish(ScoreReport::running(self.score));
            self.kind = self.kind.next();
            TickOutcome::Landed {
                rest_row,
                lines_cleared: lines,
                score: self.score,
            }
        };

        self.descent = Descent::spawn();
        outcome
    }

    fn note(&mut self, result: Result<(), DisplayError>) {
        if result.is_err() {
            self.display_errors = self.display_errors.saturating_add(1);
        }
    }
}
