//! Property tests for the game rules

use proptest::prelude::*;
use stackfall_core::collision::{fits, would_collide};
use stackfall_core::config::{GRID_HEIGHT, GRID_WIDTH};
use stackfall_core::input::{ButtonAction, Controls, Debouncer};
use stackfall_core::line_clear::clear_lines;
use stackfall_core::render::draw_grid;
use stackfall_core::score::{NullSink, ScorePublisher};
use stackfall_core::traits::{Color, DisplayBackend, DisplayError};
use stackfall_core::{Cell, Game, Grid, Piece, PieceKind, TickOutcome, Variation};

struct NullDisplay;

impl DisplayBackend for NullDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_box(&mut self, _x: u16, _y: u16, _size: u16, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_frame(&mut self, _x: u16, _y: u16, _size: u16) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_text(&mut self, _x: u16, _y: u16, _text: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}

fn stack_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..GRID_HEIGHT, 0..GRID_WIDTH), 0..60)
}

fn grid_with_stack(cells: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new();
    for &(row, col) in cells {
        grid.set(row, col, Cell::Static);
    }
    grid
}

proptest! {
    #[test]
    fn collision_iff_static_directly_beneath(
        stack in stack_strategy(),
        kind in 0u8..4,
        variation in 0u8..4,
        row in 0..GRID_HEIGHT,
        col in 0..GRID_WIDTH,
    ) {
        let mut grid = grid_with_stack(&stack);
        let piece = Piece::new(PieceKind::from_index(kind), Variation::new(variation));
        prop_assume!(fits(&grid, &piece, row, col));

        let before = grid.clone();
        grid.paint(&piece.footprint(), row, col, Cell::Falling);

        let expected = piece.footprint().iter().any(|(dr, dc)| {
            let r = row + dr as usize;
            let c = col + dc as usize;
            r > 0 && before.get(r - 1, c) == Cell::Static
        });
        prop_assert_eq!(would_collide(&grid), expected);
    }

    #[test]
    fn presses_inside_one_window_count_once(
        start in 0u64..1_000_000,
        refractory in 1u64..2_000,
        offsets in prop::collection::vec(0u64..2_000, 1..20),
    ) {
        let mut debouncer = Debouncer::new(refractory);
        let mut times: Vec<u64> = offsets.iter().map(|o| start + o % refractory).collect();
        times.sort_unstable();
        times.insert(0, start);

        let accepted = times.iter().filter(|&&t| debouncer.signal(t)).count();
        prop_assert_eq!(accepted, 1);
    }

    #[test]
    fn contiguous_full_rows_clear_in_one_pass(
        base in 0..GRID_HEIGHT - 1,
        run in 1usize..5,
        hole in 0..GRID_WIDTH,
    ) {
        let run = run.min(GRID_HEIGHT - 1 - base);
        let mut grid = Grid::new();
        for row in base..base + run {
            for col in 0..GRID_WIDTH {
                grid.set(row, col, Cell::Static);
            }
        }
        // A partial row just above the run survives and drops by `run`
        let marker = base + run;
        if marker < GRID_HEIGHT - 1 {
            for col in (0..GRID_WIDTH).filter(|&c| c != hole) {
                grid.set(marker, col, Cell::Static);
            }
        }

        prop_assert_eq!(clear_lines(&mut grid) as usize, run);
        if marker < GRID_HEIGHT - 1 {
            prop_assert_eq!(grid.get(base, hole), Cell::Empty);
            prop_assert_eq!(grid.count(Cell::Static), GRID_WIDTH - 1);
        } else {
            prop_assert_eq!(grid.count(Cell::Static), 0);
        }
    }

    #[test]
    fn variation_stays_in_range(rotations in 0usize..64) {
        let controls = Controls::new();
        for _ in 0..rotations {
            controls.apply(ButtonAction::Rotate);
        }
        prop_assert_eq!(controls.variation().index() as usize, rotations % 4);
    }

    #[test]
    fn random_play_keeps_grid_consistent(
        presses in prop::collection::vec(prop::option::of(any::<bool>()), 1..400),
    ) {
        let controls = Controls::new();
        let mut game = Game::new();
        let mut display = NullDisplay;
        let mut scores = ScorePublisher::new(NullSink);

        for press in presses {
            match press {
                Some(true) => controls.apply(ButtonAction::Move),
                Some(false) => controls.apply(ButtonAction::Rotate),
                None => {}
            }

            let statics_before = game.grid().count(Cell::Static);
            let outcome = game.tick(&controls, &mut display, &mut scores);
            let grid = game.grid();

            prop_assert_eq!(grid.count(Cell::Active), 0);
            prop_assert!(grid.count(Cell::Falling) <= 4);
            prop_assert_eq!(game.score() % 4, 0);
            if let TickOutcome::Descending { .. } = outcome {
                // Nothing settles while the piece is still falling
                prop_assert_eq!(grid.count(Cell::Static), statics_before);
                prop_assert_eq!(grid.count(Cell::Falling), 4);
            }
            prop_assert!(draw_grid(grid, &mut display).is_ok());
        }
        prop_assert_eq!(game.display_errors(), 0);
    }
}
