//! Game loop task
//!
//! Owns the game and the display. Every tick advances the falling piece,
//! flushes the frame buffer and reports what happened.

use defmt::*;
use embassy_time::{Duration, Ticker};

use stackfall_core::config::TICK_INTERVAL_MS;
use stackfall_core::score::ScorePublisher;
use stackfall_core::{Game, TickOutcome};

use crate::channels::{ChannelSink, CONTROLS};
use crate::display::GameDisplay;

/// Game task - runs forever, one frame per tick
#[embassy_executor::task]
pub async fn game_task(mut display: GameDisplay) {
    info!("Game task started");

    let mut game = Game::new();
    let mut scores = ScorePublisher::new(ChannelSink);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        let outcome = game.tick(&CONTROLS, &mut display, &mut scores);

        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {:?}", e);
        }

        match outcome {
            TickOutcome::Descending { row } => {
                trace!("{:?} at row {}", game.kind(), row);
            }
            TickOutcome::Landed {
                rest_row,
                lines_cleared,
                score,
            } => {
                debug!(
                    "Piece landed at row {}, {} lines cleared, score {}",
                    rest_row, lines_cleared, score
                );
            }
            TickOutcome::GameOver { final_score } => {
                info!(
                    "Game over: final score {} ({} sessions, {} lines, {} reports dropped, {} draw errors)",
                    final_score,
                    game.sessions(),
                    game.lines_cleared(),
                    scores.dropped(),
                    game.display_errors()
                );
            }
        }

        ticker.next().await;
    }
}
