//! Inter-task communication
//!
//! Defines the statics shared between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use stackfall_core::input::Controls;
use stackfall_core::score::{ScoreReport, ScoreSink};

/// Score reports waiting for the link; a full slot drops new offers
const SCORE_CHANNEL_SIZE: usize = 1;

/// Column and variation requests from the buttons
pub static CONTROLS: Controls = Controls::new();

/// Score reports from the game loop to the score link
pub static SCORE_CHANNEL: Channel<CriticalSectionRawMutex, ScoreReport, SCORE_CHANNEL_SIZE> =
    Channel::new();

/// Game-side handle on `SCORE_CHANNEL`
pub struct ChannelSink;

impl ScoreSink for ChannelSink {
    fn try_send(&mut self, report: ScoreReport) -> bool {
        SCORE_CHANNEL.try_send(report).is_ok()
    }
}
