//! Score publishing
//!
//! The game loop hands scores to a sink that must never block. When the
//! sink is full the offer is dropped; the publisher only keeps count.

pub use stackfall_protocol::{ScoreKind, ScoreReport};

/// Non-blocking destination for score reports
pub trait ScoreSink {
    /// Offer a report
    ///
    /// Returns `true` if the sink accepted it, `false` if it was dropped.
    fn try_send(&mut self, report: ScoreReport) -> bool;
}

/// A sink that discards everything, for running the game headless
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn try_send(&mut self, _report: ScoreReport) -> bool {
        true
    }
}

/// Hands scores to a sink and tracks drops
#[derive(Debug)]
pub struct ScorePublisher<S> {
    sink: S,
    sent: u32,
    dropped: u32,
}

impl<S: ScoreSink> ScorePublisher<S> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            sent: 0,
            dropped: 0,
        }
    }

    /// Offer a report, returning whether it was accepted
    pub fn publish(&mut self, report: ScoreReport) -> bool {
        let accepted = self.sink.try_send(report);
        if accepted {
            self.sent = self.sent.saturating_add(1);
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
        accepted
    }

    /// Reports accepted by the sink
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Reports dropped because the sink was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Single-slot sink holding the latest unread report, for tests and
/// host simulation
#[derive(Debug, Clone, Default)]
pub struct SlotSink {
    slot: Option<ScoreReport>,
}

impl SlotSink {
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Consume the pending report, freeing the slot
    pub fn take(&mut self) -> Option<ScoreReport> {
        self.slot.take()
    }

    pub fn peek(&self) -> Option<&ScoreReport> {
        self.slot.as_ref()
    }
}

impl ScoreSink for SlotSink {
    fn try_send(&mut self, report: ScoreReport) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(report);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_slot_drops_offer() {
        let mut publisher = ScorePublisher::new(SlotSink::new());

        assert!(publisher.publish(ScoreReport::running(4)));
        assert!(!publisher.publish(ScoreReport::running(8)));
        assert_eq!(publisher.sent(), 1);
        assert_eq!(publisher.dropped(), 1);

        // The first report is the one kept
        assert_eq!(publisher.sink_mut().take(), Some(ScoreReport::running(4)));
        assert!(publisher.publish(ScoreReport::final_score(8)));
        assert_eq!(publisher.sink().peek(), Some(&ScoreReport::final_score(8)));
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut publisher = ScorePublisher::new(NullSink);
        for score in 0..10 {
            assert!(publisher.publish(ScoreReport::running(score)));
        }
        assert_eq!(publisher.dropped(), 0);
    }
}
