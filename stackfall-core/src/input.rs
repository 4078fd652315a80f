//! Button input handling
//!
//! Each button runs a persistent debouncer: a press is accepted only when
//! the button is idle, after which it is blocked for the refractory window.
//! Presses that arrive while blocked are dropped, not queued.
//!
//! Accepted presses bump one of the two shared control counters. The game
//! loop reads both counters once per tick.

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

use crate::piece::Variation;

/// Debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Ready to accept a press
    Idle,
    /// Ignoring presses until the deadline (ms)
    Blocked { until_ms: u64 },
}

/// Refractory-window debouncer for one input
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: DebounceState,
    refractory_ms: u64,
}

impl Debouncer {
    pub const fn new(refractory_ms: u64) -> Self {
        Self {
            state: DebounceState::Idle,
            refractory_ms,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Release the block once the deadline has passed
    pub fn poll(&mut self, now_ms: u64) -> DebounceState {
        if let DebounceState::Blocked { until_ms } = self.state {
            if now_ms >= until_ms {
                self.state = DebounceState::Idle;
            }
        }
        self.state
    }

    /// Register a raw press at `now_ms`
    ///
    /// Returns true if the press is accepted and should mutate state.
    pub fn signal(&mut self, now_ms: u64) -> bool {
        match self.poll(now_ms) {
            DebounceState::Idle => {
                self.state = DebounceState::Blocked {
                    until_ms: now_ms.saturating_add(self.refractory_ms),
                };
                true
            }
            DebounceState::Blocked { .. } => false,
        }
    }
}

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Shift the piece one column
    Move,
    /// Advance the piece variation
    Rotate,
}

/// Control counters shared between button tasks and the game loop
///
/// The column counter is unbounded; the game loop decides which requested
/// columns are legal. The variation counter wraps at 4.
#[derive(Debug)]
pub struct Controls {
    column: AtomicU32,
    variation: AtomicU8,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub const fn new() -> Self {
        Self {
            column: AtomicU32::new(0),
            variation: AtomicU8::new(0),
        }
    }

    /// Request the piece one column further along
    pub fn nudge(&self) {
        let _ = self
            .column
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| c.checked_add(1));
    }

    /// Advance the variation, wrapping 3 -> 0
    pub fn rotate(&self) {
        let _ = self
            .variation
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(Variation::new(v).next().index())
            });
    }

    /// Apply an accepted press
    pub fn apply(&self, action: ButtonAction) {
        match action {
            ButtonAction::Move => self.nudge(),
            ButtonAction::Rotate => self.rotate(),
        }
    }

    /// Put the column request back to 0 for a fresh piece
    pub fn reset_column(&self) {
        self.column.store(0, Ordering::Release);
    }

    /// Requested column
    pub fn column(&self) -> u32 {
        self.column.load(Ordering::Acquire)
    }

    /// Requested variation
    pub fn variation(&self) -> Variation {
        Variation::new(self.variation.load(Ordering::Acquire))
    }
}

/// One button: its debouncer and the action it triggers
#[derive(Debug, Clone)]
pub struct Button {
    action: ButtonAction,
    debouncer: Debouncer,
}

impl Button {
    pub const fn new(action: ButtonAction, refractory_ms: u64) -> Self {
        Self {
            action,
            debouncer: Debouncer::new(refractory_ms),
        }
    }

    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Handle a raw press edge, updating `controls` if it is accepted
    pub fn press(&mut self, now_ms: u64, controls: &Controls) -> bool {
        let accepted = self.debouncer.signal(now_ms);
        if accepted {
            controls.apply(self.action);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFRACTORY_MS;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = Debouncer::new(REFRACTORY_MS);
        assert!(debouncer.signal(1_000));
        assert_eq!(
            debouncer.state(),
            DebounceState::Blocked { until_ms: 1_000 + REFRACTORY_MS }
        );
    }

    #[test]
    fn test_presses_inside_window_dropped() {
        let mut debouncer = Debouncer::new(500);
        assert!(debouncer.signal(0));
        assert!(!debouncer.signal(1));
        assert!(!debouncer.signal(250));
        assert!(!debouncer.signal(499));
        assert!(debouncer.signal(500));
    }

    #[test]
    fn test_poll_releases_block() {
        let mut debouncer = Debouncer::new(500);
        debouncer.signal(100);
        assert!(matches!(debouncer.poll(599), DebounceState::Blocked { .. }));
        assert_eq!(debouncer.poll(600), DebounceState::Idle);
    }

    #[test]
    fn test_variation_wraps() {
        let controls = Controls::new();
        for expected in [1, 2, 3, 0, 1] {
            controls.rotate();
            assert_eq!(controls.variation().index(), expected);
        }
    }

    #[test]
    fn test_column_is_unbounded_until_reset() {
        let controls = Controls::new();
        for _ in 0..25 {
            controls.nudge();
        }
        assert_eq!(controls.column(), 25);
        controls.reset_column();
        assert_eq!(controls.column(), 0);
    }

    #[test]
    fn test_buttons_have_independent_windows() {
        let controls = Controls::new();
        let mut move_button = Button::new(ButtonAction::Move, 500);
        let mut rotate_button = Button::new(ButtonAction::Rotate, 500);

        assert!(move_button.press(0, &controls));
        assert!(rotate_button.press(10, &controls));
        assert!(!move_button.press(20, &controls));
        assert!(!rotate_button.press(30, &controls));

        assert_eq!(controls.column(), 1);
        assert_eq!(controls.variation().index(), 1);

        assert!(move_button.press(500, &controls));
        assert!(!rotate_button.press(500, &controls));
        assert!(rotate_button.press(510, &controls));
        assert_eq!(controls.column(), 2);
        assert_eq!(controls.variation().index(), 2);
    }
}
