//! Board-agnostic game logic for the Stackfall firmware
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - Grid of cells and the four-piece catalog
//! - Collision, placement and line-clear rules
//! - The per-tick game state machine and session scoring
//! - Input debouncing and the shared control counters
//! - Score publishing and the display abstraction the game draws through

#![no_std]
#![deny(unsafe_code)]

pub mod collision;
pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod line_clear;
pub mod piece;
pub mod render;
pub mod score;
pub mod traits;

pub use game::{Game, TickOutcome};
pub use grid::{Cell, Grid};
pub use piece::{Piece, PieceKind, Variation};
