//! Hardware abstraction traits
//!
//! These traits define the interface between the game logic and the
//! board-specific display implementation.

pub mod display;

pub use display::{Color, DisplayBackend, DisplayError, DisplayExt};
